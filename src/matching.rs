//! Cross-referencing department names against paper author lists.
//!
//! Paper authors are first flattened into [`AuthorEntry`] lists, either every
//! author slot or just the first author of each paper. Each canonical name is
//! then expanded into its variants and compared against every entry by exact,
//! case-sensitive string equality.
//!
//! When a name matches more than one paper, the title recorded is the one
//! scanned last: variants are tried in order, and entries in list order
//! within each variant. Earlier matches are overwritten, not accumulated.

use crate::models::{AuthorEntry, AuthorPapers, PaperRecord};
use crate::names::{NameError, name_variants};
use tracing::{debug, instrument, warn};

/// Every author of every paper, in paper order then author order.
pub fn all_author_entries(papers: &[PaperRecord]) -> Vec<AuthorEntry<'_>> {
    papers
        .iter()
        .enumerate()
        .flat_map(|(paper, record)| {
            record
                .authors
                .iter()
                .map(move |author| AuthorEntry { paper, author })
        })
        .collect()
}

/// The first author of every paper. Papers without authors are skipped.
pub fn first_author_entries(papers: &[PaperRecord]) -> Vec<AuthorEntry<'_>> {
    papers
        .iter()
        .enumerate()
        .filter_map(|(paper, record)| match record.first_author() {
            Some(author) => Some(AuthorEntry { paper, author }),
            None => {
                warn!(id = %record.id, "Paper has no authors");
                None
            }
        })
        .collect()
}

/// Map each name to the title of the last paper whose entries match one of its variants.
///
/// Names without a match are left out. Fails on the first name that cannot
/// be expanded.
#[instrument(level = "info", skip_all, fields(entries = entries.len(), names = names.len()))]
pub fn cross_reference(
    entries: &[AuthorEntry<'_>],
    names: &[String],
    papers: &[PaperRecord],
) -> Result<AuthorPapers, NameError> {
    let mut matches = AuthorPapers::new();

    for name in names {
        for variant in name_variants(name)? {
            for entry in entries.iter().filter(|e| e.author == variant) {
                let title = &papers[entry.paper].title;
                debug!(%name, %variant, paper = entry.paper, %title, "Matched author");
                matches.insert(name.clone(), title.clone());
            }
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, authors: &[&str]) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_flattening() {
        let papers = vec![
            paper("Paper A", &["j. smith", "bob jones"]),
            paper("Empty", &[]),
            paper("Paper B", &["bob jones"]),
        ];

        let all = all_author_entries(&papers);
        assert_eq!(
            all,
            vec![
                AuthorEntry { paper: 0, author: "j. smith" },
                AuthorEntry { paper: 0, author: "bob jones" },
                AuthorEntry { paper: 2, author: "bob jones" },
            ]
        );

        let first = first_author_entries(&papers);
        assert_eq!(
            first,
            vec![
                AuthorEntry { paper: 0, author: "j. smith" },
                AuthorEntry { paper: 2, author: "bob jones" },
            ]
        );
    }

    #[test]
    fn test_initial_variant_matches() {
        let papers = vec![paper("Paper A", &["j. smith", "bob jones"])];
        let names = vec!["jane smith".to_string()];

        let result = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result["jane smith"], "Paper A");
    }

    #[test]
    fn test_unmatched_names_are_absent() {
        let papers = vec![paper("Paper A", &["bob jones"])];
        let names = vec!["jane smith".to_string()];

        let result = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_matching_is_exact_and_case_sensitive() {
        let papers = vec![paper("Paper A", &["J. Smith", "j. smithson", "dr. j. smith"])];
        let names = vec!["jane smith".to_string()];

        let result = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_last_scanned_paper_wins() {
        let papers = vec![
            paper("Paper A", &["jane smith"]),
            paper("Paper B", &["jane smith"]),
        ];
        let names = vec!["jane smith".to_string()];

        let result = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap();
        assert_eq!(result["jane smith"], "Paper B");
    }

    #[test]
    fn test_later_variant_overwrites_earlier_variant() {
        // "jane smith" is tried before "smith, jane", so Paper A is overwritten.
        let papers = vec![
            paper("Paper A", &["smith, jane"]),
            paper("Paper B", &["jane smith"]),
        ];
        let names = vec!["jane smith".to_string()];

        let result = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap();
        assert_eq!(result["jane smith"], "Paper A");
    }

    #[test]
    fn test_first_author_restriction() {
        let papers = vec![
            paper("Paper A", &["bob jones", "j. smith"]),
            paper("Paper B", &["j. smith"]),
            paper("Paper C", &["bob jones"]),
        ];
        let names = vec!["jane smith".to_string(), "bob jones".to_string()];

        let first = cross_reference(&first_author_entries(&papers), &names, &papers).unwrap();
        assert_eq!(first["jane smith"], "Paper B");
        assert_eq!(first["bob jones"], "Paper C");
    }

    #[test]
    fn test_unexpandable_name_fails() {
        let papers = vec![paper("Paper A", &["j. smith"])];
        let names = vec!["jane smith".to_string(), "mary anne van der berg".to_string()];

        let err = cross_reference(&all_author_entries(&papers), &names, &papers).unwrap_err();
        assert!(matches!(err, NameError::UnsupportedTokenCount { tokens: 5, .. }));
    }
}
