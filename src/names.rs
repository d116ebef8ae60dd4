//! Canonical member names and the author-string variants they are matched by.
//!
//! A canonical name is a lowercase `"first [initial] last"` string built from
//! one row of the department directory. Matching against paper author lists
//! is done on a small, fixed set of renderings of that name:
//!
//! | Canonical        | Variants                                              |
//! |------------------|-------------------------------------------------------|
//! | `jane smith`     | `jane smith`, `j. smith`, `smith, jane`               |
//! | `jane q. smith`  | `jane q. smith`, `j. q. smith`, `j. smith`, `smith, jane` |

use std::error::Error;
use std::fmt;

/// Canonical name the directory uses for its column-header placeholder row.
pub const PLACEHOLDER_NAME: &str = "first last";

/// First word of rows that describe rooms rather than people.
pub const ROOM_WORD: &str = "room";

/// Errors raised while expanding a canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The name does not split into two or three words.
    UnsupportedTokenCount { name: String, tokens: usize },
    /// The first word is empty, so no initial can be taken from it.
    EmptyFirstName { name: String },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::UnsupportedTokenCount { name, tokens } => write!(
                f,
                "cannot expand name {name:?}: expected 2 or 3 words, found {tokens}"
            ),
            NameError::EmptyFirstName { name } => {
                write!(f, "cannot expand name {name:?}: first word is empty")
            }
        }
    }
}

impl Error for NameError {}

/// Cut a directory token at its first comma and lowercase it.
fn name_part(token: &str) -> String {
    token.split(',').next().unwrap_or(token).to_lowercase()
}

/// Build the canonical name for one directory row.
///
/// The row is the whitespace-split token list of a table row, surname first:
///
/// - a hyphen in the first token marks a surname spread over two tokens
///   (`Garcia- Lopez, Ana` → `ana garcia-lopez`)
/// - a period in the second token marks a middle initial
///   (`Smith, Q. Jane` → `jane q. smith`)
/// - anything else is `Last, First` (`Smith, Jane` → `jane smith`)
///
/// Returns `None` when the row is too short for its shape.
pub fn canonical_name<S: AsRef<str>>(tokens: &[S]) -> Option<String> {
    let part = |i: usize| tokens.get(i).map(|t| name_part(t.as_ref()));

    if tokens.first()?.as_ref().contains('-') {
        let last = part(0)? + &part(1)?;
        return Some(format!("{} {}", part(2)?, last));
    }

    if tokens.get(1)?.as_ref().contains('.') {
        return Some(format!("{} {} {}", part(2)?, part(1)?, part(0)?));
    }

    Some(format!("{} {}", part(1)?, part(0)?))
}

/// Whether a canonical name is page furniture rather than a member.
pub fn is_placeholder(name: &str) -> bool {
    name == PLACEHOLDER_NAME || name.split(' ').next() == Some(ROOM_WORD)
}

/// Expand a canonical name into the author strings it may appear as.
///
/// The canonical name itself is always the first variant.
pub fn name_variants(name: &str) -> Result<Vec<String>, NameError> {
    let words: Vec<&str> = name.split(' ').collect();
    let first = words[0];
    let initial = first.chars().next().ok_or_else(|| NameError::EmptyFirstName {
        name: name.to_string(),
    })?;

    match words.as_slice() {
        [first, middle, last] => Ok(vec![
            name.to_string(),
            format!("{initial}. {middle} {last}"),
            format!("{initial}. {last}"),
            format!("{last}, {first}"),
        ]),
        [first, last] => Ok(vec![
            name.to_string(),
            format!("{initial}. {last}"),
            format!("{last}, {first}"),
        ]),
        _ => Err(NameError::UnsupportedTokenCount {
            name: name.to_string(),
            tokens: words.len(),
        }),
    }
}
