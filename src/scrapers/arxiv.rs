//! arXiv listing scraper over the OAI-PMH interface.
//!
//! Records are harvested with `ListRecords` in the `arXiv` metadata format,
//! restricted to one set (category) and a `from`/`until` date window. Large
//! windows come back in pages; each page ends with a `resumptionToken` that is
//! sent back verbatim to get the next one, until the token is empty.
//!
//! # Record shape
//!
//! ```text
//! <record>
//!   <header>…</header>
//!   <metadata>
//!     <arXiv>
//!       <id>2410.01234</id>
//!       <created>2024-10-01</created>
//!       <authors>
//!         <author><keyname>Smith</keyname><forenames>Jane</forenames></author>
//!       </authors>
//!       <title>…</title>
//!       <categories>astro-ph.GA</categories>
//!       <abstract>…</abstract>
//!     </arXiv>
//!   </metadata>
//! </record>
//! ```

use crate::models::PaperRecord;
use crate::utils::{collapse_whitespace, truncate_for_log};
use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use reqwest::Client;
use std::error::Error;
use std::fmt;
use tracing::{debug, error, info, instrument};
use url::Url;

/// arXiv's OAI-PMH base URL.
pub const DEFAULT_OAI_ENDPOINT: &str = "http://export.arxiv.org/oai2";

/// OAI-PMH set holding the astrophysics listings.
pub const DEFAULT_CATEGORY: &str = "physics:astro-ph";

/// OAI error code for a window that simply has no records.
const NO_RECORDS_MATCH: &str = "noRecordsMatch";

/// An error reported by the OAI-PMH endpoint inside a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OaiError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for OaiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OAI-PMH error {}: {}", self.code, self.message)
    }
}

impl Error for OaiError {}

/// One page of a `ListRecords` harvest.
#[derive(Debug, Default, PartialEq)]
pub struct ListRecordsPage {
    pub records: Vec<PaperRecord>,
    /// Token for the next page; `None` once the list is complete.
    pub resumption_token: Option<String>,
}

/// Fetch every record in `category` listed between `from` and `until`, inclusive.
#[instrument(level = "info", skip(client))]
pub async fn fetch_papers(
    client: &Client,
    endpoint: &str,
    category: &str,
    from: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<PaperRecord>, Box<dyn Error>> {
    let mut papers = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let url = list_records_url(endpoint, category, from, until, token.as_deref())?;
        debug!(%url, "Requesting ListRecords page");

        let body = client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let page = match parse_list_records(&body) {
            Ok(page) => page,
            Err(e) => {
                error!(
                    error = %e,
                    response_preview = %truncate_for_log(&body, 300),
                    "Could not parse ListRecords response"
                );
                return Err(e);
            }
        };

        pages += 1;
        debug!(page = pages, records = page.records.len(), "Parsed ListRecords page");
        papers.extend(page.records);

        match page.resumption_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    info!(count = papers.len(), pages, category, %from, %until, "Scraped arXiv listings");
    Ok(papers)
}

/// Build the request URL for the first page, or for a follow-up page when a
/// resumption token is given.
pub fn list_records_url(
    endpoint: &str,
    category: &str,
    from: NaiveDate,
    until: NaiveDate,
    resumption_token: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("verb", "ListRecords");
        match resumption_token {
            Some(token) => {
                query.append_pair("resumptionToken", token);
            }
            None => {
                query
                    .append_pair("from", &from.format("%Y-%m-%d").to_string())
                    .append_pair("until", &until.format("%Y-%m-%d").to_string())
                    .append_pair("metadataPrefix", "arXiv")
                    .append_pair("set", category);
            }
        }
    }
    Ok(url)
}

#[derive(Default)]
struct AuthorParts {
    keyname: String,
    forenames: String,
    affiliations: Vec<String>,
}

impl AuthorParts {
    fn display_name(&self) -> String {
        let name = if self.forenames.is_empty() {
            self.keyname.clone()
        } else {
            format!("{} {}", self.forenames, self.keyname)
        };
        name.to_lowercase()
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .map(|a| String::from_utf8_lossy(a.value.as_ref()).into_owned())
}

/// Append the text a `&…;` reference stands for.
///
/// Character references and the predefined XML entities are resolved; any
/// other entity is kept as written.
fn push_reference(text: &mut String, r: &BytesRef<'_>) -> Result<(), Box<dyn Error>> {
    if let Some(ch) = r.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = String::from_utf8_lossy(r.as_ref());
    match quick_xml::escape::resolve_predefined_entity(&name) {
        Some(resolved) => text.push_str(resolved),
        None => {
            text.push('&');
            text.push_str(&name);
            text.push(';');
        }
    }
    Ok(())
}

/// Parse one `ListRecords` response body.
///
/// A `noRecordsMatch` error yields an empty page; any other OAI error is
/// returned as [`OaiError`].
pub fn parse_list_records(xml: &str) -> Result<ListRecordsPage, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);

    let mut page = ListRecordsPage::default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut record: Option<PaperRecord> = None;
    let mut author: Option<AuthorParts> = None;
    let mut oai_error: Option<OaiError> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "arXiv" => record = Some(PaperRecord::default()),
                    "author" if record.is_some() => author = Some(AuthorParts::default()),
                    "error" => {
                        oai_error = Some(OaiError {
                            code: attribute(&e, b"code").unwrap_or_default(),
                            message: String::new(),
                        })
                    }
                    _ => {}
                }
                path.push(name);
                text.clear();
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"error" {
                    oai_error = Some(OaiError {
                        code: attribute(&e, b"code").unwrap_or_default(),
                        message: String::new(),
                    });
                }
            }
            Event::Text(t) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
            Event::GeneralRef(r) => push_reference(&mut text, &r)?,
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let value = collapse_whitespace(&text);
                path.pop();
                let parent = path.last().map(String::as_str);

                match (name.as_str(), parent) {
                    ("keyname", Some("author")) => {
                        if let Some(a) = author.as_mut() {
                            a.keyname = value;
                        }
                    }
                    ("forenames", Some("author")) => {
                        if let Some(a) = author.as_mut() {
                            a.forenames = value;
                        }
                    }
                    ("affiliation", Some("author")) => {
                        if let Some(a) = author.as_mut() {
                            a.affiliations.push(value);
                        }
                    }
                    ("author", _) => {
                        if let (Some(a), Some(r)) = (author.take(), record.as_mut()) {
                            r.authors.push(a.display_name());
                            r.affiliation.extend(a.affiliations);
                        }
                    }
                    ("arXiv", _) => {
                        if let Some(mut r) = record.take() {
                            r.url = format!("https://arxiv.org/abs/{}", r.id);
                            page.records.push(r);
                        }
                    }
                    (field, Some("arXiv")) => {
                        if let Some(r) = record.as_mut() {
                            match field {
                                "id" => r.id = value,
                                "title" => r.title = value,
                                "categories" => r.categories = value,
                                "abstract" => r.abstract_text = value,
                                "doi" => r.doi = Some(value),
                                "created" => r.created = value,
                                "updated" => r.updated = Some(value),
                                _ => {}
                            }
                        }
                    }
                    ("resumptionToken", _) => {
                        if !value.is_empty() {
                            page.resumption_token = Some(value);
                        }
                    }
                    ("error", _) => {
                        if let Some(err) = oai_error.as_mut() {
                            err.message = value;
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            _ => {}
        }
    }

    match oai_error {
        Some(err) if err.code == NO_RECORDS_MATCH => {
            debug!(message = %err.message, "Window has no records");
            Ok(ListRecordsPage::default())
        }
        Some(err) => Err(Box::new(err)),
        None => Ok(page),
    }
}
