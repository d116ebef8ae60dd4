//! Scrapers for the two inputs of a run.
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | arXiv | [`arxiv`] | OAI-PMH `ListRecords` | Paged with resumption tokens |
//! | Department directory | [`directory`] | HTML scraping | One member per table row |
//!
//! Both scrapers take a shared [`reqwest::Client`], fail on non-2xx
//! responses, and keep their parsing in pure functions that can be tested
//! without the network.

pub mod arxiv;
pub mod directory;
