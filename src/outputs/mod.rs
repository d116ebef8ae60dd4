//! Output generation for the cross-reference results.
//!
//! # Submodules
//!
//! - [`json`]: Writes the first-author and all-author mappings as JSON files
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── first_authors_2024-10-08.json
//! └── authors_2024-10-08.json
//! ```

pub mod json;
