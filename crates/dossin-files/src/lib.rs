//! Local persistence for packaged Dossin components.
//!
//! Every successful compile-and-save writes exactly one `.html` file into
//! a per-user output directory (`~/Downloads/dossin-components` unless
//! configured otherwise) and reports its path, size and content hash.
//!
//! # Examples
//!
//! ```no_run
//! use dossin_core::PackagedDocument;
//! use dossin_files::ComponentStore;
//!
//! # async fn example() -> dossin_core::Result<()> {
//! let store = ComponentStore::new(ComponentStore::default_location());
//! let doc = PackagedDocument::new("<!DOCTYPE html><html></html>");
//!
//! let saved = store.save(&doc, Some("report"), "Report").await?;
//! assert_eq!(saved.file_name, "report.html");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod store;

pub use store::{ComponentStore, OUTPUT_FOLDER};
