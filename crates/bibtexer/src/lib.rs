#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bibtexer
//!
//! bibtexer encodes bibliographic entries as BibTeX. An [`Entry`] holds the common BibTeX
//! [`Fields`], the entry type, the citation key, and any additional fields outside of the fixed
//! schema. An [`Encoder`] writes entries to any [`std::io::Write`] one after another.
//!
//! Schema fields are always written in the same order, additional fields follow sorted by name.
//!
//! ```
//! use bibtexer::{Entry, Fields};
//!
//! let entry = Entry::new("book", "devOpsTroubleshooting")
//!     .with_fields(Fields {
//!         author: vec!["Kyle Rankin".to_owned()],
//!         title: "DevOps Troubleshooting: Linux Server Best Practices".to_owned(),
//!         year: "2012".to_owned(),
//!         ..Fields::default()
//!     })
//!     .with_additional_field("isbn", "9780321832047");
//!
//! let bib = bibtexer::to_string(&entry)?;
//!
//! assert!(bib.starts_with("@book{devOpsTroubleshooting,\n  author = {Kyle Rankin},\n"));
//! assert!(bib.ends_with("  year = {2012},\n  isbn = {9780321832047}\n}\n"));
//! # Ok::<(), bibtexer::Error>(())
//! ```

mod encode;
mod entry;
mod error;
pub mod fields;

pub use encode::{to_string, EncodeBibTeX, Encoder, Value};
pub use entry::Entry;
pub use error::{Error, ErrorKind};
pub use fields::{Field, FieldValue, Fields};
