//! `docmerge_core` merges a structured data record into a `.docx` template.
//! Templates mark dynamic text with `<key>` placeholders, fill table rows
//! from row data, and mark the logo position with a literal `[logo]` in a
//! header paragraph.
//!
//! ## Processing Pipeline
//!
//! ```text
//! docmerge.toml (optional)
//!   -> MergeJob (resolves the data file, template, logo and output paths)
//!   -> DataRecord::load (XML, JSON, TOML or YAML into a typed record)
//!   -> DocxDocument::open + LogoImage::open
//!   -> paragraph pass (first placeholder key of each body paragraph)
//!   -> table pass (rows after the header row, value1/value2 by column parity)
//!   -> logo pass (header paragraphs containing the marker)
//!   -> atomic save of the merged document
//! ```
//!
//! ## Placeholder Vocabulary
//!
//! | key              | value                                           |
//! |------------------|-------------------------------------------------|
//! | `name`           | customer name                                   |
//! | `data1`..`data4` | entries of the data section                     |
//! | `birthplace`     | customer birthplace                             |
//! | `birthday`       | `YYYY.MM.DD.` for ISO date-times, else verbatim |
//! | `date`           | today as `YYYY.MM.DD.`                          |
//! | `order_status`   | `not placed`, `placed` or `delivered`           |
//!
//! Any other key resolves to `Unknown`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docmerge_core::MergeJob;
//! use docmerge_core::SystemClock;
//! use std::path::Path;
//!
//! let job = MergeJob::discover(Path::new(".")).unwrap();
//! let report = job.run(&SystemClock).unwrap();
//! println!("{} paragraph(s) merged", report.paragraphs);
//! ```

pub use clock::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use job::*;
pub use logo::*;
pub use record::*;
pub use resolver::*;

mod clock;
pub mod config;
pub mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
mod job;
mod logo;
pub mod pattern;
mod record;
mod resolver;

#[cfg(test)]
mod __fixtures;
