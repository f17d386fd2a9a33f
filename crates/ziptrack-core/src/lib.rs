//! ZIP archive building and extraction with byte-level progress reporting.
//!
//! `ziptrack-core` packs a list of files into a standard ZIP archive, or
//! unpacks one into a directory, reporting two percentages as bytes move: one
//! for the file currently being copied and one for the whole operation.
//!
//! # Examples
//!
//! ```no_run
//! use ziptrack_core::{build, extract};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut on_total = |p: f64| eprintln!("{p:.2}%");
//! let report = build("docs.zip", &["a.txt", "b.txt"], None, Some(&mut on_total), false)?;
//! println!("Added {} files", report.files_added);
//!
//! let report = extract("docs.zip", "restored", None, None, true)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod builder;
pub mod config;
pub mod copy;
pub mod error;
pub mod extractor;
mod lock;
pub mod mode;
pub mod progress;
pub mod report;
pub mod source;
#[doc(hidden)]
pub mod test_utils;
pub mod timestamp;

// Re-export main API types
pub use api::build;
pub use api::build_with_options;
pub use api::extract;
pub use api::extract_with_options;
pub use config::BuildOptions;
pub use config::ExtractOptions;
pub use error::ArchiveError;
pub use error::Result;
pub use mode::ArchiveMode;
pub use progress::ProgressSink;
pub use progress::ProgressSinks;
pub use progress::Transfer;
pub use report::BuildReport;
pub use report::ExtractReport;
pub use source::SourceFile;
pub use source::total_size;
