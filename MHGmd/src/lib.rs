//! # MHGmd
//!
//! A pure-Rust library for reading, editing, and rebuilding the `.gmd`
//! message files of Monster Hunter Generations and Generations Ultimate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mhgmd::formats::gmd::{GmdLoad, read_gmd, write_gmd};
//!
//! let GmdLoad::Parsed(mut doc) = read_gmd("q0000101_eng.gmd")? else {
//!     panic!("not a GMD file");
//! };
//!
//! for label in doc.labels() {
//!     println!("{:05} {}: {}", label.text_id(), label.display_name(), label.text());
//! }
//!
//! doc.set_text(0, "Slay a Great Jaggi")?;
//! write_gmd("q0000101_eng.gmd", &mut doc)?;
//! # Ok::<(), mhgmd::Error>(())
//! ```
//!
//! ### Exporting for translation
//!
//! ```no_run
//! use mhgmd::prelude::*;
//!
//! let doc = read_gmd("armor_eng.gmd")?.into_document();
//! let options = ExportOptions { include_id: false, include_name: true };
//! export_to_path(&doc, "armor_eng.csv", options)?;
//! # Ok::<(), mhgmd::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `mhgmd` command-line binary

pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::gmd::{
        EntryTable, ExportOptions, GmdDocument, GmdHeader, GmdLoad, GmdSummary, GmdVersion,
        ImportMode, ImportResult, Label, Language, MergeResult, ReplaceResult, decode_gmd,
        export_lines, export_to_path, import_from_path, import_lines, parse_gmd_bytes, read_gmd,
        serialize_gmd, write_gmd,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
