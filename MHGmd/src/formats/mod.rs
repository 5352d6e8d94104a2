//! File format handlers

pub mod gmd;

// Re-export main document types
pub use gmd::{
    EntryTable, GmdDocument, GmdHeader, GmdLoad, GmdVersion, Label, Language, read_gmd,
    write_gmd,
};
