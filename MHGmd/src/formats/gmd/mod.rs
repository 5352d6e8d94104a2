//! .gmd text resource format
//!
//! Binary container for the message tables of Monster Hunter Generations
//! and Generations Ultimate. A file holds a fixed header, an internal name,
//! a version-dependent entry table, an opaque block (version 2 only), a
//! table of label names and a table of label texts.
//!
//! ```text
//! 0x00  magic "GMD\0"
//! 0x04  version       u32  (0x00010201 = V1, 0x00010302 = V2)
//! 0x08  language      i32
//! 0x0C  unknown       u64
//! 0x14  label count   u32
//! 0x18  section count u32
//! 0x1C  label size    u32  (bytes of the name table)
//! 0x20  section size  u32  (bytes of the text table)
//! 0x24  name size     u32
//! 0x28  internal name, 1 padding byte
//!       entries, [unknown block], names, texts
//! ```

mod document;
mod editor;
mod entries;
mod header;
mod interchange;
mod merge;
mod primitives;
mod reader;
mod scanner;
mod tables;
mod writer;

pub use document::{GmdDocument, GmdSummary};
pub use editor::ReplaceResult;
pub use interchange::{
    ExportOptions, ImportMode, ImportResult, LINE_BREAK_MARKER, export_lines, export_to_path,
    import_from_path, import_lines,
};
pub use merge::MergeResult;
pub use primitives::{peek_bytes, peek_string, read_null_terminated, remaining_len};
pub use reader::{GmdLoad, decode_gmd, parse_gmd_bytes, read_gmd};
pub use scanner::scan_unknown_block;
pub use writer::{serialize_gmd, write_gmd};

use serde::Serialize;

/// "GMD\0" magic signature
pub const GMD_MAGIC: [u8; 4] = *b"GMD\0";

/// Size of the fixed header, up to and excluding the internal name
pub const HEADER_SIZE: u64 = 0x28;

/// Size of a version 1 entry record
pub const ENTRY_V1_SIZE: usize = 8;

/// Size of a version 2 entry record
pub const ENTRY_V2_SIZE: usize = 20;

/// Prefix of the names given to labels of files without a name table
pub const UNNAMED_PREFIX: &str = "unnamed_";

/// Format version tag stored after the magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GmdVersion {
    /// `0x00010201`, 8-byte entries
    V1,
    /// `0x00010302`, 20-byte entries followed by an opaque block
    V2,
    /// Any other tag; no entry layout is known for it
    Unknown(u32),
}

impl GmdVersion {
    pub const V1_TAG: u32 = 0x00010201;
    pub const V2_TAG: u32 = 0x00010302;

    /// The raw value written to the file
    #[must_use]
    pub fn raw(self) -> u32 {
        match self {
            Self::V1 => Self::V1_TAG,
            Self::V2 => Self::V2_TAG,
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<u32> for GmdVersion {
    fn from(raw: u32) -> Self {
        match raw {
            Self::V1_TAG => Self::V1,
            Self::V2_TAG => Self::V2,
            other => Self::Unknown(other),
        }
    }
}

/// Language of the texts in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    Japanese,
    English,
    French,
    Spanish,
    German,
    Italian,
    /// Value outside the known range, kept so it survives a save
    Unknown(i32),
}

impl Language {
    /// The raw value written to the file
    #[must_use]
    pub fn raw(self) -> i32 {
        match self {
            Self::Japanese => 0,
            Self::English => 1,
            Self::French => 2,
            Self::Spanish => 3,
            Self::German => 4,
            Self::Italian => 5,
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<i32> for Language {
    fn from(raw: i32) -> Self {
        match raw {
            0 => Self::Japanese,
            1 => Self::English,
            2 => Self::French,
            3 => Self::Spanish,
            4 => Self::German,
            5 => Self::Italian,
            other => Self::Unknown(other),
        }
    }
}

/// Fixed header at the start of every file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GmdHeader {
    pub version: GmdVersion,
    pub language: Language,
    /// Opaque, preserved as-is
    pub unknown: u64,
    /// Number of named labels (and entry records)
    pub label_count: u32,
    /// Number of texts
    pub section_count: u32,
    /// Byte length of the name table, terminators included. Recomputed on save.
    pub label_size: u32,
    /// Byte length of the text table, terminators included. Recomputed on save.
    pub section_size: u32,
    /// Byte length of the internal name
    pub name_size: u32,
}

/// Version 1 entry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryV1 {
    pub id: u32,
    pub unknown: u32,
}

/// Version 2 entry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryV2 {
    pub id: u32,
    pub unknown1: u32,
    pub unknown2: u32,
    pub label_offset: u32,
    pub unknown3: u32,
}

/// The entry table of a file, in the layout selected by its version.
///
/// Entries are carried through a load/save cycle untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTable {
    V1(Vec<EntryV1>),
    V2 {
        entries: Vec<EntryV2>,
        /// Opaque bytes between the entries and the name table
        unknown_block: Vec<u8>,
    },
    /// The version has no known layout; nothing was read and nothing is written.
    Unsupported { version: u32 },
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::V1(Vec::new())
    }
}

impl EntryTable {
    /// Number of entry records
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::V1(entries) => entries.len(),
            Self::V2 { entries, .. } => entries.len(),
            Self::Unsupported { .. } => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The opaque version 2 block, if any
    #[must_use]
    pub fn unknown_block(&self) -> Option<&[u8]> {
        match self {
            Self::V2 { unknown_block, .. } => Some(unknown_block),
            _ => None,
        }
    }
}

/// One text record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    name: String,
    text: String,
    text_id: usize,
}

impl Label {
    pub(crate) fn new(name: String, text: String, text_id: usize) -> Self {
        Self {
            name,
            text,
            text_id,
        }
    }

    /// Label name, empty for texts past the named labels
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of the label in the text table
    #[must_use]
    pub fn text_id(&self) -> usize {
        self.text_id
    }

    /// The name, or `unnamed_NNNNN` (1-based) when the label has none
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            unnamed_label(self.text_id + 1)
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// `unnamed_` followed by `index` zero-padded to five digits
#[must_use]
pub fn unnamed_label(index: usize) -> String {
    format!("{UNNAMED_PREFIX}{index:05}")
}
