//! In-memory GMD document

use super::reader::{GmdLoad, decode_gmd};
use super::{EntryTable, GmdHeader, GmdVersion, Label, Language};
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::{BufRead, Seek};

/// A decoded GMD file.
///
/// A document is either unloaded (`GmdDocument::default()`, or the result of
/// [`GmdDocument::from_reader`] on a stream that is not a GMD file) or
/// loaded. The label list keeps its length and order once decoded; only
/// label texts can change.
#[derive(Debug, Clone, Default)]
pub struct GmdDocument {
    pub(super) header: Option<GmdHeader>,
    pub(super) internal_name: String,
    pub(super) entries: EntryTable,
    pub(super) names: Vec<String>,
    /// The file had no name table; names are not written back
    pub(super) names_synthesized: bool,
    pub(super) labels: Vec<Label>,
}

/// Overview of a document, for listings and JSON output
#[derive(Debug, Clone, Serialize)]
pub struct GmdSummary {
    pub version: GmdVersion,
    pub language: Language,
    pub internal_name: String,
    pub label_count: u32,
    pub section_count: u32,
    pub label_size: u32,
    pub section_size: u32,
    pub entry_count: usize,
    pub unknown_block_len: Option<usize>,
    pub has_name_table: bool,
}

impl GmdDocument {
    /// Decode a document, treating a non-GMD stream as an empty document.
    ///
    /// Use [`decode_gmd`] to tell "not a GMD file" apart from a file with no
    /// labels.
    pub fn from_reader<R: BufRead + Seek>(reader: &mut R) -> Result<Self> {
        Ok(decode_gmd(reader)?.into_document())
    }

    /// Whether this document was decoded from a GMD stream
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.header.is_some()
    }

    #[must_use]
    pub fn header(&self) -> Option<&GmdHeader> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn version(&self) -> Option<GmdVersion> {
        self.header.map(|h| h.version)
    }

    #[must_use]
    pub fn language(&self) -> Option<Language> {
        self.header.map(|h| h.language)
    }

    /// Name stored in the header region, unrelated to label names
    #[must_use]
    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    #[must_use]
    pub fn entries(&self) -> &EntryTable {
        &self.entries
    }

    /// Entries of the name table (generated names included)
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of named labels as declared by the header
    #[must_use]
    pub fn label_count(&self) -> usize {
        self.header.map_or(0, |h| h.label_count as usize)
    }

    /// Whether the document has any named label
    #[must_use]
    pub fn has_named_labels(&self) -> bool {
        self.label_count() > 0
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of labels (one per text)
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Summary of a loaded document
    pub fn summary(&self) -> Result<GmdSummary> {
        let header = self.header.ok_or(Error::DocumentNotLoaded)?;
        Ok(GmdSummary {
            version: header.version,
            language: header.language,
            internal_name: self.internal_name.clone(),
            label_count: header.label_count,
            section_count: header.section_count,
            label_size: header.label_size,
            section_size: header.section_size,
            entry_count: self.entries.len(),
            unknown_block_len: self.entries.unknown_block().map(<[u8]>::len),
            has_name_table: !self.names_synthesized,
        })
    }
}

impl GmdLoad {
    /// The decoded document, or an unloaded one for a non-GMD stream
    #[must_use]
    pub fn into_document(self) -> GmdDocument {
        match self {
            GmdLoad::Parsed(doc) => doc,
            GmdLoad::UnrecognizedFormat { .. } => GmdDocument::default(),
        }
    }

    /// The decoded document, if the stream was a GMD file
    #[must_use]
    pub fn document(self) -> Option<GmdDocument> {
        match self {
            GmdLoad::Parsed(doc) => Some(doc),
            GmdLoad::UnrecognizedFormat { .. } => None,
        }
    }
}
