//! Error types for `MHGmd`

use thiserror::Error;

/// The error type for `MHGmd` operations.
///
/// A stream that is not a GMD file, or a GMD file whose version has no known
/// entry layout, is not an error: see [`GmdLoad`] and [`EntryTable`].
///
/// [`GmdLoad`]: crate::formats::gmd::GmdLoad
/// [`EntryTable`]: crate::formats::gmd::EntryTable
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file or stream operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== GMD Format Errors ====================
    /// A fixed-size field was cut short by the end of the stream.
    #[error("unexpected end of file while reading {context}")]
    UnexpectedEof {
        /// The field or table being read.
        context: &'static str,
    },

    /// The document was never decoded from a GMD stream.
    #[error("GMD document is not loaded")]
    DocumentNotLoaded,

    /// A string or table does not fit the header's 32-bit size fields.
    #[error("GMD table exceeds the 32-bit size limit")]
    TableTooLarge,

    /// The document has no labels to work with.
    #[error("GMD document has no labels")]
    EmptyDocument,

    // ==================== Editing Errors ====================
    /// A label index outside the document's label list.
    #[error("label index {index} out of range ({count} labels)")]
    LabelIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of labels in the document.
        count: usize,
    },

    /// The number of records does not match the number of labels.
    #[error("record count mismatch: document has {expected} labels, found {found} records")]
    RecordCountMismatch {
        /// The number of labels in the target document.
        expected: usize,
        /// The number of records supplied.
        found: usize,
    },

    /// An interchange line is missing a required field.
    #[error("invalid record on line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number.
        line: usize,
        /// What is wrong with the line.
        message: String,
    },
}

/// A specialized Result type for `MHGmd` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map an IO error from a fixed-size read, turning a short read into
    /// [`Error::UnexpectedEof`] with the field being read.
    pub(crate) fn eof_as(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |err| {
            if err.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::UnexpectedEof { context }
            } else {
                Error::Io(err)
            }
        }
    }
}
