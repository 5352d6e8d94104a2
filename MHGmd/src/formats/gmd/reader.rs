//! `.gmd` file reading and parsing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::GmdDocument;
use super::entries::read_entries;
use super::header::{read_header, read_internal_name};
use super::primitives::peek_bytes;
use super::tables::{read_labels, read_names};
use super::GMD_MAGIC;
use crate::error::Result;
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

/// Outcome of decoding a stream
#[derive(Debug, Clone)]
pub enum GmdLoad {
    /// The stream was a GMD file
    Parsed(GmdDocument),
    /// The stream does not start with "GMD\0"; nothing else was read
    UnrecognizedFormat {
        /// The first bytes of the stream (up to 4)
        magic: Vec<u8>,
    },
}

/// Read a .gmd file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
/// Returns [`Error::UnexpectedEof`] if the header or entry table is truncated.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::UnexpectedEof`]: crate::Error::UnexpectedEof
pub fn read_gmd<P: AsRef<Path>>(path: P) -> Result<GmdLoad> {
    tracing::info!("Reading GMD: {:?}", path.as_ref());
    let buffer = std::fs::read(path)?;
    parse_gmd_bytes(&buffer)
}

/// Parse .gmd data from bytes
pub fn parse_gmd_bytes(data: &[u8]) -> Result<GmdLoad> {
    decode_gmd(&mut Cursor::new(data))
}

/// Decode a GMD stream starting at the current position.
///
/// A stream without the "GMD\0" magic is reported as
/// [`GmdLoad::UnrecognizedFormat`], not as an error.
pub fn decode_gmd<R: BufRead + Seek>(reader: &mut R) -> Result<GmdLoad> {
    let magic = peek_bytes(reader, GMD_MAGIC.len())?;
    if magic != GMD_MAGIC {
        tracing::debug!("Not a GMD stream, magic {:02x?}", magic);
        return Ok(GmdLoad::UnrecognizedFormat { magic });
    }

    let header = read_header(reader)?;
    tracing::debug!(
        "GMD {:?} ({:?}): {} labels, {} sections",
        header.version,
        header.language,
        header.label_count,
        header.section_count
    );
    if header.section_count < header.label_count {
        tracing::warn!(
            "Section count {} is below label count {}",
            header.section_count,
            header.label_count
        );
    }

    let internal_name = read_internal_name(reader, header.name_size)?;
    let entries = read_entries(reader, &header)?;
    let names = read_names(reader, &header)?;
    let labels = read_labels(reader, &header, &names.names)?;

    Ok(GmdLoad::Parsed(GmdDocument {
        header: Some(header),
        internal_name,
        entries,
        names: names.names,
        names_synthesized: names.synthesized,
        labels,
    }))
}
