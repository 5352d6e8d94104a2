//! `.gmd` file writing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::GmdDocument;
use super::entries::write_entries;
use super::header::{write_header, write_internal_name};
use super::tables::write_string_table;
use super::{HEADER_SIZE, Label};
use crate::error::{Error, Result};
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

impl GmdDocument {
    /// Encode the document into `writer`, starting at offset 0.
    ///
    /// The body is written first, then the header with the recomputed
    /// name/text table sizes, which are also stored back into the document.
    ///
    /// # Errors
    /// Returns [`Error::DocumentNotLoaded`] for an unloaded document, or an
    /// IO error from the writer.
    pub fn save_to<W: Write + Seek>(&mut self, writer: &mut W) -> Result<()> {
        let Some(mut header) = self.header else {
            return Err(Error::DocumentNotLoaded);
        };
        header.name_size =
            u32::try_from(self.internal_name.len()).map_err(|_| Error::TableTooLarge)?;
        header.section_count =
            u32::try_from(self.labels.len()).map_err(|_| Error::TableTooLarge)?;

        writer.seek(SeekFrom::Start(HEADER_SIZE + u64::from(header.name_size) + 1))?;
        write_entries(writer, &self.entries)?;

        header.label_size = if self.names_synthesized {
            0
        } else {
            write_string_table(writer, self.names.iter().map(String::as_str))?
        };
        header.section_size = write_string_table(writer, self.labels.iter().map(Label::text))?;

        writer.seek(SeekFrom::Start(0))?;
        write_header(writer, &header)?;
        write_internal_name(writer, &self.internal_name)?;
        writer.flush()?;

        tracing::debug!(
            "Wrote GMD: label size {}, section size {}",
            header.label_size,
            header.section_size
        );
        self.header = Some(header);
        Ok(())
    }
}

/// Serialize a GMD document to bytes
pub fn serialize_gmd(doc: &mut GmdDocument) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    doc.save_to(&mut cursor)?;
    Ok(cursor.into_inner())
}

/// Write a .gmd file to disk
///
/// The file is written next to the destination and renamed over it once
/// complete, so a failed save leaves any existing file untouched.
///
/// # Errors
/// Returns an error if the document is not loaded or file writing fails.
pub fn write_gmd<P: AsRef<Path>>(path: P, doc: &mut GmdDocument) -> Result<()> {
    let path = path.as_ref();
    tracing::info!("Writing GMD: {:?}", path);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::NamedTempFile::new_in(dir)?;

    let mut writer = BufWriter::new(temp);
    doc.save_to(&mut writer)?;
    let temp = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
