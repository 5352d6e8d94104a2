//! Name and text tables
//!
//! Both tables are runs of null-terminated UTF-8 strings. Names exist only
//! for the first `label_count` texts.

use super::primitives::{read_null_terminated, remaining_len};
use super::{GmdHeader, Label, unnamed_label};
use crate::error::{Error, Result};
use byteorder::WriteBytesExt;
use std::io::{BufRead, Seek, Write};

/// Names read from (or made up for) the name table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(super) struct NameTable {
    pub names: Vec<String>,
    /// The file had no name table and the names were generated
    pub synthesized: bool,
}

/// Read `label_count` names, or generate `unnamed_NNNNN` names when the
/// header declares an empty name table.
///
/// Every name takes at least one byte and every text after it at least one
/// more, so neither count is trusted beyond the bytes left in the stream.
pub(super) fn read_names<R: BufRead + Seek>(
    reader: &mut R,
    header: &GmdHeader,
) -> Result<NameTable> {
    let remaining = remaining_len(reader)? as usize;
    let count = (header.label_count as usize).min(remaining);

    if header.label_size == 0 {
        return Ok(NameTable {
            names: (0..count).map(unnamed_label).collect(),
            synthesized: true,
        });
    }

    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        if at_end(reader)? {
            tracing::warn!(
                "Name table ended after {} of {} names",
                names.len(),
                header.label_count
            );
            break;
        }
        names.push(read_null_terminated(reader)?);
    }

    Ok(NameTable {
        names,
        synthesized: false,
    })
}

/// Read up to `section_count` texts and pair them with their names.
///
/// Reading stops at the end of the stream, so a short text table yields
/// fewer labels than the header declares.
pub(super) fn read_labels<R: BufRead + Seek>(
    reader: &mut R,
    header: &GmdHeader,
    names: &[String],
) -> Result<Vec<Label>> {
    let count = header.section_count as usize;
    let mut labels = Vec::with_capacity(count.min(remaining_len(reader)? as usize));

    for text_id in 0..count {
        if at_end(reader)? {
            tracing::warn!("Text table ended after {} of {} texts", text_id, count);
            break;
        }
        let text = read_null_terminated(reader)?;
        let name = names.get(text_id).cloned().unwrap_or_default();
        labels.push(Label::new(name, text, text_id));
    }

    Ok(labels)
}

/// Write strings back to back, each with a terminator.
///
/// Returns the number of bytes written.
pub(super) fn write_string_table<'a, W, I>(writer: &mut W, strings: I) -> Result<u32>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let mut size = 0u32;
    for string in strings {
        writer.write_all(string.as_bytes())?;
        writer.write_u8(0)?;
        size = add_string_size(size, string.len())?;
    }
    Ok(size)
}

/// `size` plus a string of `len` bytes and its terminator
fn add_string_size(size: u32, len: usize) -> Result<u32> {
    u32::try_from(len)
        .ok()
        .and_then(|len| size.checked_add(len))
        .and_then(|size| size.checked_add(1))
        .ok_or(Error::TableTooLarge)
}

fn at_end<R: BufRead>(reader: &mut R) -> Result<bool> {
    Ok(reader.fill_buf()?.is_empty())
}
