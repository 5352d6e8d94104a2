//! GMD header and internal name
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{GMD_MAGIC, GmdHeader, GmdVersion, Language};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

/// Read the 0x28-byte header. The magic is consumed but not checked here.
pub(super) fn read_header<R: Read>(reader: &mut R) -> Result<GmdHeader> {
    let eof = || Error::eof_as("GMD header");

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(eof())?;

    let version = GmdVersion::from(reader.read_u32::<LittleEndian>().map_err(eof())?);
    let language = Language::from(reader.read_i32::<LittleEndian>().map_err(eof())?);
    let unknown = reader.read_u64::<LittleEndian>().map_err(eof())?;
    let label_count = reader.read_u32::<LittleEndian>().map_err(eof())?;
    let section_count = reader.read_u32::<LittleEndian>().map_err(eof())?;
    let label_size = reader.read_u32::<LittleEndian>().map_err(eof())?;
    let section_size = reader.read_u32::<LittleEndian>().map_err(eof())?;
    let name_size = reader.read_u32::<LittleEndian>().map_err(eof())?;

    Ok(GmdHeader {
        version,
        language,
        unknown,
        label_count,
        section_count,
        label_size,
        section_size,
        name_size,
    })
}

/// Write the 0x28-byte header
pub(super) fn write_header<W: Write>(writer: &mut W, header: &GmdHeader) -> Result<()> {
    writer.write_all(&GMD_MAGIC)?;
    writer.write_u32::<LittleEndian>(header.version.raw())?;
    writer.write_i32::<LittleEndian>(header.language.raw())?;
    writer.write_u64::<LittleEndian>(header.unknown)?;
    writer.write_u32::<LittleEndian>(header.label_count)?;
    writer.write_u32::<LittleEndian>(header.section_count)?;
    writer.write_u32::<LittleEndian>(header.label_size)?;
    writer.write_u32::<LittleEndian>(header.section_size)?;
    writer.write_u32::<LittleEndian>(header.name_size)?;
    Ok(())
}

/// Read the `name_size`-byte internal name and skip the padding byte after it.
///
/// A name cut short by the end of the stream is returned as far as it goes.
pub(super) fn read_internal_name<R: Read + Seek>(reader: &mut R, name_size: u32) -> Result<String> {
    let mut bytes = Vec::with_capacity(name_size as usize);
    reader
        .by_ref()
        .take(u64::from(name_size))
        .read_to_end(&mut bytes)?;

    if bytes.len() < name_size as usize {
        tracing::warn!(
            "Internal name truncated: expected {} bytes, found {}",
            name_size,
            bytes.len()
        );
    }

    reader.seek(SeekFrom::Current(1))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the internal name followed by its padding byte
pub(super) fn write_internal_name<W: Write>(writer: &mut W, name: &str) -> Result<()> {
    writer.write_all(name.as_bytes())?;
    writer.write_u8(0)?;
    Ok(())
}
