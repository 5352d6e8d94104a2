//! Version-dependent entry table

use super::primitives::remaining_len;
use super::scanner::scan_unknown_block;
use super::{ENTRY_V1_SIZE, ENTRY_V2_SIZE, EntryTable, EntryV1, EntryV2, GmdHeader, GmdVersion};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, Write};

/// Read `label_count` entries in the layout selected by the header version.
///
/// Version 2 tables are followed by the opaque block, which is read too.
/// Capacity is bounded by the bytes left in the stream, not by the count.
pub(super) fn read_entries<R: Read + Seek>(
    reader: &mut R,
    header: &GmdHeader,
) -> Result<EntryTable> {
    let count = header.label_count as usize;
    let remaining = remaining_len(reader)? as usize;
    let eof = || Error::eof_as("GMD entry table");

    match header.version {
        GmdVersion::V1 => {
            let mut entries = Vec::with_capacity(count.min(remaining / ENTRY_V1_SIZE));
            for _ in 0..count {
                entries.push(EntryV1 {
                    id: reader.read_u32::<LittleEndian>().map_err(eof())?,
                    unknown: reader.read_u32::<LittleEndian>().map_err(eof())?,
                });
            }
            Ok(EntryTable::V1(entries))
        }
        GmdVersion::V2 => {
            let mut entries = Vec::with_capacity(count.min(remaining / ENTRY_V2_SIZE));
            for _ in 0..count {
                entries.push(EntryV2 {
                    id: reader.read_u32::<LittleEndian>().map_err(eof())?,
                    unknown1: reader.read_u32::<LittleEndian>().map_err(eof())?,
                    unknown2: reader.read_u32::<LittleEndian>().map_err(eof())?,
                    label_offset: reader.read_u32::<LittleEndian>().map_err(eof())?,
                    unknown3: reader.read_u32::<LittleEndian>().map_err(eof())?,
                });
            }
            let unknown_block = scan_unknown_block(reader)?;
            Ok(EntryTable::V2 {
                entries,
                unknown_block,
            })
        }
        GmdVersion::Unknown(version) => {
            tracing::warn!("Unsupported GMD version {:#010x}, entry table skipped", version);
            Ok(EntryTable::Unsupported { version })
        }
    }
}

/// Write the entry table, and for version 2 the opaque block after it
pub(super) fn write_entries<W: Write>(writer: &mut W, table: &EntryTable) -> Result<()> {
    match table {
        EntryTable::V1(entries) => {
            for entry in entries {
                writer.write_u32::<LittleEndian>(entry.id)?;
                writer.write_u32::<LittleEndian>(entry.unknown)?;
            }
        }
        EntryTable::V2 {
            entries,
            unknown_block,
        } => {
            for entry in entries {
                writer.write_u32::<LittleEndian>(entry.id)?;
                writer.write_u32::<LittleEndian>(entry.unknown1)?;
                writer.write_u32::<LittleEndian>(entry.unknown2)?;
                writer.write_u32::<LittleEndian>(entry.label_offset)?;
                writer.write_u32::<LittleEndian>(entry.unknown3)?;
            }
            writer.write_all(unknown_block)?;
        }
        EntryTable::Unsupported { .. } => {}
    }
    Ok(())
}
