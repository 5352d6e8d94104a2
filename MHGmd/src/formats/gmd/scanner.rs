//! Locating the opaque block of version 2 files
//!
//! Version 2 files carry a block between the entry table and the name table
//! whose length is not stored anywhere. It is found by its shape: a run of
//! small little-endian words (and `0xFFFFFFFF` markers), then zero padding,
//! up to the first byte of the name table.

use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Words at or above this value (other than [`MARKER`]) end the block
pub const WORD_LIMIT: u32 = 0x100000;

/// Word that never ends the block
pub const MARKER: u32 = 0xFFFF_FFFF;

/// Find and read the opaque block starting at the current position.
///
/// On return the stream sits at the first byte after the block.
pub fn scan_unknown_block<R: Read + Seek>(reader: &mut R) -> Result<Vec<u8>> {
    let start = reader.stream_position()?;

    loop {
        let word_start = reader.stream_position()?;
        match reader.read_u32::<LittleEndian>() {
            Ok(word) if word < WORD_LIMIT || word == MARKER => {}
            Ok(_) => {
                reader.seek(SeekFrom::Start(word_start))?;
                break;
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                tracing::warn!("Stream ended while scanning the unknown block");
                reader.seek(SeekFrom::Start(word_start))?;
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    loop {
        match reader.read_u8() {
            Ok(0) => {}
            Ok(_) => {
                reader.seek(SeekFrom::Current(-1))?;
                break;
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        }
    }

    let end = reader.stream_position()?;
    tracing::debug!("Unknown block: {} bytes at {:#x}", end - start, start);

    reader.seek(SeekFrom::Start(start))?;
    let mut block = vec![0u8; (end - start) as usize];
    reader.read_exact(&mut block)?;
    Ok(block)
}
