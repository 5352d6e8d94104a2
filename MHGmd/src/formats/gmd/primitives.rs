//! Byte-level helpers shared by the GMD table readers

use crate::error::Result;
use std::io::{BufRead, Read, Seek, SeekFrom};

/// Read up to `len` bytes without moving the stream position.
///
/// Returns fewer bytes when the stream ends first.
pub fn peek_bytes<R: Read + Seek>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let start = reader.stream_position()?;
    let mut bytes = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    reader.seek(SeekFrom::Start(start))?;
    Ok(bytes)
}

/// Number of bytes between the current position and the end of the stream
pub fn remaining_len<R: Seek>(reader: &mut R) -> Result<u64> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(start))?;
    Ok(end.saturating_sub(start))
}

/// [`peek_bytes`] decoded as UTF-8
pub fn peek_string<R: Read + Seek>(reader: &mut R, len: usize) -> Result<String> {
    let bytes = peek_bytes(reader, len)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a null-terminated UTF-8 string.
///
/// The terminator is consumed but not returned. A string cut off by the end
/// of the stream is returned as far as it goes; an exhausted stream yields
/// an empty string.
pub fn read_null_terminated<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_until(0, &mut bytes)?;

    if bytes.last() == Some(&0) {
        bytes.pop();
    } else if !bytes.is_empty() {
        tracing::warn!("String of {} bytes ends without a terminator", bytes.len());
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
