use anyhow::{Result, bail};
use bincode::config;
use serde::{Serialize, de::DeserializeOwned};
use std::io::{Read, Write};

/// Largest frame either side will encode or accept. Leaves headroom over the
/// host's default whole-file read limit.
pub const MAX_FRAME_LEN: usize = 512 * 1024 * 1024;

/// Largest byte payload that still fits in one frame once the response
/// envelope (variant tag and length prefix) is added.
pub const MAX_BYTES_PAYLOAD: u64 = (MAX_FRAME_LEN - 64) as u64;

/// Read a single length-prefixed bincode message from `reader`.
///
/// Wire format:
///   - 4-byte big-endian length (u32)
///   - that many bytes of bincode payload
pub fn read_message<R, T>(reader: &mut R) -> Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf) as usize;

    if len > MAX_FRAME_LEN {
        bail!("incoming frame of {len} bytes exceeds the {MAX_FRAME_LEN} byte limit");
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    let (msg, _bytes_read): (T, usize) =
        bincode::serde::decode_from_slice(&buf, config::standard())?;
    Ok(msg)
}

/// Write a single length-prefixed bincode message to `writer`.
///
/// Wire format:
///   - 4-byte big-endian length (u32)
///   - bincode payload
pub fn write_message<W, T>(writer: &mut W, msg: &T) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let payload = encode_message(msg, MAX_FRAME_LEN)?;
    write_frame(writer, &payload)
}

/// Encode `msg` as a bincode payload no larger than `limit` bytes.
///
/// Nothing is written on failure, so a caller can still answer with a
/// smaller message.
pub fn encode_message<T: Serialize>(msg: &T, limit: usize) -> Result<Vec<u8>> {
    let bytes = bincode::serde::encode_to_vec(msg, config::standard())?;
    if bytes.len() > limit {
        bail!(
            "outgoing frame of {} bytes exceeds the {limit} byte limit",
            bytes.len()
        );
    }
    Ok(bytes)
}

/// Write an already encoded payload with its length prefix.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len())?;

    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
