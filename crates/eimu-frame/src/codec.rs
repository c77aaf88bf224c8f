use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Start marker opening every frame.
pub const START: u8 = 0xBB;

/// Frame header: start (1) + command (1) + length (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Trailing checksum byte.
pub const CHECKSUM_SIZE: usize = 1;

/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// Wire size of one `f32` value.
pub const FLOAT_SIZE: usize = 4;

/// Indexed-write payload: index (1) + `f32` value (4).
pub const INDEXED_PAYLOAD_SIZE: usize = 1 + FLOAT_SIZE;

/// A command frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command id.
    pub command: u8,
    /// Command-specific payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload + checksum).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + CHECKSUM_SIZE
    }

    /// Append the wire form of this frame to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        encode_request(self.command, &self.payload, dst)
    }
}

/// Additive checksum: sum of all bytes modulo 256.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// Encode a request frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌───────┬─────────┬────────┬───────────────┬──────────┐
/// │ Start │ Command │ Length │ Payload       │ Checksum │
/// │ 0xBB  │ (1B)    │ (1B)   │ (Length bytes)│ (1B)     │
/// └───────┴─────────┴────────┴───────────────┴──────────┘
/// ```
///
/// The checksum is the modulo-256 sum of every byte before it.
pub fn encode_request(command: u8, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    let start = dst.len();
    dst.reserve(HEADER_SIZE + payload.len() + CHECKSUM_SIZE);
    dst.put_u8(START);
    dst.put_u8(command);
    dst.put_u8(payload.len() as u8);
    dst.put_slice(payload);
    let sum = checksum(&dst[start..]);
    dst.put_u8(sum);
    Ok(())
}

/// Encode a pure query: a frame with a zero-length payload.
pub fn encode_request_no_payload(command: u8, dst: &mut BytesMut) -> Result<()> {
    encode_request(command, &[], dst)
}

/// Build the indexed-write payload: one index byte followed by a
/// little-endian `f32`.
pub fn encode_indexed(index: u8, value: f32) -> [u8; INDEXED_PAYLOAD_SIZE] {
    let mut out = [0u8; INDEXED_PAYLOAD_SIZE];
    out[0] = index;
    out[1..].copy_from_slice(&value.to_le_bytes());
    out
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. A frame with a bad
/// checksum is rejected and left in the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.is_empty() {
        return Ok(None);
    }

    if src[0] != START {
        return Err(FrameError::InvalidStart(src[0]));
    }

    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let command = src[1];
    let payload_len = src[2] as usize;
    let body = HEADER_SIZE + payload_len;
    if src.len() < body + CHECKSUM_SIZE {
        return Ok(None);
    }

    let expected = checksum(&src[..body]);
    let actual = src[body];
    if expected != actual {
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();
    src.advance(CHECKSUM_SIZE);

    Ok(Some(Frame { command, payload }))
}

/// Reinterpret `raw` as `count` little-endian `f32` values.
///
/// `raw` must hold exactly `4 * count` bytes.
pub fn decode_floats(raw: &[u8], count: usize) -> Result<Vec<f32>> {
    let expected = count * FLOAT_SIZE;
    if raw.len() != expected {
        return Err(FrameError::LengthMismatch {
            expected,
            actual: raw.len(),
        });
    }

    let mut cursor = raw;
    let mut values = Vec::with_capacity(count);
    while cursor.has_remaining() {
        values.push(cursor.get_f32_le());
    }
    Ok(values)
}

/// How responses arrive on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Bare little-endian floats with no header or checksum. This is what the
    /// stock firmware sends.
    #[default]
    Raw,
    /// A complete frame echoing the command id, validated by checksum before
    /// the payload is decoded.
    Framed,
}

/// Configuration for the response decoder.
#[derive(Debug, Clone, Default)]
pub struct FrameConfig {
    /// Expected response layout. Default: [`ResponseMode::Raw`].
    pub response_mode: ResponseMode,
}
