use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{
    decode_floats, decode_frame, FrameConfig, ResponseMode, CHECKSUM_SIZE, FLOAT_SIZE, HEADER_SIZE,
};
use crate::error::{FrameError, Result};

const READ_CHUNK_SIZE: usize = 64;

/// Upper bound on bytes discarded by one [`ResponseReader::drain`] call.
const MAX_DRAIN_BYTES: usize = 4096;

/// Reads fixed-size responses from any `Read` stream.
///
/// The response size is always known from the command that was issued, so
/// every read asks for an exact byte count. A stream that times out or closes
/// before delivering it yields [`FrameError::ShortRead`].
pub struct ResponseReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> ResponseReader<T> {
    /// Create a new response reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new response reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
            config,
        }
    }

    /// Read exactly `len` bytes (blocking, bounded by the stream's timeout).
    ///
    /// Bytes from a short read are discarded along with the failed response.
    pub fn read_exact_bytes(&mut self, len: usize) -> Result<BytesMut> {
        self.buf.clear();
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        while self.buf.len() < len {
            let want = (len - self.buf.len()).min(READ_CHUNK_SIZE);
            let read = match self.inner.read(&mut chunk[..want]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
                {
                    0
                }
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                let received = self.buf.len();
                self.buf.clear();
                return Err(FrameError::ShortRead {
                    expected: len,
                    received,
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }

        trace!(bytes = ?self.buf.as_ref(), "response bytes");
        Ok(self.buf.split_to(len))
    }

    /// Discard whatever the stream delivers until it times out or closes
    /// (at most 4 KiB per call). Returns the discarded count.
    ///
    /// After a failed response the rest of it may still arrive; it must not be
    /// read as the answer to the next request.
    pub fn drain(&mut self) -> Result<usize> {
        self.buf.clear();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut discarded = 0usize;

        while discarded < MAX_DRAIN_BYTES {
            match self.inner.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => discarded += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) =>
                {
                    break
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        trace!(discarded, "stale response bytes drained");
        Ok(discarded)
    }

    /// Read the response to `command`: `count` little-endian floats.
    ///
    /// In [`ResponseMode::Framed`] the floats must arrive wrapped in a frame
    /// that echoes `command` and carries a valid checksum.
    pub fn read_floats(&mut self, command: u8, count: usize) -> Result<Vec<f32>> {
        let payload_len = count * FLOAT_SIZE;
        match self.config.response_mode {
            ResponseMode::Raw => {
                let raw = self.read_exact_bytes(payload_len)?;
                decode_floats(&raw, count)
            }
            ResponseMode::Framed => {
                let mut raw = self.read_exact_bytes(HEADER_SIZE + payload_len + CHECKSUM_SIZE)?;
                let declared = usize::from(raw[2]);
                // A complete read leaves the frame unfinished only when its
                // length field claims more payload than the command returns.
                let frame = decode_frame(&mut raw)?.ok_or(FrameError::LengthMismatch {
                    expected: payload_len,
                    actual: declared,
                })?;
                if frame.command != command {
                    return Err(FrameError::UnexpectedCommand {
                        expected: command,
                        actual: frame.command,
                    });
                }
                decode_floats(&frame.payload, count)
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Switch the expected response layout for subsequent reads.
    pub fn set_response_mode(&mut self, mode: ResponseMode) {
        self.config.response_mode = mode;
    }

    /// Current response reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
