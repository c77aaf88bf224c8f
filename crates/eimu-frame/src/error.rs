/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit the one-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The frame does not begin with the start marker.
    #[error("invalid start byte 0x{0:02X} (expected 0xBB)")]
    InvalidStart(u8),

    /// The trailing checksum does not match the frame contents.
    #[error("checksum mismatch (computed 0x{expected:02X}, received 0x{actual:02X})")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// A response frame answered a different command than the one issued.
    #[error("response for command 0x{actual:02X}, expected 0x{expected:02X}")]
    UnexpectedCommand { expected: u8, actual: u8 },

    /// Byte count does not match the number of floats requested.
    #[error("expected {expected} payload bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The transport delivered fewer bytes than the response requires before
    /// timing out or closing.
    #[error("short read ({received} of {expected} bytes)")]
    ShortRead { expected: usize, received: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device stopped accepting bytes.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for faults after which the link is usable again once pending
    /// input has been drained.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FrameError::ShortRead { .. }
                | FrameError::ChecksumMismatch { .. }
                | FrameError::InvalidStart(_)
                | FrameError::UnexpectedCommand { .. }
                | FrameError::LengthMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
