use crate::command::{Command, RequestShape};

/// Errors that can occur in device operations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Transport-level error (opening or configuring the port).
    #[error("transport error: {0}")]
    Transport(#[from] eimu_transport::TransportError),

    /// Frame-level error: encoding, short read, checksum, I/O.
    #[error("frame error: {0}")]
    Frame(#[from] eimu_frame::FrameError),

    /// The request does not have the payload shape the command takes.
    #[error("{command} takes a {expected} request, got {actual}")]
    RequestShape {
        command: Command,
        expected: RequestShape,
        actual: RequestShape,
    },

    /// An integer-valued response decoded to NaN or infinity.
    #[error("{command} returned non-finite value {value}")]
    NonFinite { command: Command, value: f32 },
}

impl ProtocolError {
    /// True when the link is still usable and the caller may retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ProtocolError::Frame(err) => err.is_recoverable(),
            ProtocolError::Transport(_) => false,
            ProtocolError::RequestShape { .. } | ProtocolError::NonFinite { .. } => true,
        }
    }

    /// True when the device did not deliver a complete response in time.
    pub fn is_short_read(&self) -> bool {
        matches!(
            self,
            ProtocolError::Frame(eimu_frame::FrameError::ShortRead { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
