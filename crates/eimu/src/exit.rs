use std::fmt;
use std::io;

use eimu_frame::FrameError;
use eimu_protocol::ProtocolError;
use eimu_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMEOUT,
        io::ErrorKind::NotFound
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::NotConnected
        | io::ErrorKind::ConnectionReset => TRANSPORT_ERROR,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    match err {
        TransportError::Io(source) => io_error(context, source),
        TransportError::Open { ref source, .. }
            if source.kind() == serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied) =>
        {
            CliError::new(PERMISSION_DENIED, format!("{context}: {err}"))
        }
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::ShortRead { .. } => CliError::new(TIMEOUT, format!("{context}: {err}")),
        FrameError::PayloadTooLarge { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        FrameError::ConnectionClosed => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        FrameError::InvalidStart(_)
        | FrameError::ChecksumMismatch { .. }
        | FrameError::UnexpectedCommand { .. }
        | FrameError::LengthMismatch { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn protocol_error(context: &str, err: ProtocolError) -> CliError {
    match err {
        ProtocolError::Transport(err) => transport_error(context, err),
        ProtocolError::Frame(err) => frame_error(context, err),
        ProtocolError::RequestShape { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        ProtocolError::NonFinite { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_maps_to_timeout() {
        let err = protocol_error(
            "read failed",
            ProtocolError::Frame(FrameError::ShortRead {
                expected: 12,
                received: 0,
            }),
        );
        assert_eq!(err.code, TIMEOUT);
        assert!(err.message.starts_with("read failed: "));
    }

    #[test]
    fn checksum_mismatch_is_invalid_data() {
        let err = frame_error(
            "read failed",
            FrameError::ChecksumMismatch {
                expected: 1,
                actual: 2,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn non_finite_result_is_invalid_data() {
        let err = protocol_error(
            "world-frame failed",
            ProtocolError::NonFinite {
                command: eimu_protocol::Command::GetWorldFrameId,
                value: f32::NAN,
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn missing_device_is_transport_error() {
        let err = transport_error(
            "open failed",
            TransportError::Open {
                path: "/dev/ttyUSB7".into(),
                source: serialport::Error::new(
                    serialport::ErrorKind::Io(io::ErrorKind::NotFound),
                    "No such file or directory",
                ),
            },
        );
        assert_eq!(err.code, TRANSPORT_ERROR);
    }

    #[test]
    fn denied_device_is_permission_error() {
        let err = transport_error(
            "open failed",
            TransportError::Open {
                path: "/dev/ttyUSB7".into(),
                source: serialport::Error::new(
                    serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied),
                    "Permission denied",
                ),
            },
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
