//! The fixed command table.
//!
//! Ids and response sizes are protocol constants set by the device firmware.

use std::fmt;

use eimu_frame::{encode_indexed, FLOAT_SIZE};

/// One entry of the device command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ReadQuaternion,
    ReadRpy,
    ReadRpyVariance,
    ReadAcceleration,
    ReadAccelerationVariance,
    ReadGyroscope,
    ReadGyroscopeVariance,
    ReadMagnetometer,
    GetFilterGain,
    SetWorldFrameId,
    GetWorldFrameId,
    ReadQuaternionRpy,
    ReadAccGyro,
    ClearDataBuffer,
}

/// Payload shape a command expects in its request frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    /// Zero-length payload: a pure query.
    Empty,
    /// One index byte followed by one `f32`. Used for real writes and for
    /// reads the firmware only answers to a write with a dummy value.
    Indexed,
}

impl fmt::Display for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestShape::Empty => f.write_str("empty"),
            RequestShape::Indexed => f.write_str("indexed"),
        }
    }
}

impl Command {
    /// Every command, in command-id order.
    pub const ALL: [Command; 14] = [
        Command::ReadQuaternion,
        Command::ReadRpy,
        Command::ReadRpyVariance,
        Command::ReadAcceleration,
        Command::ReadAccelerationVariance,
        Command::ReadGyroscope,
        Command::ReadGyroscopeVariance,
        Command::ReadMagnetometer,
        Command::GetFilterGain,
        Command::SetWorldFrameId,
        Command::GetWorldFrameId,
        Command::ReadQuaternionRpy,
        Command::ReadAccGyro,
        Command::ClearDataBuffer,
    ];

    /// Wire command id.
    pub const fn id(self) -> u8 {
        match self {
            Command::ReadQuaternion => 0x01,
            Command::ReadRpy => 0x02,
            Command::ReadRpyVariance => 0x03,
            Command::ReadAcceleration => 0x05,
            Command::ReadAccelerationVariance => 0x09,
            Command::ReadGyroscope => 0x0B,
            Command::ReadGyroscopeVariance => 0x0F,
            Command::ReadMagnetometer => 0x11,
            Command::GetFilterGain => 0x1E,
            Command::SetWorldFrameId => 0x1F,
            Command::GetWorldFrameId => 0x20,
            Command::ReadQuaternionRpy => 0x22,
            Command::ReadAccGyro => 0x23,
            Command::ClearDataBuffer => 0x27,
        }
    }

    /// Look up a command by wire id.
    pub fn from_id(id: u8) -> Option<Command> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id)
    }

    pub const fn request_shape(self) -> RequestShape {
        match self {
            Command::GetFilterGain
            | Command::SetWorldFrameId
            | Command::GetWorldFrameId
            | Command::ClearDataBuffer => RequestShape::Indexed,
            _ => RequestShape::Empty,
        }
    }

    /// Number of `f32` values in the response.
    pub const fn response_floats(self) -> usize {
        match self {
            Command::GetFilterGain
            | Command::SetWorldFrameId
            | Command::GetWorldFrameId
            | Command::ClearDataBuffer => 1,
            Command::ReadRpy
            | Command::ReadRpyVariance
            | Command::ReadAcceleration
            | Command::ReadAccelerationVariance
            | Command::ReadGyroscope
            | Command::ReadGyroscopeVariance
            | Command::ReadMagnetometer => 3,
            Command::ReadQuaternion => 4,
            Command::ReadAccGyro => 6,
            Command::ReadQuaternionRpy => 8,
        }
    }

    /// Response payload size in bytes.
    pub const fn response_len(self) -> usize {
        self.response_floats() * FLOAT_SIZE
    }

    /// Short lowercase name used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Command::ReadQuaternion => "read-quaternion",
            Command::ReadRpy => "read-rpy",
            Command::ReadRpyVariance => "read-rpy-variance",
            Command::ReadAcceleration => "read-acceleration",
            Command::ReadAccelerationVariance => "read-acceleration-variance",
            Command::ReadGyroscope => "read-gyroscope",
            Command::ReadGyroscopeVariance => "read-gyroscope-variance",
            Command::ReadMagnetometer => "read-magnetometer",
            Command::GetFilterGain => "get-filter-gain",
            Command::SetWorldFrameId => "set-world-frame-id",
            Command::GetWorldFrameId => "get-world-frame-id",
            Command::ReadQuaternionRpy => "read-quaternion-rpy",
            Command::ReadAccGyro => "read-acc-gyro",
            Command::ClearDataBuffer => "clear-data-buffer",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.id())
    }
}

/// A request payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    /// No payload.
    Empty,
    /// Index byte plus `f32` value.
    Indexed { index: u8, value: f32 },
}

impl Request {
    /// Indexed request at index 0, the only index the firmware is known to use.
    pub const fn indexed(value: f32) -> Self {
        Request::Indexed { index: 0, value }
    }

    /// Indexed request whose value the device ignores.
    pub const fn indexed_read() -> Self {
        Self::indexed(0.0)
    }

    pub const fn shape(&self) -> RequestShape {
        match self {
            Request::Empty => RequestShape::Empty,
            Request::Indexed { .. } => RequestShape::Indexed,
        }
    }

    /// Payload bytes carried inside the request frame.
    pub fn payload(&self) -> Vec<u8> {
        match *self {
            Request::Empty => Vec::new(),
            Request::Indexed { index, value } => encode_indexed(index, value).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_firmware_table() {
        let table: Vec<(u8, usize)> = Command::ALL
            .iter()
            .map(|cmd| (cmd.id(), cmd.response_floats()))
            .collect();
        assert_eq!(
            table,
            vec![
                (0x01, 4),
                (0x02, 3),
                (0x03, 3),
                (0x05, 3),
                (0x09, 3),
                (0x0B, 3),
                (0x0F, 3),
                (0x11, 3),
                (0x1E, 1),
                (0x1F, 1),
                (0x20, 1),
                (0x22, 8),
                (0x23, 6),
                (0x27, 1),
            ]
        );
    }

    #[test]
    fn from_id_roundtrips_every_command() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_id(cmd.id()), Some(cmd));
        }
        assert_eq!(Command::from_id(0x04), None);
        assert_eq!(Command::from_id(0xFF), None);
    }

    #[test]
    fn indexed_commands() {
        let indexed: Vec<Command> = Command::ALL
            .into_iter()
            .filter(|cmd| cmd.request_shape() == RequestShape::Indexed)
            .collect();
        assert_eq!(
            indexed,
            vec![
                Command::GetFilterGain,
                Command::SetWorldFrameId,
                Command::GetWorldFrameId,
                Command::ClearDataBuffer,
            ]
        );
    }

    #[test]
    fn response_len_in_bytes() {
        assert_eq!(Command::ReadAccGyro.response_len(), 24);
        assert_eq!(Command::ReadQuaternionRpy.response_len(), 32);
        assert_eq!(Command::GetFilterGain.response_len(), 4);
    }

    #[test]
    fn indexed_payload_for_frame_id_one() {
        assert_eq!(
            Request::indexed(1.0).payload(),
            vec![0x00, 0x00, 0x00, 0x80, 0x3F]
        );
        assert!(Request::Empty.payload().is_empty());
        assert_eq!(Request::indexed_read().payload(), vec![0u8; 5]);
    }

    #[test]
    fn display_includes_hex_id() {
        assert_eq!(Command::ReadAccGyro.to_string(), "read-acc-gyro (0x23)");
    }
}
