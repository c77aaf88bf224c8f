//! Typed measurement results.

use std::fmt;

use serde::Serialize;

/// Orientation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 4]> for Quaternion {
    fn from([w, x, y, z]: [f64; 4]) -> Self {
        Self { w, x, y, z }
    }
}

/// Roll, pitch and yaw in radians (or their variances).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rpy {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl From<[f64; 3]> for Rpy {
    fn from([roll, pitch, yaw]: [f64; 3]) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Three-axis sensor reading: acceleration, angular rate, magnetic field, or
/// the variance of one of those.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Quaternion and Euler angles sampled together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuatRpy {
    pub quaternion: Quaternion,
    pub rpy: Rpy,
}

/// Accelerometer and gyroscope sampled together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccGyro {
    pub acceleration: Vector3,
    pub gyroscope: Vector3,
}

/// Reference frame convention the device reports orientation in.
///
/// The device stores this as an opaque float; values outside this set are
/// passed through by the protocol and map to `None` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorldFrame {
    /// North-West-Up.
    Nwu = 0,
    /// East-North-Up.
    Enu = 1,
    /// North-East-Down.
    Ned = 2,
}

impl WorldFrame {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(WorldFrame::Nwu),
            1 => Some(WorldFrame::Enu),
            2 => Some(WorldFrame::Ned),
            _ => None,
        }
    }

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn description(self) -> &'static str {
        match self {
            WorldFrame::Nwu => "North-West-Up",
            WorldFrame::Enu => "East-North-Up",
            WorldFrame::Ned => "North-East-Down",
        }
    }
}

impl fmt::Display for WorldFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldFrame::Nwu => f.write_str("NWU"),
            WorldFrame::Enu => f.write_str("ENU"),
            WorldFrame::Ned => f.write_str("NED"),
        }
    }
}
