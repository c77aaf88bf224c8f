//! Driver for the EIMU V2 inertial measurement unit.
//!
//! The device speaks a small request/response protocol over a serial link:
//! checksummed request frames out, fixed-size little-endian float responses
//! back.
//!
//! # Crate Structure
//!
//! - [`transport`]: Serial port access and enumeration
//! - [`frame`]: Request framing, checksums, and float response decoding
//! - [`protocol`]: Command table and the [`protocol::Imu`] device handle
//!
//! ```no_run
//! # fn main() -> eimu::protocol::Result<()> {
//! let mut imu = eimu::protocol::open("/dev/ttyUSB0")?;
//! imu.set_world_frame(eimu::protocol::WorldFrame::Enu)?;
//! let rpy = imu.read_rpy()?;
//! println!("roll={} pitch={} yaw={}", rpy.roll, rpy.pitch, rpy.yaw);
//! # Ok(())
//! # }
//! ```

/// Re-export transport types.
pub mod transport {
    pub use eimu_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use eimu_frame::*;
}

/// Re-export protocol types.
pub mod protocol {
    pub use eimu_protocol::*;
}
