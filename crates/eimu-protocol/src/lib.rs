//! Command protocol for the EIMU inertial measurement unit.
//!
//! This is the layer applications talk to. Open a device, then call one
//! method per measurement; each call is a single request/response
//! transaction on the serial link, with results rounded to six decimals.

pub mod command;
pub mod config;
pub mod connector;
pub mod error;
pub mod imu;
pub mod precision;
pub mod types;

pub use command::{Command, Request, RequestShape};
pub use config::ImuConfig;
pub use connector::{open, open_with_config};
pub use error::{ProtocolError, Result};
pub use imu::{Imu, SerialImu};
pub use precision::{round_to_precision, to_integer, DECIMAL_PLACES};
pub use types::{AccGyro, QuatRpy, Quaternion, Rpy, Vector3, WorldFrame};
