//! Serial byte-stream transport for the EIMU inertial measurement unit.
//!
//! This is the lowest layer of eimu. It opens and configures the serial port
//! (baud rate, read timeout) and hands out a [`SerialLink`] that implements
//! `Read + Write`. Everything above it is transport-agnostic and works on any
//! byte stream.

pub mod error;
pub mod serial;

pub use error::{Result, TransportError};
pub use serial::{list_ports, PortInfo, SerialConfig, SerialLink, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT};
