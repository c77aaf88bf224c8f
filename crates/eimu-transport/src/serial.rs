use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Baud rate the EIMU V2 firmware ships with.
pub const DEFAULT_BAUD_RATE: u32 = 921_600;

/// Read timeout applied to every blocking read on the port.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// Serial port configuration.
///
/// The line format is fixed at 8N1 without flow control; only the rate and the
/// read timeout are adjustable.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate. Default: 921600.
    pub baud_rate: u32,
    /// Upper bound on a single blocking read. Default: 100 ms.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// An open serial port: implements `Read + Write`.
///
/// Reads block for at most the configured timeout and then fail with
/// `ErrorKind::TimedOut`. The port is closed when the link is dropped.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    path: PathBuf,
}

impl SerialLink {
    /// Open the serial device at `path` with the given configuration.
    pub fn open(path: impl AsRef<Path>, config: &SerialConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let port = serialport::new(path.to_string_lossy(), config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.timeout)
            .open()
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;

        info!(?path, baud = config.baud_rate, timeout = ?config.timeout, "serial port opened");
        Ok(Self { port, path })
    }

    /// Path the link was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name the OS reports for the port, if any.
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }

    /// Current read timeout.
    pub fn timeout(&self) -> Duration {
        self.port.timeout()
    }

    /// Change the read timeout for subsequent reads.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.port
            .set_timeout(timeout)
            .map_err(TransportError::Configure)
    }

    /// Drop any bytes the device sent that nobody has read yet.
    pub fn discard_input(&self) -> Result<()> {
        debug!(path = ?self.path, "discarding pending input");
        self.port
            .clear(ClearBuffer::Input)
            .map_err(TransportError::Configure)
    }

    /// Clone the handle so reads and writes can be owned separately.
    pub fn try_clone(&self) -> Result<Self> {
        let port = self.port.try_clone().map_err(TransportError::Configure)?;
        Ok(Self {
            port,
            path: self.path.clone(),
        })
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.port.flush()
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("path", &self.path)
            .finish()
    }
}

/// A serial port present on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortInfo {
    /// Device path or name (`/dev/ttyUSB0`, `COM3`).
    pub name: String,
    /// Coarse port kind: `usb`, `pci`, `bluetooth` or `unknown`.
    pub kind: &'static str,
    /// USB vendor/product ids when the port is a USB adapter.
    pub usb_id: Option<(u16, u16)>,
    /// USB product string, if reported.
    pub product: Option<String>,
}

/// Enumerate the serial ports present on this host.
pub fn list_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|port| match port.port_type {
            SerialPortType::UsbPort(usb) => PortInfo {
                name: port.port_name,
                kind: "usb",
                usb_id: Some((usb.vid, usb.pid)),
                product: usb.product,
            },
            SerialPortType::PciPort => PortInfo {
                name: port.port_name,
                kind: "pci",
                usb_id: None,
                product: None,
            },
            SerialPortType::BluetoothPort => PortInfo {
                name: port.port_name,
                kind: "bluetooth",
                usb_id: None,
                product: None,
            },
            SerialPortType::Unknown => PortInfo {
                name: port.port_name,
                kind: "unknown",
                usb_id: None,
                product: None,
            },
        })
        .collect())
}
