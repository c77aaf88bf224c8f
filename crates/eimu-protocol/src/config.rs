use eimu_frame::{FrameConfig, ResponseMode};
use eimu_transport::SerialConfig;

/// Configuration for opening a device.
#[derive(Debug, Clone, Default)]
pub struct ImuConfig {
    /// Port settings: baud rate and read timeout.
    pub serial: SerialConfig,
    /// Expected response layout. Default: raw floats, as the stock firmware
    /// sends them.
    pub response_mode: ResponseMode,
    /// Discard stale input bytes once after opening the port.
    pub discard_on_open: bool,
}

impl ImuConfig {
    /// Frame decoder settings derived from this configuration.
    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig {
            response_mode: self.response_mode,
        }
    }
}
