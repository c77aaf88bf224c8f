use std::path::Path;

use eimu_frame::{RequestWriter, ResponseReader};
use eimu_transport::SerialLink;
use tracing::debug;

use crate::config::ImuConfig;
use crate::error::Result;
use crate::imu::SerialImu;

/// Open the device at `path` with default settings (921600 baud, 100 ms
/// read timeout, raw responses).
pub fn open(path: impl AsRef<Path>) -> Result<SerialImu> {
    open_with_config(path, &ImuConfig::default())
}

/// Open with explicit configuration.
///
/// The port is closed when the returned handle is dropped.
pub fn open_with_config(path: impl AsRef<Path>, config: &ImuConfig) -> Result<SerialImu> {
    let link = SerialLink::open(path, &config.serial)?;
    if config.discard_on_open {
        link.discard_input()?;
    }
    let reader_link = link.try_clone()?;
    debug!(?link, response_mode = ?config.response_mode, "device handle ready");

    let reader = ResponseReader::with_config(reader_link, config.frame_config());
    let writer = RequestWriter::new(link);

    Ok(SerialImu::from_parts(reader, writer))
}
