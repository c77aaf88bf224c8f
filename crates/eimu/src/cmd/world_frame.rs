use eimu_protocol::WorldFrame;
use tracing::{info, warn};

use crate::cmd::link::open_device;
use crate::cmd::WorldFrameArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_sample, FrameReading, OutputFormat, Sample};

pub fn run(args: WorldFrameArgs, format: OutputFormat) -> CliResult<i32> {
    let mut imu = open_device(&args.link)?;

    if let Some(id) = args.set {
        let echoed = imu
            .set_world_frame_id(id)
            .map_err(|err| protocol_error("set world frame failed", err))?;
        if echoed != i32::from(id) {
            warn!(requested = id, echoed, "device echoed a different frame id");
        } else {
            info!(id, "world frame set");
        }
    }

    let id = imu
        .world_frame_id()
        .map_err(|err| protocol_error("get world frame failed", err))?;
    print_sample(
        "world-frame",
        None,
        &Sample::Frame(FrameReading::new(id)),
        format,
    );
    Ok(SUCCESS)
}

/// Accept a frame name (`nwu`, `enu`, `ned`) or a raw numeric id.
pub fn parse_frame_id(input: &str) -> Result<u8, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "nwu" => Ok(WorldFrame::Nwu.id()),
        "enu" => Ok(WorldFrame::Enu.id()),
        "ned" => Ok(WorldFrame::Ned.id()),
        other => other
            .parse::<u8>()
            .map_err(|_| format!("expected nwu, enu, ned or a numeric id, got {input:?}")),
    }
}
