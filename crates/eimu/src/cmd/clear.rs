use tracing::info;

use crate::cmd::link::open_device;
use crate::cmd::ClearArgs;
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_sample, OutputFormat, Sample};

pub fn run(args: ClearArgs, format: OutputFormat) -> CliResult<i32> {
    let mut imu = open_device(&args.link)?;
    let ack = imu
        .clear_data_buffer()
        .map_err(|err| protocol_error("clear data buffer failed", err))?;
    info!(ack, "data buffer cleared");
    print_sample("clear", None, &Sample::Ack(ack), format);
    Ok(SUCCESS)
}
