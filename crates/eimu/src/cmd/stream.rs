use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::cmd::link::{open_device, parse_duration};
use crate::cmd::read::take_sample;
use crate::cmd::StreamArgs;
use crate::exit::{protocol_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::output::{print_sample, OutputFormat};

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let mut imu = open_device(&args.link)?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst)).map_err(|err| {
            CliError::new(INTERNAL, format!("failed to install Ctrl-C handler: {err}"))
        })?;
    }

    let name = args.measurement.name();
    info!(measurement = name, ?interval, "streaming");

    let mut seq = 0u64;
    let mut skipped = 0u64;
    let mut next = Instant::now();
    while running.load(Ordering::SeqCst) {
        if args.count.is_some_and(|count| seq >= count) {
            break;
        }

        match take_sample(&mut imu, args.measurement) {
            Ok(sample) => {
                print_sample(name, Some(seq), &sample, format);
                seq += 1;
            }
            Err(err) if err.is_recoverable() => {
                skipped += 1;
                warn!(measurement = name, error = %err, "sample skipped");
            }
            Err(err) => return Err(protocol_error(&format!("{name} failed"), err)),
        }

        next += interval;
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        } else {
            // Fell behind (slow device or long timeout): restart the schedule.
            next = now;
        }
    }

    info!(samples = seq, skipped, "stream stopped");
    Ok(SUCCESS)
}
