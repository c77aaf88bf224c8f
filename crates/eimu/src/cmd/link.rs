use std::time::Duration;

use eimu_frame::ResponseMode;
use eimu_protocol::{open_with_config, ImuConfig, SerialImu};
use eimu_transport::SerialConfig;
use tracing::debug;

use crate::cmd::LinkArgs;
use crate::exit::{protocol_error, CliError, CliResult, USAGE};

/// Translate link flags into a device configuration.
pub fn imu_config(args: &LinkArgs) -> CliResult<ImuConfig> {
    Ok(ImuConfig {
        serial: SerialConfig {
            baud_rate: args.baud,
            timeout: parse_duration(&args.timeout)?,
        },
        response_mode: if args.framed_responses {
            ResponseMode::Framed
        } else {
            ResponseMode::Raw
        },
        discard_on_open: args.flush_input,
    })
}

pub fn open_device(args: &LinkArgs) -> CliResult<SerialImu> {
    let config = imu_config(args)?;
    debug!(port = ?args.port, ?config, "opening device");
    open_with_config(&args.port, &config).map_err(|err| {
        protocol_error(&format!("failed to open {}", args.port.display()), err)
    })
}

pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "ms")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn link_args(timeout: &str) -> LinkArgs {
        LinkArgs {
            port: PathBuf::from("/dev/ttyUSB0"),
            baud: 115_200,
            timeout: timeout.to_string(),
            framed_responses: true,
            flush_input: false,
        }
    }

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("250").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0ms").is_err());
        assert!(parse_duration("bad").is_err());
        assert_eq!(parse_duration("").unwrap_err().code, USAGE);
    }

    #[test]
    fn link_flags_become_config() {
        let config = imu_config(&link_args("50ms")).unwrap();
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.serial.timeout, Duration::from_millis(50));
        assert_eq!(config.response_mode, ResponseMode::Framed);
        assert!(!config.discard_on_open);
    }

    #[test]
    fn bad_timeout_fails_before_opening() {
        let err = match open_device(&link_args("soon")) {
            Ok(_) => panic!("timeout should be rejected"),
            Err(err) => err,
        };
        assert_eq!(err.code, USAGE);
    }
}
