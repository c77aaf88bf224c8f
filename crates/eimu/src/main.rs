mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "eimu", version, about = "EIMU V2 inertial measurement unit CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::Measurement;

    #[test]
    fn parses_read_subcommand() {
        let cli = Cli::try_parse_from(["eimu", "read", "rpy", "--port", "/dev/ttyACM0"])
            .expect("read args should parse");

        match cli.command {
            Command::Read(args) => {
                assert_eq!(args.measurement, Measurement::Rpy);
                assert_eq!(args.link.port, std::path::PathBuf::from("/dev/ttyACM0"));
                assert!(!args.link.framed_responses);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_stream_count() {
        let cli = Cli::try_parse_from(["eimu", "stream", "acc-gyro", "--count", "5"])
            .expect("stream args should parse");

        match cli.command {
            Command::Stream(args) => {
                assert_eq!(args.measurement, Measurement::AccGyro);
                assert_eq!(args.count, Some(5));
                assert_eq!(args.interval, "10ms");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_world_frame_by_name() {
        let cli = Cli::try_parse_from(["eimu", "world-frame", "--set", "enu"])
            .expect("world-frame args should parse");

        match cli.command {
            Command::WorldFrame(args) => assert_eq!(args.set, Some(1)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_world_frame() {
        let err = Cli::try_parse_from(["eimu", "world-frame", "--set", "south"])
            .expect_err("unknown frame should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_unknown_measurement() {
        let err = Cli::try_parse_from(["eimu", "read", "temperature"])
            .expect_err("unknown measurement should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }
}
