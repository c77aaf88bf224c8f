use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use eimu_transport::DEFAULT_BAUD_RATE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod clear;
pub mod link;
pub mod ports;
pub mod read;
pub mod stream;
pub mod version;
pub mod world_frame;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take one measurement and print it.
    Read(ReadArgs),
    /// Poll a measurement at a fixed interval.
    Stream(StreamArgs),
    /// Show or change the reference frame (NWU, ENU, NED).
    WorldFrame(WorldFrameArgs),
    /// Clear the device's sample buffer.
    Clear(ClearArgs),
    /// List serial ports on this host.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Read(args) => read::run(args, format),
        Command::Stream(args) => stream::run(args, format),
        Command::WorldFrame(args) => world_frame::run(args, format),
        Command::Clear(args) => clear::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Measurements a single transaction can produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Measurement {
    /// Orientation quaternion (w, x, y, z).
    Quat,
    /// Roll, pitch, yaw.
    Rpy,
    RpyVariance,
    /// Linear acceleration.
    Acc,
    AccVariance,
    /// Angular rate.
    Gyro,
    GyroVariance,
    /// Magnetic field.
    Mag,
    /// Quaternion and roll/pitch/yaw from one sample.
    QuatRpy,
    /// Acceleration and angular rate from one sample.
    AccGyro,
    FilterGain,
    WorldFrame,
}

impl Measurement {
    pub fn name(self) -> &'static str {
        match self {
            Measurement::Quat => "quat",
            Measurement::Rpy => "rpy",
            Measurement::RpyVariance => "rpy-variance",
            Measurement::Acc => "acc",
            Measurement::AccVariance => "acc-variance",
            Measurement::Gyro => "gyro",
            Measurement::GyroVariance => "gyro-variance",
            Measurement::Mag => "mag",
            Measurement::QuatRpy => "quat-rpy",
            Measurement::AccGyro => "acc-gyro",
            Measurement::FilterGain => "filter-gain",
            Measurement::WorldFrame => "world-frame",
        }
    }
}

/// Serial link options shared by every device command.
#[derive(Args, Debug, Clone)]
pub struct LinkArgs {
    /// Serial device path.
    #[arg(long, short = 'p', env = "EIMU_PORT", default_value = "/dev/ttyUSB0")]
    pub port: PathBuf,
    /// Baud rate.
    #[arg(long, env = "EIMU_BAUD", default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,
    /// Read timeout per response (e.g. 100ms, 1s).
    #[arg(long, env = "EIMU_TIMEOUT", default_value = "100ms")]
    pub timeout: String,
    /// Expect responses wrapped in checksummed frames instead of raw floats.
    #[arg(long)]
    pub framed_responses: bool,
    /// Discard stale bytes waiting on the port before the first request.
    #[arg(long)]
    pub flush_input: bool,
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Measurement to take.
    #[arg(value_enum)]
    pub measurement: Measurement,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Measurement to poll.
    #[arg(value_enum)]
    pub measurement: Measurement,
    /// Time between requests (e.g. 10ms, 1s).
    #[arg(long, default_value = "10ms")]
    pub interval: String,
    /// Exit after N successful samples.
    #[arg(long)]
    pub count: Option<u64>,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct WorldFrameArgs {
    /// Switch to this frame first: nwu, enu, ned, or a raw numeric id.
    #[arg(long, value_parser = world_frame::parse_frame_id)]
    pub set: Option<u8>,
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug)]
pub struct ClearArgs {
    #[command(flatten)]
    pub link: LinkArgs,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
