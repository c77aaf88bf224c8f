use std::io::{Read, Write};

use eimu_protocol::{Imu, Result as ProtocolResult};

use crate::cmd::link::open_device;
use crate::cmd::{Measurement, ReadArgs};
use crate::exit::{protocol_error, CliResult, SUCCESS};
use crate::output::{print_sample, FrameReading, OutputFormat, Sample};

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let mut imu = open_device(&args.link)?;
    let sample = take_sample(&mut imu, args.measurement)
        .map_err(|err| protocol_error(&format!("{} failed", args.measurement.name()), err))?;
    print_sample(args.measurement.name(), None, &sample, format);
    Ok(SUCCESS)
}

/// Run the single transaction that produces `measurement`.
pub fn take_sample<R: Read, W: Write>(
    imu: &mut Imu<R, W>,
    measurement: Measurement,
) -> ProtocolResult<Sample> {
    let sample = match measurement {
        Measurement::Quat => Sample::Quaternion(imu.read_quaternion()?),
        Measurement::Rpy => Sample::Rpy(imu.read_rpy()?),
        Measurement::RpyVariance => Sample::Rpy(imu.read_rpy_variance()?),
        Measurement::Acc => Sample::Vector(imu.read_acceleration()?),
        Measurement::AccVariance => Sample::Vector(imu.read_acceleration_variance()?),
        Measurement::Gyro => Sample::Vector(imu.read_gyroscope()?),
        Measurement::GyroVariance => Sample::Vector(imu.read_gyroscope_variance()?),
        Measurement::Mag => Sample::Vector(imu.read_magnetometer()?),
        Measurement::QuatRpy => Sample::QuatRpy(imu.read_quaternion_rpy()?),
        Measurement::AccGyro => Sample::AccGyro(imu.read_acc_gyro()?),
        Measurement::FilterGain => Sample::Scalar(imu.filter_gain()?),
        Measurement::WorldFrame => Sample::Frame(FrameReading::new(imu.world_frame_id()?)),
    };
    Ok(sample)
}
