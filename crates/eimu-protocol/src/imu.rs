use std::io::{Read, Write};

use eimu_frame::{RequestWriter, ResponseMode, ResponseReader};
use eimu_transport::SerialLink;
use tracing::{debug, warn};

use crate::command::{Command, Request};
use crate::error::{ProtocolError, Result};
use crate::precision::{round_to_precision, to_integer};
use crate::types::{AccGyro, QuatRpy, Quaternion, Rpy, Vector3, WorldFrame};

/// A device handle opened on a serial port.
pub type SerialImu = Imu<SerialLink, SerialLink>;

/// Handle to one EIMU device.
///
/// Owns both halves of the link. Every operation is one synchronous
/// transaction: write the request, block for the exact response size, decode.
/// Responses carry no correlation id, so a request must never be issued while
/// another is outstanding; `&mut self` enforces that for a single owner, and
/// shared use needs the whole handle behind a `Mutex`.
///
/// Nothing here retries. A short read is returned to the caller, who decides.
/// After any failed response the handle drains pending input before its next
/// request, so a late remainder is never decoded as a new measurement.
pub struct Imu<R, W> {
    reader: ResponseReader<R>,
    writer: RequestWriter<W>,
    needs_resync: bool,
}

impl<R: Read, W: Write> Imu<R, W> {
    /// Assemble a handle from an already configured reader and writer.
    pub fn from_parts(reader: ResponseReader<R>, writer: RequestWriter<W>) -> Self {
        Self {
            reader,
            writer,
            needs_resync: false,
        }
    }

    /// True when the last response failed and pending input will be drained
    /// before the next request.
    pub fn needs_resync(&self) -> bool {
        self.needs_resync
    }

    /// Drain pending input now. Returns the number of bytes discarded.
    pub fn resync(&mut self) -> Result<usize> {
        let discarded = self.reader.drain()?;
        self.needs_resync = false;
        if discarded > 0 {
            warn!(discarded, "discarded stale response bytes");
        }
        Ok(discarded)
    }

    /// Send `request` for `command` and return the response values at full
    /// precision.
    pub fn transact(&mut self, command: Command, request: Request) -> Result<Vec<f32>> {
        if request.shape() != command.request_shape() {
            return Err(ProtocolError::RequestShape {
                command,
                expected: command.request_shape(),
                actual: request.shape(),
            });
        }

        if self.needs_resync {
            self.resync()?;
        }

        debug!(%command, ?request, "request sent");
        self.writer.send(command.id(), &request.payload())?;

        let count = command.response_floats();
        let values = match self.reader.read_floats(command.id(), count) {
            Ok(values) => values,
            Err(err) => {
                self.needs_resync = true;
                debug!(%command, error = %err, "response failed");
                return Err(err.into());
            }
        };
        debug!(%command, ?values, "response decoded");
        Ok(values)
    }

    /// Transact and round every value. `N` is always the command's response
    /// size, which the reader has already enforced.
    fn query<const N: usize>(&mut self, command: Command, request: Request) -> Result<[f64; N]> {
        debug_assert_eq!(command.response_floats(), N);
        let values = self.transact(command, request)?;
        let mut out = [0.0; N];
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = round_to_precision(value);
        }
        Ok(out)
    }

    /// Indexed request answered by a single integer-semantic value.
    fn query_integer(&mut self, command: Command, request: Request) -> Result<i32> {
        debug_assert_eq!(command.response_floats(), 1);
        let values = self.transact(command, request)?;
        let value = values.first().copied().unwrap_or(f32::NAN);
        if !value.is_finite() {
            return Err(ProtocolError::NonFinite { command, value });
        }
        Ok(to_integer(value))
    }

    pub fn read_quaternion(&mut self) -> Result<Quaternion> {
        self.query::<4>(Command::ReadQuaternion, Request::Empty)
            .map(Quaternion::from)
    }

    /// Roll, pitch, yaw.
    pub fn read_rpy(&mut self) -> Result<Rpy> {
        self.query::<3>(Command::ReadRpy, Request::Empty).map(Rpy::from)
    }

    pub fn read_rpy_variance(&mut self) -> Result<Rpy> {
        self.query::<3>(Command::ReadRpyVariance, Request::Empty)
            .map(Rpy::from)
    }

    pub fn read_acceleration(&mut self) -> Result<Vector3> {
        self.query::<3>(Command::ReadAcceleration, Request::Empty)
            .map(Vector3::from)
    }

    pub fn read_acceleration_variance(&mut self) -> Result<Vector3> {
        self.query::<3>(Command::ReadAccelerationVariance, Request::Empty)
            .map(Vector3::from)
    }

    pub fn read_gyroscope(&mut self) -> Result<Vector3> {
        self.query::<3>(Command::ReadGyroscope, Request::Empty)
            .map(Vector3::from)
    }

    pub fn read_gyroscope_variance(&mut self) -> Result<Vector3> {
        self.query::<3>(Command::ReadGyroscopeVariance, Request::Empty)
            .map(Vector3::from)
    }

    pub fn read_magnetometer(&mut self) -> Result<Vector3> {
        self.query::<3>(Command::ReadMagnetometer, Request::Empty)
            .map(Vector3::from)
    }

    /// Orientation filter gain.
    pub fn filter_gain(&mut self) -> Result<f64> {
        let [gain] = self.query::<1>(Command::GetFilterGain, Request::indexed_read())?;
        Ok(gain)
    }

    /// Set the reference frame id and return the value the device echoes.
    ///
    /// The id is not range-checked; see [`WorldFrame`] for the known values.
    pub fn set_world_frame_id(&mut self, id: u8) -> Result<i32> {
        self.query_integer(Command::SetWorldFrameId, Request::indexed(f32::from(id)))
    }

    pub fn set_world_frame(&mut self, frame: WorldFrame) -> Result<i32> {
        self.set_world_frame_id(frame.id())
    }

    /// Reference frame id currently in use (0 NWU, 1 ENU, 2 NED).
    pub fn world_frame_id(&mut self) -> Result<i32> {
        self.query_integer(Command::GetWorldFrameId, Request::indexed_read())
    }

    /// Quaternion and roll/pitch/yaw from one sample. The eighth wire value is
    /// padding and is dropped.
    pub fn read_quaternion_rpy(&mut self) -> Result<QuatRpy> {
        let [w, x, y, z, roll, pitch, yaw, _] =
            self.query::<8>(Command::ReadQuaternionRpy, Request::Empty)?;
        Ok(QuatRpy {
            quaternion: Quaternion { w, x, y, z },
            rpy: Rpy { roll, pitch, yaw },
        })
    }

    pub fn read_acc_gyro(&mut self) -> Result<AccGyro> {
        let [ax, ay, az, gx, gy, gz] = self.query::<6>(Command::ReadAccGyro, Request::Empty)?;
        Ok(AccGyro {
            acceleration: Vector3::from([ax, ay, az]),
            gyroscope: Vector3::from([gx, gy, gz]),
        })
    }

    /// Clear the device's sample buffer; returns the acknowledgement value.
    pub fn clear_data_buffer(&mut self) -> Result<i32> {
        self.query_integer(Command::ClearDataBuffer, Request::indexed_read())
    }

    /// Switch the expected response layout for subsequent transactions.
    pub fn set_response_mode(&mut self, mode: ResponseMode) {
        self.reader.set_response_mode(mode);
    }

    /// Borrow the reader half of the link.
    pub fn reader(&self) -> &R {
        self.reader.get_ref()
    }

    /// Borrow the writer half of the link.
    pub fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    /// Consume the handle and return both halves of the link.
    pub fn into_parts(self) -> (R, W) {
        (self.reader.into_inner(), self.writer.into_inner())
    }
}
