use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::sync::{Arc, Mutex};
use std::thread;

use bytes::BytesMut;
use eimu_frame::{decode_frame, FrameError, RequestWriter, ResponseReader};
use eimu_protocol::{Command, Imu, ProtocolError, Rpy, WorldFrame};

/// In-memory stand-in for the firmware: parses request frames written to it
/// and queues the raw float response the real device would send.
#[derive(Default)]
struct Device {
    world_frame: f32,
    pending: VecDeque<u8>,
    requests: Vec<u8>,
    drop_next_response: bool,
    /// Deliver only this many bytes of the next response before the reader
    /// times out; the rest shows up afterwards.
    split_next_response: Option<usize>,
    late: Vec<u8>,
}

impl Device {
    fn respond(&mut self, values: &[f32]) {
        if self.drop_next_response {
            self.drop_next_response = false;
            return;
        }
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        match self.split_next_response.take() {
            Some(on_time) => {
                self.pending.extend(&bytes[..on_time]);
                self.late.extend_from_slice(&bytes[on_time..]);
            }
            None => self.pending.extend(bytes),
        }
    }

    fn handle(&mut self, command: u8, payload: &[u8]) {
        self.requests.push(command);
        match Command::from_id(command) {
            Some(Command::ReadRpy) => self.respond(&[0.1, -0.2, 3.141_592_65]),
            Some(Command::SetWorldFrameId) => {
                let value = f32::from_le_bytes([payload[1], payload[2], payload[3], payload[4]]);
                self.world_frame = value;
                self.respond(&[value]);
            }
            Some(Command::GetWorldFrameId) => {
                let value = self.world_frame;
                self.respond(&[value]);
            }
            Some(Command::ClearDataBuffer) => self.respond(&[1.0]),
            Some(cmd) => self.respond(&vec![0.5; cmd.response_floats()]),
            None => {}
        }
    }
}

#[derive(Clone, Default)]
struct DeviceLink {
    device: Arc<Mutex<Device>>,
    inbound: Arc<Mutex<BytesMut>>,
}

impl Write for DeviceLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut inbound = self.inbound.lock().unwrap();
        inbound.extend_from_slice(buf);
        while let Some(frame) = decode_frame(&mut inbound)
            .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?
        {
            self.device
                .lock()
                .unwrap()
                .handle(frame.command, frame.payload.as_ref());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Read for DeviceLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut device = self.device.lock().unwrap();
        if device.pending.is_empty() {
            let late = std::mem::take(&mut device.late);
            device.pending.extend(late);
            return Err(std::io::Error::from(ErrorKind::TimedOut));
        }
        let n = buf.len().min(device.pending.len());
        for slot in buf.iter_mut().take(n) {
            *slot = device.pending.pop_front().unwrap();
        }
        Ok(n)
    }
}

fn connect(link: &DeviceLink) -> Imu<DeviceLink, DeviceLink> {
    Imu::from_parts(
        ResponseReader::new(link.clone()),
        RequestWriter::new(link.clone()),
    )
}

#[test]
fn configure_frame_then_poll_orientation() {
    let link = DeviceLink::default();
    let mut imu = connect(&link);

    assert_eq!(imu.set_world_frame(WorldFrame::Enu).unwrap(), 1);
    let id = imu.world_frame_id().unwrap();
    assert_eq!(WorldFrame::from_id(id), Some(WorldFrame::Enu));

    for _ in 0..3 {
        assert_eq!(
            imu.read_rpy().unwrap(),
            Rpy {
                roll: 0.1,
                pitch: -0.2,
                yaw: 3.141593
            }
        );
    }

    let requests = link.device.lock().unwrap().requests.clone();
    assert_eq!(requests, vec![0x1F, 0x20, 0x02, 0x02, 0x02]);
}

#[test]
fn every_command_decodes_its_response_size() {
    let link = DeviceLink::default();
    let mut imu = connect(&link);

    assert_eq!(imu.read_quaternion().unwrap().w, 0.5);
    assert_eq!(imu.read_rpy_variance().unwrap().yaw, 0.5);
    assert_eq!(imu.read_acceleration().unwrap().x, 0.5);
    assert_eq!(imu.read_acceleration_variance().unwrap().y, 0.5);
    assert_eq!(imu.read_gyroscope().unwrap().z, 0.5);
    assert_eq!(imu.read_gyroscope_variance().unwrap().x, 0.5);
    assert_eq!(imu.read_magnetometer().unwrap().y, 0.5);
    assert_eq!(imu.filter_gain().unwrap(), 0.5);
    assert_eq!(imu.read_quaternion_rpy().unwrap().rpy.pitch, 0.5);
    assert_eq!(imu.read_acc_gyro().unwrap().gyroscope.z, 0.5);
    assert_eq!(imu.clear_data_buffer().unwrap(), 1);

    // Nothing left over: every response was consumed exactly.
    assert!(link.device.lock().unwrap().pending.is_empty());
}

#[test]
fn dropped_response_is_reported_and_link_recovers() {
    let link = DeviceLink::default();
    let mut imu = connect(&link);

    link.device.lock().unwrap().drop_next_response = true;
    let err = imu.read_rpy().unwrap_err();
    assert!(err.is_short_read());
    assert!(matches!(err, ProtocolError::Frame(_)));

    // No automatic retry: exactly one request went out for the failed call.
    assert_eq!(link.device.lock().unwrap().requests, vec![0x02]);

    assert_eq!(imu.read_rpy().unwrap().pitch, -0.2);
}

#[test]
fn late_response_remainder_is_not_read_as_next_sample() {
    let link = DeviceLink::default();
    let mut imu = connect(&link);

    // Two of the twelve RPY bytes arrive in time; the other ten land after
    // the read has already timed out.
    link.device.lock().unwrap().split_next_response = Some(2);
    let err = imu.read_rpy().unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Frame(FrameError::ShortRead {
            expected: 12,
            received: 2
        })
    ));
    assert!(imu.needs_resync());
    assert_eq!(link.device.lock().unwrap().pending.len(), 10);

    assert_eq!(imu.set_world_frame(WorldFrame::Ned).unwrap(), 2);
    assert_eq!(imu.world_frame_id().unwrap(), 2);
    assert_eq!(
        imu.read_rpy().unwrap(),
        Rpy {
            roll: 0.1,
            pitch: -0.2,
            yaw: 3.141593
        }
    );

    let device = link.device.lock().unwrap();
    assert!(device.pending.is_empty());
    assert_eq!(device.requests, vec![0x02, 0x1F, 0x20, 0x02]);
}

#[test]
fn shared_handle_serializes_transactions() {
    let link = DeviceLink::default();
    let imu = Arc::new(Mutex::new(connect(&link)));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let imu = Arc::clone(&imu);
            thread::spawn(move || {
                for _ in 0..16 {
                    let rpy = imu.lock().unwrap().read_rpy().unwrap();
                    assert_eq!(rpy.yaw, 3.141593);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(link.device.lock().unwrap().requests.len(), 64);
}
