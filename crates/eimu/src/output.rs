use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use eimu_protocol::{AccGyro, QuatRpy, Quaternion, Rpy, Vector3, WorldFrame};
use eimu_transport::PortInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Reference frame as reported by the device, with its name when known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReading {
    pub id: i32,
    pub frame: Option<WorldFrame>,
}

impl FrameReading {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            frame: WorldFrame::from_id(id),
        }
    }
}

/// One decoded device response, ready for printing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sample {
    Quaternion(Quaternion),
    Rpy(Rpy),
    Vector(Vector3),
    QuatRpy(QuatRpy),
    AccGyro(AccGyro),
    Scalar(f64),
    Ack(i32),
    Frame(FrameReading),
}

impl Sample {
    /// Labelled values in wire order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        fn num(label: &'static str, value: f64) -> (&'static str, String) {
            (label, value.to_string())
        }

        match self {
            Sample::Quaternion(q) => vec![num("w", q.w), num("x", q.x), num("y", q.y), num("z", q.z)],
            Sample::Rpy(r) => vec![num("roll", r.roll), num("pitch", r.pitch), num("yaw", r.yaw)],
            Sample::Vector(v) => vec![num("x", v.x), num("y", v.y), num("z", v.z)],
            Sample::QuatRpy(s) => vec![
                num("qw", s.quaternion.w),
                num("qx", s.quaternion.x),
                num("qy", s.quaternion.y),
                num("qz", s.quaternion.z),
                num("roll", s.rpy.roll),
                num("pitch", s.rpy.pitch),
                num("yaw", s.rpy.yaw),
            ],
            Sample::AccGyro(s) => vec![
                num("ax", s.acceleration.x),
                num("ay", s.acceleration.y),
                num("az", s.acceleration.z),
                num("gx", s.gyroscope.x),
                num("gy", s.gyroscope.y),
                num("gz", s.gyroscope.z),
            ],
            Sample::Scalar(value) => vec![num("value", *value)],
            Sample::Ack(value) => vec![("ack", value.to_string())],
            Sample::Frame(reading) => vec![
                ("id", reading.id.to_string()),
                (
                    "frame",
                    reading
                        .frame
                        .map(|f| format!("{f} ({})", f.description()))
                        .unwrap_or_else(|| "unknown".to_string()),
                ),
            ],
        }
    }
}

#[derive(Serialize)]
struct SampleOutput<'a> {
    measurement: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seq: Option<u64>,
    values: &'a Sample,
    timestamp: String,
}

pub fn print_sample(measurement: &str, seq: Option<u64>, sample: &Sample, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = SampleOutput {
                measurement,
                seq,
                values: sample,
                timestamp: now_unix_millis(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let fields = sample.fields();
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(
                    fields
                        .iter()
                        .map(|(label, _)| label.to_uppercase())
                        .collect::<Vec<_>>(),
                )
                .add_row(
                    fields
                        .iter()
                        .map(|(_, value)| value.clone())
                        .collect::<Vec<_>>(),
                );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let body: Vec<String> = sample
                .fields()
                .into_iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect();
            println!("{measurement}\t{}", body.join("\t"));
        }
        OutputFormat::Raw => {
            let body: Vec<String> = sample.fields().into_iter().map(|(_, value)| value).collect();
            println!("{}", body.join(" "));
        }
    }
}

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    usb_vid: Option<String>,
    usb_pid: Option<String>,
    product: Option<&'a str>,
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    let rows: Vec<PortOutput<'_>> = ports
        .iter()
        .map(|port| PortOutput {
            name: &port.name,
            kind: port.kind,
            usb_vid: port.usb_id.map(|(vid, _)| format!("{vid:04x}")),
            usb_pid: port.usb_id.map(|(_, pid)| format!("{pid:04x}")),
            product: port.product.as_deref(),
        })
        .collect();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND", "VID:PID", "PRODUCT"]);
            for row in &rows {
                table.add_row(vec![
                    row.name.to_string(),
                    row.kind.to_string(),
                    usb_id_label(row),
                    row.product.unwrap_or("-").to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{}\t{}\t{}", row.name, row.kind, usb_id_label(row));
            }
        }
    }
}

fn usb_id_label(row: &PortOutput<'_>) -> String {
    match (&row.usb_vid, &row.usb_pid) {
        (Some(vid), Some(pid)) => format!("{vid}:{pid}"),
        _ => "-".to_string(),
    }
}

fn now_unix_millis() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
