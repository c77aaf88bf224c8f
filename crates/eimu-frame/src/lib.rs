//! Request framing and response decoding for the EIMU serial protocol.
//!
//! Every request is framed as:
//! - a start marker `0xBB`
//! - a one-byte command id
//! - a one-byte payload length
//! - the payload
//! - a one-byte additive checksum over everything before it
//!
//! Responses on the default path carry no header: they are the concatenated
//! little-endian `f32` values the command implies.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{
    checksum, decode_floats, decode_frame, encode_indexed, encode_request,
    encode_request_no_payload, Frame, FrameConfig, ResponseMode, CHECKSUM_SIZE, FLOAT_SIZE,
    HEADER_SIZE, INDEXED_PAYLOAD_SIZE, MAX_PAYLOAD, START,
};
pub use error::{FrameError, Result};
pub use reader::ResponseReader;
pub use writer::RequestWriter;
