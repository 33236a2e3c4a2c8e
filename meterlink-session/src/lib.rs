//! Link layer for DLMS/COSEM meter push frames
//!
//! This crate locates and validates HDLC-style frames (IEC 13239) in an
//! unbounded chunked byte stream and turns them into decoded
//! [`MeterRecord`](meterlink_core::MeterRecord)s:
//!
//! - [`hdlc`] — frame format/length parsing, variable-length addressing and
//!   the CRC-16/X.25 frame check sequence.
//! - [`parser`] — the [`MeterParser`] push-style stream accumulator.

pub mod hdlc;
pub mod parser;

pub use hdlc::fcs::{FcsCalc, fcs16};
pub use hdlc::frame::{FLAG, FrameInfo};
pub use parser::{MAX_BUFFER_SIZE, MeterParser};
