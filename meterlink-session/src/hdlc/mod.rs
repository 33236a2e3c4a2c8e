//! HDLC-style link layer primitives.

pub mod fcs;
pub mod frame;

pub use fcs::{FcsCalc, fcs16};
pub use frame::{FLAG, FrameInfo, parse_address, parse_frame_format};
