//! Core types for DLMS/COSEM meter push-frame decoding
//!
//! This crate provides the decoded data model (`MeterRecord`, `Value`),
//! error handling, OBIS code formatting and the physical-unit table used
//! throughout the meterlink workspace.

pub mod error;
pub mod hex;
pub mod obis_code;
pub mod record;
pub mod unit;
pub mod value;

pub use error::{DecodeError, DecodeResult};
pub use obis_code::{ObisCode, format_obis};
pub use record::{MeterRecord, Payload, RecordHeader};
pub use unit::unit_symbol;
pub use value::Value;
