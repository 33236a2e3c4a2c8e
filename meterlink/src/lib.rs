//! meterlink - DLMS/COSEM meter push-frame decoder
//!
//! Decodes streamed binary frames emitted by electricity/utility meters:
//! HDLC-style link-layer framing (IEC 13239) around A-XDR encoded payloads
//! (IEC 62056-6-2). Bytes arrive in arbitrary chunks; decoded records come
//! out timestamped and keyed by OBIS code.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `meterlink-core`: decoded data model, error handling, OBIS codes and
//!   the physical-unit table
//! - `meterlink-axdr`: recursive A-XDR value and payload decoding
//! - `meterlink-session`: frame synchronization, CRC validation and the
//!   push-style stream parser
//!
//! # Usage
//!
//! ```
//! use meterlink::MeterParser;
//!
//! let mut parser = MeterParser::new();
//! let _records = parser.subscribe();
//!
//! // Feed chunks as they arrive from the transport; each complete,
//! // valid frame is published to subscribers and snapshotted:
//! parser.push(&[0x7E]);
//! let latest = parser.latest();
//! assert!(latest.payload.is_empty());
//! ```

// Re-export core types
pub use meterlink_core::{
    DecodeError, DecodeResult, MeterRecord, ObisCode, Payload, RecordHeader, Value, format_obis,
    unit_symbol,
};

// Re-export the A-XDR layer
pub mod axdr {
    pub use meterlink_axdr::{Cursor, Tag, decode_payload, decode_value};
}

// Re-export the link layer and stream parser
pub use meterlink_session::{MAX_BUFFER_SIZE, MeterParser};

pub mod hdlc {
    pub use meterlink_session::hdlc::*;
}
