//! A-XDR decoding for DLMS/COSEM push frames (IEC 62056-6-2)
//!
//! A-XDR is the compact self-describing binary encoding of DLMS payload
//! values: each value is a tag byte followed by tag-specific bytes, with
//! arrays and structures nesting recursively. This crate provides the
//! byte [`Cursor`], the recursive value decoder and the top-level payload
//! grouping decoder.

pub mod cursor;
pub mod decoder;
pub mod payload;
pub mod tag;

pub use cursor::Cursor;
pub use decoder::decode_value;
pub use payload::decode_payload;
pub use tag::Tag;
