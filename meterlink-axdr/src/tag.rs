//! A-XDR tag values (IEC 62056-6-2 Table 2).

use meterlink_core::{DecodeError, DecodeResult};

/// Tag byte preceding every A-XDR encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Null = 0x00,
    Array = 0x01,
    Structure = 0x02,
    Boolean = 0x03,
    BitString = 0x04,
    Integer32 = 0x05,
    Unsigned32 = 0x06,
    OctetString = 0x09,
    VisibleString = 0x0A,
    Utf8String = 0x0C,
    Bcd = 0x0D,
    Integer8 = 0x0F,
    Integer16 = 0x10,
    Unsigned8 = 0x11,
    Unsigned16 = 0x12,
    CompactArray = 0x13,
    Integer64 = 0x14,
    Unsigned64 = 0x15,
    Enum = 0x16,
    Float32 = 0x17,
    Float64 = 0x18,
    DateTime = 0x19,
    Date = 0x1A,
    Time = 0x1B,
}

impl Tag {
    /// Map a raw tag byte; unknown bytes are a decode failure.
    pub fn from_u8(value: u8) -> DecodeResult<Self> {
        match value {
            0x00 => Ok(Tag::Null),
            0x01 => Ok(Tag::Array),
            0x02 => Ok(Tag::Structure),
            0x03 => Ok(Tag::Boolean),
            0x04 => Ok(Tag::BitString),
            0x05 => Ok(Tag::Integer32),
            0x06 => Ok(Tag::Unsigned32),
            0x09 => Ok(Tag::OctetString),
            0x0A => Ok(Tag::VisibleString),
            0x0C => Ok(Tag::Utf8String),
            0x0D => Ok(Tag::Bcd),
            0x0F => Ok(Tag::Integer8),
            0x10 => Ok(Tag::Integer16),
            0x11 => Ok(Tag::Unsigned8),
            0x12 => Ok(Tag::Unsigned16),
            0x13 => Ok(Tag::CompactArray),
            0x14 => Ok(Tag::Integer64),
            0x15 => Ok(Tag::Unsigned64),
            0x16 => Ok(Tag::Enum),
            0x17 => Ok(Tag::Float32),
            0x18 => Ok(Tag::Float64),
            0x19 => Ok(Tag::DateTime),
            0x1A => Ok(Tag::Date),
            0x1B => Ok(Tag::Time),
            other => Err(DecodeError::UnknownTag(other)),
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for byte in 0x00..=0x1B {
            if let Ok(tag) = Tag::from_u8(byte) {
                assert_eq!(tag.to_u8(), byte);
            }
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(Tag::from_u8(0x07), Err(DecodeError::UnknownTag(0x07)));
        assert_eq!(Tag::from_u8(0xFF), Err(DecodeError::UnknownTag(0xFF)));
    }
}
