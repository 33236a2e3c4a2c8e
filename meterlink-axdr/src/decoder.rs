//! Recursive A-XDR value decoder.

use crate::cursor::Cursor;
use crate::tag::Tag;
use meterlink_core::{DecodeError, DecodeResult, Value, hex, unit_symbol};

/// Decode one tagged value at the cursor.
///
/// Multi-byte integers are big-endian; variable-length strings carry a single
/// length-prefix byte. Compact arrays and floats are not used by the push
/// profile and fail the decode, which suppresses the enclosing frame's
/// record.
pub fn decode_value(cur: &mut Cursor) -> DecodeResult<Value> {
    let tag = Tag::from_u8(cur.read_u8()?)?;

    match tag {
        Tag::Null => Ok(Value::Null),
        Tag::Array | Tag::Structure => {
            let count = cur.read_u8()?;
            let mut items = Vec::with_capacity(count as usize);
            for _ in 0..count {
                items.push(decode_value(cur)?);
            }
            Ok(Value::Array(items))
        }
        Tag::Boolean => Ok(Value::Boolean(cur.read_u8()? != 0)),
        Tag::BitString => Ok(Value::BitString(expand_bits(cur.read_u8()?))),
        Tag::Integer32 => {
            let b = cur.take(4)?;
            Ok(Value::Integer32(i32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        Tag::Unsigned32 => {
            let b = cur.take(4)?;
            Ok(Value::Unsigned32(u32::from_be_bytes([b[0], b[1], b[2], b[3]])))
        }
        Tag::OctetString => {
            let len = cur.read_u8()? as usize;
            Ok(Value::OctetString(hex::encode(cur.take(len)?)))
        }
        Tag::VisibleString => {
            let len = cur.read_u8()? as usize;
            Ok(Value::VisibleString(ascii_lossy(cur.take(len)?)))
        }
        Tag::Utf8String => {
            let len = cur.read_u8()? as usize;
            Ok(Value::Utf8String(
                String::from_utf8_lossy(cur.take(len)?).into_owned(),
            ))
        }
        Tag::Bcd => Ok(Value::Bcd(hex::encode(cur.take(1)?))),
        Tag::Integer8 => Ok(Value::Integer8(cur.read_u8()? as i8)),
        Tag::Integer16 => {
            let b = cur.take(2)?;
            Ok(Value::Integer16(i16::from_be_bytes([b[0], b[1]])))
        }
        Tag::Unsigned8 => Ok(Value::Unsigned8(cur.read_u8()?)),
        Tag::Unsigned16 => {
            let b = cur.take(2)?;
            Ok(Value::Unsigned16(u16::from_be_bytes([b[0], b[1]])))
        }
        Tag::Integer64 => {
            let b = cur.take(8)?;
            Ok(Value::Integer64(i64::from_be_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ])))
        }
        Tag::Unsigned64 => {
            let b = cur.take(8)?;
            Ok(Value::Unsigned64(u64::from_be_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ])))
        }
        Tag::Enum => Ok(Value::Enum(unit_symbol(cur.read_u8()?).to_string())),
        Tag::DateTime => Ok(Value::DateTime(hex::encode(cur.take(12)?))),
        Tag::Date => Ok(Value::Date(hex::encode(cur.take(5)?))),
        Tag::Time => Ok(Value::Time(hex::encode(cur.take(4)?))),
        Tag::CompactArray | Tag::Float32 | Tag::Float64 => {
            Err(DecodeError::UnsupportedTag(tag.to_u8()))
        }
    }
}

/// Render one bit-string byte MSB-first as '0'/'1' characters.
fn expand_bits(byte: u8) -> String {
    (0..8)
        .rev()
        .map(|bit| if byte & (1 << bit) != 0 { '1' } else { '0' })
        .collect()
}

pub(crate) fn ascii_lossy(data: &[u8]) -> String {
    // Meters send 7-bit ASCII here; mask the high bit the way a strict
    // ASCII read would.
    data.iter().map(|&b| (b & 0x7F) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> DecodeResult<Value> {
        let mut cur = Cursor::new(bytes);
        decode_value(&mut cur)
    }

    #[test]
    fn test_null_and_boolean() {
        assert_eq!(decode(&[0x00]).unwrap(), Value::Null);
        assert_eq!(decode(&[0x03, 0x01]).unwrap(), Value::Boolean(true));
        assert_eq!(decode(&[0x03, 0x00]).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(decode(&[0x0F, 0xFF]).unwrap(), Value::Integer8(-1));
        assert_eq!(decode(&[0x10, 0xFF, 0x38]).unwrap(), Value::Integer16(-200));
        assert_eq!(
            decode(&[0x05, 0xFF, 0xFF, 0xFF, 0xFE]).unwrap(),
            Value::Integer32(-2)
        );
        assert_eq!(
            decode(&[0x14, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]).unwrap(),
            Value::Integer64(-2)
        );
    }

    #[test]
    fn test_unsigned_integers() {
        assert_eq!(decode(&[0x11, 0xAB]).unwrap(), Value::Unsigned8(0xAB));
        assert_eq!(decode(&[0x12, 0x00, 0xEB]).unwrap(), Value::Unsigned16(235));
        assert_eq!(
            decode(&[0x06, 0x00, 0x01, 0x00, 0x00]).unwrap(),
            Value::Unsigned32(65536)
        );
        assert_eq!(
            decode(&[0x15, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            Value::Unsigned64(1 << 32)
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            decode(&[0x09, 0x03, 0xDE, 0xAD, 0x0F]).unwrap(),
            Value::OctetString("dead0f".to_string())
        );
        assert_eq!(
            decode(&[0x0A, 0x03, b'a', b'b', b'c']).unwrap(),
            Value::VisibleString("abc".to_string())
        );
        assert_eq!(
            decode(&[0x0C, 0x02, 0xC3, 0xA5]).unwrap(),
            Value::Utf8String("å".to_string())
        );
        assert_eq!(decode(&[0x0D, 0x42]).unwrap(), Value::Bcd("42".to_string()));
    }

    #[test]
    fn test_bit_string_full_expansion() {
        assert_eq!(
            decode(&[0x04, 0xA5]).unwrap(),
            Value::BitString("10100101".to_string())
        );
        assert_eq!(
            decode(&[0x04, 0x00]).unwrap(),
            Value::BitString("00000000".to_string())
        );
        assert_eq!(
            decode(&[0x04, 0xFF]).unwrap(),
            Value::BitString("11111111".to_string())
        );
    }

    #[test]
    fn test_enum_maps_to_unit_symbol() {
        assert_eq!(decode(&[0x16, 27]).unwrap(), Value::Enum("W".to_string()));
        assert_eq!(decode(&[0x16, 99]).unwrap(), Value::Enum("*".to_string()));
    }

    #[test]
    fn test_date_and_time_blobs() {
        let mut bytes = vec![0x19];
        bytes.extend_from_slice(&[0x07, 0xE7, 0x01, 0x0F, 0x00, 0x0E, 0x1E, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            decode(&bytes).unwrap(),
            Value::DateTime("07e7010f000e1e0000000000".to_string())
        );
        assert_eq!(
            decode(&[0x1A, 0x07, 0xE7, 0x01, 0x0F, 0x00]).unwrap(),
            Value::Date("07e7010f00".to_string())
        );
        assert_eq!(
            decode(&[0x1B, 0x0E, 0x1E, 0x00, 0x00]).unwrap(),
            Value::Time("0e1e0000".to_string())
        );
    }

    #[test]
    fn test_nested_structure() {
        // structure { u16 235, structure { i8 -1, enum 35 } }
        let bytes = [0x02, 0x02, 0x12, 0x00, 0xEB, 0x02, 0x02, 0x0F, 0xFF, 0x16, 0x23];
        assert_eq!(
            decode(&bytes).unwrap(),
            Value::Array(vec![
                Value::Unsigned16(235),
                Value::Array(vec![
                    Value::Integer8(-1),
                    Value::Enum("V".to_string()),
                ]),
            ])
        );
    }

    #[test]
    fn test_unsupported_tags() {
        assert_eq!(decode(&[0x13]), Err(DecodeError::UnsupportedTag(0x13)));
        assert_eq!(decode(&[0x17, 0, 0, 0, 0]), Err(DecodeError::UnsupportedTag(0x17)));
        assert_eq!(
            decode(&[0x18, 0, 0, 0, 0, 0, 0, 0, 0]),
            Err(DecodeError::UnsupportedTag(0x18))
        );
    }

    #[test]
    fn test_unknown_tag_and_child_failure() {
        assert_eq!(decode(&[0x30]), Err(DecodeError::UnknownTag(0x30)));
        // array with a compact-array child fails as a whole
        assert_eq!(
            decode(&[0x01, 0x02, 0x11, 0x01, 0x13]),
            Err(DecodeError::UnsupportedTag(0x13))
        );
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(decode(&[0x06, 0x00, 0x01]), Err(DecodeError::UnexpectedEnd(3)));
        assert_eq!(decode(&[0x09, 0x04, 0xAA]), Err(DecodeError::UnexpectedEnd(3)));
    }
}
