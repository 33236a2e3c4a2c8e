//! Top-level payload decoder: groups decoded entries under derived keys.

use crate::cursor::Cursor;
use crate::decoder::{ascii_lossy, decode_value};
use crate::tag::Tag;
use meterlink_core::{DecodeError, DecodeResult, Payload, Value, format_obis, hex};

/// OBIS code of the clock object, whose first entry is reformatted into a
/// readable timestamp.
const CLOCK_KEY: &str = "0-0:1.0.0.255";

/// Decode the frame body into an ordered key/value payload.
///
/// The outermost value must be null, an array or a structure. Groupings whose
/// first element is itself a composite are flattened one level by merging the
/// recursive result; otherwise the first element's tag derives the key:
/// a visible-string is used verbatim, an octet-string is formatted as an OBIS
/// code (both consume that element), anything else falls back to `"data"`.
pub fn decode_payload(cur: &mut Cursor) -> DecodeResult<Payload> {
    let mut payload = Payload::new();

    match Tag::from_u8(cur.read_u8()?)? {
        Tag::Null => {}
        Tag::Array | Tag::Structure => {
            let first_tag = cur.peek_at(1)?;
            if matches!(first_tag, 0x01 | 0x02 | 0x13) {
                // Nested grouping: recurse per element and flatten the
                // resulting key/value pairs into this level.
                let count = cur.read_u8()?;
                for _ in 0..count {
                    payload.merge(decode_payload(cur)?);
                }
            } else {
                let (key, count) = read_key(cur, first_tag)?;
                let mut entries = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    entries.push(decode_value(cur)?);
                }
                convert_known(&key, &mut entries);
                scale_register(&mut entries);
                payload.insert(key, entries);
            }
        }
        Tag::CompactArray => return Err(DecodeError::UnsupportedTag(Tag::CompactArray.to_u8())),
        other => return Err(DecodeError::UnsupportedTag(other.to_u8())),
    }

    Ok(payload)
}

/// Derive the grouping key and the number of remaining value entries.
///
/// Key elements (visible-string or octet-string first elements) are consumed
/// here, so the caller decodes `count` entries after the key.
fn read_key(cur: &mut Cursor, first_tag: u8) -> DecodeResult<(String, u8)> {
    match first_tag {
        0x0A => {
            let count = cur.read_u8()?.saturating_sub(1);
            cur.skip(1)?; // key element tag
            let len = cur.read_u8()? as usize;
            Ok((ascii_lossy(cur.take(len)?), count))
        }
        0x09 => {
            let count = cur.read_u8()?.saturating_sub(1);
            cur.skip(1)?;
            let len = cur.read_u8()? as usize;
            Ok((format_obis(cur.take(len)?), count))
        }
        _ => Ok(("data".to_string(), cur.read_u8()?)),
    }
}

/// Rewrite a class-3 register reading `[value, [scaler, unit]]` into
/// `[value x 10^scaler, unit]`. Any other shape passes through unchanged.
fn scale_register(entries: &mut Vec<Value>) {
    if entries.len() != 2 {
        return;
    }
    let (scaler, unit) = match &entries[1] {
        Value::Array(inner) if inner.len() == 2 => match inner[0].as_f64() {
            Some(scaler) => (scaler, inner[1].clone()),
            None => return,
        },
        _ => return,
    };
    let Some(raw) = entries[0].as_f64() else {
        return;
    };

    entries[0] = Value::Scaled(raw * 10f64.powf(scaler));
    entries[1] = unit;
}

/// Known-key post-processing. The clock object's first entry, a 12-byte
/// hex octet-string, is reinterpreted as a binary date-time.
fn convert_known(key: &str, entries: &mut [Value]) {
    if key != CLOCK_KEY {
        return;
    }
    let Some(Value::OctetString(raw)) = entries.first() else {
        return;
    };
    let Some(bytes) = hex::decode(raw) else {
        return;
    };
    if bytes.len() < 8 {
        return;
    }

    // 2-byte big-endian year, month, day, skipped day-of-week, then H:M:S.
    let year = u16::from_be_bytes([bytes[0], bytes[1]]);
    entries[0] = Value::VisibleString(format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, bytes[2], bytes[3], bytes[5], bytes[6], bytes[7]
    ));
}
