//! Decoded A-XDR value tree.

use serde::Serialize;
use std::fmt;

/// Universal decoded value produced by the A-XDR decoder.
///
/// One variant per supported tag family (IEC 62056-6-2 Table 2). String-typed
/// variants hold the rendered form carried into the record payload: hex text
/// for octet-strings, BCD digits and date/time blobs, ASCII/UTF-8 text for
/// visible and utf8 strings, the unit symbol for enumerations.
///
/// Composite values nest to arbitrary depth bounded only by the input bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null data
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer 8-bit
    Integer8(i8),
    /// Integer 16-bit
    Integer16(i16),
    /// Integer 32-bit
    Integer32(i32),
    /// Integer 64-bit
    Integer64(i64),
    /// Unsigned integer 8-bit
    Unsigned8(u8),
    /// Unsigned integer 16-bit
    Unsigned16(u16),
    /// Unsigned integer 32-bit
    Unsigned32(u32),
    /// Unsigned integer 64-bit
    Unsigned64(u64),
    /// Scaled register reading (raw magnitude x 10^scaler)
    Scaled(f64),
    /// Bit string, rendered MSB-first as '0'/'1' characters
    BitString(String),
    /// Octet string, rendered as lower-case hex
    OctetString(String),
    /// Visible (ASCII) string
    VisibleString(String),
    /// UTF-8 string
    Utf8String(String),
    /// BCD digit pair, rendered as hex
    Bcd(String),
    /// Date/time octet-string (12 bytes), rendered as hex
    DateTime(String),
    /// Date octet-string (5 bytes), rendered as hex
    Date(String),
    /// Time octet-string (4 bytes), rendered as hex
    Time(String),
    /// Enumeration, rendered as its unit symbol
    Enum(String),
    /// Ordered sequence of values (array or structure)
    Array(Vec<Value>),
}

impl Value {
    /// Numeric view of the value, used for class-3 register scaling.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer8(v) => Some(f64::from(*v)),
            Value::Integer16(v) => Some(f64::from(*v)),
            Value::Integer32(v) => Some(f64::from(*v)),
            Value::Integer64(v) => Some(*v as f64),
            Value::Unsigned8(v) => Some(f64::from(*v)),
            Value::Unsigned16(v) => Some(f64::from(*v)),
            Value::Unsigned32(v) => Some(f64::from(*v)),
            Value::Unsigned64(v) => Some(*v as f64),
            Value::Scaled(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is a composite (array/structure) value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer8(v) => write!(f, "{}", v),
            Value::Integer16(v) => write!(f, "{}", v),
            Value::Integer32(v) => write!(f, "{}", v),
            Value::Integer64(v) => write!(f, "{}", v),
            Value::Unsigned8(v) => write!(f, "{}", v),
            Value::Unsigned16(v) => write!(f, "{}", v),
            Value::Unsigned32(v) => write!(f, "{}", v),
            Value::Unsigned64(v) => write!(f, "{}", v),
            Value::Scaled(v) => write!(f, "{}", v),
            Value::BitString(s)
            | Value::OctetString(s)
            | Value::VisibleString(s)
            | Value::Utf8String(s)
            | Value::Bcd(s)
            | Value::DateTime(s)
            | Value::Date(s)
            | Value::Time(s)
            | Value::Enum(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Unsigned16(235).as_f64(), Some(235.0));
        assert_eq!(Value::Integer8(-1).as_f64(), Some(-1.0));
        assert_eq!(Value::Scaled(23.5).as_f64(), Some(23.5));
        assert_eq!(Value::Enum("V".to_string()).as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_display_array() {
        let value = Value::Array(vec![
            Value::Scaled(23.5),
            Value::Enum("V".to_string()),
        ]);
        assert_eq!(value.to_string(), "[23.5, V]");
        assert!(value.is_array());
        assert!(!Value::Null.is_array());
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::Array(vec![
            Value::Unsigned16(235),
            Value::VisibleString("abc".to_string()),
            Value::Null,
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[235,"abc",null]"#);
    }
}
