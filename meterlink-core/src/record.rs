//! Decoded meter record: link-layer header plus the grouped payload.

use crate::value::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Payload value encoding; frames carry A-XDR encoded APDUs only.
pub const ENCODING: &str = "A-XDR";

/// Link-layer metadata of a decoded frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordHeader {
    /// Payload encoding tag, always `"A-XDR"`.
    pub encoding: String,
    /// Frame format class derived from the length field (8 = unsupported form).
    pub frame_format: u8,
    /// Whether the frame is a fragment of a larger APDU.
    pub segmentation: bool,
    /// Declared frame length in bytes.
    pub data_length: usize,
    /// Client (destination) HDLC address.
    pub client: u32,
    /// Server (source) HDLC address.
    pub server: u32,
    /// Control byte, stored verbatim.
    pub control: u8,
    /// Header check sequence as received.
    pub hcs: u16,
    /// Frame check sequence as received.
    pub fcs: u16,
    /// Date-time field as received, hex-encoded (length byte included).
    pub datetime: String,
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self {
            encoding: ENCODING.to_string(),
            frame_format: 0,
            segmentation: false,
            data_length: 0,
            client: 0,
            server: 0,
            control: 0,
            hcs: 0,
            fcs: 0,
            datetime: String::new(),
        }
    }
}

impl fmt::Display for RecordHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frame: format={}, client={}, server={}, control=0x{:02X}, len={}",
            self.encoding, self.frame_format, self.client, self.server, self.control, self.data_length
        )
    }
}

/// Ordered key/value payload of a decoded frame.
///
/// Keys are OBIS codes, embedded field names, or the generic `"data"`
/// fallback. Insertion order is preserved; inserting an existing key replaces
/// its entries in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(String, Vec<Value>)>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entries stored under `key`.
    pub fn insert(&mut self, key: String, values: Vec<Value>) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = values;
        } else {
            self.entries.push((key, values));
        }
    }

    /// Move all entries of `other` into this payload.
    pub fn merge(&mut self, other: Payload) {
        for (key, values) in other.entries {
            self.insert(key, values);
        }
    }

    /// Entries stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// One fully decoded meter reading.
///
/// Created fresh per successfully parsed frame; a frame whose payload fails
/// to decode never becomes a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeterRecord {
    pub header: RecordHeader,
    pub payload: Payload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_encoding() {
        let record = MeterRecord::default();
        assert_eq!(record.header.encoding, "A-XDR");
        assert!(record.payload.is_empty());
    }

    #[test]
    fn test_payload_insert_replaces() {
        let mut payload = Payload::new();
        payload.insert("1-0:1.8.0.255".to_string(), vec![Value::Unsigned32(1)]);
        payload.insert("data".to_string(), vec![Value::Null]);
        payload.insert("1-0:1.8.0.255".to_string(), vec![Value::Unsigned32(2)]);

        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("1-0:1.8.0.255"), Some(&[Value::Unsigned32(2)][..]));
        let keys: Vec<_> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["1-0:1.8.0.255", "data"]);
    }

    #[test]
    fn test_payload_merge_keeps_order() {
        let mut first = Payload::new();
        first.insert("a".to_string(), vec![Value::Unsigned8(1)]);

        let mut second = Payload::new();
        second.insert("b".to_string(), vec![Value::Unsigned8(2)]);
        second.insert("a".to_string(), vec![Value::Unsigned8(3)]);

        first.merge(second);
        let keys: Vec<_> = first.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(first.get("a"), Some(&[Value::Unsigned8(3)][..]));
    }

    #[test]
    fn test_header_display() {
        let header = RecordHeader {
            frame_format: 3,
            client: 3,
            server: 5,
            control: 0x13,
            data_length: 37,
            ..RecordHeader::default()
        };
        assert_eq!(
            header.to_string(),
            "A-XDR frame: format=3, client=3, server=5, control=0x13, len=37"
        );
    }

    #[test]
    fn test_record_serializes_as_map() {
        let mut record = MeterRecord::default();
        record.payload.insert(
            "1-0:32.7.0.255".to_string(),
            vec![Value::Scaled(23.5), Value::Enum("V".to_string())],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["header"]["encoding"], "A-XDR");
        assert_eq!(json["payload"]["1-0:32.7.0.255"][0], 23.5);
        assert_eq!(json["payload"]["1-0:32.7.0.255"][1], "V");
    }
}
