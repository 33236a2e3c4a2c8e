//! OBIS (Object Identification System) code formatting.

use std::fmt;

/// OBIS code identifying a COSEM object.
///
/// Meters send either the full 6-group form (`A-B:C.D.E.F`) or the 5-group
/// form without the billing-period group (`A-B:C.D.E`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObisCode {
    groups: [u8; 6],
    len: usize,
}

impl ObisCode {
    /// Build an OBIS code from a raw 5- or 6-byte identifier.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() != 5 && data.len() != 6 {
            return None;
        }
        let mut groups = [0u8; 6];
        groups[..data.len()].copy_from_slice(data);
        Some(Self {
            groups,
            len: data.len(),
        })
    }

    /// Raw group values.
    pub fn groups(&self) -> &[u8] {
        &self.groups[..self.len]
    }
}

impl fmt::Display for ObisCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.groups;
        write!(f, "{}-{}:{}.{}.{}", g[0], g[1], g[2], g[3], g[4])?;
        if self.len == 6 {
            write!(f, ".{}", g[5])?;
        }
        Ok(())
    }
}

/// Format a raw object identifier for use as a payload key.
///
/// 5- and 6-byte buffers render in dotted OBIS notation; anything else is
/// passed through as ASCII text.
pub fn format_obis(data: &[u8]) -> String {
    match ObisCode::from_bytes(data) {
        Some(code) => code.to_string(),
        None => String::from_utf8_lossy(data).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_five_groups() {
        assert_eq!(format_obis(&[1, 0, 1, 8, 0]), "1-0:1.8.0");
    }

    #[test]
    fn test_format_six_groups() {
        assert_eq!(format_obis(&[1, 0, 1, 8, 0, 255]), "1-0:1.8.0.255");
        assert_eq!(format_obis(&[0, 0, 1, 0, 0, 255]), "0-0:1.0.0.255");
    }

    #[test]
    fn test_other_lengths_fall_back_to_ascii() {
        assert_eq!(format_obis(b"name"), "name");
        assert_eq!(format_obis(&[]), "");
    }

    #[test]
    fn test_obis_code_groups() {
        let code = ObisCode::from_bytes(&[1, 0, 32, 7, 0, 255]).unwrap();
        assert_eq!(code.groups(), &[1, 0, 32, 7, 0, 255]);
        assert_eq!(code.to_string(), "1-0:32.7.0.255");
        assert!(ObisCode::from_bytes(&[1, 2, 3]).is_none());
    }
}
