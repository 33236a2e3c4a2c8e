//! HDLC frame format and address field parsing (IEC 13239).

use meterlink_axdr::Cursor;
use meterlink_core::DecodeResult;

/// HDLC frame delimiter flag.
pub const FLAG: u8 = 0x7E;

/// Length of the LLC header that precedes the APDU.
pub const LLC_HEADER_LEN: usize = 3;

/// Frame-format class signalling an unsupported/extended form whose length
/// cannot be determined.
pub const FORMAT_UNSUPPORTED: u8 = 8;

/// Information extracted from the frame format field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// Format class derived from the top control bits (8 = unsupported form).
    pub frame_format: u8,
    /// Declared frame length in bytes; `None` when the format is unsupported.
    pub data_length: Option<usize>,
    /// Whether the frame is a fragment of a larger APDU.
    pub segmentation: bool,
}

/// Parse the 1- or 2-byte frame format field (IEC 13239 4.9).
///
/// Short form (first byte <= 0x7F): length in the low 7 bits. Extended form
/// (<= 0xF0): second format byte carries the low length bits, bits 4-6 extend
/// the format class and bit 3 is the segmentation flag. Anything above 0xF0
/// uses extended addressing the push profile does not support.
pub fn parse_frame_format(cur: &mut Cursor) -> DecodeResult<FrameInfo> {
    let b0 = cur.peek()?;
    let mut info = FrameInfo {
        frame_format: (b0 & 0x80) >> 7,
        data_length: None,
        segmentation: false,
    };

    if b0 <= 0x7F {
        cur.skip(1)?;
        info.data_length = Some((b0 & 0x7F) as usize);
    } else if b0 <= 0xF0 {
        info.frame_format += (b0 & 0x70) >> 4;
        info.segmentation = (b0 & 0x08) != 0;
        cur.skip(1)?;
        let b1 = cur.read_u8()?;
        info.data_length = Some((((b0 & 0x07) as usize) << 8) | b1 as usize);
    } else {
        info.frame_format = FORMAT_UNSUPPORTED;
    }

    Ok(info)
}

/// Parse a variable-length (1-4 byte) HDLC address.
///
/// Bytes shift into the accumulator until one with the extension terminator
/// (least-significant bit) set is read.
pub fn parse_address(cur: &mut Cursor) -> DecodeResult<u32> {
    let mut addr = 0u32;
    for _ in 0..4 {
        addr = (addr << 8) | cur.read_u8()? as u32;
        if addr & 0x01 != 0 {
            break;
        }
    }
    Ok(addr)
}
