//! Push-style stream parser: accumulates raw chunks, synchronizes on frame
//! boundaries and emits decoded records.

use crate::hdlc::fcs::fcs16;
use crate::hdlc::frame::{FLAG, LLC_HEADER_LEN, parse_address, parse_frame_format};
use bytes::{Buf, BytesMut};
use meterlink_axdr::{Cursor, decode_payload};
use meterlink_core::{DecodeResult, MeterRecord, Payload, RecordHeader, hex};
use tokio::sync::broadcast;

/// Maximum size of the rolling buffer. On overflow the buffered bytes are
/// discarded wholesale before the new chunk is appended: bounded memory is
/// preferred over a partially received frame.
pub const MAX_BUFFER_SIZE: usize = 2048;

/// A header must fit in this many bytes past the start flag before a parse
/// attempt is worthwhile.
const MIN_FRAME_BYTES: usize = 14;

/// APDU type field: 1 tag byte plus 4 bytes of long-invoke-id, all ignored.
const APDU_TYPE_LEN: usize = 5;

/// Record broadcast capacity. A subscriber lagging further than this misses
/// records but can never stall the parser.
const RECORD_CHANNEL_CAPACITY: usize = 32;

/// Outcome of a single parse attempt over the rolling buffer.
enum Outcome {
    /// No complete frame yet; buffer untouched, retried on the next push.
    Incomplete,
    /// Corrupt or unsupported frame; drop everything before the frame start
    /// so the next attempt searches past it.
    Resync { start: usize },
    /// A frame was consumed. `record` is `None` when its payload failed to
    /// decode; the bytes are dropped either way.
    Complete {
        consumed: usize,
        record: Option<MeterRecord>,
    },
}

/// Incremental decoder for a stream of meter push frames.
///
/// Feed arbitrary chunks with [`push`](Self::push); every successfully
/// decoded frame is published in order on the broadcast channel returned by
/// [`subscribe`](Self::subscribe), and [`latest`](Self::latest) snapshots the
/// most recent record.
///
/// Exactly one frame parse is attempted per `push`. If several complete
/// frames are buffered, one call extracts only the first; drain the rest by
/// pushing again (an empty chunk works).
pub struct MeterParser {
    buf: BytesMut,
    latest: MeterRecord,
    records: broadcast::Sender<MeterRecord>,
}

impl MeterParser {
    pub fn new() -> Self {
        let (records, _) = broadcast::channel(RECORD_CHANNEL_CAPACITY);
        Self {
            buf: BytesMut::new(),
            latest: MeterRecord::default(),
            records,
        }
    }

    /// Append a chunk to the rolling buffer and attempt one frame parse.
    pub fn push(&mut self, chunk: &[u8]) {
        if self.buf.len() + chunk.len() > MAX_BUFFER_SIZE {
            log::warn!(
                "input buffer overflow ({} + {} bytes), discarding buffered data",
                self.buf.len(),
                chunk.len()
            );
            self.buf.clear();
        }
        self.buf.extend_from_slice(chunk);

        self.parse_once();
    }

    /// The most recently decoded record (an empty default before the first
    /// frame completes).
    pub fn latest(&self) -> &MeterRecord {
        &self.latest
    }

    /// Subscribe to decoded records. Records are delivered in frame
    /// completion order; subscribing or dropping receivers does not affect
    /// buffering or parsing.
    pub fn subscribe(&self) -> broadcast::Receiver<MeterRecord> {
        self.records.subscribe()
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn parse_once(&mut self) {
        if self.buf.len() < 3 {
            return;
        }

        // Locate the start flag; the flag byte itself is consumed so a
        // resynchronization can never retry the same frame start.
        let mut start = 0;
        loop {
            match self.buf.get(start) {
                Some(&FLAG) => {
                    start += 1;
                    break;
                }
                Some(_) => start += 1,
                None => return,
            }
        }

        // Idle-fill between frames duplicates the flag; skip the extras.
        while self.buf.get(start) == Some(&FLAG) {
            start += 1;
        }

        if start + MIN_FRAME_BYTES >= self.buf.len() {
            return;
        }

        match self.parse_frame(start) {
            Outcome::Incomplete => {}
            Outcome::Resync { start } => {
                self.buf.advance(start);
            }
            Outcome::Complete { consumed, record } => {
                if consumed < self.buf.len() {
                    self.buf.advance(consumed);
                } else {
                    self.buf.clear();
                }
                if let Some(record) = record {
                    // Subscribers get their own copy; they can never touch
                    // the parser's state.
                    let _ = self.records.send(record.clone());
                    self.latest = record;
                }
            }
        }
    }

    /// Parse one frame starting at `start` (first byte past the flag).
    fn parse_frame(&self, start: usize) -> Outcome {
        let buf: &[u8] = &self.buf;
        let mut cur = Cursor::with_position(buf, start);

        let Ok(info) = parse_frame_format(&mut cur) else {
            return Outcome::Incomplete;
        };
        let Some(data_length) = info.data_length else {
            log::warn!("unsupported frame format, resynchronizing");
            return Outcome::Resync { start };
        };
        if data_length < 2 {
            log::warn!("declared frame length {} too short, resynchronizing", data_length);
            return Outcome::Resync { start };
        }
        // Wait until the whole declared frame (plus its closing flag) is in.
        if start + data_length >= buf.len() {
            return Outcome::Incomplete;
        }

        let (Ok(client), Ok(server)) = (parse_address(&mut cur), parse_address(&mut cur)) else {
            return Outcome::Incomplete;
        };
        let Ok(control) = cur.read_u8() else {
            return Outcome::Incomplete;
        };

        // Header check sequence covers the bytes from the frame start up to
        // (not including) its own two little-endian bytes.
        let hcs_pos = cur.position();
        if hcs_pos + 2 > buf.len() {
            return Outcome::Incomplete;
        }
        let hcs = u16::from_le_bytes([buf[hcs_pos], buf[hcs_pos + 1]]);
        if hcs != fcs16(&buf[start..hcs_pos]) {
            log::warn!("invalid header FCS, resynchronizing");
            return Outcome::Resync { start };
        }

        // Frame check sequence sits in the last two bytes of the declared
        // length and covers everything before it.
        let fcs_pos = start + data_length - 2;
        let fcs = u16::from_le_bytes([buf[fcs_pos], buf[fcs_pos + 1]]);
        if fcs != fcs16(&buf[start..fcs_pos]) {
            log::warn!("invalid frame FCS, resynchronizing");
            return Outcome::Resync { start };
        }

        let body = Self::parse_body(&mut cur);
        let consumed = cur.position() + 2;

        match body {
            Ok((datetime, payload)) => {
                let header = RecordHeader {
                    encoding: meterlink_core::record::ENCODING.to_string(),
                    frame_format: info.frame_format,
                    segmentation: info.segmentation,
                    data_length,
                    client,
                    server,
                    control,
                    hcs,
                    fcs,
                    datetime,
                };
                Outcome::Complete {
                    consumed,
                    record: Some(MeterRecord { header, payload }),
                }
            }
            Err(e) => {
                log::debug!("payload decode failed, record dropped: {}", e);
                Outcome::Complete {
                    consumed,
                    record: None,
                }
            }
        }
    }

    /// Decode the frame body past the validated header: LLC and APDU-type
    /// skips, the date-time field and the A-XDR payload.
    fn parse_body(cur: &mut Cursor) -> DecodeResult<(String, Payload)> {
        cur.skip(2)?; // header FCS
        cur.skip(LLC_HEADER_LEN)?;
        cur.skip(APDU_TYPE_LEN)?;

        // The date-time field starts at a 0x00 (absent) or 0x0C (12-byte)
        // length marker at most 12 bytes ahead.
        for _ in 0..12 {
            match cur.peek()? {
                0x00 | 0x0C => break,
                _ => cur.skip(1)?,
            }
        }
        let len = cur.peek()? as usize;
        let datetime = hex::encode(cur.take(len + 1)?);

        let payload = decode_payload(cur)?;
        Ok((datetime, payload))
    }
}

impl Default for MeterParser {
    fn default() -> Self {
        Self::new()
    }
}
