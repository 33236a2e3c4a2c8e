//! Frame Check Sequence (CRC-16/X.25) for HDLC frames.
//!
//! Reflected CRC-16 with polynomial 0x1021, init 0xFFFF, final xor 0xFFFF.
//! Both the header check sequence and the frame check sequence use this
//! variant, transmitted little-endian.

const INITIAL_FCS: u16 = 0xFFFF;
const KEY: u16 = 0x8408; // Bit-reversed 0x1021

/// Precomputed FCS table
static FCS_TABLE: once_cell::sync::Lazy<[u16; 256]> = once_cell::sync::Lazy::new(|| {
    let mut table = [0u16; 256];
    for b in 0..=0xFF {
        let mut v = b as u16;
        for _ in 0..8 {
            if (v & 1) == 1 {
                v = (v >> 1) ^ KEY;
            } else {
                v >>= 1;
            }
        }
        table[b as usize] = v;
    }
    table
});

/// Running frame check sequence calculator.
pub struct FcsCalc {
    fcs_value: u16,
}

impl FcsCalc {
    pub fn new() -> Self {
        Self {
            fcs_value: INITIAL_FCS,
        }
    }

    /// Reset to the initial state.
    pub fn reset(&mut self) {
        self.fcs_value = INITIAL_FCS;
    }

    /// Feed a single byte.
    pub fn update(&mut self, data: u8) {
        self.fcs_value = (self.fcs_value >> 8) ^ FCS_TABLE[((self.fcs_value ^ data as u16) & 0xFF) as usize];
    }

    /// Feed a slice of bytes.
    pub fn update_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.update(byte);
        }
    }

    /// The on-wire checksum value for everything fed so far.
    pub fn finish(&self) -> u16 {
        self.fcs_value ^ 0xFFFF
    }
}

impl Default for FcsCalc {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot CRC-16/X.25 over `data`.
pub fn fcs16(data: &[u8]) -> u16 {
    let mut calc = FcsCalc::new();
    calc.update_bytes(data);
    calc.finish()
}
