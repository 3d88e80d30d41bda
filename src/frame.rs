use core::fmt::{self, Write};

use arrayvec::ArrayString;

use crate::timecode::{TIMECODE_LEN, Timecode};

/// Number of bits in one LTC frame.
pub const FRAME_BITS: usize = 80;

/// Fixed-capacity bit queue holding the 64-bit data region of an LTC
/// frame in transmission order.
///
/// LTC sends its payload least-significant-bit first, so each accepted
/// bit enters at the most-significant end of the last byte and the
/// whole buffer shifts right by one: the LSB of byte N carries into the
/// MSB of byte N-1. After 64 pushes the first-transmitted bit sits at
/// byte 0 bit 0, which is exactly the layout the SMPTE field map is
/// defined against.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameBits {
    bytes: [u8; 8],
}

impl FrameBits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the queue right by one bit and insert `bit` at the top.
    pub fn push_bit(&mut self, bit: bool) {
        self.bytes[0] >>= 1;
        for n in 1..8 {
            if self.bytes[n] & 1 != 0 {
                self.bytes[n - 1] |= 0x80;
            }
            self.bytes[n] >>= 1;
        }
        if bit {
            self.bytes[7] |= 0x80;
        }
    }

    pub fn byte(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    pub fn reset(&mut self) {
        self.bytes = [0; 8];
    }
}

/// One validated, fully assembled LTC frame.
///
/// Fields are the BCD digits from the frame's fixed bit positions,
/// already combined into plain binary values. Only the timecode fields
/// and the drop-frame flag cross this boundary; user bits are not
/// extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LtcFrame {
    hours: u8,
    minutes: u8,
    seconds: u8,
    frames: u8,
    drop_frame: bool,
}

impl LtcFrame {
    /// Build a frame from already-decoded fields.
    pub fn new(hours: u8, minutes: u8, seconds: u8, frames: u8, drop_frame: bool) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
            drop_frame,
        }
    }

    /// Extract the timecode fields from an assembled data region.
    ///
    /// Bit mapping (byte, mask): frames units (0, 0x0F), frames tens
    /// (1, 0x03), drop-frame flag (1, bit 2), seconds units (2, 0x0F),
    /// seconds tens (3, 0x07), minutes units (4, 0x0F), minutes tens
    /// (5, 0x07), hours units (6, 0x0F), hours tens (7, 0x03).
    pub fn from_bits(bits: &FrameBits) -> Self {
        Self {
            frames: (bits.byte(1) & 0x03) * 10 + (bits.byte(0) & 0x0F),
            seconds: (bits.byte(3) & 0x07) * 10 + (bits.byte(2) & 0x0F),
            minutes: (bits.byte(5) & 0x07) * 10 + (bits.byte(4) & 0x0F),
            hours: (bits.byte(7) & 0x03) * 10 + (bits.byte(6) & 0x0F),
            drop_frame: bits.byte(1) & 0x04 != 0,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn frames(&self) -> u8 {
        self.frames
    }

    pub fn drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// Formatted `HH:MM:SS[:;]FF` text, `;` iff the frame carries the
    /// drop-frame flag.
    pub fn display(&self) -> ArrayString<TIMECODE_LEN> {
        let mut out = ArrayString::new();
        let separator = if self.drop_frame { ';' } else { ':' };
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, separator, self.frames,
        );
        out
    }

    /// Normalise the raw fields into a [`Timecode`] at the given rate.
    pub fn to_timecode(&self, frame_rate: f64) -> Timecode {
        Timecode::new(
            self.hours as u32,
            self.minutes as u32,
            self.seconds as u32,
            self.frames as u32,
            frame_rate,
            self.drop_frame,
        )
    }
}

impl fmt::Display for LtcFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
