use core::fmt::{self, Write};
use core::ops::{Add, Mul, Sub};

use arrayvec::ArrayString;

use crate::error::Error;

/// A frame count, as produced by [`Timecode::total_frames`].
pub type FrameCount = u32;

/// Canonical `HH:MM:SS[:;]FF` text is always exactly this long.
pub const TIMECODE_LEN: usize = 11;

/// An SMPTE timecode value: hours, minutes, seconds and frames at a
/// nominal frame rate, with optional drop-frame counting.
///
/// Values are normalised on construction: frames overflow into seconds,
/// seconds into minutes, minutes into hours, hours wrap modulo 24, and
/// in drop-frame mode the skipped frame numbers (0 and 1 at second 0 of
/// any minute not divisible by 10) are rewritten to the first legal
/// frame. Arithmetic goes through the total-frame-count representation
/// and yields a fresh, normalised value.
///
/// Comparisons are defined purely on frame count. Two timecodes at
/// different frame rates compare by count, not wall-clock duration, so
/// cross-rate comparison is almost never what you want.
#[derive(Debug, Clone, Copy)]
pub struct Timecode {
    hours: u32,
    minutes: u32,
    seconds: u32,
    frames: u32,
    frame_rate: f64,
    drop_frame: bool,
}

impl Timecode {
    /// Build a timecode from fields, normalising out-of-range values.
    pub fn new(
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        frame_rate: f64,
        drop_frame: bool,
    ) -> Self {
        let mut tc = Self {
            hours,
            minutes,
            seconds,
            frames,
            frame_rate,
            drop_frame,
        };
        tc.normalize();
        tc
    }

    /// Build a timecode from a total frame count.
    ///
    /// Counts at or beyond one 24-hour cycle wrap. In drop-frame mode
    /// the per-minute count is reduced by the dropped frames for the
    /// nine non-tenth minutes of each ten-minute block; the drop count
    /// is subtracted before computing the unit minute and re-added
    /// afterwards so the result lands on the first legal frame rather
    /// than a skipped one.
    pub fn from_frames(frame_count: FrameCount, frame_rate: f64, drop_frame: bool) -> Self {
        let mut tc = Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            frames: 0,
            frame_rate,
            drop_frame,
        };
        let fps = tc.nominal_fps();
        let drop_count = fps / 15;

        let mut frames_per_min = 60 * fps;
        let mut frames_per_10min = frames_per_min * 10;
        if drop_frame {
            frames_per_min -= drop_count;
            frames_per_10min = frames_per_min * 10 + drop_count;
        }
        let frames_per_hour = frames_per_10min * 6;

        let mut remaining = frame_count % (tc.max_frames() + 1);

        tc.hours = remaining / frames_per_hour;
        remaining %= frames_per_hour;

        if drop_frame {
            let ten_minute = remaining / frames_per_10min;
            // Signed: the first two frames of a tenth minute sit below
            // the drop-count offset.
            let mut rem = (remaining % frames_per_10min) as i64 - drop_count as i64;
            let unit_minute = rem / frames_per_min as i64;
            rem %= frames_per_min as i64;
            tc.minutes = ten_minute * 10 + unit_minute as u32;
            remaining = (rem + drop_count as i64) as u32;
        } else {
            tc.minutes = remaining / frames_per_10min;
            remaining %= frames_per_10min;
            tc.minutes += remaining / frames_per_min;
            remaining %= frames_per_min;
        }

        tc.seconds = remaining / fps;
        tc.frames = remaining % fps;
        tc
    }

    /// Parse `HH:MM:SS:FF` text. Each field is exactly two digits; the
    /// three separators may be any single character and are not
    /// inspected (so `;` and `.` variants parse too).
    pub fn parse(text: &str, frame_rate: f64, drop_frame: bool) -> Result<Self, Error> {
        let bytes = text.as_bytes();
        if bytes.len() < TIMECODE_LEN {
            return Err(Error::InvalidTimecode);
        }
        let field = |at: usize| -> Result<u32, Error> {
            let (tens, units) = (bytes[at], bytes[at + 1]);
            if tens.is_ascii_digit() && units.is_ascii_digit() {
                Ok((tens - b'0') as u32 * 10 + (units - b'0') as u32)
            } else {
                Err(Error::InvalidTimecode)
            }
        };
        Ok(Self::new(
            field(0)?,
            field(3)?,
            field(6)?,
            field(9)?,
            frame_rate,
            drop_frame,
        ))
    }

    /// Format a raw frame count directly, without keeping the value.
    pub fn frames_to_string(
        frame_count: FrameCount,
        frame_rate: f64,
        drop_frame: bool,
    ) -> ArrayString<TIMECODE_LEN> {
        Self::from_frames(frame_count, frame_rate, drop_frame).display()
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn drop_frame(&self) -> bool {
        self.drop_frame
    }

    // Mutators deliberately skip normalisation, mirroring field
    // assignment; arithmetic results are always pre-normalised.

    pub fn set_hours(&mut self, hours: u32) {
        self.hours = hours;
    }

    pub fn set_minutes(&mut self, minutes: u32) {
        self.minutes = minutes;
    }

    pub fn set_seconds(&mut self, seconds: u32) {
        self.seconds = seconds;
    }

    pub fn set_frames(&mut self, frames: u32) {
        self.frames = frames;
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    pub fn set_drop_frame(&mut self, drop_frame: bool) {
        self.drop_frame = drop_frame;
    }

    /// Total frames elapsed since 00:00:00:00 at this rate and mode.
    pub fn total_frames(&self) -> FrameCount {
        let fps = self.nominal_fps();
        let mut frames_per_min = 60 * fps;
        let mut frames_per_10min = frames_per_min * 10;
        if self.drop_frame {
            let drop_count = fps / 15;
            frames_per_min -= drop_count;
            frames_per_10min = frames_per_min * 10 + drop_count;
        }
        let frames_per_hour = frames_per_10min * 6;

        self.hours * frames_per_hour
            + (self.minutes / 10) * frames_per_10min
            + (self.minutes % 10) * frames_per_min
            + self.seconds * fps
            + self.frames
    }

    /// The frame count of 23:59:59:(fps-1) — the largest legal value,
    /// one less than a full 24-hour cycle.
    pub fn max_frames(&self) -> FrameCount {
        Self::new(
            23,
            59,
            59,
            self.nominal_fps() - 1,
            self.frame_rate,
            self.drop_frame,
        )
        .total_frames()
    }

    /// Canonical text, `;` before the frames field iff drop-frame.
    pub fn display(&self) -> ArrayString<TIMECODE_LEN> {
        let mut out = ArrayString::new();
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours,
            self.minutes,
            self.seconds,
            self.separator(),
            self.frames,
        );
        out
    }

    /// Integer frame rate used for all modular arithmetic: 23.976,
    /// 29.97 and 59.94 round up to 24/30/60, everything else truncates.
    fn nominal_fps(&self) -> u32 {
        match self.frame_rate as u32 {
            fps @ (23 | 29 | 59) => fps + 1,
            fps => fps,
        }
    }

    fn separator(&self) -> char {
        if self.drop_frame { ';' } else { ':' }
    }

    fn normalize(&mut self) {
        let fps = self.nominal_fps();
        if self.frames >= fps {
            self.seconds += self.frames / fps;
            self.frames %= fps;
        }
        if self.seconds > 59 {
            self.minutes += self.seconds / 60;
            self.seconds %= 60;
        }
        if self.minutes > 59 {
            self.hours += self.minutes / 60;
            self.minutes %= 60;
        }
        if self.hours > 23 {
            self.hours %= 24;
        }
        if self.drop_frame && self.frames < 2 && self.seconds == 0 && self.minutes % 10 != 0 {
            self.frames = 2;
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Timecode> for FrameCount {
    fn from(tc: Timecode) -> Self {
        tc.total_frames()
    }
}

impl Add<i64> for Timecode {
    type Output = Timecode;

    fn add(self, rhs: i64) -> Timecode {
        let cycle = self.max_frames() as i64 + 1;
        let sum = (self.total_frames() as i64 + rhs).rem_euclid(cycle);
        Timecode::from_frames(sum as FrameCount, self.frame_rate, self.drop_frame)
    }
}

impl Add for Timecode {
    type Output = Timecode;

    fn add(self, rhs: Timecode) -> Timecode {
        self + rhs.total_frames() as i64
    }
}

impl Sub<i64> for Timecode {
    type Output = Timecode;

    /// Wraps a negative result by adding one 24-hour cycle, once;
    /// differences larger than a full cycle are not re-wrapped.
    fn sub(self, rhs: i64) -> Timecode {
        let mut frames = self.total_frames() as i64 - rhs;
        if frames < 0 {
            frames += self.max_frames() as i64 + 1;
        }
        Timecode::from_frames(frames as FrameCount, self.frame_rate, self.drop_frame)
    }
}

impl Sub for Timecode {
    type Output = Timecode;

    fn sub(self, rhs: Timecode) -> Timecode {
        self - rhs.total_frames() as i64
    }
}

impl Mul<i64> for Timecode {
    type Output = Timecode;

    fn mul(self, rhs: i64) -> Timecode {
        let cycle = self.max_frames() as i64 + 1;
        let product = (self.total_frames() as i64 * rhs).rem_euclid(cycle);
        Timecode::from_frames(product as FrameCount, self.frame_rate, self.drop_frame)
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.total_frames() == other.total_frames()
    }
}

impl Eq for Timecode {}

impl PartialOrd for Timecode {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timecode {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.total_frames().cmp(&other.total_frames())
    }
}
