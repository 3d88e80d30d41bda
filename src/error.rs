use core::fmt;

/// Top-level crate error.
///
/// Signal faults never surface here: a noisy interval or an unsynced
/// frame boundary is recovered internally by resynchronising on the
/// next sync word. Only configuration and parsing can fail visibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Timecode text did not match `HH:MM:SS:FF` (any single-character
    /// separators).
    InvalidTimecode,
    /// Pulse window thresholds are misordered or overlapping.
    InvalidWindows,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimecode => f.write_str("invalid timecode string"),
            Self::InvalidWindows => f.write_str("invalid pulse window thresholds"),
        }
    }
}

impl core::error::Error for Error {}
