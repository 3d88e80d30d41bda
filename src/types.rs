use crate::error::Error;

/// Elapsed capture-timer ticks between two consecutive signal transitions.
pub type Ticks = u32;

/// Which edge the capture peripheral is currently armed for.
///
/// Biphase-mark transitions must be timed on both half-cycles, so the
/// demodulator flips this on every interval it consumes; the capture
/// driver mirrors it into the peripheral's edge-select bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    pub fn toggled(self) -> Self {
        match self {
            Self::Rising => Self::Falling,
            Self::Falling => Self::Rising,
        }
    }
}

/// Classification of one edge-to-edge interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseClass {
    /// Half-cell of a 1-bit; two of these in a row make one data bit.
    Short,
    /// Full cell of a 0-bit.
    Long,
    /// Outside both calibrated windows — noise.
    Invalid,
}

/// Calibrated interval thresholds, in capture-timer ticks.
///
/// These depend on the capture clock prescale and the target line
/// standard, so they are runtime configuration rather than constants.
/// An interval in `[one_min, one_max]` is a 1-bit half-cell; one in
/// `[zero_min, zero_max]` is a 0-bit full cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseWindows {
    one_min: Ticks,
    one_max: Ticks,
    zero_min: Ticks,
    zero_max: Ticks,
}

impl PulseWindows {
    /// Thresholds for PAL-rate LTC with an 8x timer prescale.
    pub const PAL: PulseWindows = PulseWindows {
        one_min: 400,
        one_max: 600,
        zero_min: 950,
        zero_max: 1050,
    };

    /// Thresholds for NTSC-rate (29.97 fps) LTC with an 8x timer prescale.
    pub const NTSC: PulseWindows = PulseWindows {
        one_min: 300,
        one_max: 475,
        zero_min: 700,
        zero_max: 875,
    };

    /// Build windows from raw thresholds.
    ///
    /// The windows must be ordered and disjoint
    /// (`one_min <= one_max < zero_min <= zero_max`); a 0-bit cell is
    /// nominally twice as long as a 1-bit half-cell, so overlapping
    /// windows cannot classify anything.
    pub fn new(
        one_min: Ticks,
        one_max: Ticks,
        zero_min: Ticks,
        zero_max: Ticks,
    ) -> Result<Self, Error> {
        if one_min <= one_max && one_max < zero_min && zero_min <= zero_max {
            Ok(Self {
                one_min,
                one_max,
                zero_min,
                zero_max,
            })
        } else {
            Err(Error::InvalidWindows)
        }
    }

    pub fn classify(&self, ticks: Ticks) -> PulseClass {
        if ticks >= self.one_min && ticks <= self.one_max {
            PulseClass::Short
        } else if ticks >= self.zero_min && ticks <= self.zero_max {
            PulseClass::Long
        } else {
            PulseClass::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_pal_windows() {
        let w = PulseWindows::PAL;
        assert_eq!(w.classify(500), PulseClass::Short);
        assert_eq!(w.classify(400), PulseClass::Short);
        assert_eq!(w.classify(600), PulseClass::Short);
        assert_eq!(w.classify(1000), PulseClass::Long);
        assert_eq!(w.classify(950), PulseClass::Long);
        assert_eq!(w.classify(1050), PulseClass::Long);
        assert_eq!(w.classify(700), PulseClass::Invalid);
        assert_eq!(w.classify(399), PulseClass::Invalid);
        assert_eq!(w.classify(1051), PulseClass::Invalid);
        assert_eq!(w.classify(0), PulseClass::Invalid);
    }

    #[test]
    fn rejects_overlapping_windows() {
        assert!(PulseWindows::new(400, 600, 550, 1050).is_err());
        assert!(PulseWindows::new(600, 400, 950, 1050).is_err());
        assert!(PulseWindows::new(400, 600, 950, 900).is_err());
        assert!(PulseWindows::new(300, 475, 700, 875).is_ok());
    }

    #[test]
    fn edge_toggles() {
        assert_eq!(Edge::Rising.toggled(), Edge::Falling);
        assert_eq!(Edge::Falling.toggled(), Edge::Rising);
    }
}
