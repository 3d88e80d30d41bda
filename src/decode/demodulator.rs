use crate::types::{Edge, PulseClass, PulseWindows, Ticks};

/// Outcome of feeding one interval to the demodulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demodulated {
    /// A complete data bit.
    Bit(bool),
    /// First half-cell of a 1-bit; its pair is still outstanding.
    Pending,
    /// Interval outside the calibrated windows, or a full cell arrived
    /// while half of a 1-bit was pending. Pairing state has been reset.
    Fault,
}

/// Edge-timed biphase-mark bit demodulator.
///
/// Biphase-mark coding puts a transition at every bit-cell boundary and
/// an extra mid-cell transition for 1-bits, so a 1-bit shows up as two
/// short intervals and a 0-bit as one long interval. Timing intervals
/// rather than absolute edge positions makes the decoder indifferent to
/// DC offset and absolute phase, at the cost of the pairing state
/// machine below.
#[derive(Debug, Clone)]
pub struct Demodulator {
    windows: PulseWindows,
    half_bit_pending: bool,
    edge: Edge,
}

impl Demodulator {
    pub fn new(windows: PulseWindows) -> Self {
        Self {
            windows,
            half_bit_pending: false,
            edge: Edge::Rising,
        }
    }

    /// Consume the elapsed ticks since the previous transition.
    ///
    /// The caller resets the capture timer on each transition, so every
    /// interval is relative. Polarity flips on every call so both
    /// half-cycles of the signal are timed.
    pub fn push_interval(&mut self, ticks: Ticks) -> Demodulated {
        self.edge = self.edge.toggled();
        match self.windows.classify(ticks) {
            PulseClass::Short => {
                if self.half_bit_pending {
                    self.half_bit_pending = false;
                    Demodulated::Bit(true)
                } else {
                    self.half_bit_pending = true;
                    Demodulated::Pending
                }
            }
            PulseClass::Long => {
                if self.half_bit_pending {
                    // A full cell cannot start mid-way through a 1-bit.
                    self.reset();
                    Demodulated::Fault
                } else {
                    Demodulated::Bit(false)
                }
            }
            PulseClass::Invalid => {
                self.reset();
                Demodulated::Fault
            }
        }
    }

    /// Clear the pairing state after a signal fault.
    pub fn reset(&mut self) {
        self.half_bit_pending = false;
    }

    /// The edge the capture peripheral should be armed for next.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn windows(&self) -> &PulseWindows {
        &self.windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demod() -> Demodulator {
        Demodulator::new(PulseWindows::PAL)
    }

    #[test]
    fn long_interval_is_a_zero_bit() {
        let mut d = demod();
        assert_eq!(d.push_interval(1000), Demodulated::Bit(false));
        assert_eq!(d.push_interval(1000), Demodulated::Bit(false));
    }

    #[test]
    fn paired_short_intervals_are_a_one_bit() {
        let mut d = demod();
        assert_eq!(d.push_interval(500), Demodulated::Pending);
        assert_eq!(d.push_interval(500), Demodulated::Bit(true));
        assert_eq!(d.push_interval(500), Demodulated::Pending);
        assert_eq!(d.push_interval(500), Demodulated::Bit(true));
    }

    #[test]
    fn noise_interval_faults_and_clears_pairing() {
        let mut d = demod();
        assert_eq!(d.push_interval(500), Demodulated::Pending);
        assert_eq!(d.push_interval(800), Demodulated::Fault);
        // The stray half-bit must not pair with the next short interval.
        assert_eq!(d.push_interval(500), Demodulated::Pending);
        assert_eq!(d.push_interval(500), Demodulated::Bit(true));
    }

    #[test]
    fn long_interval_with_pending_half_bit_faults() {
        let mut d = demod();
        assert_eq!(d.push_interval(500), Demodulated::Pending);
        assert_eq!(d.push_interval(1000), Demodulated::Fault);
        assert_eq!(d.push_interval(1000), Demodulated::Bit(false));
    }

    #[test]
    fn polarity_alternates_every_interval() {
        let mut d = demod();
        let first = d.edge();
        d.push_interval(1000);
        assert_eq!(d.edge(), first.toggled());
        d.push_interval(42);
        assert_eq!(d.edge(), first);
    }
}
