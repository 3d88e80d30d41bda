use log::trace;

pub mod assembler;
pub mod demodulator;

pub use assembler::Assembler;
pub use demodulator::{Demodulated, Demodulator};

use crate::frame::LtcFrame;
use crate::types::{Edge, PulseWindows, Ticks};

/// The full decode pipeline: demodulator feeding the frame assembler.
///
/// `push_interval` is bounded-time and never blocks or allocates, so it
/// is safe to call from an interrupt handler. The decoder is the sole
/// owner of all decode state; hand a published [`LtcFrame`] to the main
/// loop through a [`FrameMailbox`](crate::mailbox::FrameMailbox).
#[derive(Debug, Clone)]
pub struct LtcDecoder {
    demodulator: Demodulator,
    assembler: Assembler,
}

impl LtcDecoder {
    pub fn new(windows: PulseWindows) -> Self {
        Self {
            demodulator: Demodulator::new(windows),
            assembler: Assembler::new(),
        }
    }

    /// Consume one edge-to-edge interval; returns a frame when one
    /// completes on a confirmed sync word.
    ///
    /// A noisy interval or a pairing fault drops the frame in flight
    /// and clears both stages; decoding resumes with the next interval.
    pub fn push_interval(&mut self, ticks: Ticks) -> Option<LtcFrame> {
        match self.demodulator.push_interval(ticks) {
            Demodulated::Bit(bit) => self.assembler.push_bit(bit),
            Demodulated::Pending => None,
            Demodulated::Fault => {
                trace!("signal fault at {ticks} ticks, resetting pipeline");
                self.assembler.reset();
                None
            }
        }
    }

    /// Clear all decode state.
    pub fn reset(&mut self) {
        self.demodulator.reset();
        self.assembler.reset();
    }

    /// The edge the capture peripheral should be armed for next.
    pub fn edge(&self) -> Edge {
        self.demodulator.edge()
    }

    pub fn windows(&self) -> &PulseWindows {
        self.demodulator.windows()
    }
}
