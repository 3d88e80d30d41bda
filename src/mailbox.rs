use core::sync::atomic::{AtomicU64, Ordering};

use crate::frame::LtcFrame;

/// No frame pending. Packed frames only occupy the low 33 bits, so
/// this can never collide with one.
const EMPTY: u64 = u64::MAX;

/// Single-slot handoff from the decode interrupt to the main loop.
///
/// The interrupt context publishes each validated frame; the main loop
/// drains at its leisure. The slot is not double-buffered: a frame that
/// is still unconsumed when the next one arrives is overwritten, and
/// `publish` reports the loss. The whole frame lives in one atomic
/// word, so both sides are lock-free and there are no torn reads even
/// when the producer preempts the consumer mid-`take`.
#[derive(Debug)]
pub struct FrameMailbox {
    slot: AtomicU64,
}

impl Default for FrameMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMailbox {
    pub const fn new() -> Self {
        Self {
            slot: AtomicU64::new(EMPTY),
        }
    }

    /// Publish a frame, returning `true` if an unconsumed frame was
    /// overwritten.
    pub fn publish(&self, frame: &LtcFrame) -> bool {
        self.slot.swap(pack(frame), Ordering::AcqRel) != EMPTY
    }

    /// Take the pending frame, leaving the slot empty.
    pub fn take(&self) -> Option<LtcFrame> {
        match self.slot.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            word => Some(unpack(word)),
        }
    }

    /// Whether a frame is waiting, without consuming it.
    pub fn is_ready(&self) -> bool {
        self.slot.load(Ordering::Acquire) != EMPTY
    }
}

fn pack(frame: &LtcFrame) -> u64 {
    (frame.hours() as u64) << 25
        | (frame.minutes() as u64) << 17
        | (frame.seconds() as u64) << 9
        | (frame.frames() as u64) << 1
        | frame.drop_frame() as u64
}

fn unpack(word: u64) -> LtcFrame {
    LtcFrame::new(
        (word >> 25) as u8,
        (word >> 17) as u8,
        (word >> 9) as u8,
        (word >> 1) as u8,
        word & 1 != 0,
    )
}
