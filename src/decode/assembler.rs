use log::debug;

use crate::frame::{FRAME_BITS, FrameBits, LtcFrame};

/// Last bit position of the 64-bit data region.
const END_DATA_POSITION: u8 = 63;

/// Position the counter is forced to when the sync run completes: the
/// twelfth consecutive 1-bit sits at frame position 77, leaving `01` to
/// close the frame.
const SYNC_RESUME_POSITION: u8 = 77;

/// Consecutive 1-bits that can only belong to the sync word.
const SYNC_RUN: u8 = 12;

/// Shifts demodulated bits into an 80-bit frame window and publishes a
/// frame whenever the window closes on a confirmed sync word.
///
/// The sync word's run of twelve 1-bits is self-delimiting, so spotting
/// it both validates the frame in flight and re-anchors the position
/// counter even if bit counting drifted. Validation requires the run to
/// land where a full window puts it; a sync observed mid-window (after
/// joining the stream mid-frame, or after a fault) only re-anchors, and
/// a window that closes without a confirmed sync is discarded silently.
/// Either way the decoder re-synchronises within at most one frame
/// period of clean signal.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    bits: FrameBits,
    position: u8,
    sync_run: u8,
    sync_seen: bool,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept one demodulated bit; returns a frame when a full window
    /// closes on a confirmed sync.
    pub fn push_bit(&mut self, bit: bool) -> Option<LtcFrame> {
        if bit {
            self.sync_run += 1;
            if self.sync_run == SYNC_RUN {
                self.sync_run = 0;
                // A full window since the last reset puts the run's
                // final 1-bit exactly at the resume position; a run
                // landing anywhere else belongs to a partial window,
                // which only re-anchors.
                self.sync_seen = self.position == SYNC_RESUME_POSITION;
                self.position = SYNC_RESUME_POSITION;
            }
        } else {
            self.sync_run = 0;
        }

        if self.position <= END_DATA_POSITION {
            self.bits.push_bit(bit);
        }
        self.position += 1;

        if self.position == FRAME_BITS as u8 {
            self.position = 0;
            if self.sync_seen {
                self.sync_seen = false;
                return Some(LtcFrame::from_bits(&self.bits));
            }
            debug!("frame window closed without sync, discarding");
        }
        None
    }

    /// Drop the frame in flight after a signal fault.
    pub fn reset(&mut self) {
        self.position = 0;
        self.sync_run = 0;
        self.sync_seen = false;
    }
}
