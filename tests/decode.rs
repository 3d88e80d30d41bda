//! End-to-end pipeline tests: synthetic biphase-mark interval streams
//! through the demodulator, assembler and mailbox.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use ltc_stream::{EdgeCapture, FrameMailbox, LtcDecoder, LtcFrame, PulseWindows, Ticks};

/// Nominal PAL-window interval for a 1-bit half-cell.
const SHORT: Ticks = 500;
/// Nominal PAL-window interval for a 0-bit full cell.
const LONG: Ticks = 1000;

/// The 80 bits of one LTC frame in transmission order: 64 data bits
/// (user bit groups zeroed) followed by the sync word.
fn frame_bits(hours: u8, minutes: u8, seconds: u8, frames: u8, drop_frame: bool) -> Vec<bool> {
    let bytes = [
        frames % 10,
        frames / 10 | (drop_frame as u8) << 2,
        seconds % 10,
        seconds / 10,
        minutes % 10,
        minutes / 10,
        hours % 10,
        hours / 10,
    ];
    let mut bits: Vec<bool> = bytes
        .into_iter()
        .flat_map(|byte| (0..8).map(move |bit| byte >> bit & 1 != 0))
        .collect();
    bits.extend([false, false]);
    bits.extend([true; 12]);
    bits.extend([false, true]);
    bits
}

/// Biphase-mark encode: a 1-bit is two half-cell intervals, a 0-bit one
/// full-cell interval.
fn intervals(bits: &[bool]) -> Vec<Ticks> {
    let mut out = Vec::new();
    for &bit in bits {
        if bit {
            out.extend([SHORT, SHORT]);
        } else {
            out.push(LONG);
        }
    }
    out
}

fn decode_all(decoder: &mut LtcDecoder, intervals: &[Ticks]) -> Vec<LtcFrame> {
    intervals
        .iter()
        .filter_map(|&ticks| decoder.push_interval(ticks))
        .collect()
}

#[test]
fn decodes_synthetic_frame() {
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let frames = decode_all(&mut decoder, &intervals(&frame_bits(1, 2, 3, 4, false)));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].display().as_str(), "01:02:03:04");
    assert!(!frames[0].drop_frame());
}

#[test]
fn decodes_drop_frame_separator_and_flag() {
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let frames = decode_all(&mut decoder, &intervals(&frame_bits(1, 2, 3, 4, true)));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].display().as_str(), "01:02:03;04");
    assert!(frames[0].drop_frame());
}

#[test]
fn decodes_consecutive_frames() {
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let mut stream = Vec::new();
    for f in 0..25 {
        stream.extend(intervals(&frame_bits(10, 30, 0, f, false)));
    }
    let frames = decode_all(&mut decoder, &stream);
    assert_eq!(frames.len(), 25);
    for (f, frame) in frames.iter().enumerate() {
        assert_eq!(frame.frames() as usize, f);
        assert_eq!(frame.hours(), 10);
        assert_eq!(frame.minutes(), 30);
    }
}

#[test]
fn decodes_with_interval_jitter() {
    let mut rng = rand::thread_rng();
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let mut stream = Vec::new();
    for s in 0..5 {
        for &bit in &frame_bits(23, 59, s, 12, false) {
            if bit {
                stream.push(rng.gen_range(420..=580));
                stream.push(rng.gen_range(420..=580));
            } else {
                stream.push(rng.gen_range(960..=1040));
            }
        }
    }
    let frames = decode_all(&mut decoder, &stream);
    assert_eq!(frames.len(), 5);
    for (s, frame) in frames.iter().enumerate() {
        assert_eq!(frame.seconds() as usize, s);
        assert_eq!(frame.frames(), 12);
    }
}

#[test]
fn corrupted_interval_discards_frame_and_resyncs() {
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);

    let first = intervals(&frame_bits(0, 0, 1, 0, false));
    let mut corrupted = intervals(&frame_bits(0, 0, 2, 0, false));
    // Bit 32 of the middle frame is a 0-bit; with one prior 1-bit in
    // the data region its interval sits at index 33. Push it outside
    // both windows.
    corrupted[33] = 2000;
    let last = intervals(&frame_bits(0, 0, 3, 0, false));

    let mut stream = first;
    stream.extend(corrupted);
    stream.extend(last);

    let frames = decode_all(&mut decoder, &stream);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].seconds(), 1);
    assert_eq!(frames[1].seconds(), 3);
}

#[test]
fn illegal_drop_frame_fields_normalize_through_timecode() {
    // A source can emit 00:01:00:00 with the drop-frame flag set even
    // though that frame number is skipped; normalisation rewrites it.
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let frames = decode_all(&mut decoder, &intervals(&frame_bits(0, 1, 0, 0, true)));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].frames(), 0);
    let tc = frames[0].to_timecode(29.97);
    assert_eq!(tc.frames(), 2);
    assert_eq!(tc.display().as_str(), "00:01:00;02");
}

/// Synchronous playback of a recorded interval stream, standing in for
/// the timing-capture peripheral.
struct PlaybackCapture {
    intervals: Vec<Ticks>,
}

impl PlaybackCapture {
    fn new(intervals: Vec<Ticks>) -> Self {
        Self { intervals }
    }
}

impl EdgeCapture for PlaybackCapture {
    type Error = std::convert::Infallible;

    fn start<F>(&mut self, mut callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(Ticks) + Send + 'static,
    {
        for &ticks in &self.intervals {
            callback(ticks);
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn capture_to_mailbox_pipeline() {
    let mut stream = Vec::new();
    for f in 0..10 {
        stream.extend(intervals(&frame_bits(0, 0, 0, f, false)));
    }

    let mailbox = Arc::new(FrameMailbox::new());
    let overwrites = Arc::new(AtomicUsize::new(0));
    let mut capture = PlaybackCapture::new(stream);

    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let producer = Arc::clone(&mailbox);
    let counter = Arc::clone(&overwrites);
    capture
        .start(move |ticks| {
            if let Some(frame) = decoder.push_interval(ticks) {
                if producer.publish(&frame) {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            }
        })
        .unwrap();
    capture.stop().unwrap();

    // The consumer never ran during playback, so the single slot holds
    // only the newest frame and the rest were overwritten.
    assert_eq!(overwrites.load(Ordering::Relaxed), 9);
    let frame = mailbox.take().expect("a frame should be pending");
    assert_eq!(frame.frames(), 9);
    assert!(mailbox.take().is_none());
}
