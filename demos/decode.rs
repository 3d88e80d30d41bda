use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;

use ltc_stream::capture::EdgeCapture;
use ltc_stream::decode::LtcDecoder;
use ltc_stream::mailbox::FrameMailbox;
use ltc_stream::timecode::Timecode;
use ltc_stream::types::{PulseWindows, Ticks};

/// Plays a recorded interval stream from a background thread, standing
/// in for a timing-capture peripheral.
struct PlaybackCapture {
    intervals: Vec<Ticks>,
    worker: Option<JoinHandle<()>>,
}

impl PlaybackCapture {
    fn new(intervals: Vec<Ticks>) -> Self {
        Self {
            intervals,
            worker: None,
        }
    }
}

impl EdgeCapture for PlaybackCapture {
    type Error = std::convert::Infallible;

    fn start<F>(&mut self, mut callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(Ticks) + Send + 'static,
    {
        let intervals = std::mem::take(&mut self.intervals);
        self.worker = Some(std::thread::spawn(move || {
            for ticks in intervals {
                callback(ticks);
                // Roughly real-time for 25 fps LTC at an 8x prescale.
                std::thread::sleep(Duration::from_micros(250));
            }
        }));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        Ok(())
    }
}

/// Biphase-mark encode one frame's 80 bits with a little timing jitter.
fn encode_frame(tc: &Timecode, rng: &mut impl Rng, out: &mut Vec<Ticks>) {
    let bytes = [
        (tc.frames() % 10) as u8,
        (tc.frames() / 10) as u8 | (tc.drop_frame() as u8) << 2,
        (tc.seconds() % 10) as u8,
        (tc.seconds() / 10) as u8,
        (tc.minutes() % 10) as u8,
        (tc.minutes() / 10) as u8,
        (tc.hours() % 10) as u8,
        (tc.hours() / 10) as u8,
    ];
    let data = bytes
        .into_iter()
        .flat_map(|byte| (0..8).map(move |bit| byte >> bit & 1 != 0));
    let sync = [false, false]
        .into_iter()
        .chain([true; 12])
        .chain([false, true]);
    for bit in data.chain(sync) {
        if bit {
            out.push(rng.gen_range(430..=570));
            out.push(rng.gen_range(430..=570));
        } else {
            out.push(rng.gen_range(960..=1040));
        }
    }
}

fn main() {
    env_logger::init();

    let rate = 25.0;
    let target_frames: u64 = 100;

    // Synthesize a run of LTC crossing an hour boundary.
    let mut rng = rand::thread_rng();
    let start = Timecode::parse("00:59:58:00", rate, false).expect("valid timecode");
    let mut stream = Vec::new();
    for i in 0..target_frames {
        encode_frame(&(start + i as i64), &mut rng, &mut stream);
    }
    println!(
        "Playing {} frames of synthetic LTC from {}",
        target_frames, start,
    );

    let mailbox = Arc::new(FrameMailbox::new());
    let mut capture = PlaybackCapture::new(stream);
    let mut decoder = LtcDecoder::new(PulseWindows::PAL);
    let producer = Arc::clone(&mailbox);
    capture
        .start(move |ticks| {
            if let Some(frame) = decoder.push_interval(ticks) {
                if producer.publish(&frame) {
                    println!("(frame overwritten before it was read)");
                }
            }
        })
        .expect("failed to start playback");

    // Poll the mailbox the way a host main loop would. The slot is not
    // double-buffered, so a slow consumer would only ever see the
    // newest frame; the final frame always survives.
    let last = (start + (target_frames as i64 - 1)).display();
    let mut decoded: u64 = 0;
    loop {
        if let Some(frame) = mailbox.take() {
            decoded += 1;
            println!("Frame {decoded:3}: {frame}  (drop_frame: {})", frame.drop_frame());
            if frame.display() == last {
                break;
            }
        } else {
            std::thread::sleep(Duration::from_micros(500));
        }
    }

    capture.stop().expect("failed to stop playback");
    println!("Done. Decoded {decoded} frames.");
}
