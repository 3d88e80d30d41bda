use crate::types::Ticks;

/// Callback-based delivery of edge-to-edge timing intervals.
///
/// Implemented by the platform's timing-capture driver (or a playback
/// harness in tests). The decode core never configures the capture
/// peripheral itself; it only consumes the interval stream. The driver
/// is expected to reset its counter on every transition so each
/// delivered value is relative to the previous edge, and to alternate
/// the armed edge so both half-cycles are timed — see
/// [`LtcDecoder::edge`](crate::decode::LtcDecoder::edge).
pub trait EdgeCapture {
    type Error: core::error::Error;

    /// Arm the capture. The callback is invoked in interrupt context
    /// once per detected transition.
    fn start<F>(&mut self, callback: F) -> Result<(), Self::Error>
    where
        F: FnMut(Ticks) + Send + 'static;

    fn stop(&mut self) -> Result<(), Self::Error>;
}
