//! Cadence gate: decides when the next light sample is due.

use crate::util::secs_to_ms;

/// Elapsed-time gate over the sampling cadence.
///
/// Time is milliseconds since the engine epoch. A cadence change is
/// simply picked up by the next `due` comparison; an in-flight wait is
/// neither shortened nor stretched beyond that.
#[derive(Debug, Clone, Copy, Default)]
pub struct CadenceGate {
    last_sample_ms: u64,
}

impl CadenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one cadence period has elapsed since the last
    /// recorded sample (or since the epoch, before the first one).
    pub fn due(&self, now_ms: u64, cadence_secs: f64) -> bool {
        now_ms.saturating_sub(self.last_sample_ms) >= secs_to_ms(cadence_secs)
    }

    /// Record that a sample was drawn at `now_ms`.
    pub fn mark(&mut self, now_ms: u64) {
        self.last_sample_ms = now_ms;
    }

    /// Forget the last sample time (fresh run).
    pub fn reset(&mut self) {
        self.last_sample_ms = 0;
    }
}
