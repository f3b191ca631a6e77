//! Runtime configuration for the tick engine and runner.
//!
//! These are the in-memory structs the engine consumes; the
//! TOML-deserialized schema lives in `shade_config`.

/// Timeouts and watchdogs.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Max sensor wait per read (ms).
    pub sensor_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { sensor_ms: 150 }
    }
}

/// Loop pacing: how often the tick loop runs and how often the rolling
/// average is handed to the publish collaborator.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Tick period in milliseconds.
    pub tick_ms: u64,
    /// Seconds between average publications.
    pub publish_secs: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            publish_secs: 60,
        }
    }
}
