#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the shading controller.
//!
//! `Config` and sub-structs are deserialized from TOML and validated.
//! All fields carry defaults matching the device's cold-start values, so
//! an empty file is a valid config.
use serde::Deserialize;

/// Sampling cadence and averaging horizon.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Sampling {
    /// Seconds between light samples.
    pub cadence_secs: f64,
    /// Averaging horizon in seconds; span = round(window / cadence).
    pub window_secs: f64,
    /// Upper bound on window span ever allocated (slots).
    pub capacity: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            cadence_secs: 5.0,
            window_secs: 120.0,
            capacity: 100,
        }
    }
}

/// Control-law coefficients.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Control {
    /// Baseline (fully-closed) angle in degrees.
    pub angle_offset_deg: f64,
    /// Brightness gain.
    pub gain: f64,
    /// Reference temperature in degrees Celsius; must be > 0.
    pub reference_temp: f64,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            angle_offset_deg: 30.0,
            gain: 0.75,
            reference_temp: 30.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Timeouts {
    /// Max sensor wait per read (ms). Also accepts alias "sample_ms".
    #[serde(alias = "sample_ms")]
    pub sensor_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { sensor_ms: 150 }
    }
}

/// Loop pacing: tick period and average-publish period.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Pacing {
    /// Tick loop period in milliseconds.
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

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sampling: Sampling,
    pub control: Control,
    pub timeouts: Timeouts,
    pub pacing: Pacing,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse, and validate a config file.
pub fn load_path(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    let cfg = load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Sampling
        if !(self.sampling.cadence_secs.is_finite() && self.sampling.cadence_secs > 0.0) {
            eyre::bail!("sampling.cadence_secs must be finite and > 0");
        }
        if !(self.sampling.window_secs.is_finite() && self.sampling.window_secs > 0.0) {
            eyre::bail!("sampling.window_secs must be finite and > 0");
        }
        if self.sampling.capacity == 0 {
            eyre::bail!("sampling.capacity must be >= 1");
        }
        if self.sampling.capacity > 100_000 {
            eyre::bail!("sampling.capacity is unreasonably large (>100000)");
        }

        // Control
        if !self.control.angle_offset_deg.is_finite() {
            eyre::bail!("control.angle_offset_deg must be finite");
        }
        if !(0.0..=180.0).contains(&self.control.angle_offset_deg) {
            eyre::bail!("control.angle_offset_deg must be in [0, 180]");
        }
        if !self.control.gain.is_finite() {
            eyre::bail!("control.gain must be finite");
        }
        if !(self.control.reference_temp.is_finite() && self.control.reference_temp > 0.0) {
            eyre::bail!("control.reference_temp must be finite and > 0");
        }

        // Timeouts
        if self.timeouts.sensor_ms == 0 {
            eyre::bail!("timeouts.sensor_ms must be >= 1");
        }

        // Pacing
        if self.pacing.tick_ms == 0 {
            eyre::bail!("pacing.tick_ms must be >= 1");
        }
        if self.pacing.publish_secs == 0 {
            eyre::bail!("pacing.publish_secs must be >= 1");
        }
        if self.pacing.tick_ms > 60_000 {
            eyre::bail!("pacing.tick_ms is unreasonably large (>60s)");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_config_uses_cold_start_defaults() {
        let cfg = load_toml("").expect("empty TOML is valid");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg.sampling.cadence_secs, 5.0);
        assert_eq!(cfg.sampling.window_secs, 120.0);
        assert_eq!(cfg.sampling.capacity, 100);
        assert_eq!(cfg.control.angle_offset_deg, 30.0);
        assert_eq!(cfg.control.gain, 0.75);
        assert_eq!(cfg.control.reference_temp, 30.0);
        assert_eq!(cfg.timeouts.sensor_ms, 150);
    }

    #[test]
    fn full_config_round_trips() {
        let cfg = load_toml(
            r#"
            [sampling]
            cadence_secs = 2.0
            window_secs = 30.0
            capacity = 50

            [control]
            angle_offset_deg = 45.0
            gain = 1.2
            reference_temp = 25.0

            [timeouts]
            sensor_ms = 80

            [pacing]
            tick_ms = 100
            publish_secs = 10

            [logging]
            level = "debug"
            rotation = "daily"
            "#,
        )
        .expect("parse");
        cfg.validate().expect("validate");
        assert_eq!(cfg.sampling.capacity, 50);
        assert_eq!(cfg.timeouts.sensor_ms, 80);
        assert_eq!(cfg.pacing.publish_secs, 10);
        assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn sensor_ms_alias_accepted() {
        let cfg = load_toml("[timeouts]\nsample_ms = 42\n").expect("parse");
        assert_eq!(cfg.timeouts.sensor_ms, 42);
    }

    #[rstest]
    #[case("[sampling]\ncadence_secs = 0.0\n")]
    #[case("[sampling]\ncadence_secs = -5.0\n")]
    #[case("[sampling]\nwindow_secs = 0.0\n")]
    #[case("[sampling]\ncapacity = 0\n")]
    #[case("[control]\nreference_temp = 0.0\n")]
    #[case("[control]\nreference_temp = -1.0\n")]
    #[case("[control]\nangle_offset_deg = 200.0\n")]
    #[case("[timeouts]\nsensor_ms = 0\n")]
    #[case("[pacing]\ntick_ms = 0\n")]
    fn invalid_values_are_rejected(#[case] toml_src: &str) {
        let cfg = load_toml(toml_src).expect("parses fine; validation rejects");
        assert!(cfg.validate().is_err(), "expected rejection: {toml_src}");
    }

    #[test]
    fn load_path_reads_and_validates() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(f, "[sampling]\ncadence_secs = 1.0\nwindow_secs = 4.0").expect("write");
        let cfg = load_path(f.path()).expect("load");
        assert_eq!(cfg.sampling.window_secs, 4.0);

        let mut bad = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(bad, "[sampling]\ncadence_secs = -1.0").expect("write");
        assert!(load_path(bad.path()).is_err());
    }

    #[test]
    fn unknown_tables_are_tolerated() {
        // Forward compatibility: an old binary reading a newer config.
        let cfg = load_toml("[future]\nknob = 1\n").expect("unknown table ignored");
        cfg.validate().expect("still valid");
    }
}
