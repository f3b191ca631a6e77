//! Remotely-tunable model parameters.
//!
//! The store is the single point of mutation for all five coefficients.
//! Each setter validates before applying; a rejected value leaves the
//! store exactly as it was. Span is derived, never stored: cadence and
//! window duration can change independently, so it is recomputed on
//! demand from whatever pair is current.

use crate::error::ParamError;
use crate::util::secs_to_ms;

/// Tunable coefficients with the device's cold-start defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterStore {
    cadence_secs: f64,
    window_secs: f64,
    angle_offset_deg: f64,
    gain: f64,
    reference_temp: f64,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self {
            cadence_secs: 5.0,
            window_secs: 120.0,
            angle_offset_deg: 30.0,
            gain: 0.75,
            reference_temp: 30.0,
        }
    }
}

fn require_finite(name: &'static str, v: f64) -> Result<f64, ParamError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParamError::NotFinite(name))
    }
}

fn require_positive(name: &'static str, v: f64) -> Result<f64, ParamError> {
    let v = require_finite(name, v)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ParamError::NotPositive(name))
    }
}

impl ParameterStore {
    /// Build a store from explicit values, validating every field.
    pub fn new(
        cadence_secs: f64,
        window_secs: f64,
        angle_offset_deg: f64,
        gain: f64,
        reference_temp: f64,
    ) -> Result<Self, ParamError> {
        let mut store = Self::default();
        store.set_cadence(cadence_secs)?;
        store.set_window_secs(window_secs)?;
        store.set_offset(angle_offset_deg)?;
        store.set_gain(gain)?;
        store.set_reference_temp(reference_temp)?;
        Ok(store)
    }

    pub fn cadence_secs(&self) -> f64 {
        self.cadence_secs
    }

    pub fn cadence_ms(&self) -> u64 {
        secs_to_ms(self.cadence_secs)
    }

    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    pub fn angle_offset_deg(&self) -> f64 {
        self.angle_offset_deg
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn reference_temp(&self) -> f64 {
        self.reference_temp
    }

    /// Window span in samples: `round(window / cadence)`, clamped into
    /// `[1, capacity]`.
    pub fn span_for(&self, capacity: usize) -> usize {
        let raw = (self.window_secs / self.cadence_secs).round();
        if !raw.is_finite() || raw <= 1.0 {
            return 1;
        }
        let capped = capacity.max(1);
        if raw >= capped as f64 {
            capped
        } else {
            raw as usize
        }
    }

    pub fn set_cadence(&mut self, secs: f64) -> Result<(), ParamError> {
        self.cadence_secs = require_positive("cadence_secs", secs)?;
        Ok(())
    }

    pub fn set_window_secs(&mut self, secs: f64) -> Result<(), ParamError> {
        self.window_secs = require_positive("window_secs", secs)?;
        Ok(())
    }

    pub fn set_offset(&mut self, deg: f64) -> Result<(), ParamError> {
        self.angle_offset_deg = require_finite("angle_offset_deg", deg)?;
        Ok(())
    }

    pub fn set_gain(&mut self, gain: f64) -> Result<(), ParamError> {
        self.gain = require_finite("gain", gain)?;
        Ok(())
    }

    pub fn set_reference_temp(&mut self, temp: f64) -> Result<(), ParamError> {
        self.reference_temp = require_positive("reference_temp", temp)?;
        Ok(())
    }

    /// Apply a decoded remote update. Returns whether the update touched
    /// cadence or window duration (and so requires a span recompute).
    pub fn apply(&mut self, update: ParamUpdate) -> Result<bool, ParamError> {
        match update {
            ParamUpdate::CadenceSecs(v) => {
                self.set_cadence(v)?;
                Ok(true)
            }
            ParamUpdate::WindowSecs(v) => {
                self.set_window_secs(v)?;
                Ok(true)
            }
            ParamUpdate::AngleOffsetDeg(v) => {
                self.set_offset(v)?;
                Ok(false)
            }
            ParamUpdate::Gain(v) => {
                self.set_gain(v)?;
                Ok(false)
            }
            ParamUpdate::ReferenceTemp(v) => {
                self.set_reference_temp(v)?;
                Ok(false)
            }
        }
    }
}

/// A decoded update from the remote parameter feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    CadenceSecs(f64),
    WindowSecs(f64),
    AngleOffsetDeg(f64),
    Gain(f64),
    ReferenceTemp(f64),
}

impl ParamUpdate {
    /// Route a named update from the wire. Unknown names yield `None`
    /// and are ignored by the consumer.
    pub fn from_named(name: &str, value: f64) -> Option<Self> {
        match name {
            "cadence-seconds" => Some(Self::CadenceSecs(value)),
            "window-seconds" => Some(Self::WindowSecs(value)),
            "angle-offset-degrees" => Some(Self::AngleOffsetDeg(value)),
            "gain" => Some(Self::Gain(value)),
            "reference-temperature" => Some(Self::ReferenceTemp(value)),
            _ => None,
        }
    }
}
