//! Simulated environment hardware for the shading pipeline.
//!
//! The real device reads an LDR and a DHT22 and drives a shade servo; this
//! crate replaces all three with deterministic simulations so the control
//! loop can run anywhere. Real drivers live behind the same
//! `shade_traits` seams and are out of scope here.
pub mod error;

use shade_traits::{EnvSensor, ShadeServo};
use std::time::Duration;

/// Tiny xorshift PRNG; deterministic noise without pulling in a rand crate.
#[derive(Debug, Clone)]
struct XorShift32(u32);

impl XorShift32 {
    fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in [0, 1).
    fn next_f32(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32) / (u32::MAX as f32 + 1.0)
    }
}

/// Simulated ambient sensor: a half-sine daylight curve over a configurable
/// day length, plus bounded noise, and a slow temperature swing around a
/// base value. Each read advances the simulated time of day by one step.
#[derive(Debug, Clone)]
pub struct SimulatedEnv {
    step: u64,
    steps_per_day: u64,
    noise_amp: f32,
    base_temp: f32,
    temp_swing: f32,
    rng: XorShift32,
}

impl SimulatedEnv {
    pub fn new(seed: u32) -> Self {
        Self {
            step: 0,
            steps_per_day: 288, // one simulated day per 288 reads
            noise_amp: 0.02,
            base_temp: 28.0,
            temp_swing: 4.0,
            rng: XorShift32::new(seed),
        }
    }

    pub fn with_day_length(mut self, steps_per_day: u64) -> Self {
        self.steps_per_day = steps_per_day.max(1);
        self
    }

    fn phase(&self) -> f32 {
        (self.step % self.steps_per_day) as f32 / self.steps_per_day as f32
    }
}

impl Default for SimulatedEnv {
    fn default() -> Self {
        Self::new(0x5EED)
    }
}

impl EnvSensor for SimulatedEnv {
    fn read_light(
        &mut self,
        _timeout: Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        // Daylight: zero at night, half-sine across the day.
        let phase = self.phase();
        let daylight = (phase * std::f32::consts::PI).sin().max(0.0);
        let noise = (self.rng.next_f32() * 2.0 - 1.0) * self.noise_amp;
        self.step += 1;
        let light = (daylight + noise).clamp(0.0, 1.0);
        tracing::trace!(light, phase, "simulated light read");
        Ok(light)
    }

    fn read_temperature(
        &mut self,
        _timeout: Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        // Temperature trails the light curve: warmest mid-afternoon.
        let phase = self.phase();
        let swing = ((phase - 0.08) * std::f32::consts::TAU).sin();
        Ok(self.base_temp + self.temp_swing * swing)
    }
}

/// Simulated shade servo: records the last commanded angle and counts how
/// often the angle actually changed (slew), so tests can assert on both.
#[derive(Debug, Default)]
pub struct SimulatedShade {
    last_angle: Option<u8>,
    slew_count: u64,
}

impl SimulatedShade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_angle(&self) -> Option<u8> {
        self.last_angle
    }

    /// Number of commands that changed the angle.
    pub fn slew_count(&self) -> u64 {
        self.slew_count
    }
}

impl ShadeServo for SimulatedShade {
    fn apply_angle(&mut self, degrees: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if degrees > 180 {
            return Err(Box::new(error::HwError::Servo(format!(
                "angle {degrees} out of range"
            ))));
        }
        if self.last_angle != Some(degrees) {
            self.slew_count += 1;
            tracing::debug!(degrees, "shade moved (simulated)");
        }
        self.last_angle = Some(degrees);
        Ok(())
    }
}
