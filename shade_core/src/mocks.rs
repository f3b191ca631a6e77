//! Test and helper doubles for shade_core.

use shade_traits::{EnvSensor, ShadeServo};
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Sensor returning fixed light and temperature values.
#[derive(Debug, Clone, Copy)]
pub struct ConstEnv {
    pub light: f32,
    pub temperature: f32,
}

impl ConstEnv {
    pub fn new(light: f32, temperature: f32) -> Self {
        Self { light, temperature }
    }
}

impl EnvSensor for ConstEnv {
    fn read_light(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        Ok(self.light)
    }

    fn read_temperature(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        Ok(self.temperature)
    }
}

/// Sensor that plays back a light sequence, then repeats the last value.
/// Temperature is fixed.
#[derive(Debug, Clone)]
pub struct SeqEnv {
    seq: Vec<f32>,
    idx: usize,
    pub temperature: f32,
}

impl SeqEnv {
    pub fn new(seq: impl Into<Vec<f32>>, temperature: f32) -> Self {
        Self {
            seq: seq.into(),
            idx: 0,
            temperature,
        }
    }
}

impl EnvSensor for SeqEnv {
    fn read_light(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        let v = if self.idx < self.seq.len() {
            let x = self.seq[self.idx];
            self.idx += 1;
            x
        } else {
            self.seq.last().copied().unwrap_or(0.0)
        };
        Ok(v)
    }

    fn read_temperature(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        Ok(self.temperature)
    }
}

/// Sensor that always errors; for exercising the hardware error path.
pub struct FaultyEnv;

impl EnvSensor for FaultyEnv {
    fn read_light(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        Err(Box::new(std::io::Error::other("light sensor offline")))
    }

    fn read_temperature(&mut self, _timeout: Duration) -> Result<f32, BoxError> {
        Err(Box::new(std::io::Error::other("temp sensor offline")))
    }
}

/// Servo spy recording every commanded angle.
#[derive(Debug, Default)]
pub struct SpyServo {
    pub angles: Vec<u8>,
}

impl SpyServo {
    pub fn last(&self) -> Option<u8> {
        self.angles.last().copied()
    }
}

impl ShadeServo for SpyServo {
    fn apply_angle(&mut self, degrees: u8) -> Result<(), BoxError> {
        self.angles.push(degrees);
        Ok(())
    }
}

/// Servo that refuses every command; for error-path tests.
pub struct StuckServo;

impl ShadeServo for StuckServo {
    fn apply_angle(&mut self, _degrees: u8) -> Result<(), BoxError> {
        Err(Box::new(std::io::Error::other("servo stuck")))
    }
}
