pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// Ambient environment sensor: normalized light intensity plus temperature.
///
/// `read_light` returns a value in `[0.0, 1.0]` (0 = dark, 1 = saturated).
/// `read_temperature` returns degrees Celsius. Both may block up to
/// `timeout` waiting for the sensor.
pub trait EnvSensor {
    fn read_light(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>>;

    fn read_temperature(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>>;
}

/// Shade/blind actuator. Angles are whole degrees in `[0, 180]`;
/// re-applying the current angle must be harmless.
pub trait ShadeServo {
    fn apply_angle(&mut self, degrees: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
