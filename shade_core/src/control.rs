//! The shade-angle control law.
//!
//! Maps the window average, a fresh temperature reading, and the tunable
//! coefficients to a bounded servo command:
//!
//! ```text
//! ratio = ln(cadence / window)
//! angle = offset + (180 - offset) * average * gain * ratio * (temp / reference)
//! ```
//!
//! `ratio` damps the swing as the averaging window grows relative to the
//! cadence (slower response, smaller excursions); the temperature ratio
//! biases the angle warmer/cooler around the reference. Whatever the
//! intermediates do, the command leaving this module is in [0, 180].

use crate::params::ParameterStore;

/// Full servo travel in degrees.
pub const MAX_ANGLE_DEG: f64 = 180.0;

/// Evaluate the control law. Always returns an angle in `[0, 180]`.
///
/// `cadence == window` collapses the deviation term (ratio = 0) and the
/// result is exactly the clamped offset. A non-finite intermediate (a
/// NaN temperature from a failing sensor survives the trait boundary as
/// a value, not an error) also degrades to the clamped offset baseline.
pub fn shade_angle(average: f32, temperature: f32, params: &ParameterStore) -> u8 {
    let offset = params.angle_offset_deg();
    let ratio = (params.cadence_secs() / params.window_secs()).ln();
    let deviation = (MAX_ANGLE_DEG - offset)
        * f64::from(average)
        * params.gain()
        * ratio
        * (f64::from(temperature) / params.reference_temp());
    let angle = offset + deviation;
    let bounded = if angle.is_finite() {
        angle.clamp(0.0, MAX_ANGLE_DEG)
    } else {
        offset.clamp(0.0, MAX_ANGLE_DEG)
    };
    bounded.round() as u8
}
