//! Maps `Box<dyn Error>` from trait boundaries to typed `ShadeError`.
//!
//! The traits in `shade_traits` use `Box<dyn Error + Send + Sync>` for
//! maximum flexibility; this module converts those to our typed error
//! enum, with an optional feature-gated path for
//! `shade_hardware::HwError` downcasting.

use crate::error::ShadeError;

/// Map a trait-boundary error to a typed `ShadeError`.
///
/// Attempts to downcast known hardware error types first, then falls
/// back to string-based heuristics.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> ShadeError {
    #[cfg(feature = "hardware-errors")]
    {
        if let Some(hw) = e.downcast_ref::<shade_hardware::error::HwError>() {
            return match hw {
                shade_hardware::error::HwError::Timeout => ShadeError::Timeout,
                other => ShadeError::HardwareFault(other.to_string()),
            };
        }
    }

    // Fallback: string-based detection
    let s = e.to_string();
    if s.to_lowercase().contains("timeout") {
        ShadeError::Timeout
    } else {
        ShadeError::Hardware(s)
    }
}

#[cfg(test)]
mod tests {
    use super::map_hw_error;
    use crate::error::ShadeError;

    #[test]
    fn string_timeout_maps_to_timeout() {
        let e: Box<dyn std::error::Error + Send + Sync> = "sensor Timeout waiting".into();
        assert!(matches!(map_hw_error(&*e), ShadeError::Timeout));
    }

    #[test]
    fn other_errors_map_to_hardware() {
        let e: Box<dyn std::error::Error + Send + Sync> = "bus collision".into();
        assert!(matches!(map_hw_error(&*e), ShadeError::Hardware(_)));
    }

    #[cfg(feature = "hardware-errors")]
    #[test]
    fn typed_hw_timeout_downcasts() {
        let e: Box<dyn std::error::Error + Send + Sync> =
            Box::new(shade_hardware::error::HwError::Timeout);
        assert!(matches!(map_hw_error(&*e), ShadeError::Timeout));
    }

    #[cfg(feature = "hardware-errors")]
    #[test]
    fn typed_hw_fault_downcasts() {
        let e: Box<dyn std::error::Error + Send + Sync> =
            Box::new(shade_hardware::error::HwError::Servo("stuck".into()));
        assert!(matches!(map_hw_error(&*e), ShadeError::HardwareFault(_)));
    }
}
