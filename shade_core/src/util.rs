//! Common time helpers for shade_core.

/// Number of milliseconds in one second.
pub const MILLIS_PER_SEC: u64 = 1_000;

/// Convert a duration in seconds (already validated > 0) to whole
/// milliseconds, rounding to nearest and never returning 0.
#[inline]
pub fn secs_to_ms(secs: f64) -> u64 {
    let ms = (secs * MILLIS_PER_SEC as f64).round();
    if ms >= u64::MAX as f64 {
        u64::MAX
    } else if ms <= 1.0 {
        1
    } else {
        ms as u64
    }
}

#[cfg(test)]
mod tests {
    use super::secs_to_ms;

    #[test]
    fn rounds_to_nearest_millisecond() {
        assert_eq!(secs_to_ms(5.0), 5_000);
        assert_eq!(secs_to_ms(0.25), 250);
        assert_eq!(secs_to_ms(0.0004), 1); // never 0
    }

    #[test]
    fn saturates_on_huge_values() {
        assert_eq!(secs_to_ms(f64::MAX), u64::MAX);
    }
}
