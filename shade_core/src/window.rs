//! Rolling window of light readings.
//!
//! The arena is allocated once at `capacity` slots and never grows; the
//! live portion is the current `span`, which changes whenever cadence or
//! window duration is retuned. Resizing deliberately discards history:
//! samples collected under a different span do not form a meaningful
//! average under the new one, and the refill cost is the same transient
//! paid at first boot.

/// Fixed-capacity circular buffer of normalized readings.
///
/// Invariant, after every operation: `valid_count <= span <= capacity`.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    slots: Vec<f32>,
    span: usize,
    write_index: usize,
    valid_count: usize,
}

impl SampleWindow {
    /// Create a window with `capacity` slots and an initial `span`.
    /// Both are clamped to at least 1; `span` is clamped to `capacity`.
    pub fn new(capacity: usize, span: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![0.0; capacity],
            span: span.clamp(1, capacity),
            write_index: 0,
            valid_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn is_full(&self) -> bool {
        self.valid_count == self.span
    }

    /// Store a reading and advance the write cursor modulo the current
    /// span. Never fails. Inputs are normalized on entry: non-finite
    /// values become 0.0, everything else is clamped into [0, 1].
    pub fn append(&mut self, reading: f32) {
        let reading = if reading.is_finite() {
            reading.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.slots[self.write_index] = reading;
        self.write_index = (self.write_index + 1) % self.span;
        if self.valid_count < self.span {
            self.valid_count += 1;
        }
    }

    /// Arithmetic mean of the stored readings; 0.0 while the window is
    /// empty (normal right after boot or a reconfiguration).
    pub fn average(&self) -> f32 {
        if self.valid_count == 0 {
            return 0.0;
        }
        // Writes wrap within [0, span), so the valid slots are always the
        // prefix 0..valid_count.
        let sum: f32 = self.slots[..self.valid_count].iter().sum();
        sum / self.valid_count as f32
    }

    /// Adopt a new span, clamped to `[1, capacity]`. Equal span is a
    /// no-op; any actual change resets the cursor and discards history.
    pub fn reconfigure(&mut self, new_span: usize) {
        let new_span = new_span.clamp(1, self.capacity());
        if new_span == self.span {
            return;
        }
        tracing::debug!(
            old_span = self.span,
            new_span,
            dropped = self.valid_count,
            "window reconfigured"
        );
        self.span = new_span;
        self.write_index = 0;
        self.valid_count = 0;
    }

    /// Drop all stored readings without changing the span.
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.valid_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::SampleWindow;

    #[test]
    fn prefix_stays_valid_while_filling() {
        let mut w = SampleWindow::new(10, 4);
        w.append(0.2);
        w.append(0.4);
        assert_eq!(w.valid_count(), 2);
        assert!((w.average() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn wraps_within_span_not_capacity() {
        let mut w = SampleWindow::new(10, 3);
        for r in [0.1, 0.2, 0.3, 0.9] {
            w.append(r);
        }
        // Fourth write overwrote slot 0; slots 3..10 were never touched.
        assert_eq!(w.valid_count(), 3);
        let expect = (0.9 + 0.2 + 0.3) / 3.0;
        assert!((w.average() - expect).abs() < 1e-6);
    }

    #[test]
    fn non_finite_readings_are_stored_as_zero() {
        let mut w = SampleWindow::new(4, 2);
        w.append(f32::NAN);
        w.append(f32::INFINITY);
        assert_eq!(w.valid_count(), 2);
        assert_eq!(w.average(), 0.0);
    }

    #[test]
    fn out_of_range_readings_clamp() {
        let mut w = SampleWindow::new(4, 2);
        w.append(-3.0);
        w.append(7.0);
        assert!((w.average() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn clear_keeps_span() {
        let mut w = SampleWindow::new(8, 5);
        w.append(1.0);
        w.clear();
        assert_eq!(w.span(), 5);
        assert_eq!(w.valid_count(), 0);
        assert_eq!(w.average(), 0.0);
    }
}
