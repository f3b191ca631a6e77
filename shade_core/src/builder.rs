//! Type-state builder for `ShadeCore`.
//!
//! Sensor and servo are mandatory and tracked in the type; `build()` is
//! only callable once both are set. `try_build()` is available in any
//! state and reports what is missing as a typed `BuildError`.

use std::marker::PhantomData;
use std::sync::Arc;

use crossbeam_channel as xch;
use shade_traits::clock::{Clock, MonotonicClock};

use crate::config::Timeouts;
use crate::engine::ShadeCore;
use crate::error::{BuildError, Result};
use crate::gate::CadenceGate;
use crate::params::ParameterStore;
use crate::window::SampleWindow;

// Type-state markers
pub struct Missing;
pub struct Set;

/// Builder for `ShadeCore`. Validated on `build()`.
pub struct ShadeBuilder<E, V, Se = Missing, Sv = Missing> {
    sensor: Option<E>,
    servo: Option<V>,
    params: ParameterStore,
    capacity: usize,
    timeouts: Timeouts,
    clock: Option<Box<dyn Clock + Send + Sync>>,
    _se: PhantomData<Se>,
    _sv: PhantomData<Sv>,
}

impl<E, V> Default for ShadeBuilder<E, V, Missing, Missing> {
    fn default() -> Self {
        Self {
            sensor: None,
            servo: None,
            params: ParameterStore::default(),
            capacity: 100,
            timeouts: Timeouts::default(),
            clock: None,
            _se: PhantomData,
            _sv: PhantomData,
        }
    }
}

impl<E, V> ShadeBuilder<E, V, Missing, Missing> {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Chainable setters that do not affect type-state.
impl<E, V, Se, Sv> ShadeBuilder<E, V, Se, Sv> {
    pub fn with_params(mut self, params: ParameterStore) -> Self {
        self.params = params;
        self
    }

    /// Upper bound on window span; allocated once at build.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Custom clock; defaults to `MonotonicClock` when not provided.
    pub fn with_clock(mut self, clock: Box<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Fallible build available in any type-state.
    pub fn try_build(self) -> Result<ShadeCore<E, V>>
    where
        E: shade_traits::EnvSensor,
        V: shade_traits::ShadeServo,
    {
        let ShadeBuilder {
            sensor,
            servo,
            params,
            capacity,
            timeouts,
            clock,
            _se: _,
            _sv: _,
        } = self;

        let sensor = sensor.ok_or_else(|| eyre::Report::new(BuildError::MissingSensor))?;
        let servo = servo.ok_or_else(|| eyre::Report::new(BuildError::MissingServo))?;

        if capacity == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "capacity must be >= 1",
            )));
        }
        if timeouts.sensor_ms == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "sensor_ms must be >= 1",
            )));
        }

        let clock: Arc<dyn Clock + Send + Sync> = match clock {
            Some(b) => Arc::from(b),
            None => Arc::new(MonotonicClock::new()),
        };
        let epoch = clock.now();

        let span = params.span_for(capacity);
        let window = SampleWindow::new(capacity, span);
        let (updates_tx, updates_rx) = xch::unbounded();

        Ok(ShadeCore {
            sensor,
            servo,
            window,
            params,
            gate: CadenceGate::new(),
            timeouts,
            clock,
            epoch,
            updates_tx,
            updates_rx,
            last_angle: None,
        })
    }
}

// Setters that advance type-state when providing mandatory components.
impl<E, V, Sv> ShadeBuilder<E, V, Missing, Sv> {
    pub fn with_sensor(self, sensor: E) -> ShadeBuilder<E, V, Set, Sv> {
        let ShadeBuilder {
            sensor: _,
            servo,
            params,
            capacity,
            timeouts,
            clock,
            _se: _,
            _sv: _,
        } = self;
        ShadeBuilder {
            sensor: Some(sensor),
            servo,
            params,
            capacity,
            timeouts,
            clock,
            _se: PhantomData,
            _sv: PhantomData,
        }
    }
}

impl<E, V, Se> ShadeBuilder<E, V, Se, Missing> {
    pub fn with_servo(self, servo: V) -> ShadeBuilder<E, V, Se, Set> {
        let ShadeBuilder {
            sensor,
            servo: _,
            params,
            capacity,
            timeouts,
            clock,
            _se: _,
            _sv: _,
        } = self;
        ShadeBuilder {
            sensor,
            servo: Some(servo),
            params,
            capacity,
            timeouts,
            clock,
            _se: PhantomData,
            _sv: PhantomData,
        }
    }
}

impl<E, V> ShadeBuilder<E, V, Set, Set> {
    /// Validate and build. Only available when sensor and servo are set.
    pub fn build(self) -> Result<ShadeCore<E, V>>
    where
        E: shade_traits::EnvSensor,
        V: shade_traits::ShadeServo,
    {
        self.try_build()
    }
}

#[cfg(test)]
mod tests {
    use super::ShadeBuilder;
    use crate::error::BuildError;
    use crate::mocks::{ConstEnv, SpyServo};
    use crate::params::ParameterStore;

    #[test]
    fn try_build_reports_missing_components() {
        let err = ShadeBuilder::<ConstEnv, SpyServo>::new()
            .try_build()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingSensor)
        ));

        let err = ShadeBuilder::<ConstEnv, SpyServo>::new()
            .with_sensor(ConstEnv::new(0.5, 30.0))
            .try_build()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::MissingServo)
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = ShadeBuilder::new()
            .with_capacity(0)
            .with_sensor(ConstEnv::new(0.5, 30.0))
            .with_servo(SpyServo::default())
            .build()
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidConfig(_))
        ));
    }

    #[test]
    fn built_core_derives_span_from_params() {
        let params = ParameterStore::new(5.0, 120.0, 30.0, 0.75, 30.0).unwrap();
        let core = ShadeBuilder::new()
            .with_params(params)
            .with_capacity(100)
            .with_sensor(ConstEnv::new(0.5, 30.0))
            .with_servo(SpyServo::default())
            .build()
            .unwrap();
        assert_eq!(core.window().span(), 24);
        assert_eq!(core.window().capacity(), 100);
    }
}
