//! The shading tick engine (`ShadeCore`).
//!
//! One `tick()` performs, in order: drain the asynchronous parameter
//! feed, draw a light sample if the cadence gate is due, recompute the
//! control law from the window average and a fresh temperature reading,
//! and command the servo once. The engine is the sole owner of the
//! window and the parameter store; remote updates only ever reach them
//! through the channel drained at the top of the tick, so a tick can
//! never observe a half-applied reconfiguration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel as xch;
use eyre::WrapErr;
use shade_traits::clock::Clock;

use crate::config::Timeouts;
use crate::control;
use crate::error::{ParamError, Result};
use crate::gate::CadenceGate;
use crate::hw_error::map_hw_error;
use crate::params::{ParamUpdate, ParameterStore};
use crate::window::SampleWindow;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Whether a new light sample was drawn this tick.
    pub sampled: bool,
    /// Window average used for the control law.
    pub average: f32,
    /// Angle commanded to the servo.
    pub angle: u8,
}

/// Cloneable sender half of the parameter feed.
///
/// Fire-and-forget: validation happens in the tick loop, where a
/// rejected value is logged and dropped. `send_named` additionally
/// filters unknown wire names.
#[derive(Debug, Clone)]
pub struct ParamFeed {
    tx: xch::Sender<ParamUpdate>,
}

impl ParamFeed {
    /// Queue a decoded update. Returns false if the engine is gone.
    pub fn send(&self, update: ParamUpdate) -> bool {
        self.tx.send(update).is_ok()
    }

    /// Route a named update from the wire; unknown names are ignored.
    /// Returns true only when the update was recognized and queued.
    pub fn send_named(&self, name: &str, value: f64) -> bool {
        match ParamUpdate::from_named(name, value) {
            Some(update) => self.send(update),
            None => {
                tracing::debug!(name, value, "unknown parameter name ignored");
                false
            }
        }
    }
}

/// The sampling/aggregation/actuation pipeline.
pub struct ShadeCore<E: shade_traits::EnvSensor, V: shade_traits::ShadeServo> {
    pub(crate) sensor: E,
    pub(crate) servo: V,
    pub(crate) window: SampleWindow,
    pub(crate) params: ParameterStore,
    pub(crate) gate: CadenceGate,
    pub(crate) timeouts: Timeouts,
    pub(crate) clock: Arc<dyn Clock + Send + Sync>,
    pub(crate) epoch: Instant,
    pub(crate) updates_tx: xch::Sender<ParamUpdate>,
    pub(crate) updates_rx: xch::Receiver<ParamUpdate>,
    pub(crate) last_angle: Option<u8>,
}

impl<E: shade_traits::EnvSensor, V: shade_traits::ShadeServo> core::fmt::Debug for ShadeCore<E, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShadeCore")
            .field("span", &self.window.span())
            .field("valid_count", &self.window.valid_count())
            .field("last_angle", &self.last_angle)
            .finish()
    }
}

impl<E: shade_traits::EnvSensor, V: shade_traits::ShadeServo> ShadeCore<E, V> {
    /// Current window average (the value handed to the publisher).
    pub fn average(&self) -> f32 {
        self.window.average()
    }

    /// Last angle commanded to the servo, if any tick has run.
    pub fn last_angle(&self) -> Option<u8> {
        self.last_angle
    }

    pub fn params(&self) -> &ParameterStore {
        &self.params
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Borrow the servo (tests inspect spy doubles through this).
    pub fn servo(&self) -> &V {
        &self.servo
    }

    /// Hand out a sender for the asynchronous parameter feed.
    pub fn param_feed(&self) -> ParamFeed {
        ParamFeed {
            tx: self.updates_tx.clone(),
        }
    }

    /// Reset per-run state (epoch, gate, window contents). Call before
    /// a fresh run; pending feed updates survive and apply next tick.
    pub fn begin(&mut self) {
        self.epoch = self.clock.now();
        self.gate.reset();
        self.window.clear();
        self.last_angle = None;
    }

    /// One iteration of the control loop.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        self.drain_updates();

        let now = self.clock.ms_since(self.epoch);
        let timeout = Duration::from_millis(self.timeouts.sensor_ms);

        let mut sampled = false;
        if self.gate.due(now, self.params.cadence_secs()) {
            let light = self
                .sensor
                .read_light(timeout)
                .map_err(|e| eyre::Report::new(map_hw_error(&*e)))
                .wrap_err("reading light sensor")?;
            self.window.append(light);
            self.gate.mark(now);
            sampled = true;
            tracing::trace!(light, now_ms = now, "sample appended");
        }

        let average = self.window.average();
        let temperature = self
            .sensor
            .read_temperature(timeout)
            .map_err(|e| eyre::Report::new(map_hw_error(&*e)))
            .wrap_err("reading temperature")?;

        let angle = control::shade_angle(average, temperature, &self.params);
        self.servo
            .apply_angle(angle)
            .map_err(|e| eyre::Report::new(map_hw_error(&*e)))
            .wrap_err("applying shade angle")?;
        self.last_angle = Some(angle);

        Ok(TickOutcome {
            sampled,
            average,
            angle,
        })
    }

    /// Apply a decoded update synchronously. Cadence/window acceptance
    /// rederives the span and reconfigures the window in the same call,
    /// before any further tick can sample or average.
    pub fn apply_update(&mut self, update: ParamUpdate) -> std::result::Result<(), ParamError> {
        let span_relevant = self.params.apply(update)?;
        if span_relevant {
            let span = self.params.span_for(self.window.capacity());
            self.window.reconfigure(span);
        }
        Ok(())
    }

    /// Park the shade at the offset baseline (clean-shutdown posture).
    pub fn park(&mut self) -> Result<()> {
        let angle = self
            .params
            .angle_offset_deg()
            .clamp(0.0, control::MAX_ANGLE_DEG)
            .round() as u8;
        self.servo
            .apply_angle(angle)
            .map_err(|e| eyre::Report::new(map_hw_error(&*e)))
            .wrap_err("parking shade")?;
        self.last_angle = Some(angle);
        Ok(())
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.updates_rx.try_recv() {
            if let Err(e) = self.apply_update(update) {
                tracing::warn!(error = %e, ?update, "parameter update rejected");
            }
        }
    }
}
