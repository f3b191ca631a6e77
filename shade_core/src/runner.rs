//! Cooperative run loop around `ShadeCore::tick`.
//!
//! Paces ticks through the engine's clock, hands the rolling average to
//! a publish callback at a low cadence, and exits on a shutdown flag or
//! after an optional tick budget. On a clean exit the shade is parked
//! at the offset baseline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::Pacing;
use crate::engine::ShadeCore;
use crate::error::Result;
use crate::util::MILLIS_PER_SEC;

/// Callback receiving the window average for the external publisher.
pub type PublishFn = Box<dyn FnMut(f32) + Send>;

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    pub ticks: u64,
    pub samples: u64,
    pub publishes: u64,
    pub last_average: f32,
    pub last_angle: Option<u8>,
}

/// Drive the engine until `shutdown` is raised or `max_ticks` elapse
/// (`None` = run until shutdown).
pub fn run<E, V>(
    core: &mut ShadeCore<E, V>,
    pacing: Pacing,
    shutdown: &Arc<AtomicBool>,
    mut on_publish: Option<PublishFn>,
    max_ticks: Option<u64>,
) -> Result<RunStats>
where
    E: shade_traits::EnvSensor,
    V: shade_traits::ShadeServo,
{
    let publish_ms = pacing.publish_secs.saturating_mul(MILLIS_PER_SEC);
    let tick_period = Duration::from_millis(pacing.tick_ms.max(1));

    core.begin();
    tracing::info!(
        tick_ms = pacing.tick_ms,
        publish_secs = pacing.publish_secs,
        span = core.window().span(),
        "shading loop start"
    );

    let clock = core.clock.clone();
    let epoch = core.epoch;
    let mut last_publish_ms: u64 = 0;
    let mut stats = RunStats::default();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!(ticks = stats.ticks, "shutdown requested");
            break;
        }
        if let Some(budget) = max_ticks
            && stats.ticks >= budget
        {
            tracing::debug!(ticks = stats.ticks, "tick budget reached");
            break;
        }

        let outcome = core.tick()?;
        stats.ticks += 1;
        if outcome.sampled {
            stats.samples += 1;
        }
        stats.last_average = outcome.average;
        stats.last_angle = Some(outcome.angle);

        let now = clock.ms_since(epoch);
        if now.saturating_sub(last_publish_ms) >= publish_ms {
            if let Some(publish) = on_publish.as_mut() {
                publish(outcome.average);
            }
            stats.publishes += 1;
            last_publish_ms = now;
            tracing::debug!(average = outcome.average, "average published");
        }

        clock.sleep(tick_period);
    }

    core.park()?;
    tracing::info!(
        ticks = stats.ticks,
        samples = stats.samples,
        last_average = stats.last_average,
        "shading loop finished"
    );
    Ok(stats)
}
