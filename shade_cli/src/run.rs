//! Command implementations: the control loop and the self check.

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eyre::WrapErr;
use shade_config::Config;
use shade_core::runner::PublishFn;
use shade_core::{Pacing, ParameterStore, ShadeBuilder, Timeouts, runner};
use shade_hardware::{SimulatedEnv, SimulatedShade};
use shade_traits::EnvSensor;

fn params_from(cfg: &Config) -> eyre::Result<ParameterStore> {
    ParameterStore::new(
        cfg.sampling.cadence_secs,
        cfg.sampling.window_secs,
        cfg.control.angle_offset_deg,
        cfg.control.gain,
        cfg.control.reference_temp,
    )
    .map_err(eyre::Report::new)
    .wrap_err("config rejected by parameter store")
}

pub fn run_loop(
    cfg: &Config,
    seed: u32,
    ticks: Option<u64>,
    stdin_updates: bool,
    stats: bool,
    json: bool,
) -> eyre::Result<()> {
    let mut core = ShadeBuilder::new()
        .with_params(params_from(cfg)?)
        .with_capacity(cfg.sampling.capacity)
        .with_timeouts(Timeouts {
            sensor_ms: cfg.timeouts.sensor_ms,
        })
        .with_sensor(SimulatedEnv::new(seed))
        .with_servo(SimulatedShade::new())
        .build()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = shutdown.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .wrap_err("installing Ctrl-C handler")?;
    }

    if stdin_updates {
        let feed = core.param_feed();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let mut parts = line.split_whitespace();
                let (Some(name), Some(raw)) = (parts.next(), parts.next()) else {
                    if !line.trim().is_empty() {
                        tracing::warn!(line, "expected `<name> <value>`");
                    }
                    continue;
                };
                match raw.parse::<f64>() {
                    Ok(value) => {
                        if feed.send_named(name, value) {
                            tracing::info!(name, value, "parameter update queued");
                        } else {
                            tracing::warn!(name, "unknown parameter name");
                        }
                    }
                    Err(_) => tracing::warn!(raw, "value is not a number"),
                }
            }
        });
    }

    let publish: PublishFn = if json {
        Box::new(|avg| {
            println!(
                "{}",
                serde_json::json!({ "event": "average", "value": avg })
            );
        })
    } else {
        Box::new(|avg| println!("average: {avg:.3}"))
    };

    let pacing = Pacing {
        tick_ms: cfg.pacing.tick_ms,
        publish_secs: cfg.pacing.publish_secs,
    };
    let result = runner::run(&mut core, pacing, &shutdown, Some(publish), ticks)?;

    if stats {
        let slews = core.servo().slew_count();
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "stats",
                    "ticks": result.ticks,
                    "samples": result.samples,
                    "publishes": result.publishes,
                    "last_average": result.last_average,
                    "last_angle": result.last_angle,
                    "servo_slews": slews,
                })
            );
        } else {
            println!(
                "ticks={} samples={} publishes={} last_average={:.3} last_angle={:?} servo_slews={}",
                result.ticks,
                result.samples,
                result.publishes,
                result.last_average,
                result.last_angle,
                slews,
            );
        }
    }
    Ok(())
}

/// Build the full pipeline against simulated hardware and run one tick.
pub fn self_check(cfg: &Config, json: bool) -> eyre::Result<()> {
    let timeout = Duration::from_millis(cfg.timeouts.sensor_ms);
    let mut sensor = SimulatedEnv::new(1);
    let light = sensor
        .read_light(timeout)
        .map_err(|e| eyre::eyre!("light sensor: {e}"))?;
    let temperature = sensor
        .read_temperature(timeout)
        .map_err(|e| eyre::eyre!("temperature sensor: {e}"))?;

    let mut core = ShadeBuilder::new()
        .with_params(params_from(cfg)?)
        .with_capacity(cfg.sampling.capacity)
        .with_timeouts(Timeouts {
            sensor_ms: cfg.timeouts.sensor_ms,
        })
        .with_sensor(sensor)
        .with_servo(SimulatedShade::new())
        .build()
        .wrap_err("assembling pipeline")?;
    core.begin();
    let outcome = core.tick().wrap_err("first tick")?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "self-check",
                "ok": true,
                "light": light,
                "temperature": temperature,
                "angle": outcome.angle,
            })
        );
    } else {
        println!(
            "self-check: ok (light={light:.3}, temperature={temperature:.1}, angle={})",
            outcome.angle
        );
    }
    Ok(())
}
