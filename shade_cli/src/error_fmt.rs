//! Human-readable error descriptions for the CLI.

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use shade_core::{BuildError, ParamError, ShadeError};

    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingSensor => {
                "What happened: No environment sensor was provided to the shading engine.\nLikely causes: Sensor failed to initialize or was not wired into the builder.\nHow to fix: Ensure the sensor is created successfully and passed via with_sensor(...).".to_string()
            }
            BuildError::MissingServo => {
                "What happened: No shade servo was provided to the shading engine.\nLikely causes: Servo failed to initialize or was not wired into the builder.\nHow to fix: Ensure the servo is created successfully and passed via with_servo(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<ShadeError>() {
        if matches!(se, ShadeError::Timeout) {
            return "What happened: A sensor read timed out.\nLikely causes: Sensor not responding or timeouts.sensor_ms too low.\nHow to fix: Check the sensor and consider raising timeouts.sensor_ms in the config.".to_string();
        }
        return format!(
            "What happened: {se}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
        );
    }

    if let Some(pe) = err.downcast_ref::<ParamError>() {
        return format!(
            "What happened: A tunable parameter was rejected ({pe}).\nLikely causes: Out-of-range value in the config or a live update.\nHow to fix: Correct the value; cadence, window, and reference temperature must be positive and finite."
        );
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("parse config") || lower.contains("read config") {
        return format!(
            "What happened: The config file could not be loaded.\nLikely causes: Wrong path, or a TOML syntax error.\nHow to fix: Check the --config path and the file contents. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}
