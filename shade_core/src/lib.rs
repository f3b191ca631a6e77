#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core shading pipeline (hardware-agnostic).
//!
//! This crate implements the sampling, aggregation, and adaptive-actuation
//! pipeline of the shading controller. All hardware interactions go through
//! the `shade_traits::EnvSensor` and `shade_traits::ShadeServo` traits.
//!
//! ## Architecture
//!
//! - **Window**: fixed-capacity circular buffer of light readings with a
//!   retunable span (`window` module)
//! - **Parameters**: the remotely-tunable coefficients and their single
//!   point of mutation (`params` module)
//! - **Gate**: elapsed-time sampling cadence (`gate` module)
//! - **Control**: the bounded angle law (`control` module)
//! - **Engine**: the per-tick state machine and the asynchronous update
//!   feed (`engine` module)
//! - **Runner**: paced loop with publishing and shutdown (`runner` module)
//!
//! ## Concurrency
//!
//! The tick loop is the sole owner of all pipeline state. The remote
//! parameter feed crosses threads through a channel that the engine
//! drains at the top of each tick, so reconfiguration is atomic with
//! respect to sampling and averaging by construction.

pub mod builder;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod gate;
pub mod hw_error;
pub mod mocks;
pub mod params;
pub mod runner;
pub mod util;
pub mod window;

pub use builder::ShadeBuilder;
pub use config::{Pacing, Timeouts};
pub use control::shade_angle;
pub use engine::{ParamFeed, ShadeCore, TickOutcome};
pub use error::{BuildError, ParamError, Result, ShadeError};
pub use gate::CadenceGate;
pub use params::{ParamUpdate, ParameterStore};
pub use runner::{RunStats, run};
pub use window::SampleWindow;
