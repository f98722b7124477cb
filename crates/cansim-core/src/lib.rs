//! # CanSim Core Library
//!
//! Core functionality for sampling simulated vehicle dynamics and streaming
//! them as CAN-style telemetry.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Per-tick sampling of vehicle state into fixed-shape telemetry frames
//! - Byte-exact CSV serialization of those frames (full and compact layouts)
//! - A TCP fan-out server that streams serialized frames to subscribers
//! - A bounded raw-signal datalog with CSV export
//! - A demo vehicle simulator for running the pipeline without a game engine
//!
//! ## Example
//!
//! ```rust,ignore
//! use cansim_core::prelude::*;
//!
//! // Bind the telemetry stream server and hand it to a sampler.
//! let server = StreamServer::bind(StreamConfig::default()).await?;
//! let mut sampler = TelemetrySampler::new(SamplerConfig::default(), Box::new(server));
//!
//! // Drive the sampler from the engine's update callback.
//! sampler.start(&entity)?;
//! loop {
//!     sampler.tick(&entity, time, delta)?;
//! }
//! ```

pub mod datalog;
pub mod demo;
pub mod error;
pub mod telemetry;
pub mod transport;
pub mod vehicle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::datalog::SignalLog;
    pub use crate::demo::DemoVehicle;
    pub use crate::error::TelemetryError;
    pub use crate::telemetry::{
        DataPoint, FrameFormat, SamplerConfig, TelemetrySampler, VehicleFrame,
    };
    pub use crate::transport::{FrameSink, MemorySink, StreamConfig, StreamServer};
    pub use crate::vehicle::{RigidBodyState, SimEntity, VehicleState, Wheel};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
