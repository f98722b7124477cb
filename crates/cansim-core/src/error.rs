//! Telemetry errors

use thiserror::Error;

/// Errors that can occur while sampling or streaming telemetry
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The simulated entity has no vehicle controller component
    #[error("entity has no vehicle controller attached")]
    MissingVehicleController,

    /// The simulated entity has no rigid body component
    #[error("entity has no rigid body attached")]
    MissingRigidBody,

    /// `tick()` was called before `start()`
    #[error("sampler has not been started")]
    NotStarted,

    /// Transport I/O failure (e.g. binding the stream server)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
