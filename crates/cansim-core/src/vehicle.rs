//! State-source interfaces
//!
//! Traits the engine-side owner of a simulated vehicle implements so the
//! sampler can read its state each tick. The sampler never mutates any of
//! these; everything is a read-only view of the current tick.

use nalgebra::Vector3;

/// Identifies one of the four wheels of the simulated vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    /// Front left wheel
    FrontLeft,
    /// Front right wheel
    FrontRight,
    /// Rear left wheel
    RearLeft,
    /// Rear right wheel
    RearRight,
}

impl Wheel {
    /// All four wheels, in signal order (FrL, FrR, ReL, ReR).
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];
}

/// Read-only view of the vehicle simulation (drivetrain and driver inputs).
pub trait VehicleState {
    /// Engine rotational speed in RPM.
    fn engine_rpm(&self) -> f64;

    /// Currently engaged gear.
    fn gear(&self) -> i32;

    /// Gear the transmission is shifting toward. Equal to [`gear`] when no
    /// shift is in progress.
    ///
    /// [`gear`]: VehicleState::gear
    fn target_gear(&self) -> i32;

    /// Whether a gear shift is currently in progress.
    fn is_shifting(&self) -> bool;

    /// Normalized accelerator input. Nominally in [0, 1]; negative values
    /// indicate braking on combined-axis input devices.
    fn accelerator_input(&self) -> f64;

    /// Normalized steering input, -1 (full left) to 1 (full right).
    fn steering_input(&self) -> f64;

    /// Rotational speed of the given wheel in RPM.
    fn wheel_rpm(&self, wheel: Wheel) -> f64;
}

/// Read-only view of the vehicle's rigid body.
pub trait RigidBodyState {
    /// Linear velocity in meters per second.
    fn velocity(&self) -> Vector3<f64>;
}

/// Component lookup on the simulated entity the sampler is attached to.
///
/// The orientation is part of the entity's transform and is always present;
/// the vehicle controller and rigid body are optional components, and the
/// sampler treats their absence as a fatal configuration error.
pub trait SimEntity {
    /// The vehicle controller component, if one is attached.
    fn vehicle_controller(&self) -> Option<&dyn VehicleState>;

    /// The rigid body component, if one is attached.
    fn rigid_body(&self) -> Option<&dyn RigidBodyState>;

    /// Local rotation of the entity as Euler angles in degrees
    /// (x = pitch, y = yaw, z = roll).
    fn local_euler_angles(&self) -> Vector3<f64>;
}
