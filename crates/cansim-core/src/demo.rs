//! Demo vehicle - simulated drive cycle for testing
//!
//! Generates a plausible drive cycle (pulling away, cruising, coasting)
//! without a game engine, so the sampling and streaming pipeline can be
//! exercised end to end. Not a vehicle dynamics model; just correlated,
//! smoothly varying state.

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::vehicle::{RigidBodyState, SimEntity, VehicleState, Wheel};

/// Wheel radius used to derive wheel RPM from road speed, in meters
const WHEEL_RADIUS_M: f64 = 0.3;

/// How long a gear change keeps the shifting flag raised, in seconds
const SHIFT_DURATION_S: f64 = 0.35;

/// Top of the simulated rev range
const MAX_RPM: f64 = 7200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DrivePhase {
    /// Throttle applied, speed building
    Accelerate,
    /// Holding roughly constant speed
    Cruise,
    /// Throttle lifted, speed bleeding off
    Coast,
}

/// Simulated vehicle implementing the sampler's state-source traits.
///
/// Call [`update`](DemoVehicle::update) once per tick with the elapsed
/// simulated time, then hand the vehicle to the sampler as its entity.
pub struct DemoVehicle {
    rng: StdRng,
    time: f64,
    phase: DrivePhase,
    phase_until: f64,
    throttle: f64,
    speed_mps: f64,
    gear: i32,
    target_gear: i32,
    shift_remaining: f64,
    steer: f64,
    yaw_deg: f64,
    roll_deg: f64,
}

impl Default for DemoVehicle {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoVehicle {
    /// Create a demo vehicle with a random seed.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a demo vehicle with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(mut rng: StdRng) -> Self {
        let first_phase = rng.gen_range(3.0..6.0);
        Self {
            rng,
            time: 0.0,
            phase: DrivePhase::Accelerate,
            phase_until: first_phase,
            throttle: 0.0,
            speed_mps: 0.0,
            gear: 1,
            target_gear: 1,
            shift_remaining: 0.0,
            steer: 0.0,
            yaw_deg: 0.0,
            roll_deg: 0.0,
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        self.time += dt;

        if self.time >= self.phase_until {
            self.advance_phase();
        }

        // Smooth throttle toward the phase target.
        let target_throttle = match self.phase {
            DrivePhase::Accelerate => 0.85,
            DrivePhase::Cruise => 0.35,
            DrivePhase::Coast => 0.0,
        };
        let throttle_rate = 1.5; // full pedal travel in ~0.7s
        let diff = target_throttle - self.throttle;
        self.throttle += diff.clamp(-throttle_rate * dt, throttle_rate * dt);

        // Longitudinal: simple force balance against quadratic drag.
        let accel = self.throttle * 6.0 - 0.004 * self.speed_mps * self.speed_mps - 0.15;
        self.speed_mps = (self.speed_mps + accel * dt).max(0.0);

        self.update_gearbox(dt);

        // Gentle weave so steering and yaw are non-trivial.
        self.steer = 0.08 * (self.time * 0.4).sin();
        self.yaw_deg =
            (self.yaw_deg + self.steer * self.speed_mps * 1.2 * dt).rem_euclid(360.0);
        self.roll_deg = -2.5 * self.steer * self.speed_mps * 0.1;
    }

    fn advance_phase(&mut self) {
        self.phase = match self.phase {
            DrivePhase::Accelerate => DrivePhase::Cruise,
            DrivePhase::Cruise => {
                if self.rng.gen_bool(0.5) {
                    DrivePhase::Coast
                } else {
                    DrivePhase::Accelerate
                }
            }
            DrivePhase::Coast => DrivePhase::Accelerate,
        };
        self.phase_until = self.time + self.rng.gen_range(2.0..8.0);
    }

    fn update_gearbox(&mut self, dt: f64) {
        if self.shift_remaining > 0.0 {
            self.shift_remaining -= dt;
            if self.shift_remaining <= 0.0 {
                self.gear = self.target_gear;
            }
            return;
        }

        // Speed-scheduled gears, roughly 10 mps per gear step.
        let desired = ((self.speed_mps / 10.0) as i32 + 1).clamp(1, 6);
        if desired != self.gear {
            self.target_gear = desired;
            self.shift_remaining = SHIFT_DURATION_S;
        }
    }

    /// Simulated time since creation, in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    fn wheel_rpm_base(&self) -> f64 {
        self.speed_mps / (2.0 * std::f64::consts::PI * WHEEL_RADIUS_M) * 60.0
    }
}

impl VehicleState for DemoVehicle {
    fn engine_rpm(&self) -> f64 {
        // Crude per-gear ratio: lower gears rev higher at the same speed.
        let ratio = 140.0 / self.gear as f64;
        (800.0 + self.speed_mps * ratio + self.throttle * 400.0).min(MAX_RPM)
    }

    fn gear(&self) -> i32 {
        self.gear
    }

    fn target_gear(&self) -> i32 {
        self.target_gear
    }

    fn is_shifting(&self) -> bool {
        self.shift_remaining > 0.0
    }

    fn accelerator_input(&self) -> f64 {
        self.throttle
    }

    fn steering_input(&self) -> f64 {
        self.steer
    }

    fn wheel_rpm(&self, wheel: Wheel) -> f64 {
        // Outer wheels run marginally faster in the weave.
        let bias = match wheel {
            Wheel::FrontLeft | Wheel::RearLeft => 1.0 - 0.01 * self.steer,
            Wheel::FrontRight | Wheel::RearRight => 1.0 + 0.01 * self.steer,
        };
        self.wheel_rpm_base() * bias
    }
}

impl RigidBodyState for DemoVehicle {
    fn velocity(&self) -> Vector3<f64> {
        let yaw = self.yaw_deg.to_radians();
        Vector3::new(
            self.speed_mps * yaw.cos(),
            0.0,
            self.speed_mps * yaw.sin(),
        )
    }
}

impl SimEntity for DemoVehicle {
    fn vehicle_controller(&self) -> Option<&dyn VehicleState> {
        Some(self)
    }

    fn rigid_body(&self) -> Option<&dyn RigidBodyState> {
        Some(self)
    }

    fn local_euler_angles(&self) -> Vector3<f64> {
        Vector3::new(0.0, self.yaw_deg, self.roll_deg)
    }
}
