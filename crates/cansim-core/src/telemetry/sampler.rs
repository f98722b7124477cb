//! Per-tick telemetry sampler
//!
//! Bridges the engine's update callback into rate-limited telemetry frames.
//! Each tick the sampler updates its yaw/roll rate estimators; once the
//! emission interval has elapsed it reads the vehicle state, derives the
//! signal values, records raw samples to the datalog, and hands the frame
//! to the transport sink.

use serde::{Deserialize, Serialize};

use super::{signals, DataPoint, VehicleFrame, SHIFTING_GEAR_SENTINEL};
use crate::datalog::SignalLog;
use crate::error::TelemetryError;
use crate::transport::FrameSink;
use crate::vehicle::{SimEntity, Wheel};

/// Sampler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Minimum simulated-time gap between emitted frames, in seconds
    pub send_interval: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { send_interval: 0.1 }
    }
}

/// Backward finite-difference rate estimator.
///
/// The baseline is updated on every call, whether or not the caller uses
/// the returned rate. A zero `dt` divides by zero and returns the IEEE
/// infinity/NaN result; a paused simulation therefore produces non-finite
/// rates for that tick, and angle wraparound (359 -> 0 degrees) produces a
/// one-tick spike. Both are accepted behavior.
#[derive(Debug, Clone, Copy)]
struct RateEstimator {
    previous: f64,
}

impl RateEstimator {
    fn new(initial: f64) -> Self {
        Self { previous: initial }
    }

    fn update(&mut self, current: f64, dt: f64) -> f64 {
        let rate = (current - self.previous) / dt;
        self.previous = current;
        rate
    }
}

/// Clamp with the bounds checked in argument order: the lower bound wins
/// first, and no ordering of `min`/`max` panics (unlike [`f64::clamp`]).
/// Matches the engine clamp the signal derivations were defined against.
fn clamp_min_first(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Accelerator pedal position: normalized input to a 0-100 percentage.
fn accelerator_percent(input: f64) -> i32 {
    (clamp_min_first(input, 0.0, 1.0) * 100.0).round() as i32
}

/// Decelerator pedal position.
///
/// The clamp bounds here are swapped relative to the accelerator case, so
/// the expression evaluates to 0 for every input. The argument order is
/// part of the published signal behavior and downstream consumers currently
/// see a constant 0.
// TODO: confirm with signal consumers whether DeceleratorPedalPos should
// track negative accelerator input instead of the literal expression.
fn decelerator_percent(input: f64) -> i32 {
    (clamp_min_first(-1.0, 0.0, input) * 100.0).round() as i32
}

/// Per-tick telemetry sampler with an explicit start/stop lifecycle.
///
/// The transport sink is injected at construction; there is no hidden
/// global sender. Single-threaded by design: everything runs synchronously
/// on the engine's update callback.
pub struct TelemetrySampler {
    config: SamplerConfig,
    sink: Box<dyn FrameSink>,
    log: SignalLog,
    yaw: RateEstimator,
    roll: RateEstimator,
    /// Simulated time of the last emitted frame. Survives stop/start so the
    /// emission cadence is unaffected by a re-enable.
    last_send: f64,
    running: bool,
}

impl TelemetrySampler {
    /// Create a sampler that emits frames to the given sink.
    pub fn new(config: SamplerConfig, sink: Box<dyn FrameSink>) -> Self {
        Self {
            config,
            sink,
            log: SignalLog::new(),
            yaw: RateEstimator::new(0.0),
            roll: RateEstimator::new(0.0),
            last_send: 0.0,
            running: false,
        }
    }

    /// Start sampling.
    ///
    /// Verifies the required components are attached to the entity, seeds
    /// the yaw/roll baselines from its current orientation, and clears the
    /// raw-signal datalog. Fails if the vehicle controller or rigid body is
    /// missing; the sampler cannot function without them.
    pub fn start(&mut self, entity: &dyn SimEntity) -> Result<(), TelemetryError> {
        entity
            .vehicle_controller()
            .ok_or(TelemetryError::MissingVehicleController)?;
        entity.rigid_body().ok_or(TelemetryError::MissingRigidBody)?;

        let euler = entity.local_euler_angles();
        self.yaw = RateEstimator::new(euler.y);
        self.roll = RateEstimator::new(euler.z);
        self.log.clear();
        self.running = true;
        tracing::debug!(interval = self.config.send_interval, "telemetry sampler started");
        Ok(())
    }

    /// Stop sampling. Recorded datalog contents are kept until the next
    /// [`start`](TelemetrySampler::start).
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the sampler is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The raw-signal datalog accumulated since the last start.
    pub fn log(&self) -> &SignalLog {
        &self.log
    }

    /// Process one engine tick.
    ///
    /// `time` is the current simulated time and `delta` the simulated time
    /// elapsed since the previous tick. Rate estimators update every tick;
    /// a frame is emitted only when at least the configured interval has
    /// elapsed since the last emission (elapsed exactly equal emits).
    ///
    /// Returns the emitted frame, or `None` when the tick was rate-limited.
    pub fn tick(
        &mut self,
        entity: &dyn SimEntity,
        time: f64,
        delta: f64,
    ) -> Result<Option<VehicleFrame>, TelemetryError> {
        if !self.running {
            return Err(TelemetryError::NotStarted);
        }

        // Rate estimation runs every tick, before the rate limit, so the
        // baselines never go stale between emissions.
        let euler = entity.local_euler_angles();
        let yaw_rate = self.yaw.update(euler.y, delta);
        let roll_rate = self.roll.update(euler.z, delta);

        if time - self.last_send < self.config.send_interval {
            return Ok(None);
        }

        let vehicle = entity
            .vehicle_controller()
            .ok_or(TelemetryError::MissingVehicleController)?;
        let body = entity.rigid_body().ok_or(TelemetryError::MissingRigidBody)?;

        let gear_actual = if vehicle.is_shifting() {
            SHIFTING_GEAR_SENTINEL
        } else {
            vehicle.gear()
        };
        let gear_target = vehicle.target_gear();
        let accelerator_pos = accelerator_percent(vehicle.accelerator_input());
        let decelerator_pos = decelerator_percent(vehicle.accelerator_input());
        let steering_wheel_angle = (vehicle.steering_input() * 720.0).round() as i32;
        let vehicle_speed = body.velocity().norm() * 3.6;
        let [fl, fr, rl, rr] = Wheel::ALL.map(|w| vehicle.wheel_rpm(w) * 60.0);

        let frame = VehicleFrame {
            time,
            cruise_speed: 0.0,
            engine_rpm: vehicle.engine_rpm(),
            gear_actual,
            gear_target,
            accelerator_pos,
            decelerator_pos,
            roll_rate,
            steering_wheel_angle,
            vehicle_speed,
            vehicle_speed_over_ground: vehicle_speed,
            wheel_speed_fl: fl,
            wheel_speed_fr: fr,
            wheel_speed_rl: rl,
            wheel_speed_rr: rr,
            yaw_rate,
        };

        self.record_raw_samples(&frame);
        self.last_send = time;
        self.sink.send_frame(&frame);
        Ok(Some(frame))
    }

    fn record_raw_samples(&mut self, frame: &VehicleFrame) {
        let t = frame.time;
        self.log
            .push_float(DataPoint::new(signals::ENGINE_SPEED, t, frame.engine_rpm));
        self.log
            .push_int(DataPoint::new(signals::GEAR_POS_ACTUAL, t, frame.gear_actual));
        self.log
            .push_int(DataPoint::new(signals::GEAR_POS_TARGET, t, frame.gear_target));
        self.log.push_int(DataPoint::new(
            signals::ACCELERATOR_PEDAL_POS,
            t,
            frame.accelerator_pos,
        ));
        self.log.push_int(DataPoint::new(
            signals::DECELERATOR_PEDAL_POS,
            t,
            frame.decelerator_pos,
        ));
        self.log.push_int(DataPoint::new(
            signals::STEERING_WHEEL_ANGLE,
            t,
            frame.steering_wheel_angle,
        ));
        self.log
            .push_float(DataPoint::new(signals::VEHICLE_SPEED, t, frame.vehicle_speed));
        self.log.push_float(DataPoint::new(
            signals::VEHICLE_SPEED_OVER_GND,
            t,
            frame.vehicle_speed_over_ground,
        ));
        self.log
            .push_float(DataPoint::new(signals::WHEEL_SPEED_FR_L, t, frame.wheel_speed_fl));
        self.log
            .push_float(DataPoint::new(signals::WHEEL_SPEED_FR_R, t, frame.wheel_speed_fr));
        self.log
            .push_float(DataPoint::new(signals::WHEEL_SPEED_RE_L, t, frame.wheel_speed_rl));
        self.log
            .push_float(DataPoint::new(signals::WHEEL_SPEED_RE_R, t, frame.wheel_speed_rr));
    }
}
