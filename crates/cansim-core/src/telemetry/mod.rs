//! Telemetry frames and sampling
//!
//! Builds fixed-shape telemetry frames from vehicle state and serializes
//! them for the stream transport. Signal names and field order are a wire
//! contract with downstream consumers and must not change.

mod format;
mod sampler;

pub use format::FrameFormat;
pub use sampler::{SamplerConfig, TelemetrySampler};

use serde::{Deserialize, Serialize};

/// Signal name constants, exactly as they appear on the wire.
pub mod signals {
    /// Cruise-control set speed (upstream source is a stub, always 0)
    pub const EMS_SET_SPEED: &str = "EMSSetSpeed";
    /// Engine rotational speed in RPM
    pub const ENGINE_SPEED: &str = "EngineSpeed";
    /// Currently engaged gear, or the shifting sentinel
    pub const GEAR_POS_ACTUAL: &str = "GearPosActual";
    /// Gear the transmission is shifting toward
    pub const GEAR_POS_TARGET: &str = "GearPosTarget";
    /// Accelerator pedal position, 0-100
    pub const ACCELERATOR_PEDAL_POS: &str = "AcceleratorPedalPos";
    /// Decelerator pedal position, 0-100
    pub const DECELERATOR_PEDAL_POS: &str = "DeceleratorPedalPos";
    /// Roll rate, degrees per second
    pub const ROLL_RATE: &str = "RollRate";
    /// Steering wheel angle in degrees
    pub const STEERING_WHEEL_ANGLE: &str = "SteeringWheelAngle";
    /// Vehicle speed in km/h
    pub const VEHICLE_SPEED: &str = "VehicleSpeed";
    /// Vehicle speed over ground in km/h
    pub const VEHICLE_SPEED_OVER_GND: &str = "VehicleSpeedOverGnd";
    /// Front left wheel speed
    pub const WHEEL_SPEED_FR_L: &str = "WheelSpeedFrL";
    /// Front right wheel speed
    pub const WHEEL_SPEED_FR_R: &str = "WheelSpeedFrR";
    /// Rear left wheel speed
    pub const WHEEL_SPEED_RE_L: &str = "WheelSpeedReL";
    /// Rear right wheel speed
    pub const WHEEL_SPEED_RE_R: &str = "WheelSpeedReR";
    /// Yaw rate, degrees per second
    pub const YAW_RATE: &str = "YawRate";
}

/// Gear value reported while a shift is in progress, in place of a valid
/// gear number.
pub const SHIFTING_GEAR_SENTINEL: i32 = -3;

/// A single named sample: one signal's value at one simulated-time instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint<T> {
    /// Wire name of the signal (one of the [`signals`] constants)
    pub signal: &'static str,
    /// Simulated time the sample was taken
    pub timestamp: f64,
    /// Sampled value
    pub value: T,
}

impl<T> DataPoint<T> {
    /// Create a new data point.
    pub fn new(signal: &'static str, timestamp: f64, value: T) -> Self {
        Self {
            signal,
            timestamp,
            value,
        }
    }
}

/// One instant of vehicle telemetry.
///
/// Constructed fresh on each emission, never mutated afterwards. All fields
/// are read from the same tick, so they are mutually consistent. Field order
/// matches the full CSV layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleFrame {
    /// Simulated time of the emission
    pub time: f64,
    /// Cruise-control set speed; the upstream signal is unimplemented and
    /// this is always 0
    pub cruise_speed: f64,
    /// Engine rotational speed in RPM
    pub engine_rpm: f64,
    /// Engaged gear, or [`SHIFTING_GEAR_SENTINEL`] while shifting
    pub gear_actual: i32,
    /// Gear the transmission is shifting toward
    pub gear_target: i32,
    /// Accelerator pedal position, 0-100
    pub accelerator_pos: i32,
    /// Decelerator pedal position, 0-100
    pub decelerator_pos: i32,
    /// Roll rate in degrees per second
    pub roll_rate: f64,
    /// Steering wheel angle in degrees
    pub steering_wheel_angle: i32,
    /// Vehicle speed in km/h, derived from rigid-body velocity
    pub vehicle_speed: f64,
    /// Vehicle speed over ground in km/h; no independent sensor is modeled,
    /// so this duplicates `vehicle_speed`
    pub vehicle_speed_over_ground: f64,
    /// Front left wheel speed (wheel RPM x 60)
    pub wheel_speed_fl: f64,
    /// Front right wheel speed (wheel RPM x 60)
    pub wheel_speed_fr: f64,
    /// Rear left wheel speed (wheel RPM x 60)
    pub wheel_speed_rl: f64,
    /// Rear right wheel speed (wheel RPM x 60)
    pub wheel_speed_rr: f64,
    /// Yaw rate in degrees per second
    pub yaw_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_serializes_to_json_for_structured_sinks() {
        let frame = VehicleFrame {
            time: 0.5,
            cruise_speed: 0.0,
            engine_rpm: 900.0,
            gear_actual: 1,
            gear_target: 1,
            accelerator_pos: 10,
            decelerator_pos: 0,
            roll_rate: 0.0,
            steering_wheel_angle: 0,
            vehicle_speed: 3.6,
            vehicle_speed_over_ground: 3.6,
            wheel_speed_fl: 60.0,
            wheel_speed_fr: 60.0,
            wheel_speed_rl: 60.0,
            wheel_speed_rr: 60.0,
            yaw_rate: 0.0,
        };

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["engine_rpm"], 900.0);
        assert_eq!(json["gear_actual"], 1);

        let back: VehicleFrame = serde_json::from_value(json).unwrap();
        assert_eq!(back, frame);
    }

    #[test]
    fn test_data_point_carries_signal_name() {
        let p = DataPoint::new(signals::ENGINE_SPEED, 1.5, 2500.0);
        assert_eq!(p.signal, "EngineSpeed");
        assert_eq!(p.timestamp, 1.5);
        assert_eq!(p.value, 2500.0);
    }
}
