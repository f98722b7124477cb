//! Frame serialization
//!
//! Serializes a [`VehicleFrame`] to the two CSV-like text layouts consumed
//! by stream subscribers. Both layouts are a wire contract: line order,
//! signal names, and number formatting must be byte-exact across releases.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{signals, VehicleFrame};

/// Which text layout a sink serializes frames to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameFormat {
    /// All 15 signals, one line each
    Full,
    /// EngineSpeed and VehicleSpeed only
    Compact,
}

impl VehicleFrame {
    /// Serialize using the given format.
    pub fn serialize_text(&self, format: FrameFormat) -> String {
        match format {
            FrameFormat::Full => self.to_csv(),
            FrameFormat::Compact => self.to_compact_csv(),
        }
    }

    /// Full CSV layout: 15 lines of `"<SignalName>, <value>, <time>\n"`.
    ///
    /// Values are fixed 4-decimal floating point, except the two gear
    /// signals which are plain integers. The timestamp is repeated on every
    /// line, also to 4 decimals.
    pub fn to_csv(&self) -> String {
        let t = self.time;
        let mut out = String::with_capacity(512);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::EMS_SET_SPEED, self.cruise_speed);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::ENGINE_SPEED, self.engine_rpm);
        let _ = writeln!(out, "{}, {}, {t:.4}", signals::GEAR_POS_ACTUAL, self.gear_actual);
        let _ = writeln!(out, "{}, {}, {t:.4}", signals::GEAR_POS_TARGET, self.gear_target);
        let _ = writeln!(
            out,
            "{}, {:.4}, {t:.4}",
            signals::ACCELERATOR_PEDAL_POS,
            self.accelerator_pos as f64
        );
        let _ = writeln!(
            out,
            "{}, {:.4}, {t:.4}",
            signals::DECELERATOR_PEDAL_POS,
            self.decelerator_pos as f64
        );
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::ROLL_RATE, self.roll_rate);
        let _ = writeln!(
            out,
            "{}, {:.4}, {t:.4}",
            signals::STEERING_WHEEL_ANGLE,
            self.steering_wheel_angle as f64
        );
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::VEHICLE_SPEED, self.vehicle_speed);
        let _ = writeln!(
            out,
            "{}, {:.4}, {t:.4}",
            signals::VEHICLE_SPEED_OVER_GND,
            self.vehicle_speed_over_ground
        );
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::WHEEL_SPEED_FR_L, self.wheel_speed_fl);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::WHEEL_SPEED_FR_R, self.wheel_speed_fr);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::WHEEL_SPEED_RE_L, self.wheel_speed_rl);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::WHEEL_SPEED_RE_R, self.wheel_speed_rr);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::YAW_RATE, self.yaw_rate);
        out
    }

    /// Compact CSV layout: EngineSpeed and VehicleSpeed only, same line
    /// shape as the full layout.
    pub fn to_compact_csv(&self) -> String {
        let t = self.time;
        let mut out = String::with_capacity(64);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::ENGINE_SPEED, self.engine_rpm);
        let _ = writeln!(out, "{}, {:.4}, {t:.4}", signals::VEHICLE_SPEED, self.vehicle_speed);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> VehicleFrame {
        VehicleFrame {
            time: 1.0,
            cruise_speed: 0.0,
            engine_rpm: 2500.1234,
            gear_actual: 3,
            gear_target: 4,
            accelerator_pos: 80,
            decelerator_pos: 0,
            roll_rate: -0.25,
            steering_wheel_angle: -36,
            vehicle_speed: 45.6789,
            vehicle_speed_over_ground: 45.6789,
            wheel_speed_fl: 720.0,
            wheel_speed_fr: 721.5,
            wheel_speed_rl: 718.25,
            wheel_speed_rr: 719.0,
            yaw_rate: 1.5,
        }
    }

    #[test]
    fn test_full_csv_reference_lines() {
        let csv = frame().to_csv();
        assert!(csv.contains("EngineSpeed, 2500.1234, 1.0000\n"));
        assert!(csv.contains("VehicleSpeed, 45.6789, 1.0000\n"));
        assert!(csv.contains("GearPosActual, 3, 1.0000\n"));
        assert!(csv.contains("GearPosTarget, 4, 1.0000\n"));
    }

    #[test]
    fn test_full_csv_line_order() {
        let csv = frame().to_csv();
        let names: Vec<&str> = csv.lines().map(|l| l.split(',').next().unwrap()).collect();
        assert_eq!(
            names,
            vec![
                "EMSSetSpeed",
                "EngineSpeed",
                "GearPosActual",
                "GearPosTarget",
                "AcceleratorPedalPos",
                "DeceleratorPedalPos",
                "RollRate",
                "SteeringWheelAngle",
                "VehicleSpeed",
                "VehicleSpeedOverGnd",
                "WheelSpeedFrL",
                "WheelSpeedFrR",
                "WheelSpeedReL",
                "WheelSpeedReR",
                "YawRate",
            ]
        );
    }

    #[test]
    fn test_compact_csv() {
        assert_eq!(
            frame().to_compact_csv(),
            "EngineSpeed, 2500.1234, 1.0000\nVehicleSpeed, 45.6789, 1.0000\n"
        );
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let f = frame();
        assert_eq!(f.to_csv(), f.to_csv());
        assert_eq!(f.to_compact_csv(), f.to_compact_csv());
    }
}
