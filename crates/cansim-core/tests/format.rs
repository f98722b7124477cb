use pretty_assertions::assert_eq;

use cansim_core::telemetry::VehicleFrame;

fn reference_frame() -> VehicleFrame {
    VehicleFrame {
        time: 1.0,
        cruise_speed: 0.0,
        engine_rpm: 2500.1234,
        gear_actual: 3,
        gear_target: 4,
        accelerator_pos: 100,
        decelerator_pos: 0,
        roll_rate: -0.25,
        steering_wheel_angle: 720,
        vehicle_speed: 45.6789,
        vehicle_speed_over_ground: 45.6789,
        wheel_speed_fl: 600.0,
        wheel_speed_fr: 600.0,
        wheel_speed_rl: 595.5,
        wheel_speed_rr: 595.5,
        yaw_rate: 12.5,
    }
}

#[test]
fn full_csv_is_byte_exact() {
    let expected = "\
EMSSetSpeed, 0.0000, 1.0000
EngineSpeed, 2500.1234, 1.0000
GearPosActual, 3, 1.0000
GearPosTarget, 4, 1.0000
AcceleratorPedalPos, 100.0000, 1.0000
DeceleratorPedalPos, 0.0000, 1.0000
RollRate, -0.2500, 1.0000
SteeringWheelAngle, 720.0000, 1.0000
VehicleSpeed, 45.6789, 1.0000
VehicleSpeedOverGnd, 45.6789, 1.0000
WheelSpeedFrL, 600.0000, 1.0000
WheelSpeedFrR, 600.0000, 1.0000
WheelSpeedReL, 595.5000, 1.0000
WheelSpeedReR, 595.5000, 1.0000
YawRate, 12.5000, 1.0000
";
    assert_eq!(reference_frame().to_csv(), expected);
}

#[test]
fn compact_csv_is_byte_exact() {
    assert_eq!(
        reference_frame().to_compact_csv(),
        "EngineSpeed, 2500.1234, 1.0000\nVehicleSpeed, 45.6789, 1.0000\n"
    );
}

#[test]
fn shifting_sentinel_appears_verbatim() {
    let mut frame = reference_frame();
    frame.gear_actual = -3;
    assert!(frame.to_csv().contains("GearPosActual, -3, 1.0000\n"));
}

#[test]
fn non_finite_rates_serialize_without_panicking() {
    let mut frame = reference_frame();
    frame.yaw_rate = f64::INFINITY;
    frame.roll_rate = f64::NAN;
    let csv = frame.to_csv();
    assert!(csv.contains("YawRate, inf, 1.0000\n"));
    assert!(csv.contains("RollRate, NaN, 1.0000\n"));
}

#[test]
fn repeated_serialization_is_identical() {
    let frame = reference_frame();
    let first = frame.to_csv();
    for _ in 0..10 {
        assert_eq!(frame.to_csv(), first);
    }
}
