use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

use cansim_core::telemetry::{FrameFormat, VehicleFrame};
use cansim_core::transport::{FrameSink, StreamConfig, StreamServer};

fn test_frame() -> VehicleFrame {
    VehicleFrame {
        time: 1.0,
        cruise_speed: 0.0,
        engine_rpm: 2500.1234,
        gear_actual: 3,
        gear_target: 3,
        accelerator_pos: 50,
        decelerator_pos: 0,
        roll_rate: 0.0,
        steering_wheel_angle: 0,
        vehicle_speed: 45.6789,
        vehicle_speed_over_ground: 45.6789,
        wheel_speed_fl: 600.0,
        wheel_speed_fr: 600.0,
        wheel_speed_rl: 600.0,
        wheel_speed_rr: 600.0,
        yaw_rate: 0.0,
    }
}

fn loopback_config(format: FrameFormat) -> StreamConfig {
    StreamConfig {
        bind_address: "127.0.0.1:0".to_string(),
        format,
        capacity: 16,
    }
}

async fn wait_for_subscriber(server: &StreamServer) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while server.subscriber_count() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("subscriber never registered");
}

#[tokio::test]
async fn compact_frames_reach_a_subscriber() {
    let mut server = StreamServer::bind(loopback_config(FrameFormat::Compact))
        .await
        .unwrap();

    let client = TcpStream::connect(server.local_addr()).await.unwrap();
    wait_for_subscriber(&server).await;

    server.send_frame(&test_frame());

    let mut lines = BufReader::new(client).lines();
    let first = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert_eq!(first, "EngineSpeed, 2500.1234, 1.0000");
    assert_eq!(second, "VehicleSpeed, 45.6789, 1.0000");
}

#[tokio::test]
async fn full_frames_fan_out_to_multiple_subscribers() {
    let mut server = StreamServer::bind(loopback_config(FrameFormat::Full))
        .await
        .unwrap();

    let a = TcpStream::connect(server.local_addr()).await.unwrap();
    let b = TcpStream::connect(server.local_addr()).await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), async {
        while server.subscriber_count() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("subscribers never registered");

    server.send_frame(&test_frame());

    for client in [a, b] {
        let mut lines = BufReader::new(client).lines();
        let first = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(first, "EMSSetSpeed, 0.0000, 1.0000");
    }
}

#[tokio::test]
async fn dropping_the_server_releases_the_listener() {
    let server = StreamServer::bind(loopback_config(FrameFormat::Full))
        .await
        .unwrap();
    let addr = server.local_addr();
    drop(server);

    // The accept task is aborted asynchronously; poll until connections are
    // refused instead of silently accepted into a dead fan-out.
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if TcpStream::connect(addr).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("listener still accepting after drop");
}

#[tokio::test]
async fn sending_without_subscribers_is_not_an_error() {
    let mut server = StreamServer::bind(loopback_config(FrameFormat::Full))
        .await
        .unwrap();
    assert_eq!(server.subscriber_count(), 0);
    server.send_frame(&test_frame());
}
