//! Demo Telemetry Streamer
//!
//! Runs the demo vehicle through the sampler and streams its telemetry to
//! TCP subscribers. Connect with e.g. `nc 127.0.0.1 9930` to watch the
//! frames.
//!
//! Usage:
//!   cargo run --example stream_demo -- [BIND_ADDR]
//!
//! BIND_ADDR defaults to 127.0.0.1:9930.

use std::time::Duration;

use anyhow::Result;

use cansim_core::demo::DemoVehicle;
use cansim_core::telemetry::{SamplerConfig, TelemetrySampler};
use cansim_core::transport::{StreamConfig, StreamServer};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind_address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:9930".to_string());

    let server = StreamServer::bind(StreamConfig {
        bind_address,
        ..Default::default()
    })
    .await?;

    let mut car = DemoVehicle::new();
    let mut sampler = TelemetrySampler::new(SamplerConfig::default(), Box::new(server));
    sampler.start(&car)?;

    // 50 Hz engine tick; the sampler rate-limits emission to 10 Hz.
    let dt = 0.02;
    let mut time = 0.0;
    let mut ticker = tokio::time::interval(Duration::from_millis(20));
    loop {
        ticker.tick().await;
        car.update(dt);
        time += dt;
        sampler.tick(&car, time, dt)?;
    }
}
