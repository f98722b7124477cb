//! Frame transport
//!
//! Sinks that accept emitted telemetry frames. The sampler hands each frame
//! to its sink synchronously and fire-and-forget; delivery, framing, and
//! connection lifecycle are the sink's concern.

mod tcp;

pub use tcp::{StreamConfig, StreamServer};

use std::sync::{Arc, Mutex};

use crate::telemetry::VehicleFrame;

/// Destination for emitted telemetry frames.
///
/// `send_frame` is called from the engine tick and must not block; sinks
/// with slow downstreams buffer or drop internally.
pub trait FrameSink: Send {
    /// Accept one emitted frame.
    fn send_frame(&mut self, frame: &VehicleFrame);
}

/// Sink that collects frames in memory. Useful for tests and headless
/// captures: clones share the same buffer, so a clone kept outside the
/// sampler observes everything the sampler emits.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    frames: Arc<Mutex<Vec<VehicleFrame>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the frames received so far, in emission order.
    pub fn frames(&self) -> Vec<VehicleFrame> {
        self.frames.lock().expect("memory sink poisoned").clone()
    }
}

impl FrameSink for MemorySink {
    fn send_frame(&mut self, frame: &VehicleFrame) {
        self.frames
            .lock()
            .expect("memory sink poisoned")
            .push(frame.clone());
    }
}
