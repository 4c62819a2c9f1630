//! Frame timing
//!
//! Core code never reads wall-clock time; every frame receives a `FrameTime`.

use crate::consts::FRAME_RATE;

/// Timestamp and delta handed to one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Monotonic time (ms)
    pub now_ms: u64,
    /// Time since the previous frame (ms)
    pub dt_ms: u64,
}

/// Fixed-cadence clock for headless runs and tests
///
/// Produces 16/17 ms deltas that sum to exactly 1000 ms per 60 frames.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.frames * 1000 / FRAME_RATE
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameTime {
        let prev = self.now_ms();
        self.frames += 1;
        let now_ms = self.now_ms();
        FrameTime {
            now_ms,
            dt_ms: now_ms - prev,
        }
    }
}

/// Clock fed by externally supplied timestamps (animation frames)
#[derive(Debug, Clone, Default)]
pub struct HostClock {
    last_ms: Option<f64>,
    elapsed_ms: f64,
}

impl HostClock {
    /// Longest delta accepted in one frame (backgrounded tabs)
    const MAX_DT_MS: f64 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a host timestamp into a frame time
    pub fn frame(&mut self, host_ms: f64) -> FrameTime {
        let dt = match self.last_ms {
            Some(last) => (host_ms - last).clamp(0.0, Self::MAX_DT_MS),
            None => 1000.0 / FRAME_RATE as f64,
        };
        self.last_ms = Some(host_ms);
        let before = self.elapsed_ms as u64;
        self.elapsed_ms += dt;
        let now_ms = self.elapsed_ms as u64;
        FrameTime {
            now_ms,
            dt_ms: now_ms - before,
        }
    }
}
