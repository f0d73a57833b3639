use core::num::NonZeroU64;

use crate::riscv::intrinsic::read_cycle;

/// A free-running counter and its rate.
#[derive(Debug, Clone, Copy)]
pub struct TimeSource {
    pub read: fn() -> u64,
    pub hz: NonZeroU64,
}

impl TimeSource {
    /// The hart's `cycle` counter at `hz` cycles per second.
    pub fn cycle_counter(hz: NonZeroU64) -> Self {
        Self {
            read: read_cycle,
            hz,
        }
    }
}

/// A single start/stop measurement. Without a source it measures nothing.
#[derive(Debug, Default)]
pub struct Stopwatch {
    source: Option<TimeSource>,
    started_at: Option<u64>,
}

impl Stopwatch {
    pub const fn new(source: Option<TimeSource>) -> Self {
        Self {
            source,
            started_at: None,
        }
    }

    pub fn start(&mut self) {
        self.started_at = self.source.map(|source| (source.read)());
    }

    /// Seconds since `start`, or `None` when nothing was measured.
    pub fn stop(&mut self) -> Option<f64> {
        let source = self.source?;
        let started_at = self.started_at.take()?;
        let ticks = (source.read)().wrapping_sub(started_at);
        Some(ticks as f64 / source.hz.get() as f64)
    }
}
