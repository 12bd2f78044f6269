//! Game clock driven by the fixed timestep.
//!
//! The clock never reads wall time. The session feeds it elapsed milliseconds
//! from `tick`, and it reports each completed second to the clock sink.

use serde::{Deserialize, Serialize};

use crate::sink::ClockSink;
use crate::types::MS_PER_SECOND;

/// Minutes and seconds for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClockReading {
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockReading {
    pub fn from_seconds(elapsed_seconds: u32) -> Self {
        Self {
            minutes: elapsed_seconds / 60,
            seconds: elapsed_seconds % 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    running: bool,
    elapsed_seconds: u32,
    /// Milliseconds accumulated toward the next whole second.
    carry_ms: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero. No-op while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.elapsed_seconds = 0;
        self.carry_ms = 0;
    }

    /// Freeze the clock; the elapsed time is kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.carry_ms = 0;
    }

    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_seconds = 0;
    }

    /// Advance by `elapsed_ms`, notifying `sink` once per whole second crossed.
    ///
    /// Returns the number of seconds that elapsed. A stopped timer ignores the
    /// tick entirely.
    pub fn tick<S: ClockSink + ?Sized>(&mut self, elapsed_ms: u32, sink: &mut S) -> u32 {
        if !self.running {
            return 0;
        }

        self.carry_ms = self.carry_ms.saturating_add(elapsed_ms);
        let mut advanced = 0;
        while self.carry_ms >= MS_PER_SECOND {
            self.carry_ms -= MS_PER_SECOND;
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
            advanced += 1;
            sink.on_tick(self.elapsed_seconds);
        }
        advanced
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn reading(&self) -> ClockReading {
        ClockReading::from_seconds(self.elapsed_seconds)
    }
}
