//! Simulated progress while a submission is in flight

use std::time::Duration;

/// Pacing of the progress simulation and the hand-off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineTiming {
    /// Interval between progress ticks
    pub tick: Duration,
    /// Percentage added per tick
    pub step: u8,
    /// Highest value ticks may reach; 100 is reserved for a settled outcome
    pub ceiling: u8,
    /// Pause between settlement and hand-off so the full bar is visible
    pub confirm_delay: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(300),
            step: 10,
            ceiling: 90,
            confirm_delay: Duration::from_millis(300),
        }
    }
}

/// Progress percentage of the current attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    value: u8,
}

impl Progress {
    pub fn value(&self) -> u8 {
        self.value
    }

    /// One tick: add `step`, never beyond `ceiling` and never downwards
    pub fn advance(&mut self, timing: &PipelineTiming) {
        let ceiling = timing.ceiling.min(99);
        if self.value < ceiling {
            self.value = self.value.saturating_add(timing.step).min(ceiling);
        }
    }

    /// Settled outcome
    pub fn complete(&mut self) {
        self.value = 100;
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.value == 100
    }
}
