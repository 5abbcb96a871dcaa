use instant::Instant;

/// Which phase of a frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FramePhase {
    Update = 0,
    Compose = 1,
    Upload = 2,
    Overlay = 3,
    Submit = 4,
}

impl FramePhase {
    pub const COUNT: usize = 5;

    pub const ALL: [FramePhase; Self::COUNT] = [
        Self::Update,
        Self::Compose,
        Self::Upload,
        Self::Overlay,
        Self::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Update => "Update",
            Self::Compose => "Compose",
            Self::Upload => "GPU Upload",
            Self::Overlay => "Overlay",
            Self::Submit => "Submit",
        }
    }
}

/// Per-phase timing with exponential moving average smoothing.
pub struct PhaseTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; FramePhase::COUNT],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; FramePhase::COUNT],
            start: Instant::now(),
        }
    }

    /// Call before a phase runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a phase finishes. Records elapsed time for `phase`.
    pub fn end(&mut self, phase: FramePhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: FramePhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_index_their_slot() {
        for (i, phase) in FramePhase::ALL.iter().enumerate() {
            assert_eq!(*phase as usize, i);
        }
    }

    #[test]
    fn ema_moves_toward_samples() {
        let mut timers = PhaseTimers::new();
        timers.record(FramePhase::Update, 100.0);
        assert!((timers.durations_us[0] - 10.0).abs() < 1e-9);
        timers.record(FramePhase::Update, 100.0);
        assert!((timers.durations_us[0] - 19.0).abs() < 1e-9);
        assert_eq!(timers.durations_us[1], 0.0);
    }
}
