//! Reusable tick countdown.

const TICK_TOLERANCE: f32 = 1e-4;

/// Counts engine ticks against an interval in seconds.
///
/// `tick()` returns true exactly on the tick the interval is reached and
/// starts counting again from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TickTimer {
    frame_rate: u32,
    interval_secs: f32,
    elapsed_ticks: u32,
}

impl TickTimer {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate,
            interval_secs: 0.0,
            elapsed_ticks: 0,
        }
    }

    pub fn with_interval(frame_rate: u32, interval_secs: f32) -> Self {
        let mut timer = Self::new(frame_rate);
        timer.set_interval(interval_secs);
        timer
    }

    /// Set a new interval and restart the countdown.
    pub fn set_interval(&mut self, interval_secs: f32) {
        self.interval_secs = interval_secs;
        self.elapsed_ticks = 0;
    }

    pub fn interval(&self) -> f32 {
        self.interval_secs
    }

    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
    }

    /// Seconds counted since the last reset.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_ticks as f32 / self.frame_rate as f32
    }

    /// Advance by one frame. Returns true when the interval is reached.
    pub fn tick(&mut self) -> bool {
        self.elapsed_ticks += 1;
        // Fires on the first tick at or past the interval; the tolerance only
        // absorbs float error in interval * rate.
        let due = self.interval_secs * self.frame_rate as f32 - TICK_TOLERANCE;
        if self.elapsed_ticks as f32 >= due {
            self.elapsed_ticks = 0;
            return true;
        }
        false
    }
}
