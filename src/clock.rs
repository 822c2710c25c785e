/// Frame pacing.

use std::time::{Duration, Instant};

pub trait Clock {
    /// Block until one `1/tick_rate` second frame has passed since the
    /// previous call.
    fn throttle(&mut self, tick_rate: u32);
    /// Block for a fixed real-time delay.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock pacing: sleeps away whatever is left of the frame budget.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock { last: Instant::now() }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FrameClock {
    fn throttle(&mut self, tick_rate: u32) {
        let frame = Duration::from_secs(1) / tick_rate.max(1);
        let elapsed = self.last.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.last = Instant::now();
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Never blocks; remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub ticks: u64,
    pub sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time spent: whole frames at `tick_rate` plus explicit sleeps.
    pub fn elapsed(&self, tick_rate: u32) -> Duration {
        let per_frame = Duration::from_secs(1) / tick_rate.max(1);
        let ticks = u32::try_from(self.ticks).unwrap_or(u32::MAX);
        let frames = per_frame.saturating_mul(ticks);
        frames.saturating_add(self.sleeps.iter().sum::<Duration>())
    }
}

impl Clock for ManualClock {
    fn throttle(&mut self, _tick_rate: u32) {
        self.ticks += 1;
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
