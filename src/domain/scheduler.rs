use std::{future::Future, time::Duration};

use tokio::time::{interval, Interval, MissedTickBehavior};

/// Roughly one refresh of a 60 Hz display.
pub const DISPLAY_FRAME: Duration = Duration::from_millis(16);

/// Paces the detection loop. Each `next_tick` is one cooperative yield; the
/// loop decides after every tick whether to keep going.
pub trait FrameScheduler {
    fn next_tick(&mut self) -> impl Future<Output = ()>;
}

/// Fixed-interval ticker for hosts without a display clock. Late ticks are
/// skipped rather than bunched up.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval: Interval,
}

impl IntervalScheduler {
    /// Must be created inside a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn display_rate() -> Self {
        Self::new(DISPLAY_FRAME)
    }
}

impl FrameScheduler for IntervalScheduler {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }
}
