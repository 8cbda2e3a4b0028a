use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Repeating tick source driving the simulation.
pub trait TickTimer: Send {
    /// Starts ticking every `interval`, cancelling any previous schedule.
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Period of the active schedule, `None` while stopped.
    fn interval(&self) -> Option<Duration>;
    /// Resolves on the next tick. Never resolves while stopped.
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Holds at most one `tokio::time::Interval`; replacing it drops the old one,
/// so two schedules can never overlap.
#[derive(Default)]
pub struct TokioTickTimer {
    interval: Option<Interval>,
}

impl TokioTickTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickTimer for TokioTickTimer {
    fn start(&mut self, interval: Duration) {
        let period = interval.max(Duration::from_millis(1));
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(timer);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    fn interval(&self) -> Option<Duration> {
        self.interval.as_ref().map(|timer| timer.period())
    }

    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            match self.interval.as_mut() {
                Some(timer) => {
                    timer.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}
