//! Periodic refresh of the world clock

use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, trace};

use super::{ClockReading, WorldClock};

/// Receiver for clock readings
pub trait ClockSink {
    /// Called once per tick with a reading per zone
    fn render(&mut self, readings: &[ClockReading]);
}

impl<F> ClockSink for F
where
    F: FnMut(&[ClockReading]),
{
    fn render(&mut self, readings: &[ClockReading]) {
        self(readings);
    }
}

impl WorldClock {
    /// Renders now, then once per `period`, until `shutdown` resolves or
    /// `max_ticks` renders have happened. Returns the number of renders.
    ///
    /// Ticks missed while the sink is slow are skipped, not replayed.
    pub async fn run<S, F>(
        &self,
        sink: &mut S,
        period: Duration,
        max_ticks: Option<u64>,
        shutdown: F,
    ) -> u64
    where
        S: ClockSink + ?Sized,
        F: Future<Output = ()>,
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut renders = 0;
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => {
                    debug!(renders, "clock shut down");
                    break;
                }
                _ = ticker.tick() => {
                    trace!(zones = self.zones.len(), "clock tick");
                    sink.render(&self.snapshot(Utc::now()));
                    renders += 1;
                    if max_ticks.is_some_and(|max| renders >= max) {
                        break;
                    }
                }
            }
        }
        renders
    }
}
