//! Re-armable refresh timer

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Periodic refresh trigger whose period can change at runtime
#[derive(Debug)]
pub struct RefreshTimer {
    ticker: Interval,
    period: Duration,
}

impl RefreshTimer {
    /// Create a timer whose first tick is one `period` from now
    pub fn new(period: Duration) -> Self {
        Self {
            ticker: Self::arm(period),
            period,
        }
    }

    fn arm(period: Duration) -> Interval {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    /// Cancel the pending tick and restart with `period`.
    ///
    /// The next tick fires one full `period` after this call.
    pub fn rearm(&mut self, period: Duration) {
        tracing::debug!(period_secs = period.as_secs(), "Re-arming refresh timer");
        self.period = period;
        self.ticker = Self::arm(period);
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) -> Instant {
        self.ticker.tick().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let mut timer = RefreshTimer::new(Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(timer.tick().now_or_never().is_none());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(timer.tick().now_or_never().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_countdown() {
        let mut timer = RefreshTimer::new(Duration::from_secs(60));
        tokio::time::advance(Duration::from_secs(50)).await;

        timer.rearm(Duration::from_secs(30));
        assert_eq!(timer.period(), Duration::from_secs(30));

        // The old deadline at 60s no longer applies
        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(timer.tick().now_or_never().is_none());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(timer.tick().now_or_never().is_some());

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(timer.tick().now_or_never().is_some());
    }
}
