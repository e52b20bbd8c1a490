//! Cancellable repeating timer driving flow progress.
//!
//! # Invariants
//! - The first tick fires one full period after spawn, never immediately.
//! - Once cancelled (explicitly or by drop) the callback is never invoked
//!   again by this ticker.

use log::debug;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Callback verdict after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Repeating timer task with a cancellation token.
pub struct Ticker {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawns a ticker on `runtime` calling `on_tick` every `period`.
    pub fn spawn(
        runtime: &Handle,
        period: Duration,
        mut on_tick: impl FnMut() -> TickControl + Send + 'static,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut ticks: u64 = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("event=ticker_stop module=flow reason=cancelled ticks={ticks}");
                        break;
                    }
                    _ = interval.tick() => {
                        ticks += 1;
                        if on_tick() == TickControl::Stop {
                            debug!("event=ticker_stop module=flow reason=done ticks={ticks}");
                            break;
                        }
                    }
                }
            }
        });

        Self { cancel, task }
    }

    /// Stops the ticker. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns whether the ticker task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::{TickControl, Ticker};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let _ticker = Ticker::spawn(&Handle::current(), Duration::from_secs(2), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            TickControl::Continue
        });

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_verdict_ends_the_task() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_secs(1), move || {
            if seen.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        });

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_and_drop_silence_the_callback() {
        let count = Arc::new(AtomicU32::new(0));
        let seen = Arc::clone(&count);
        let ticker = Ticker::spawn(&Handle::current(), Duration::from_secs(1), move || {
            seen.fetch_add(1, Ordering::SeqCst);
            TickControl::Continue
        });

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        ticker.cancel();
        assert!(ticker.is_cancelled());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        let dropped_count = Arc::new(AtomicU32::new(0));
        let dropped_seen = Arc::clone(&dropped_count);
        drop(Ticker::spawn(
            &Handle::current(),
            Duration::from_secs(1),
            move || {
                dropped_seen.fetch_add(1, Ordering::SeqCst);
                TickControl::Continue
            },
        ));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(dropped_count.load(Ordering::SeqCst), 0);
    }
}
