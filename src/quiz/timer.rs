//! Countdown timer task
//!
//! One cancellable tokio task per active session sends a tick every second.
//! Ticks carry the session epoch so a late-firing callback from a stale
//! session is dropped by the receiver instead of corrupting the live one.
//! The task must be cancelled on every exit from the active phase: submit,
//! abandonment, or unmount.

use tokio::sync::mpsc;
use tokio::time::{Duration, interval};
use tokio_util::sync::CancellationToken;

/// One second elapsed for the session with this epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    /// Epoch of the session the tick belongs to
    pub epoch: u64,
}

/// Handle to a running countdown task
#[derive(Debug)]
pub struct QuizTimer {
    cancel: CancellationToken,
}

impl QuizTimer {
    /// Spawn the countdown task, ticking once per second until cancelled
    pub fn start(epoch: u64, tx: mpsc::Sender<TimerTick>) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it so the
            // first delivered tick lands a full second after start.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if tx.send(TimerTick { epoch }).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { cancel }
    }

    /// Stop the countdown task
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for QuizTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_carry_the_epoch() {
        let (tx, mut rx) = mpsc::channel(8);
        let _timer = QuizTimer::start(7, tx);

        tokio::time::advance(Duration::from_secs(1)).await;
        let tick = rx.recv().await.unwrap();
        assert_eq!(tick.epoch, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_stops_ticking() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = QuizTimer::start(1, tx);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(rx.recv().await.is_some());

        timer.cancel();
        tokio::time::advance(Duration::from_secs(5)).await;

        // Drain anything sent before cancellation landed, then the
        // channel must close rather than keep ticking.
        while let Some(_tick) = rx.recv().await {}
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_task() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = QuizTimer::start(1, tx);
        drop(timer);

        tokio::time::advance(Duration::from_secs(3)).await;
        while let Some(_tick) = rx.recv().await {}
    }
}
