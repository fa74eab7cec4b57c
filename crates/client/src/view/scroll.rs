//! The smooth catch-up scroll.
//!
//! One self-rescheduling task per transcript, at most: a busy flag guards
//! against concurrent animations, and the session's cancellation token is
//! the only hard stop. Each tick advances the offset by a fixed step; the
//! task ends when the offset reaches the end or the user is scrolling
//! manually. An append during the animation simply extends the goal the
//! next tick sees.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::UiState;

/// Lines advanced per tick.
pub(crate) const SCROLL_STEP: usize = 6;

/// Display-refresh tick, roughly one animation frame.
pub(crate) const SCROLL_TICK: Duration = Duration::from_millis(16);

/// Drives the transcript's scroll offset toward the end.
#[derive(Clone)]
pub struct ScrollAnimator {
    busy: Arc<AtomicBool>,
    shutdown: CancellationToken,
}

impl ScrollAnimator {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            shutdown,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start the animation unless one is already running.
    pub fn kick(&self, ui: Arc<Mutex<UiState>>) {
        if self.busy.swap(true, Ordering::SeqCst) {
            return;
        }

        let busy = Arc::clone(&self.busy);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(SCROLL_TICK);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    _ = tick.tick() => {
                        let mut ui = ui.lock().await;
                        if ui.transcript.user_scrolling() {
                            break;
                        }
                        if !ui.transcript.advance_scroll(SCROLL_STEP) {
                            break;
                        }
                    }
                }
            }
            busy.store(false, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn wait_until_idle(animator: &ScrollAnimator) {
        for _ in 0..200 {
            if !animator.is_busy() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("scroll animation never finished");
    }

    #[tokio::test]
    async fn animation_catches_up_and_releases_the_busy_flag() {
        let ui = Arc::new(Mutex::new(UiState::new()));
        ui.lock().await.transcript.append_text(&"line\n".repeat(20));

        let animator = ScrollAnimator::new(CancellationToken::new());
        animator.kick(Arc::clone(&ui));
        // Second kick while busy is a no-op rather than a second task
        animator.kick(Arc::clone(&ui));

        wait_until_idle(&animator).await;
        let ui = ui.lock().await;
        assert!(ui.transcript.caught_up());
    }

    #[tokio::test]
    async fn manual_scrolling_stops_the_animation() {
        let ui = Arc::new(Mutex::new(UiState::new()));
        {
            let mut ui = ui.lock().await;
            ui.transcript.append_text(&"line\n".repeat(50));
            ui.transcript.set_user_scrolling(true);
        }

        let animator = ScrollAnimator::new(CancellationToken::new());
        animator.kick(Arc::clone(&ui));
        wait_until_idle(&animator).await;

        let ui = ui.lock().await;
        assert_eq!(ui.transcript.scroll_top(), 0);
    }

    #[tokio::test]
    async fn cancellation_token_is_a_hard_stop() {
        let ui = Arc::new(Mutex::new(UiState::new()));
        ui.lock()
            .await
            .transcript
            .append_text(&"line\n".repeat(100_000));

        let token = CancellationToken::new();
        let animator = ScrollAnimator::new(token.clone());
        animator.kick(Arc::clone(&ui));
        token.cancel();
        wait_until_idle(&animator).await;

        let ui = ui.lock().await;
        assert!(!ui.transcript.caught_up());
    }
}
