//! Display refresh loop driving preview playback

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::message::EditorMessage;
use crate::animation::PlaybackToken;

/// Repeating task that posts [`EditorMessage::Refresh`] once per period.
///
/// Cancellation is checked before every reschedule and every send. The task
/// also ends on its own once the receiving side is gone. Dropping the handle
/// cancels the loop.
pub struct RefreshLoop {
    token: PlaybackToken,
    cancel: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshLoop {
    /// Spawn on the current tokio runtime
    pub fn spawn(token: PlaybackToken, period: Duration, tx: mpsc::Sender<EditorMessage>) -> Self {
        let (cancel, mut cancelled) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.changed() => break,
                    _ = ticker.tick() => {}
                }
                if *cancelled.borrow() {
                    break;
                }
                if tx.send(EditorMessage::Refresh(token)).await.is_err() {
                    break;
                }
            }

            log::debug!("Refresh loop {} finished", token.generation());
        });

        Self {
            token,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn token(&self) -> PlaybackToken {
        self.token
    }

    /// Request cancellation without waiting
    pub fn cancel(&self) {
        // Fails only when the task already exited
        let _ = self.cancel.send(true);
    }

    /// Cancel and wait for the task to exit
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::error!("Refresh loop {} panicked: {}", self.token.generation(), e);
            }
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Playback;

    #[tokio::test(start_paused = true)]
    async fn test_posts_refresh_each_period() {
        let token = Playback::new().start();
        let (tx, mut rx) = mpsc::channel(16);
        let refresh = RefreshLoop::spawn(token, Duration::from_millis(10), tx);

        tokio::time::sleep(Duration::from_millis(35)).await;
        refresh.shutdown().await;

        let mut received = 0;
        while let Ok(message) = rx.try_recv() {
            assert_eq!(message, EditorMessage::Refresh(token));
            received += 1;
        }
        assert_eq!(received, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_refresh_after_cancel() {
        let token = Playback::new().start();
        let (tx, mut rx) = mpsc::channel(16);
        let refresh = RefreshLoop::spawn(token, Duration::from_millis(10), tx);
        refresh.shutdown().await;

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_receiver_dropped() {
        let token = Playback::new().start();
        let (tx, rx) = mpsc::channel(1);
        let mut refresh = RefreshLoop::spawn(token, Duration::from_millis(10), tx);
        drop(rx);

        let handle = refresh.handle.take().unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop did not exit")
            .unwrap();
    }
}
