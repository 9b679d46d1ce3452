//! Async editing session: an [`Editor`] plus its refresh loop

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::message::EditorMessage;
use super::refresh::RefreshLoop;
use super::Editor;
use crate::core::Result;
use crate::export::ExportArtifact;
use crate::rig::{LogSurface, RenderSurface};

/// Pending messages buffered between producers and the editor
const QUEUE_CAPACITY: usize = 64;

/// Owns an editor and the message queue feeding it.
///
/// Playback spawns a [`RefreshLoop`] that posts refreshes into the same
/// queue as every other producer, so the editor stays the single writer.
pub struct Session<S: RenderSurface = LogSurface> {
    editor: Editor<S>,
    tx: mpsc::Sender<EditorMessage>,
    rx: mpsc::Receiver<EditorMessage>,
    refresh: Option<RefreshLoop>,
}

impl<S: RenderSurface> Session<S> {
    pub fn new(editor: Editor<S>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        Self {
            editor,
            tx,
            rx,
            refresh: None,
        }
    }

    pub fn editor(&self) -> &Editor<S> {
        &self.editor
    }

    /// Handle for other producers (input widgets) to post messages
    pub fn sender(&self) -> mpsc::Sender<EditorMessage> {
        self.tx.clone()
    }

    pub fn is_refresh_running(&self) -> bool {
        self.refresh.is_some()
    }

    /// Handle one message, letting real time pass for [`EditorMessage::Wait`]
    pub async fn handle(&mut self, message: EditorMessage) -> Result<Option<ExportArtifact>> {
        match message {
            EditorMessage::Wait { millis } => {
                self.run_for(Duration::from_millis(millis)).await;
                Ok(None)
            }
            other => self.dispatch(other),
        }
    }

    /// Process queued messages until `duration` has elapsed.
    ///
    /// Errors from queued messages are logged and do not stop the session.
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            tokio::select! {
                biased;
                _ = tokio::time::sleep_until(deadline) => break,
                message = self.rx.recv() => {
                    let Some(message) = message else { break };
                    if let EditorMessage::Wait { .. } = message {
                        log::warn!("Ignoring queued wait message");
                        continue;
                    }
                    if let Err(e) = self.dispatch(message) {
                        log::warn!("Queued message failed: {}", e);
                    }
                }
            }
        }
    }

    /// Stop playback and hand the editor back
    pub async fn shutdown(mut self) -> Editor<S> {
        self.editor.stop_playback();
        if let Some(refresh) = self.refresh.take() {
            refresh.shutdown().await;
        }
        self.editor
    }

    fn dispatch(&mut self, message: EditorMessage) -> Result<Option<ExportArtifact>> {
        match message {
            EditorMessage::StartPlayback => {
                let token = self.editor.start_playback();
                if self.refresh.as_ref().map(RefreshLoop::token) != Some(token) {
                    let period = self.editor.config().refresh_period();
                    // Replacing the handle cancels any previous loop
                    self.refresh = Some(RefreshLoop::spawn(token, period, self.tx.clone()));
                }
                self.editor.paint();
                Ok(None)
            }
            EditorMessage::StopPlayback => {
                self.editor.stop_playback();
                if let Some(refresh) = self.refresh.take() {
                    refresh.cancel();
                }
                self.editor.paint();
                Ok(None)
            }
            other => self.editor.apply(other),
        }
    }
}
