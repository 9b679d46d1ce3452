//! Editor controller
//!
//! [`Editor`] owns the state container, the playback state machine, the rig
//! renderer and the exporter. Every mutation goes through
//! [`Editor::apply`] with an [`EditorMessage`].

pub mod input;
pub mod message;
pub mod refresh;
pub mod session;
pub mod state;

pub use message::EditorMessage;
pub use refresh::RefreshLoop;
pub use session::Session;
pub use state::EditorState;

use crate::animation::{Axis, Joint, Playback, PlaybackToken, Pose};
use crate::core::{EditorConfig, Result};
use crate::export::{ExportArtifact, ExportError, Exporter};
use crate::rig::{LogSurface, RenderSurface, RigRenderer};

/// A single editing session over one animation
pub struct Editor<S: RenderSurface = LogSurface> {
    config: EditorConfig,
    state: EditorState,
    playback: Playback,
    renderer: RigRenderer,
    exporter: Exporter,
    surface: S,
}

impl Editor<LogSurface> {
    /// Editor drawing through the log
    pub fn new(config: EditorConfig) -> Result<Self> {
        Self::with_surface(config, LogSurface)
    }
}

impl<S: RenderSurface> Editor<S> {
    pub fn with_surface(config: EditorConfig, surface: S) -> Result<Self> {
        let state = EditorState::new(config.default_name.clone(), config.default_interval);
        let exporter = Exporter::new(config.export_naming.clone());
        let mut editor = Self {
            config,
            state,
            playback: Playback::new(),
            renderer: RigRenderer::new()?,
            exporter,
            surface,
        };
        editor.paint();
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn renderer(&self) -> &RigRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index()
    }

    pub fn active_pose(&self) -> Pose {
        self.state.active_pose()
    }

    /// Apply one message. Returns the artifact for [`EditorMessage::Export`].
    ///
    /// On error the state is left as it was.
    pub fn apply(&mut self, message: EditorMessage) -> Result<Option<ExportArtifact>> {
        match message {
            EditorMessage::AddKeyframe => {
                self.state.add_keyframe();
            }
            EditorMessage::UpdateJoint {
                pose_index,
                joint,
                axis,
                value,
            } => {
                let index = pose_index.unwrap_or(self.state.active_index());
                self.update_joint(index, joint, axis, value)?;
            }
            EditorMessage::SelectFrame { index } => self.state.select_frame(index),
            EditorMessage::SetName { name } => self.state.set_name(name),
            EditorMessage::SetInterval { interval } => {
                let interval = input::sanitize_interval(interval).inspect_err(|e| {
                    log::warn!("Rejected interval: {}", e);
                })?;
                self.state.set_interval(interval);
            }
            EditorMessage::StartPlayback => {
                self.start_playback();
            }
            EditorMessage::StopPlayback => {
                self.stop_playback();
            }
            EditorMessage::Tick { count } => {
                for _ in 0..count {
                    self.tick();
                }
                return Ok(None);
            }
            EditorMessage::Wait { .. } => return Ok(None),
            EditorMessage::Export => return Ok(Some(self.export()?)),
            EditorMessage::Refresh(token) => {
                self.refresh(token);
                return Ok(None);
            }
        }
        self.paint();
        Ok(None)
    }

    /// Set one angle from widget input. Non-finite values are rejected,
    /// the rest clamped to [-180, 180].
    pub fn update_joint(&mut self, pose_index: usize, joint: Joint, axis: Axis, value: f32) -> Result<bool> {
        let degrees = input::sanitize_angle(value).inspect_err(|e| {
            log::warn!("Rejected {}.{} input: {}", joint, axis, e);
        })?;
        Ok(self.state.update_joint(pose_index, joint, axis, degrees))
    }

    pub fn start_playback(&mut self) -> PlaybackToken {
        let was_playing = self.playback.is_playing();
        let token = self.playback.start();
        if !was_playing {
            log::info!("Playback started ({} keyframes)", self.state.len());
        }
        token
    }

    pub fn stop_playback(&mut self) -> Option<PlaybackToken> {
        let cancelled = self.playback.stop();
        if cancelled.is_some() {
            log::info!("Playback stopped at frame {}", self.state.active_index());
        }
        cancelled
    }

    /// Handle a scheduled display refresh.
    ///
    /// Advances the selection only while the token is live; a refresh queued
    /// before a stop is dropped. Returns whether the selection moved.
    pub fn refresh(&mut self, token: PlaybackToken) -> bool {
        let advanced = self.playback.accept(token);
        if advanced {
            self.state.advance_frame();
        } else {
            log::trace!("Dropped stale refresh {}", token.generation());
        }
        self.paint();
        advanced
    }

    /// One display refresh using the live token, if any
    pub fn tick(&mut self) -> bool {
        match self.playback.token() {
            Some(token) => self.refresh(token),
            None => {
                self.paint();
                false
            }
        }
    }

    /// Draw the active pose
    pub fn paint(&mut self) {
        let pose = self.state.animation().frame(self.state.active_index()).copied();
        self.renderer.render(pose.as_ref(), &mut self.surface);
    }

    /// Export the current animation. Failures are logged and leave the
    /// session untouched.
    pub fn export(&self) -> std::result::Result<ExportArtifact, ExportError> {
        match self.exporter.export(self.state.animation()) {
            Ok(artifact) => {
                log::info!(
                    "Exported '{}' ({} keyframes) as {}",
                    self.state.animation().name,
                    self.state.len(),
                    artifact.file_name
                );
                Ok(artifact)
            }
            Err(e) => {
                log::error!("Export of '{}' failed: {}", self.state.animation().name, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::export::AnimationFile;
    use crate::rig::RecordingSurface;
    use glam::Quat;

    fn editor() -> Editor<RecordingSurface> {
        Editor::with_surface(EditorConfig::default(), RecordingSurface::default()).unwrap()
    }

    #[test]
    fn test_update_joint_clamps_widget_input() {
        let mut editor = editor();
        editor
            .apply(EditorMessage::UpdateJoint {
                pose_index: None,
                joint: Joint::Head,
                axis: Axis::X,
                value: 400.0,
            })
            .unwrap();
        assert_eq!(editor.active_pose().head.x, 180.0);
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let mut editor = editor();
        let before = editor.state().clone();

        let result = editor.apply(EditorMessage::UpdateJoint {
            pose_index: None,
            joint: Joint::Head,
            axis: Axis::X,
            value: f32::NAN,
        });
        assert!(matches!(result, Err(Error::Input(_))));

        let result = editor.apply(EditorMessage::SetInterval { interval: f64::NAN });
        assert!(matches!(result, Err(Error::Input(_))));
        assert_eq!(editor.state(), &before);
    }

    #[test]
    fn test_playback_cycles_through_frames() {
        let mut editor = editor();
        editor.apply(EditorMessage::AddKeyframe).unwrap();
        editor.apply(EditorMessage::AddKeyframe).unwrap();
        editor.apply(EditorMessage::AddKeyframe).unwrap();
        editor.apply(EditorMessage::SelectFrame { index: 1 }).unwrap();

        let token = editor.start_playback();
        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(editor.refresh(token));
            seen.push(editor.active_index());
        }
        assert_eq!(seen, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_refresh_queued_before_stop_is_dropped() {
        let mut editor = editor();
        editor.apply(EditorMessage::AddKeyframe).unwrap();
        let token = editor.start_playback();
        editor.stop_playback();

        let index = editor.active_index();
        editor.apply(EditorMessage::Refresh(token)).unwrap();
        assert_eq!(editor.active_index(), index);

        // A new session does not revive the old token
        editor.start_playback();
        assert!(!editor.refresh(token));
        assert_eq!(editor.active_index(), index);
    }

    #[test]
    fn test_tick_without_playback_only_paints() {
        let mut editor = editor();
        editor.apply(EditorMessage::AddKeyframe).unwrap();
        let frames = editor.renderer().frames_rendered();

        editor.apply(EditorMessage::Tick { count: 3 }).unwrap();
        assert_eq!(editor.active_index(), 1);
        assert_eq!(editor.renderer().frames_rendered(), frames + 3);
    }

    #[test]
    fn test_out_of_range_selection_renders_neutral() {
        let mut editor = editor();
        editor.update_joint(0, Joint::RightArm, Axis::X, -90.0).unwrap();
        editor.apply(EditorMessage::SelectFrame { index: 99 }).unwrap();

        assert_eq!(editor.active_pose(), Pose::NEUTRAL);
        for joint in Joint::ALL {
            assert_eq!(editor.surface().rotation(joint), Some(Quat::IDENTITY));
        }
    }

    #[test]
    fn test_edits_are_painted() {
        let mut editor = editor();
        editor.surface_mut().clear();
        editor.update_joint(0, Joint::LeftLeg, Axis::Y, 90.0).unwrap();
        editor.paint();

        let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let actual = editor.surface().rotation(Joint::LeftLeg).unwrap();
        assert!(actual.angle_between(expected) < 0.001);
    }

    #[test]
    fn test_export_message() {
        let mut editor = editor();
        editor.apply(EditorMessage::SetName { name: "wave".into() }).unwrap();
        editor.apply(EditorMessage::SetInterval { interval: 0.0 }).unwrap();

        let artifact = editor.apply(EditorMessage::Export).unwrap().unwrap();
        assert_eq!(artifact.file_name, "wave.yml");

        let parsed: AnimationFile = serde_yaml::from_str(&artifact.contents).unwrap();
        assert_eq!(parsed.animations["wave"].interval, 1);
    }

    #[test]
    fn test_failed_export_leaves_state_untouched() {
        let mut editor = editor();
        editor.apply(EditorMessage::SetName { name: String::new() }).unwrap();
        let before = editor.state().clone();

        let result = editor.apply(EditorMessage::Export);
        assert!(matches!(result, Err(Error::Export(ExportError::EmptyName))));
        assert_eq!(editor.state(), &before);
    }
}
