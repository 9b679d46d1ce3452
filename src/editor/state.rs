//! Editor state container: keyframes, selection and metadata

use crate::animation::{next_index, Animation, Axis, Joint, Pose};

/// Keyframe sequence plus the active selection.
///
/// The active index is never validated against the sequence; readers fall
/// back to [`Pose::NEUTRAL`] when it points past the end.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    animation: Animation,
    active: usize,
}

impl EditorState {
    pub fn new(name: impl Into<String>, interval: f64) -> Self {
        Self {
            animation: Animation::new(name, interval),
            active: 0,
        }
    }

    pub fn from_animation(animation: Animation) -> Self {
        Self { animation, active: 0 }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.animation.len()
    }

    /// Always false: there is at least one keyframe
    pub fn is_empty(&self) -> bool {
        self.animation.is_empty()
    }

    /// The active keyframe, or the neutral pose for a stale selection
    pub fn active_pose(&self) -> Pose {
        self.animation.frame_or_neutral(self.active)
    }

    /// Append a copy of the active pose and select it
    pub fn add_keyframe(&mut self) -> usize {
        let copy = self.active_pose();
        let index = self.animation.push(copy);
        self.active = index;
        log::debug!("Added keyframe {} (total {})", index, self.animation.len());
        index
    }

    /// Replace one angle of one joint in the keyframe at `pose_index`.
    ///
    /// Returns false if there is no such keyframe.
    pub fn update_joint(&mut self, pose_index: usize, joint: Joint, axis: Axis, degrees: f32) -> bool {
        let Some(current) = self.animation.frame(pose_index).copied() else {
            log::warn!(
                "Ignoring update of {}.{} on missing keyframe {}",
                joint,
                axis,
                pose_index
            );
            return false;
        };
        self.animation
            .replace(pose_index, current.with_angle(joint, axis, degrees))
    }

    /// Select a keyframe. Out-of-range indices are kept as-is.
    pub fn select_frame(&mut self, index: usize) {
        if index >= self.animation.len() {
            log::debug!(
                "Selected frame {} beyond {} keyframes, rendering neutral pose",
                index,
                self.animation.len()
            );
        }
        self.active = index;
    }

    /// Move the selection one frame forward, looping to the start
    pub fn advance_frame(&mut self) -> usize {
        self.active = next_index(self.active, self.animation.len());
        self.active
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.animation.name = name.into();
    }

    pub fn set_interval(&mut self, interval: f64) {
        self.animation.interval = interval;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_animation(Animation::default())
    }
}
