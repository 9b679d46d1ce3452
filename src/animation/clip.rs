//! Animation: an ordered keyframe sequence plus its metadata

use super::pose::Pose;

/// Default animation name for a fresh session
pub const DEFAULT_NAME: &str = "animation";
/// Default ticks between keyframes
pub const DEFAULT_INTERVAL: f64 = 10.0;

/// A complete keyframe animation.
///
/// The keyframe list is never empty. `interval` is kept as entered and only
/// normalized to a positive integer on export.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub name: String,
    pub interval: f64,
    pub looping: bool,
    keyframes: Vec<Pose>,
}

impl Animation {
    /// Create an animation holding a single neutral keyframe
    pub fn new(name: impl Into<String>, interval: f64) -> Self {
        Self {
            name: name.into(),
            interval,
            looping: true,
            keyframes: vec![Pose::NEUTRAL],
        }
    }

    /// Build from existing keyframes. Returns `None` for an empty list.
    pub fn from_keyframes(name: impl Into<String>, interval: f64, keyframes: Vec<Pose>) -> Option<Self> {
        if keyframes.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            interval,
            looping: true,
            keyframes,
        })
    }

    pub fn keyframes(&self) -> &[Pose] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Pose> {
        self.keyframes.get(index)
    }

    /// The keyframe at `index`, or the neutral pose if there is none
    pub fn frame_or_neutral(&self, index: usize) -> Pose {
        self.frame(index).copied().unwrap_or(Pose::NEUTRAL)
    }

    /// Append a keyframe, returning its index
    pub fn push(&mut self, pose: Pose) -> usize {
        self.keyframes.push(pose);
        self.keyframes.len() - 1
    }

    /// Store a replacement pose at `index`. Returns false if out of range.
    pub fn replace(&mut self, index: usize, pose: Pose) -> bool {
        match self.keyframes.get_mut(index) {
            Some(slot) => {
                *slot = pose;
                true
            }
            None => false,
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Axis, Joint};

    #[test]
    fn test_new_has_one_neutral_frame() {
        let anim = Animation::new("wave", 10.0);
        assert_eq!(anim.len(), 1);
        assert_eq!(anim.keyframes()[0], Pose::NEUTRAL);
        assert!(anim.looping);
    }

    #[test]
    fn test_from_keyframes_rejects_empty() {
        assert!(Animation::from_keyframes("x", 1.0, Vec::new()).is_none());
        assert!(Animation::from_keyframes("x", 1.0, vec![Pose::NEUTRAL]).is_some());
    }

    #[test]
    fn test_frame_or_neutral() {
        let mut anim = Animation::default();
        let raised = Pose::NEUTRAL.with_angle(Joint::RightArm, Axis::X, -90.0);
        anim.push(raised);

        assert_eq!(anim.frame_or_neutral(1), raised);
        assert_eq!(anim.frame_or_neutral(7), Pose::NEUTRAL);
    }

    #[test]
    fn test_replace_out_of_range() {
        let mut anim = Animation::default();
        assert!(!anim.replace(3, Pose::NEUTRAL));
        assert!(anim.replace(0, Pose::NEUTRAL.with_angle(Joint::Head, Axis::Y, 15.0)));
        assert_eq!(anim.keyframes()[0].head.y, 15.0);
    }
}
