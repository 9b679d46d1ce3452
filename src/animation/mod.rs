//! Keyframe animation data model

pub mod joint;
pub mod pose;
pub mod clip;
pub mod playback;

pub use joint::{Axis, Joint, JointAngles, ANGLE_MAX, ANGLE_MIN};
pub use pose::Pose;
pub use clip::Animation;
pub use playback::{next_index, Playback, PlaybackStatus, PlaybackToken};
