//! Keyframe poses: a full set of joint angles

use super::joint::{Axis, Joint, JointAngles};
use serde::{Deserialize, Serialize};

/// A snapshot of every joint angle at one point of the timeline.
///
/// Each joint is a named field, so a pose can never be partial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub head: JointAngles,
    pub left_arm: JointAngles,
    pub right_arm: JointAngles,
    pub left_leg: JointAngles,
    pub right_leg: JointAngles,
}

impl Pose {
    /// All joints at rest
    pub const NEUTRAL: Pose = Pose {
        head: JointAngles::ZERO,
        left_arm: JointAngles::ZERO,
        right_arm: JointAngles::ZERO,
        left_leg: JointAngles::ZERO,
        right_leg: JointAngles::ZERO,
    };

    pub fn joint(&self, joint: Joint) -> &JointAngles {
        match joint {
            Joint::Head => &self.head,
            Joint::LeftArm => &self.left_arm,
            Joint::RightArm => &self.right_arm,
            Joint::LeftLeg => &self.left_leg,
            Joint::RightLeg => &self.right_leg,
        }
    }

    pub fn joint_mut(&mut self, joint: Joint) -> &mut JointAngles {
        match joint {
            Joint::Head => &mut self.head,
            Joint::LeftArm => &mut self.left_arm,
            Joint::RightArm => &mut self.right_arm,
            Joint::LeftLeg => &mut self.left_leg,
            Joint::RightLeg => &mut self.right_leg,
        }
    }

    pub fn angle(&self, joint: Joint, axis: Axis) -> f32 {
        self.joint(joint).get(axis)
    }

    /// Copy of this pose with a single angle replaced
    pub fn with_angle(mut self, joint: Joint, axis: Axis, degrees: f32) -> Pose {
        self.joint_mut(joint).set(axis, degrees);
        self
    }

    /// Joints and their angles in export order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, JointAngles)> + '_ {
        Joint::ALL.into_iter().map(move |j| (j, *self.joint(j)))
    }

    pub fn is_finite(&self) -> bool {
        self.iter().all(|(_, angles)| angles.is_finite())
    }
}
