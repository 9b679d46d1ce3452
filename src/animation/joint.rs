//! Joints of the armor-stand rig and their rotation angles

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for a joint angle in degrees
pub const ANGLE_MIN: f32 = -180.0;
/// Upper bound for a joint angle in degrees
pub const ANGLE_MAX: f32 = 180.0;

/// Rotation axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the five animatable joints
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Joint {
    /// All joints, in the order they are written to an exported step
    pub const ALL: [Joint; 5] = [
        Joint::Head,
        Joint::LeftArm,
        Joint::RightArm,
        Joint::LeftLeg,
        Joint::RightLeg,
    ];

    /// Stable snake_case name used in exported files
    pub fn name(self) -> &'static str {
        match self {
            Joint::Head => "head",
            Joint::LeftArm => "left_arm",
            Joint::RightArm => "right_arm",
            Joint::LeftLeg => "left_leg",
            Joint::RightLeg => "right_leg",
        }
    }

    /// Look up a joint by its exported name
    pub fn from_name(name: &str) -> Option<Joint> {
        Joint::ALL.into_iter().find(|j| j.name() == name)
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rotation of a single joint, in degrees around each axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl JointAngles {
    pub const ZERO: JointAngles = JointAngles { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, degrees: f32) {
        match axis {
            Axis::X => self.x = degrees,
            Axis::Y => self.y = degrees,
            Axis::Z => self.z = degrees,
        }
    }

    /// Copy with one axis replaced
    pub fn with(mut self, axis: Axis, degrees: f32) -> Self {
        self.set(axis, degrees);
        self
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Angles converted to radians
    pub fn to_radians(&self) -> Vec3 {
        Vec3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }

    /// Orientation as an XYZ Euler rotation
    pub fn to_quat(&self) -> Quat {
        let r = self.to_radians();
        Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
    }
}
