//! Exported animation document shape

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ExportError;
use crate::animation::{Animation, Axis, Pose};

/// Top level of an exported animation file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationFile {
    pub animations: BTreeMap<String, AnimationEntry>,
}

/// One named animation inside an [`AnimationFile`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationEntry {
    /// Ticks between successive steps, always at least 1
    pub interval: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub steps: Vec<Pose>,
}

impl AnimationFile {
    /// Snapshot an animation into plain export records.
    ///
    /// Fails on an empty name or any non-finite number; the animation itself
    /// is only read.
    pub fn from_animation(animation: &Animation) -> Result<Self, ExportError> {
        if animation.name.is_empty() {
            return Err(ExportError::EmptyName);
        }

        let interval = normalize_interval(animation.interval)?;
        let steps = animation
            .keyframes()
            .iter()
            .enumerate()
            .map(|(step, pose)| copy_step(step, pose))
            .collect::<Result<Vec<_>, _>>()?;

        let mut animations = BTreeMap::new();
        animations.insert(
            animation.name.clone(),
            AnimationEntry {
                interval,
                looping: true,
                steps,
            },
        );
        Ok(Self { animations })
    }
}

/// Floor the raw interval and clamp it to `1..=u32::MAX`
pub fn normalize_interval(raw: f64) -> Result<u32, ExportError> {
    if !raw.is_finite() {
        return Err(ExportError::NonFiniteInterval(raw));
    }
    Ok(raw.floor().clamp(1.0, u32::MAX as f64) as u32)
}

fn copy_step(step: usize, pose: &Pose) -> Result<Pose, ExportError> {
    let mut copy = Pose::NEUTRAL;
    for (joint, angles) in pose.iter() {
        for axis in Axis::ALL {
            let value = angles.get(axis);
            if !value.is_finite() {
                return Err(ExportError::NonFiniteAngle { step, joint, axis, value });
            }
            // Collapse -0 so it is written as 0
            copy.joint_mut(joint).set(axis, value + 0.0);
        }
    }
    Ok(copy)
}
