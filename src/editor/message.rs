//! Messages that mutate an editor session

use serde::{Deserialize, Serialize};

use crate::animation::{Axis, Joint, PlaybackToken};

/// One user action or scheduled event.
///
/// Scripts use the JSON form, e.g.
/// `{"cmd": "update_joint", "params": {"joint": "head", "axis": "y", "value": 30}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params", rename_all = "snake_case")]
pub enum EditorMessage {
    /// Append a copy of the active keyframe and select it
    AddKeyframe,
    /// Set one angle. `pose_index` defaults to the active keyframe.
    UpdateJoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pose_index: Option<usize>,
        joint: Joint,
        axis: Axis,
        value: f32,
    },
    /// Select the active keyframe
    SelectFrame { index: usize },
    /// Rename the animation
    SetName { name: String },
    /// Set the raw export interval in ticks
    SetInterval { interval: f64 },
    StartPlayback,
    StopPlayback,
    /// Run `count` display refreshes synchronously
    Tick { count: u32 },
    /// Let real time pass; only a [`super::Session`] acts on this
    Wait { millis: u64 },
    /// Export the animation
    Export,
    /// A display refresh scheduled by a playback loop
    #[serde(skip)]
    Refresh(PlaybackToken),
}
