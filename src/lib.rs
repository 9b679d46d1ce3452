//! stand-animator - keyframe animation editor core for an armor-stand rig

pub mod core;
pub mod animation;
pub mod rig;
pub mod editor;
pub mod export;

pub use animation::{Animation, Axis, Joint, JointAngles, Pose};
pub use editor::{Editor, EditorMessage, Session};
pub use export::{ExportArtifact, ExportError, Exporter};
