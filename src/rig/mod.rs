//! Armor-stand rig: part hierarchy and per-frame pose application

pub mod skeleton;
pub mod renderer;

pub use skeleton::{Bone, RigPart, Skeleton, SkeletonBuilder, SkeletonError};
pub use renderer::{LogSurface, RecordingSurface, RenderSurface, RigRenderer};
