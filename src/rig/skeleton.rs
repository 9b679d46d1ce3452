//! Rigid part hierarchy of the armor stand

use glam::{Mat4, Vec3};
use std::collections::HashMap;
use thiserror::Error;

use crate::animation::Joint;

/// Errors raised while assembling a skeleton
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SkeletonError {
    #[error("invalid parent bone index {0}")]
    InvalidParent(usize),

    #[error("parent bone not found: {0}")]
    ParentNotFound(String),

    #[error("bone name already exists: {0}")]
    DuplicateName(String),

    #[error("skeleton must have at least one bone")]
    Empty,
}

/// A single rigid part in the hierarchy
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent_index: Option<usize>,
    /// Pivot placement relative to the parent
    pub local_bind_pose: Mat4,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent_index: Option<usize>, local_transform: Mat4) -> Self {
        Self {
            name: name.into(),
            parent_index,
            local_bind_pose: local_transform,
        }
    }
}

/// Parts of the armor stand, in bone order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RigPart {
    Base,
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl RigPart {
    pub const ALL: [RigPart; 7] = [
        RigPart::Base,
        RigPart::Torso,
        RigPart::Head,
        RigPart::LeftArm,
        RigPart::RightArm,
        RigPart::LeftLeg,
        RigPart::RightLeg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RigPart::Base => "base",
            RigPart::Torso => "torso",
            RigPart::Head => "head",
            RigPart::LeftArm => "left_arm",
            RigPart::RightArm => "right_arm",
            RigPart::LeftLeg => "left_leg",
            RigPart::RightLeg => "right_leg",
        }
    }

    /// The animated joint driving this part. Base and torso are never posed.
    pub fn joint(self) -> Option<Joint> {
        match self {
            RigPart::Base | RigPart::Torso => None,
            RigPart::Head => Some(Joint::Head),
            RigPart::LeftArm => Some(Joint::LeftArm),
            RigPart::RightArm => Some(Joint::RightArm),
            RigPart::LeftLeg => Some(Joint::LeftLeg),
            RigPart::RightLeg => Some(Joint::RightLeg),
        }
    }
}

// Pivot offsets in blocks (16 px per block)
const NECK: Vec3 = Vec3::new(0.0, 1.5, 0.0);
const SHOULDER: Vec3 = Vec3::new(0.3125, -0.125, 0.0);
const HIP: Vec3 = Vec3::new(0.125, 0.75, 0.0);

/// A hierarchical skeleton composed of bones
#[derive(Clone, Debug)]
pub struct Skeleton {
    bones: Vec<Bone>,
    bone_names: HashMap<String, usize>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self {
            bones: Vec::new(),
            bone_names: HashMap::new(),
        }
    }

    /// The fixed armor-stand rig. Bone indices follow [`RigPart::ALL`].
    pub fn armor_stand() -> Result<Skeleton, SkeletonError> {
        let mirror = Vec3::new(-1.0, 1.0, 1.0);
        SkeletonBuilder::new()
            .add_root("base", Mat4::IDENTITY)
            .add_bone("torso", "base", Mat4::from_translation(NECK))
            .add_bone("head", "torso", Mat4::IDENTITY)
            .add_bone("left_arm", "torso", Mat4::from_translation(SHOULDER))
            .add_bone("right_arm", "torso", Mat4::from_translation(SHOULDER * mirror))
            .add_bone("left_leg", "base", Mat4::from_translation(HIP))
            .add_bone("right_leg", "base", Mat4::from_translation(HIP * mirror))
            .build()
    }

    /// Add a bone, returning its index
    pub fn add_bone(&mut self, bone: Bone) -> Result<usize, SkeletonError> {
        if let Some(parent) = bone.parent_index {
            if parent >= self.bones.len() {
                return Err(SkeletonError::InvalidParent(parent));
            }
        }

        if self.bone_names.contains_key(&bone.name) {
            return Err(SkeletonError::DuplicateName(bone.name));
        }

        let index = self.bones.len();
        self.bone_names.insert(bone.name.clone(), index);
        self.bones.push(bone);

        Ok(index)
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bone_names.get(name).copied()
    }

    pub fn parent_index(&self, bone_index: usize) -> Option<usize> {
        self.bones.get(bone_index)?.parent_index
    }

    /// Get all children of a bone
    pub fn children(&self, bone_index: usize) -> Vec<usize> {
        self.bones
            .iter()
            .enumerate()
            .filter_map(|(idx, bone)| (bone.parent_index == Some(bone_index)).then_some(idx))
            .collect()
    }

    /// World transforms from per-bone local animation transforms.
    ///
    /// Each bone is placed at its bind pose, then rotated by its local
    /// transform around that pivot. Missing entries count as identity.
    pub fn calculate_world_transforms(&self, local_transforms: &[Mat4]) -> Vec<Mat4> {
        let mut world_transforms = vec![Mat4::IDENTITY; self.bones.len()];

        // Parents always precede children
        for (index, bone) in self.bones.iter().enumerate() {
            let local = bone.local_bind_pose
                * local_transforms.get(index).copied().unwrap_or(Mat4::IDENTITY);
            world_transforms[index] = match bone.parent_index {
                Some(parent_idx) => world_transforms[parent_idx] * local,
                None => local,
            };
        }

        world_transforms
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for easier skeleton construction
pub struct SkeletonBuilder {
    skeleton: Skeleton,
    last_error: Option<SkeletonError>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self {
            skeleton: Skeleton::new(),
            last_error: None,
        }
    }

    /// Add a root bone (no parent)
    pub fn add_root(mut self, name: &str, transform: Mat4) -> Self {
        if self.last_error.is_some() {
            return self;
        }

        if let Err(e) = self.skeleton.add_bone(Bone::new(name, None, transform)) {
            self.last_error = Some(e);
        }
        self
    }

    /// Add a bone under a named parent
    pub fn add_bone(mut self, name: &str, parent: &str, transform: Mat4) -> Self {
        if self.last_error.is_some() {
            return self;
        }

        let Some(parent_index) = self.skeleton.find_bone(parent) else {
            self.last_error = Some(SkeletonError::ParentNotFound(parent.to_string()));
            return self;
        };

        if let Err(e) = self.skeleton.add_bone(Bone::new(name, Some(parent_index), transform)) {
            self.last_error = Some(e);
        }
        self
    }

    pub fn build(self) -> Result<Skeleton, SkeletonError> {
        if let Some(error) = self.last_error {
            Err(error)
        } else if self.skeleton.bones.is_empty() {
            Err(SkeletonError::Empty)
        } else {
            Ok(self.skeleton)
        }
    }
}

impl Default for SkeletonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
