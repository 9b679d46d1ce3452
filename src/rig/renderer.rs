//! Applies keyframe poses to the rig every rendered frame

use glam::{Mat4, Quat};

use super::skeleton::{RigPart, Skeleton, SkeletonError};
use crate::animation::{Joint, Pose};

/// Display surface the rig is drawn on.
///
/// The only capability the editor needs is setting each joint's orientation
/// once per frame. Part transforms are offered for surfaces that place
/// geometry themselves.
pub trait RenderSurface {
    fn set_joint_rotation(&mut self, joint: Joint, rotation: Quat);

    fn set_part_transform(&mut self, _part: RigPart, _world: Mat4) {}
}

/// Poses the armor-stand skeleton and publishes it to a [`RenderSurface`]
#[derive(Clone, Debug)]
pub struct RigRenderer {
    skeleton: Skeleton,
    local_transforms: Vec<Mat4>,
    world_transforms: Vec<Mat4>,
    frames_rendered: u64,
}

impl RigRenderer {
    pub fn new() -> Result<Self, SkeletonError> {
        let skeleton = Skeleton::armor_stand()?;
        let bone_count = skeleton.bone_count();
        let world_transforms = skeleton.calculate_world_transforms(&[]);
        Ok(Self {
            skeleton,
            local_transforms: vec![Mat4::IDENTITY; bone_count],
            world_transforms,
            frames_rendered: 0,
        })
    }

    /// Render one frame. A missing pose renders the neutral pose.
    pub fn render(&mut self, pose: Option<&Pose>, surface: &mut dyn RenderSurface) {
        let pose = pose.copied().unwrap_or(Pose::NEUTRAL);

        for (index, part) in RigPart::ALL.iter().enumerate() {
            self.local_transforms[index] = match part.joint() {
                Some(joint) => Mat4::from_quat(pose.joint(joint).to_quat()),
                None => Mat4::IDENTITY,
            };
        }
        self.world_transforms = self.skeleton.calculate_world_transforms(&self.local_transforms);

        for (index, part) in RigPart::ALL.iter().enumerate() {
            if let Some(joint) = part.joint() {
                surface.set_joint_rotation(joint, pose.joint(joint).to_quat());
            }
            surface.set_part_transform(*part, self.world_transforms[index]);
        }

        self.frames_rendered += 1;
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Local rotations applied on the last frame, indexed like [`RigPart::ALL`]
    pub fn local_transforms(&self) -> &[Mat4] {
        &self.local_transforms
    }

    /// World transforms of the last frame, indexed like [`RigPart::ALL`]
    pub fn world_transforms(&self) -> &[Mat4] {
        &self.world_transforms
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

/// Surface that records the last rotation set for each joint
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub rotations: Vec<(Joint, Quat)>,
    pub parts: Vec<(RigPart, Mat4)>,
}

impl RecordingSurface {
    pub fn rotation(&self, joint: Joint) -> Option<Quat> {
        self.rotations
            .iter()
            .rev()
            .find(|(j, _)| *j == joint)
            .map(|(_, q)| *q)
    }

    pub fn clear(&mut self) {
        self.rotations.clear();
        self.parts.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn set_joint_rotation(&mut self, joint: Joint, rotation: Quat) {
        self.rotations.push((joint, rotation));
    }

    fn set_part_transform(&mut self, part: RigPart, world: Mat4) {
        self.parts.push((part, world));
    }
}

/// Surface that traces every joint rotation through the `log` facade
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSurface;

impl RenderSurface for LogSurface {
    fn set_joint_rotation(&mut self, joint: Joint, rotation: Quat) {
        let (x, y, z) = rotation.to_euler(glam::EulerRot::XYZ);
        log::trace!(
            "{}: ({:.1}, {:.1}, {:.1}) deg",
            joint,
            x.to_degrees(),
            y.to_degrees(),
            z.to_degrees()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Axis;
    use glam::Vec3;

    #[test]
    fn test_render_sets_every_joint() {
        let mut renderer = RigRenderer::new().unwrap();
        let mut surface = RecordingSurface::default();
        renderer.render(Some(&Pose::NEUTRAL), &mut surface);

        assert_eq!(surface.rotations.len(), Joint::ALL.len());
        assert_eq!(surface.parts.len(), RigPart::ALL.len());
        for joint in Joint::ALL {
            assert_eq!(surface.rotation(joint), Some(Quat::IDENTITY));
        }
    }

    #[test]
    fn test_render_converts_degrees_to_radians() {
        let mut renderer = RigRenderer::new().unwrap();
        let mut surface = RecordingSurface::default();
        let pose = Pose::NEUTRAL.with_angle(Joint::RightArm, Axis::Z, 90.0);
        renderer.render(Some(&pose), &mut surface);

        let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let actual = surface.rotation(Joint::RightArm).unwrap();
        assert!(actual.angle_between(expected) < 0.001);
    }

    #[test]
    fn test_missing_pose_renders_neutral() {
        let mut renderer = RigRenderer::new().unwrap();
        let mut surface = RecordingSurface::default();
        renderer.render(None, &mut surface);

        for joint in Joint::ALL {
            assert_eq!(surface.rotation(joint), Some(Quat::IDENTITY));
        }
        assert_eq!(renderer.frames_rendered(), 1);
    }

    #[test]
    fn test_arm_hangs_from_shoulder() {
        let mut renderer = RigRenderer::new().unwrap();
        let mut surface = RecordingSurface::default();

        // Raise the left arm forward: a point below the shoulder swings to -Z
        let pose = Pose::NEUTRAL.with_angle(Joint::LeftArm, Axis::X, 90.0);
        renderer.render(Some(&pose), &mut surface);

        let arm = renderer.world_transforms()[3];
        let shoulder = arm.transform_point3(Vec3::ZERO);
        let hand = arm.transform_point3(Vec3::new(0.0, -0.75, 0.0));
        assert!((hand - shoulder - Vec3::new(0.0, 0.0, -0.75)).length() < 0.001);
    }
}
