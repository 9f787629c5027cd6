use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::scene::Transform;

/// Local transform of a single skeletal joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl From<Transform> for JointPose {
    fn from(t: Transform) -> Self {
        Self {
            position: t.position,
            rotation: t.rotation,
            scale: t.scale,
        }
    }
}

impl From<JointPose> for Transform {
    fn from(j: JointPose) -> Self {
        Transform::from_trs(j.position, j.rotation, j.scale)
    }
}

/// Joints are stored inline for small rigs.
pub type JointList = SmallVec<[JointPose; 32]>;

/// Full pose of a character at one instant: root transform plus every joint.
///
/// Snapshots are immutable once captured.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSnapshot {
    root: Transform,
    joints: JointList,
}

impl PoseSnapshot {
    #[must_use]
    pub fn new(root: Transform, joints: impl IntoIterator<Item = JointPose>) -> Self {
        Self {
            root,
            joints: joints.into_iter().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Transform {
        &self.root
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.root.position
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.root.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.root.scale
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[JointPose] {
        &self.joints
    }
}
