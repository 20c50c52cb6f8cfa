//! Skeleton template and pose interpolation.
//!
//! A [`Pose`] is total: it always carries all fifteen joints. Partial poses cannot be
//! represented, so every pose that reaches a frame is complete by construction.

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::lerp_point;
use serde::ser::SerializeMap as _;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the fifteen skeletal joints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JointName {
    /// Center of the head.
    Head,
    /// Base of the neck.
    Neck,
    /// Left shoulder.
    ShoulderL,
    /// Right shoulder.
    ShoulderR,
    /// Left elbow.
    ElbowL,
    /// Right elbow.
    ElbowR,
    /// Left hand.
    HandL,
    /// Right hand (the throwing hand).
    HandR,
    /// Pelvis pivot every other joint hangs from.
    Pelvis,
    /// Left hip.
    HipL,
    /// Right hip.
    HipR,
    /// Left knee.
    KneeL,
    /// Right knee.
    KneeR,
    /// Left foot.
    FootL,
    /// Right foot.
    FootR,
}

impl JointName {
    /// Number of joints in a pose.
    pub const COUNT: usize = 15;

    /// Every joint in canonical order.
    pub const ALL: [JointName; Self::COUNT] = [
        Self::Head,
        Self::Neck,
        Self::ShoulderL,
        Self::ShoulderR,
        Self::ElbowL,
        Self::ElbowR,
        Self::HandL,
        Self::HandR,
        Self::Pelvis,
        Self::HipL,
        Self::HipR,
        Self::KneeL,
        Self::KneeR,
        Self::FootL,
        Self::FootR,
    ];

    /// Interchange name of this joint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Neck => "neck",
            Self::ShoulderL => "shoulderL",
            Self::ShoulderR => "shoulderR",
            Self::ElbowL => "elbowL",
            Self::ElbowR => "elbowR",
            Self::HandL => "handL",
            Self::HandR => "handR",
            Self::Pelvis => "pelvis",
            Self::HipL => "hipL",
            Self::HipR => "hipR",
            Self::KneeL => "kneeL",
            Self::KneeR => "kneeR",
            Self::FootL => "footL",
            Self::FootR => "footR",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl FromStr for JointName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|j| j.as_str() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for JointName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bones of the stick figure, drawn in this order.
pub const BONES: [(JointName, JointName); 14] = [
    (JointName::Head, JointName::Neck),
    (JointName::Neck, JointName::ShoulderL),
    (JointName::Neck, JointName::ShoulderR),
    (JointName::ShoulderL, JointName::ElbowL),
    (JointName::ElbowL, JointName::HandL),
    (JointName::ShoulderR, JointName::ElbowR),
    (JointName::ElbowR, JointName::HandR),
    (JointName::Neck, JointName::Pelvis),
    (JointName::Pelvis, JointName::HipL),
    (JointName::HipL, JointName::KneeL),
    (JointName::KneeL, JointName::FootL),
    (JointName::Pelvis, JointName::HipR),
    (JointName::HipR, JointName::KneeR),
    (JointName::KneeR, JointName::FootR),
];

/// Height of the pelvis pivot above the floor line in the standing template.
pub const PELVIS_HEIGHT: f64 = 80.0;

// Offsets from the pelvis pivot, in `JointName::ALL` order.
const STANDING_OFFSETS: [(f64, f64); JointName::COUNT] = [
    (0.0, -65.0),
    (0.0, -50.0),
    (-20.0, -45.0),
    (20.0, -45.0),
    (-25.0, -20.0),
    (25.0, -20.0),
    (-25.0, 5.0),
    (25.0, 5.0),
    (0.0, 0.0),
    (-10.0, 5.0),
    (10.0, 5.0),
    (-12.0, 40.0),
    (12.0, 40.0),
    (-12.0, 80.0),
    (12.0, 80.0),
];

/// Complete assignment of all joints to plane coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    joints: [Point; JointName::COUNT],
}

impl Pose {
    /// Build a pose from one point per joint, in [`JointName::ALL`] order.
    pub fn from_joints(joints: [Point; JointName::COUNT]) -> Self {
        Self { joints }
    }

    /// Upright idle pose with the feet on `floor_y`, centered on `center_x`.
    pub fn standing(center_x: f64, floor_y: f64) -> Self {
        let pelvis = Point::new(center_x, floor_y - PELVIS_HEIGHT);
        Self {
            joints: STANDING_OFFSETS.map(|(dx, dy)| pelvis + Vec2::new(dx, dy)),
        }
    }

    /// Copy of this pose with some joints moved to `pelvis`-relative offsets of `anchor`.
    ///
    /// `anchor` is usually the pelvis of the template the variant is derived from.
    pub fn with_offsets(mut self, anchor: Point, offsets: &[(JointName, f64, f64)]) -> Self {
        for &(joint, dx, dy) in offsets {
            self[joint] = anchor + Vec2::new(dx, dy);
        }
        self
    }

    /// Same pose moved by `delta`.
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            joints: self.joints.map(|p| p + delta),
        }
    }

    /// Joints paired with their names, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (JointName, Point)> + '_ {
        JointName::ALL.into_iter().zip(self.joints.iter().copied())
    }
}

impl Index<JointName> for Pose {
    type Output = Point;

    fn index(&self, joint: JointName) -> &Point {
        &self.joints[joint.slot()]
    }
}

impl IndexMut<JointName> for Pose {
    fn index_mut(&mut self, joint: JointName) -> &mut Point {
        &mut self.joints[joint.slot()]
    }
}

impl serde::Serialize for Pose {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(JointName::COUNT))?;
        for (joint, p) in self.iter() {
            map.serialize_entry(joint.as_str(), &p)?;
        }
        map.end()
    }
}

/// Joint-wise linear interpolation `a + (b − a) · t`.
///
/// `t` is not clamped; remap it through an [`crate::Ease`] curve first when easing is wanted.
pub fn interpolate_pose(a: &Pose, b: &Pose, t: f64) -> Pose {
    let mut joints = a.joints;
    for (slot, p) in joints.iter_mut().enumerate() {
        *p = lerp_point(a.joints[slot], b.joints[slot], t);
    }
    Pose { joints }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pose.rs"]
mod tests;
