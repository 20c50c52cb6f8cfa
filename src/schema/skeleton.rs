use crate::animation::pose::{BONES, JointName, Pose};
use crate::scene::model::Scene;

/// A bone whose length drifted away from the standing template.
#[derive(Clone, Debug, PartialEq)]
pub struct BoneDeviation {
    /// Frame index.
    pub frame: usize,
    /// Actor name.
    pub actor: String,
    /// Bone start joint.
    pub from: JointName,
    /// Bone end joint.
    pub to: JointName,
    /// Absolute length difference in pixels.
    pub deviation: f64,
}

/// Reference bone lengths, measured on the standing template.
pub fn reference_bone_lengths() -> [f64; 14] {
    let template = Pose::standing(0.0, 0.0);
    BONES.map(|(a, b)| (template[b] - template[a]).hypot())
}

/// Every bone in every actor of every frame whose length deviates from the template by more
/// than `tolerance_px`.
///
/// Linear pose interpolation does not preserve bone lengths, so small deviations are expected in
/// tweened frames. This is advisory; it never makes a scene invalid.
pub fn check_skeleton_lengths(scene: &Scene, tolerance_px: f64) -> Vec<BoneDeviation> {
    let reference = reference_bone_lengths();
    let mut out = Vec::new();
    for (frame, f) in scene.frames().iter().enumerate() {
        for (actor, pose) in &f.actors {
            for (&(from, to), &expected) in BONES.iter().zip(reference.iter()) {
                let actual = (pose[to] - pose[from]).hypot();
                let deviation = (actual - expected).abs();
                if deviation > tolerance_px {
                    out.push(BoneDeviation {
                        frame,
                        actor: actor.clone(),
                        from,
                        to,
                        deviation,
                    });
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/schema/skeleton.rs"]
mod tests;
