//! The "A throws a vase at B" choreography.
//!
//! Frame schedule (indices are fixed):
//!
//! | frames | phase |
//! |--------|-------|
//! | 0–5    | A eases slightly toward the wind-up, vase in hand |
//! | 6–10   | A holds the cocked pose |
//! | 11     | release |
//! | 12–16  | vase in flight, A follows through back to idle |
//! | 17     | impact: vase destroyed, one bang, six shards spawned, B hit |
//! | 18–25  | B stumbles then holds, shards fly |
//! | 26–35  | B recovers, shards land and stay put |

use crate::animation::ease::Ease;
use crate::animation::pose::{JointName, Pose, interpolate_pose};
use crate::animation::rng::SeededRandom;
use crate::foundation::core::{Point, SCENE_FRAME_COUNT, Vec2};
use crate::scene::model::{
    Catalog, Effect, Frame, FrameObjectState, ObjectKind, ObjectStatus, Scene, SceneObject,
};
use crate::synth::physics::Body;
use std::collections::BTreeMap;
use std::f64::consts::TAU;

/// Floor line shared by the actors' feet and the shard landing check.
pub const FLOOR_Y: f64 = 360.0;
/// Downward acceleration in px/frame², applied once per frame.
pub const GRAVITY: f64 = 0.9;
/// Horizontal position of the thrower.
pub const ACTOR_A_X: f64 = 120.0;
/// Horizontal position of the target.
pub const ACTOR_B_X: f64 = 320.0;
/// Name of the throwing actor.
pub const ACTOR_A: &str = "A";
/// Name of the target actor.
pub const ACTOR_B: &str = "B";
/// Catalog id of the thrown prop.
pub const PROP_ID: &str = "vase01";
/// Number of shards spawned on impact.
pub const SHARD_COUNT: usize = 6;

/// Frame the prop leaves A's hand.
pub const RELEASE_FRAME: usize = 11;
/// Frame the prop hits B.
pub const IMPACT_FRAME: usize = 17;

const ATTACH_END: usize = 5;
const WINDUP_START: usize = 6;
const WINDUP_END: usize = 10;
const FLIGHT_START: usize = 12;
const FLIGHT_END: usize = 16;
const STUMBLE_START: usize = 18;
const STUMBLE_REACHED: usize = 20;
const HOLD_START: usize = 21;
const HOLD_END: usize = 25;
const RECOVER_START: usize = 26;
const LAST_FRAME: usize = SCENE_FRAME_COUNT - 1;

const BASE_THROW: Vec2 = Vec2::new(5.0, -10.0);
const THROW_JITTER: Vec2 = Vec2::new(0.5, 1.0);
const PROP_SPIN: f64 = 0.3;
const PROP_COLOR: &str = "#8B4513";

// Spawn velocities stay within these bounds so every shard reaches the floor by the last frame.
const SHARD_VX: (f64, f64) = (-3.5, 3.5);
const SHARD_VY: (f64, f64) = (-1.5, 1.5);
const SHARD_SPIN: (f64, f64) = (-0.4, 0.4);

const SHARD_OUTLINES: [[(f64, f64); 4]; SHARD_COUNT] = [
    [(-3.0, -3.0), (3.0, -2.0), (1.0, 3.0), (-2.0, 2.0)],
    [(-2.0, -4.0), (4.0, -1.0), (2.0, 2.0), (-3.0, 1.0)],
    [(-4.0, -2.0), (2.0, -3.0), (3.0, 2.0), (-1.0, 3.0)],
    [(-3.0, -1.0), (1.0, -3.0), (3.0, 1.0), (0.0, 3.0)],
    [(-2.0, -2.0), (3.0, -3.0), (2.0, 3.0), (-3.0, 2.0)],
    [(-1.0, -4.0), (4.0, 0.0), (1.0, 3.0), (-2.0, 1.0)],
];

/// Catalog id of shard `index`.
pub fn shard_id(index: usize) -> String {
    format!("shard{index}")
}

/// Where the vase meets B: the front of B's torso.
pub fn impact_point() -> Point {
    Pose::standing(ACTOR_B_X, FLOOR_Y)[JointName::Pelvis] + Vec2::new(-10.0, -25.0)
}

struct Keyposes {
    a_idle: Pose,
    a_windup: Pose,
    a_throw: Pose,
    b_idle: Pose,
    b_hit: Pose,
    b_stumble: Pose,
}

impl Keyposes {
    fn new() -> Self {
        use JointName::*;

        let a_idle = Pose::standing(ACTOR_A_X, FLOOR_Y);
        let a_pelvis = a_idle[Pelvis];
        let a_windup = a_idle.with_offsets(
            a_pelvis,
            &[
                (ShoulderR, 15.0, -55.0),
                (ElbowR, 5.0, -65.0),
                (HandR, -10.0, -60.0),
            ],
        );
        let a_throw = a_idle.with_offsets(
            a_pelvis,
            &[
                (ShoulderR, 20.0, -45.0),
                (ElbowR, 35.0, -35.0),
                (HandR, 50.0, -30.0),
            ],
        );

        let b_idle = Pose::standing(ACTOR_B_X, FLOOR_Y);
        let b_pelvis = b_idle[Pelvis];
        let b_hit = b_idle.with_offsets(b_pelvis, &[(Head, -5.0, -70.0), (Neck, -3.0, -52.0)]);
        let b_stumble = b_hit.with_offsets(
            b_pelvis,
            &[(Pelvis, -5.0, 5.0), (FootL, -20.0, 80.0), (FootR, 5.0, 80.0)],
        );

        Self {
            a_idle,
            a_windup,
            a_throw,
            b_idle,
            b_hit,
            b_stumble,
        }
    }

    fn thrower(&self, i: usize) -> Pose {
        match i {
            0..=ATTACH_END => interpolate_pose(
                &self.a_idle,
                &self.a_windup,
                Ease::InOut.phase(i, 0, ATTACH_END) * 0.3,
            ),
            WINDUP_START..=WINDUP_END => self.a_windup,
            RELEASE_FRAME => self.a_throw,
            FLIGHT_START..=FLIGHT_END => interpolate_pose(
                &self.a_throw,
                &self.a_idle,
                Ease::Out.phase(i, FLIGHT_START, FLIGHT_END),
            ),
            _ => self.a_idle,
        }
    }

    fn target(&self, i: usize) -> Pose {
        match i {
            0..IMPACT_FRAME => self.b_idle,
            IMPACT_FRAME => self.b_hit,
            STUMBLE_START..=STUMBLE_REACHED => interpolate_pose(
                &self.b_hit,
                &self.b_stumble,
                Ease::Linear.phase(i, IMPACT_FRAME, STUMBLE_REACHED),
            ),
            HOLD_START..=HOLD_END => self.b_stumble,
            _ => interpolate_pose(
                &self.b_stumble,
                &self.b_idle,
                Ease::Out.phase(i, RECOVER_START, LAST_FRAME),
            ),
        }
    }
}

fn placed(id: &str, body: &Body, status: ObjectStatus) -> FrameObjectState {
    FrameObjectState {
        id: id.to_owned(),
        position: body.position,
        rotation: body.rotation,
        status,
        visible: true,
    }
}

fn spawn_shards(rng: &mut SeededRandom, at: Point) -> Vec<Body> {
    (0..SHARD_COUNT)
        .map(|_| {
            let vx = rng.range(SHARD_VX.0, SHARD_VX.1);
            let vy = rng.range(SHARD_VY.0, SHARD_VY.1);
            let rotation = rng.range(0.0, TAU);
            let spin = rng.range(SHARD_SPIN.0, SHARD_SPIN.1);
            Body::launch(at, Vec2::new(vx, vy), rotation, spin)
        })
        .collect()
}

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    let prop = SceneObject {
        color: Some(PROP_COLOR.to_owned()),
        ..SceneObject::new(PROP_ID, ObjectKind::Placeholder)
    };
    catalog.insert(prop.id.clone(), prop);
    for (j, outline) in SHARD_OUTLINES.iter().enumerate() {
        let shard = SceneObject {
            color: Some(PROP_COLOR.to_owned()),
            points: Some(outline.iter().map(|&(x, y)| Point::new(x, y)).collect()),
            ..SceneObject::new(shard_id(j), ObjectKind::Polygon)
        };
        catalog.insert(shard.id.clone(), shard);
    }
    catalog
}

/// Build the 36-frame throw scene for `(text, seed)`.
///
/// Pure and total: the same pair always yields the same scene, and every output satisfies the
/// scene invariants by construction. `text` is accepted but does not influence the result.
#[tracing::instrument(level = "debug", skip(text), fields(text_len = text.len()))]
pub fn build_throw_scene(text: &str, seed: u64) -> Scene {
    let mut rng = SeededRandom::new(seed);
    let poses = Keyposes::new();

    let throw_velocity = BASE_THROW
        + Vec2::new(
            rng.range(-THROW_JITTER.x, THROW_JITTER.x),
            rng.range(-THROW_JITTER.y, THROW_JITTER.y),
        );
    let impact = impact_point();

    let mut prop: Option<Body> = None;
    let mut shards: Vec<Body> = Vec::new();
    let mut frames = Vec::with_capacity(SCENE_FRAME_COUNT);

    for i in 0..SCENE_FRAME_COUNT {
        let thrower = poses.thrower(i);
        let target = poses.target(i);
        let mut frame = Frame {
            actors: BTreeMap::from([
                (ACTOR_A.to_owned(), thrower),
                (ACTOR_B.to_owned(), target),
            ]),
            ..Frame::default()
        };

        match i {
            0..RELEASE_FRAME => {
                let in_hand = Body::launch(thrower[JointName::HandR], Vec2::ZERO, 0.0, 0.0);
                frame
                    .objects
                    .push(placed(PROP_ID, &in_hand, ObjectStatus::Attached));
            }
            RELEASE_FRAME => {
                let released =
                    Body::launch(thrower[JointName::HandR], throw_velocity, 0.0, PROP_SPIN);
                frame
                    .objects
                    .push(placed(PROP_ID, &released, ObjectStatus::Flying));
                prop = Some(released);
            }
            FLIGHT_START..=FLIGHT_END => {
                if let Some(body) = prop.as_mut() {
                    body.step(GRAVITY);
                    frame
                        .objects
                        .push(placed(PROP_ID, body, ObjectStatus::Flying));
                }
            }
            IMPACT_FRAME => {
                frame.objects.push(FrameObjectState {
                    id: PROP_ID.to_owned(),
                    position: impact,
                    rotation: 0.0,
                    status: ObjectStatus::Destroyed,
                    visible: false,
                });
                frame.effects.push(Effect {
                    kind: Effect::BANG.to_owned(),
                    position: impact,
                    params: None,
                });
                shards = spawn_shards(&mut rng, impact);
                for (j, shard) in shards.iter().enumerate() {
                    frame
                        .objects
                        .push(placed(&shard_id(j), shard, ObjectStatus::Flying));
                }
                tracing::debug!(x = impact.x, y = impact.y, "impact");
            }
            _ => {
                for (j, shard) in shards.iter_mut().enumerate() {
                    let status = if shard.step_above_floor(GRAVITY, FLOOR_Y) {
                        ObjectStatus::Fallen
                    } else {
                        ObjectStatus::Flying
                    };
                    frame.objects.push(placed(&shard_id(j), shard, status));
                }
            }
        }

        frames.push(frame);
    }

    Scene::from_parts(frames, catalog())
}

#[cfg(test)]
#[path = "../../tests/unit/synth/throw.rs"]
mod tests;
