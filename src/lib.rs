//! Deterministic two-actor stick-figure scenes.
//!
//! A [`Scene`] is 36 frames at 12 fps of posed actors, placed catalog objects, and transient
//! effects. Scenes come from two places only: [`build_throw_scene`] synthesizes one from a
//! `(text, seed)` pair, and [`Scene::from_json_str`] (backed by [`parse_scene`]) validates an
//! external document. A [`PlaybackEngine`] plays a scene into any [`DrawSurface`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod playback;
mod render;
mod scene;
mod schema;
mod synth;

pub use animation::ease::Ease;
pub use animation::pose::{BONES, JointName, PELVIS_HEIGHT, Pose, interpolate_pose};
pub use animation::rng::SeededRandom;
pub use foundation::core::{
    Affine, Canvas, FRAME_INTERVAL_MS, FrameIndex, Point, Rect, Rgba8, SCENE_FPS,
    SCENE_FRAME_COUNT, Vec2,
};
pub use foundation::error::{StickmanError, StickmanResult};
pub use foundation::math::{lerp, lerp_point};
pub use playback::clock::FrameClock;
pub use playback::engine::{ListenerId, PlayState, PlaybackEngine, PlaybackOpts};
pub use render::cpu::{CpuSurface, CpuSurfaceOpts, FrameRGBA};
pub use render::draw::{
    BONE_WIDTH, DEFAULT_OBJECT_COLOR, HEAD_RADIUS, ONION_ALPHA, compose_frame, draw_effects,
    draw_frame, draw_object, draw_stickman,
};
pub use render::recording::{DrawCall, RecordingSurface};
pub use render::surface::DrawSurface;
pub use scene::model::{
    Catalog, Effect, Frame, FrameObjectState, ObjectKind, ObjectStatus, Scene, SceneObject,
};
pub use schema::skeleton::{BoneDeviation, check_skeleton_lengths, reference_bone_lengths};
pub use schema::validate::{
    DanglingObjectRef, SceneErrors, SchemaError, SchemaPathElem, parse_scene,
};
pub use synth::physics::Body;
pub use synth::throw::{
    ACTOR_A, ACTOR_A_X, ACTOR_B, ACTOR_B_X, FLOOR_Y, GRAVITY, IMPACT_FRAME, PROP_ID,
    RELEASE_FRAME, SHARD_COUNT, build_throw_scene, impact_point, shard_id,
};
