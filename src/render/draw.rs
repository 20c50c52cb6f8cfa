//! Scene-to-surface drawing: stick figures, catalog objects, and effects.

use crate::animation::pose::{BONES, JointName, Pose};
use crate::foundation::core::{FrameIndex, Point, Rect, Rgba8, Vec2};
use crate::render::surface::DrawSurface;
use crate::scene::model::{Catalog, Effect, FrameObjectState, ObjectKind, Scene};
use std::f64::consts::TAU;

/// Radius of the filled head disc.
pub const HEAD_RADIUS: f64 = 8.0;
/// Stroke width of every bone.
pub const BONE_WIDTH: f64 = 2.0;
/// Fill used for catalog objects without a (parseable) color.
pub const DEFAULT_OBJECT_COLOR: Rgba8 = Rgba8::rgb(0x88, 0x88, 0x88);
/// Opacity of the neighbouring frames when onion-skinning.
pub const ONION_ALPHA: f64 = 0.2;

const PLACEHOLDER_COLOR: Rgba8 = Rgba8::rgb(0x99, 0x99, 0x99);
const PLACEHOLDER_HALF: f64 = 15.0;
const PLACEHOLDER_WIDTH: f64 = 2.0;

const BANG_COLOR: Rgba8 = Rgba8::rgb(0xFF, 0x66, 0x00);
const BANG_RAYS: usize = 8;
const BANG_RAY_LENGTH: f64 = 20.0;
const BANG_WIDTH: f64 = 3.0;

const GENERIC_EFFECT_COLOR: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0x00);
const GENERIC_EFFECT_RADIUS: f64 = 5.0;

/// Head disc, then the 14 bones in [`BONES`] order.
pub fn draw_stickman<S: DrawSurface + ?Sized>(surface: &mut S, pose: &Pose) {
    surface.fill_circle(pose[JointName::Head], HEAD_RADIUS, Rgba8::BLACK);
    for (from, to) in BONES {
        surface.stroke_line(pose[from], pose[to], Rgba8::BLACK, BONE_WIDTH);
    }
}

/// Draw one placed object in its own local frame (origin at `position`, axes rotated by
/// `rotation`).
///
/// Hidden states and ids missing from `catalog` draw nothing. Shapes missing the geometry their
/// kind needs also draw nothing.
pub fn draw_object<S: DrawSurface + ?Sized>(
    surface: &mut S,
    state: &FrameObjectState,
    catalog: &Catalog,
) {
    let Some(object) = catalog.get(&state.id) else {
        return;
    };
    if !state.visible {
        return;
    }

    let color = object
        .color
        .as_deref()
        .and_then(|c| Rgba8::from_hex(c).ok())
        .unwrap_or(DEFAULT_OBJECT_COLOR);

    surface.save();
    surface.translate(state.position.to_vec2());
    surface.rotate(state.rotation);

    match object.kind {
        ObjectKind::Rect => {
            if let (Some(w), Some(h)) = (object.width, object.height)
                && w != 0.0
                && h != 0.0
            {
                surface.fill_rect(Rect::from_center_size(Point::ZERO, (w, h)), color);
            }
        }
        ObjectKind::Circle => {
            if let Some(r) = object.radius
                && r > 0.0
            {
                surface.fill_circle(Point::ZERO, r, color);
            }
        }
        ObjectKind::Polygon => {
            if let Some(points) = object.points.as_deref()
                && !points.is_empty()
            {
                surface.fill_polygon(points, color);
            }
        }
        ObjectKind::Placeholder => {
            let h = PLACEHOLDER_HALF;
            surface.stroke_rect(
                Rect::new(-h, -h, h, h),
                PLACEHOLDER_COLOR,
                PLACEHOLDER_WIDTH,
            );
            surface.stroke_line(
                Point::new(-h, -h),
                Point::new(h, h),
                PLACEHOLDER_COLOR,
                PLACEHOLDER_WIDTH,
            );
            surface.stroke_line(
                Point::new(h, -h),
                Point::new(-h, h),
                PLACEHOLDER_COLOR,
                PLACEHOLDER_WIDTH,
            );
        }
    }

    surface.restore();
}

/// `bang` is a burst of rays; any other tag is a small yellow dot.
pub fn draw_effects<S: DrawSurface + ?Sized>(surface: &mut S, effects: &[Effect]) {
    for effect in effects {
        surface.save();
        surface.translate(effect.position.to_vec2());
        if effect.kind == Effect::BANG {
            for i in 0..BANG_RAYS {
                let angle = i as f64 * TAU / BANG_RAYS as f64;
                let tip = Point::ZERO + Vec2::from_angle(angle) * BANG_RAY_LENGTH;
                surface.stroke_line(Point::ZERO, tip, BANG_COLOR, BANG_WIDTH);
            }
        } else {
            surface.fill_circle(Point::ZERO, GENERIC_EFFECT_RADIUS, GENERIC_EFFECT_COLOR);
        }
        surface.restore();
    }
}

/// Draw frame `index` of `scene` at `alpha`: actors, then objects, then effects.
///
/// Out-of-range indices draw nothing. The surface's alpha is restored afterwards.
pub fn draw_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    index: FrameIndex,
    alpha: f64,
) {
    let Some(frame) = scene.frame(index.0) else {
        return;
    };

    surface.save();
    surface.set_alpha(alpha);
    for pose in frame.actors.values() {
        draw_stickman(surface, pose);
    }
    for state in &frame.objects {
        draw_object(surface, state, scene.catalog());
    }
    draw_effects(surface, &frame.effects);
    surface.restore();
}

/// Full redraw of frame `index`: clear, onion-skin neighbours (previous then next) at
/// `onion_alpha` when `onion` is set, then the frame itself at full opacity.
pub fn compose_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    index: FrameIndex,
    onion: bool,
    onion_alpha: f64,
) {
    surface.clear();
    if onion {
        if let Some(prev) = index.prev() {
            draw_frame(surface, scene, prev, onion_alpha);
        }
        if let Some(next) = index.next() {
            draw_frame(surface, scene, next, onion_alpha);
        }
    }
    draw_frame(surface, scene, index, 1.0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
