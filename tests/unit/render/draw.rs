use super::*;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::scene::model::SceneObject;
use crate::synth::throw::{IMPACT_FRAME, SHARD_COUNT, build_throw_scene};

fn state(id: &str, visible: bool) -> FrameObjectState {
    FrameObjectState {
        id: id.to_owned(),
        position: Point::new(10.0, 20.0),
        rotation: 0.5,
        status: crate::scene::model::ObjectStatus::Idle,
        visible,
    }
}

fn paints(s: &RecordingSurface) -> Vec<&DrawCall> {
    s.calls().iter().filter(|c| c.is_paint()).collect()
}

#[test]
fn stickman_is_head_plus_fourteen_bones() {
    let pose = Pose::standing(100.0, 300.0);
    let mut s = RecordingSurface::new();
    draw_stickman(&mut s, &pose);

    assert_eq!(s.calls().len(), 15);
    assert_eq!(
        s.calls()[0],
        DrawCall::FillCircle {
            center: pose[JointName::Head],
            radius: HEAD_RADIUS,
            color: Rgba8::BLACK,
        }
    );
    assert_eq!(
        s.calls()[1],
        DrawCall::StrokeLine {
            from: pose[JointName::Head],
            to: pose[JointName::Neck],
            color: Rgba8::BLACK,
            width: BONE_WIDTH,
        }
    );
}

#[test]
fn objects_draw_in_local_frame() {
    let mut catalog = Catalog::new();
    catalog.insert(
        "box".to_owned(),
        SceneObject {
            width: Some(4.0),
            height: Some(2.0),
            color: Some("#112233".to_owned()),
            ..SceneObject::new("box", ObjectKind::Rect)
        },
    );
    let mut s = RecordingSurface::new();
    draw_object(&mut s, &state("box", true), &catalog);

    assert_eq!(
        s.calls(),
        &[
            DrawCall::Save,
            DrawCall::Translate(Vec2::new(10.0, 20.0)),
            DrawCall::Rotate(0.5),
            DrawCall::FillRect {
                rect: Rect::new(-2.0, -1.0, 2.0, 1.0),
                color: Rgba8::rgb(0x11, 0x22, 0x33),
            },
            DrawCall::Restore,
        ]
    );
}

#[test]
fn hidden_and_unknown_objects_are_skipped() {
    let mut catalog = Catalog::new();
    catalog.insert(
        "ball".to_owned(),
        SceneObject {
            radius: Some(3.0),
            ..SceneObject::new("ball", ObjectKind::Circle)
        },
    );
    let mut s = RecordingSurface::new();
    draw_object(&mut s, &state("ball", false), &catalog);
    draw_object(&mut s, &state("ghost", true), &catalog);
    assert!(s.calls().is_empty());

    draw_object(&mut s, &state("ball", true), &catalog);
    assert_eq!(
        paints(&s),
        vec![&DrawCall::FillCircle {
            center: Point::ZERO,
            radius: 3.0,
            color: DEFAULT_OBJECT_COLOR,
        }]
    );
}

#[test]
fn shapes_without_geometry_draw_nothing() {
    let mut catalog = Catalog::new();
    catalog.insert(
        "flat".to_owned(),
        SceneObject {
            width: Some(4.0),
            ..SceneObject::new("flat", ObjectKind::Rect)
        },
    );
    catalog.insert(
        "empty".to_owned(),
        SceneObject {
            points: Some(Vec::new()),
            ..SceneObject::new("empty", ObjectKind::Polygon)
        },
    );
    let mut s = RecordingSurface::new();
    draw_object(&mut s, &state("flat", true), &catalog);
    draw_object(&mut s, &state("empty", true), &catalog);
    assert!(paints(&s).is_empty());
}

#[test]
fn placeholder_is_a_crossed_box() {
    let mut catalog = Catalog::new();
    catalog.insert(
        "p".to_owned(),
        SceneObject::new("p", ObjectKind::Placeholder),
    );
    let mut s = RecordingSurface::new();
    draw_object(&mut s, &state("p", true), &catalog);

    let p = paints(&s);
    assert_eq!(p.len(), 3);
    assert!(matches!(
        p[0],
        DrawCall::StrokeRect { rect, width, .. } if *rect == Rect::new(-15.0, -15.0, 15.0, 15.0) && *width == 2.0
    ));
    assert!(matches!(p[1], DrawCall::StrokeLine { .. }));
    assert!(matches!(p[2], DrawCall::StrokeLine { .. }));
}

#[test]
fn bang_is_eight_rays_other_effects_a_dot() {
    let effects = vec![
        Effect {
            kind: Effect::BANG.to_owned(),
            position: Point::new(5.0, 5.0),
            params: None,
        },
        Effect {
            kind: "sparkle".to_owned(),
            position: Point::new(1.0, 1.0),
            params: None,
        },
    ];
    let mut s = RecordingSurface::new();
    draw_effects(&mut s, &effects);

    let p = paints(&s);
    assert_eq!(p.len(), 9);
    match p[0] {
        DrawCall::StrokeLine {
            from,
            to,
            color,
            width,
        } => {
            assert_eq!(*from, Point::ZERO);
            assert!((to.x - 20.0).abs() < 1e-9 && to.y.abs() < 1e-9);
            assert_eq!(color.to_string(), "#FF6600");
            assert_eq!(*width, 3.0);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        p[8],
        DrawCall::FillCircle { radius, color, .. } if *radius == 5.0 && color.to_string() == "#FFFF00"
    ));
}

#[test]
fn frame_draws_actors_then_objects_then_effects() {
    let scene = build_throw_scene("", 4);
    let mut s = RecordingSurface::new();
    draw_frame(&mut s, &scene, FrameIndex(IMPACT_FRAME), 1.0);

    let calls = s.calls();
    assert_eq!(calls[0], DrawCall::Save);
    assert_eq!(calls[1], DrawCall::SetAlpha(1.0));
    assert_eq!(calls.last(), Some(&DrawCall::Restore));

    let p = paints(&s);
    // two actors, six shards (vase hidden), eight bang rays
    assert_eq!(p.len(), 2 * 15 + SHARD_COUNT + 8);
    assert!(p[..30].iter().all(|c| matches!(
        c,
        DrawCall::FillCircle { .. } | DrawCall::StrokeLine { .. }
    )));
    assert!(
        p[30..30 + SHARD_COUNT]
            .iter()
            .all(|c| matches!(c, DrawCall::FillPolygon { .. }))
    );
    assert!(
        p[30 + SHARD_COUNT..]
            .iter()
            .all(|c| matches!(c, DrawCall::StrokeLine { .. }))
    );
}

#[test]
fn out_of_range_frame_draws_nothing() {
    let scene = build_throw_scene("", 4);
    let mut s = RecordingSurface::new();
    draw_frame(&mut s, &scene, FrameIndex(99), 1.0);
    assert!(s.calls().is_empty());
}

fn alphas(s: &RecordingSurface) -> Vec<f64> {
    s.calls()
        .iter()
        .filter_map(|c| match c {
            DrawCall::SetAlpha(a) => Some(*a),
            _ => None,
        })
        .collect()
}

#[test]
fn compose_adds_onion_neighbours_first() {
    let scene = build_throw_scene("", 4);

    let mut s = RecordingSurface::new();
    compose_frame(&mut s, &scene, FrameIndex(10), false, ONION_ALPHA);
    assert_eq!(s.calls()[0], DrawCall::Clear);
    assert_eq!(alphas(&s), vec![1.0]);

    let mut s = RecordingSurface::new();
    compose_frame(&mut s, &scene, FrameIndex(10), true, ONION_ALPHA);
    assert_eq!(alphas(&s), vec![ONION_ALPHA, ONION_ALPHA, 1.0]);

    let mut s = RecordingSurface::new();
    compose_frame(&mut s, &scene, FrameIndex::FIRST, true, ONION_ALPHA);
    assert_eq!(alphas(&s), vec![ONION_ALPHA, 1.0]);

    let mut s = RecordingSurface::new();
    compose_frame(&mut s, &scene, FrameIndex::LAST, true, ONION_ALPHA);
    assert_eq!(alphas(&s), vec![ONION_ALPHA, 1.0]);
}
