use super::*;

#[test]
fn logs_calls_in_order() {
    let mut s = RecordingSurface::new();
    s.clear();
    s.save();
    s.set_alpha(0.2);
    s.fill_circle(Point::new(1.0, 2.0), 8.0, Rgba8::BLACK);
    s.restore();
    assert_eq!(
        s.calls(),
        &[
            DrawCall::Clear,
            DrawCall::Save,
            DrawCall::SetAlpha(0.2),
            DrawCall::FillCircle {
                center: Point::new(1.0, 2.0),
                radius: 8.0,
                color: Rgba8::BLACK,
            },
            DrawCall::Restore,
        ]
    );
    assert_eq!(s.calls().iter().filter(|c| c.is_paint()).count(), 1);
}

#[test]
fn last_redraw_starts_at_latest_clear() {
    let mut s = RecordingSurface::new();
    s.clear();
    s.stroke_line(Point::ZERO, Point::new(1.0, 0.0), Rgba8::BLACK, 2.0);
    s.clear();
    s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8::WHITE);

    assert_eq!(s.redraw_count(), 2);
    assert_eq!(s.last_redraw().len(), 2);
    assert!(matches!(s.last_redraw()[1], DrawCall::FillRect { .. }));

    let drained = s.take();
    assert_eq!(drained.len(), 4);
    assert!(s.calls().is_empty());
}

#[test]
fn calls_display_compactly() {
    let line = DrawCall::StrokeLine {
        from: Point::new(0.0, 0.0),
        to: Point::new(20.0, 0.0),
        color: Rgba8::rgb(0xFF, 0x66, 0x00),
        width: 3.0,
    };
    assert_eq!(
        line.to_string(),
        "line (0.00, 0.00) -> (20.00, 0.00) #FF6600 w=3"
    );
    assert_eq!(DrawCall::SetAlpha(0.2).to_string(), "alpha 0.20");
}
