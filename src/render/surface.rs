use crate::foundation::core::{Point, Rect, Rgba8, Vec2};

/// Immediate-mode 2-D drawing capability the playback engine renders into.
///
/// The model is a canvas: `save`/`restore` push and pop the transform and global alpha,
/// `translate`/`rotate` compose onto the current transform, and every primitive is drawn with
/// its color's alpha multiplied by the current global alpha.
pub trait DrawSurface {
    /// Reset every pixel to the surface background.
    fn clear(&mut self);
    /// Push the current transform and alpha.
    fn save(&mut self);
    /// Pop the state pushed by the matching [`DrawSurface::save`]; unbalanced calls are ignored.
    fn restore(&mut self);
    /// Move the origin by `offset`.
    fn translate(&mut self, offset: Vec2);
    /// Rotate the axes clockwise by `radians` (y points down).
    fn rotate(&mut self, radians: f64);
    /// Replace the global alpha; values are clamped to `[0, 1]`.
    fn set_alpha(&mut self, alpha: f64);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64);
    /// Fill a disc.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);
    /// Fill the closed outline through `points`. Fewer than three points draw nothing.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8);
    /// Fill an axis-aligned rectangle (in the current transform).
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);
    /// Stroke the outline of an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64);
}

impl<S: DrawSurface + ?Sized> DrawSurface for &mut S {
    fn clear(&mut self) {
        (**self).clear();
    }
    fn save(&mut self) {
        (**self).save();
    }
    fn restore(&mut self) {
        (**self).restore();
    }
    fn translate(&mut self, offset: Vec2) {
        (**self).translate(offset);
    }
    fn rotate(&mut self, radians: f64) {
        (**self).rotate(radians);
    }
    fn set_alpha(&mut self, alpha: f64) {
        (**self).set_alpha(alpha);
    }
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        (**self).stroke_line(from, to, color, width);
    }
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        (**self).fill_circle(center, radius, color);
    }
    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        (**self).fill_polygon(points, color);
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        (**self).fill_rect(rect, color);
    }
    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) {
        (**self).stroke_rect(rect, color, width);
    }
}
