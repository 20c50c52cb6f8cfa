use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
use crate::render::surface::DrawSurface;
use std::fmt;

/// One call made against a [`RecordingSurface`].
///
/// Variants mirror the [`DrawSurface`] methods; fields carry the arguments as passed.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCall {
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f64),
    SetAlpha(f64),
    StrokeLine {
        from: Point,
        to: Point,
        color: Rgba8,
        width: f64,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Rgba8,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba8,
        width: f64,
    },
}

impl DrawCall {
    /// `true` for calls that put paint on the surface.
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            Self::StrokeLine { .. }
                | Self::FillCircle { .. }
                | Self::FillPolygon { .. }
                | Self::FillRect { .. }
                | Self::StrokeRect { .. }
        )
    }
}

impl fmt::Display for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clear => write!(f, "clear"),
            Self::Save => write!(f, "save"),
            Self::Restore => write!(f, "restore"),
            Self::Translate(v) => write!(f, "translate {:.2} {:.2}", v.x, v.y),
            Self::Rotate(r) => write!(f, "rotate {r:.4}"),
            Self::SetAlpha(a) => write!(f, "alpha {a:.2}"),
            Self::StrokeLine {
                from,
                to,
                color,
                width,
            } => write!(
                f,
                "line ({:.2}, {:.2}) -> ({:.2}, {:.2}) {color} w={width}",
                from.x, from.y, to.x, to.y
            ),
            Self::FillCircle {
                center,
                radius,
                color,
            } => write!(
                f,
                "circle ({:.2}, {:.2}) r={radius} {color}",
                center.x, center.y
            ),
            Self::FillPolygon { points, color } => {
                write!(f, "polygon [{} points] {color}", points.len())
            }
            Self::FillRect { rect, color } => write!(
                f,
                "fill_rect ({:.2}, {:.2}) {}x{} {color}",
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            ),
            Self::StrokeRect { rect, color, width } => write!(
                f,
                "stroke_rect ({:.2}, {:.2}) {}x{} {color} w={width}",
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            ),
        }
    }
}

/// In-memory surface that logs every call instead of rasterizing.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Calls made since the most recent [`DrawCall::Clear`] (inclusive), i.e. the last redraw.
    pub fn last_redraw(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    /// Number of [`DrawCall::Clear`] calls, one per full redraw.
    pub fn redraw_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Clear).count()
    }

    /// Drain the log.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.calls.push(DrawCall::Translate(offset));
    }

    fn rotate(&mut self, radians: f64) {
        self.calls.push(DrawCall::Rotate(radians));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::SetAlpha(alpha));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        self.calls.push(DrawCall::StrokeLine {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        self.calls.push(DrawCall::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) {
        self.calls.push(DrawCall::StrokeRect { rect, color, width });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
