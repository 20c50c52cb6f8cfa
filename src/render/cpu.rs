use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::{StickmanError, StickmanResult};
use crate::render::surface::DrawSurface;
use vello_cpu::kurbo::Shape as _;

// Flattening tolerance for discs, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Configuration of a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct CpuSurfaceOpts {
    /// Raster size.
    pub canvas: Canvas,
    /// Straight-alpha background painted by every `clear`; `None` clears to transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            clear_rgba: Some([255, 255, 255, 255]),
        }
    }
}

/// Raster readback of a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of pixel `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Convert to straight (non-premultiplied) alpha, as PNG expects.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            for px in self.data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 || a == 255 {
                    continue;
                }
                for c in &mut px[..3] {
                    *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
            self.premultiplied = false;
        }
        self
    }
}

#[derive(Clone, Copy)]
struct DrawState {
    transform: Affine,
    alpha: f64,
}

/// CPU rasterizing surface built on `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized on [`CpuSurface::snapshot`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    clear_rgba: Option<[u8; 4]>,
    ctx: vello_cpu::RenderContext,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl CpuSurface {
    /// A cleared surface of `opts.canvas` size.
    pub fn new(opts: CpuSurfaceOpts) -> StickmanResult<Self> {
        let width: u16 = opts
            .canvas
            .width
            .try_into()
            .map_err(|_| StickmanError::render("surface width exceeds u16"))?;
        let height: u16 = opts
            .canvas
            .height
            .try_into()
            .map_err(|_| StickmanError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(StickmanError::render("surface must be at least 1x1"));
        }

        let mut surface = Self {
            width,
            height,
            clear_rgba: opts.clear_rgba,
            ctx: vello_cpu::RenderContext::new(width, height),
            state: DrawState {
                transform: Affine::IDENTITY,
                alpha: 1.0,
            },
            stack: Vec::new(),
        };
        surface.clear();
        Ok(surface)
    }

    /// Raster size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Rasterize everything drawn since the last clear.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn snapshot(&mut self) -> FrameRGBA {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn prepare(&mut self, color: Rgba8) {
        self.ctx
            .set_transform(affine_to_cpu(self.state.transform));
        let c = color.with_alpha(self.state.alpha);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn stroke(&mut self, path: &vello_cpu::kurbo::BezPath, color: Rgba8, width: f64) {
        self.prepare(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(path);
    }
}

impl DrawSurface for CpuSurface {
    fn clear(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if let Some([r, g, b, a]) = self.clear_rgba
            && a > 0
        {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform *= Affine::translate(offset);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform *= Affine::rotate(radians);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba8, width: f64) {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(from));
        path.line_to(point_to_cpu(to));
        self.stroke(&path, color, width);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        let path = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius)
            .to_path(CIRCLE_TOLERANCE);
        self.prepare(color);
        self.ctx.fill_path(&path);
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba8) {
        let [first, rest @ ..] = points else {
            return;
        };
        if rest.len() < 2 {
            return;
        }
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(*first));
        for p in rest {
            path.line_to(point_to_cpu(*p));
        }
        path.close_path();
        self.prepare(color);
        self.ctx.fill_path(&path);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.prepare(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8, width: f64) {
        let path = rect_to_cpu(rect).to_path(0.0);
        self.stroke(&path, color, width);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
