use crate::foundation::error::{StickmanError, StickmanResult};
use std::fmt;

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Fixed playback rate of every scene.
pub const SCENE_FPS: u32 = 12;

/// Fixed number of frames in every scene.
pub const SCENE_FRAME_COUNT: usize = 36;

/// Duration of one frame in milliseconds (`1000 / SCENE_FPS`).
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / SCENE_FPS as f64;

/// 0-based frame index on the fixed scene timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    /// First frame of every scene.
    pub const FIRST: Self = Self(0);
    /// Last frame of every scene.
    pub const LAST: Self = Self(SCENE_FRAME_COUNT - 1);

    /// Clamp an arbitrary (possibly negative) request into `[FIRST, LAST]`.
    pub fn clamp_to_scene(requested: i64) -> Self {
        let max = Self::LAST.0 as i64;
        Self(requested.clamp(0, max) as usize)
    }

    /// Return `true` for the final frame of the timeline.
    pub fn is_last(self) -> bool {
        self.0 >= Self::LAST.0
    }

    /// Previous frame, if any.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }

    /// Next frame, if any.
    pub fn next(self) -> Option<Self> {
        if self.is_last() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
        }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the stick-figure ink.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> StickmanResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> StickmanResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| StickmanError::render(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(StickmanError::render("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(StickmanError::render(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Scale the alpha channel by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (f64::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied channel values, as raster backends expect them.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
