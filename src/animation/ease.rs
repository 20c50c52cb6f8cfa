/// Easing curves used to remap normalized progress before pose interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity mapping.
    Linear,
    /// Cubic ease-in, `t³`.
    In,
    /// Cubic ease-out, `1 − (1 − t)³`.
    Out,
    /// Blended cubic: ease-in on the first half, ease-out on the second.
    InOut,
}

impl Ease {
    /// Apply this curve to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::In => t * t * t,
            Self::Out => 1.0 - (1.0 - t).powi(3),
            Self::InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Progress of `frame` through the inclusive phase `[start, end]`, eased.
    ///
    /// A single-frame phase is already complete.
    pub fn phase(self, frame: usize, start: usize, end: usize) -> f64 {
        if end <= start {
            return 1.0;
        }
        let t = frame.saturating_sub(start) as f64 / (end - start) as f64;
        self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
