/// Deterministic pseudo-random source (SplitMix64).
///
/// The same seed always yields the same sequence. Not suitable for anything security-related.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    /// Create a generator from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Next value in `[0, 1)`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next() * (max - min)
    }

    /// Uniform integer in `[min, max]` inclusive. Returns `min` when `max <= min`.
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max.abs_diff(min).saturating_add(1);
        let offset = ((self.next() * span as f64) as u64).min(span - 1);
        min.wrapping_add(offset as i64)
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = (items.len() - 1) as i64;
        items.get(self.int(0, last) as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rng.rs"]
mod tests;
