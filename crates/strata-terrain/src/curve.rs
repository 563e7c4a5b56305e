//! Piecewise-linear response curves.
//!
//! Used to bend height before meshing and to bias heat and moisture by
//! elevation. Inputs outside the key range clamp to the first/last key.

use serde::{Deserialize, Serialize};

/// One `(time, value)` key of a [`ResponseCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// A monotone-in-time list of keys evaluated by linear interpolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    keys: Vec<CurveKey>,
}

impl ResponseCurve {
    /// Build a curve from `(time, value)` pairs. Keys are sorted by time and
    /// non-finite keys are dropped.
    pub fn from_keys(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .filter(|(t, v)| t.is_finite() && v.is_finite())
            .map(|(time, value)| CurveKey { time, value })
            .collect();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Identity on `[0, 1]`.
    pub fn linear() -> Self {
        Self::from_keys([(0.0, 0.0), (1.0, 1.0)])
    }

    pub fn constant(value: f32) -> Self {
        Self::from_keys([(0.0, value)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Evaluate at `t`. An empty curve evaluates to `0`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }
        // `t` is strictly inside the key range, so a bracketing pair exists.
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * ((t - a.time) / span)
    }
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self::linear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_curve_is_identity_inside_unit_range() {
        let curve = ResponseCurve::linear();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((curve.evaluate(t) - t).abs() < 1e-6, "curve({t})");
        }
    }

    #[test]
    fn test_clamps_outside_key_range() {
        let curve = ResponseCurve::from_keys([(0.2, 1.0), (0.8, 3.0)]);
        assert_eq!(curve.evaluate(-5.0), 1.0);
        assert_eq!(curve.evaluate(5.0), 3.0);
        assert!((curve.evaluate(0.5) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_unsorted_keys_are_sorted() {
        let curve = ResponseCurve::from_keys([(1.0, 0.0), (0.0, 1.0)]);
        assert!((curve.evaluate(0.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_empty_curve_evaluates_to_zero() {
        let curve = ResponseCurve::from_keys(std::iter::empty());
        assert_eq!(curve.evaluate(0.5), 0.0);
    }
}
