//! Square island falloff.
//!
//! Values rise from 0 in the middle of the map towards 1 at the border, with
//! `strength` controlling the curve steepness and `fade` how far inland the
//! ramp reaches.

use serde::{Deserialize, Serialize};

use crate::field::ScalarField;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FalloffSettings {
    pub strength: f32,
    pub fade: f32,
}

impl Default for FalloffSettings {
    fn default() -> Self {
        Self {
            strength: 3.0,
            fade: 2.2,
        }
    }
}

/// `v^a / (v^a + (b - b·v)^a)` for a normalized border distance `v`.
pub fn falloff_value(v: f32, strength: f32, fade: f32) -> f32 {
    let rise = v.powf(strength);
    let denominator = rise + (fade - fade * v).powf(strength);
    if denominator > 0.0 && denominator.is_finite() {
        (rise / denominator).clamp(0.0, 1.0)
    } else if v >= 1.0 {
        1.0
    } else {
        0.0
    }
}

/// Falloff over a `width × height` grid.
pub fn falloff_map(width: usize, height: usize, settings: FalloffSettings) -> ScalarField {
    let mut field = ScalarField::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 / width as f32 * 2.0 - 1.0;
            let fy = y as f32 / height as f32 * 2.0 - 1.0;
            let v = fx.abs().max(fy.abs());
            field.set(x, y, falloff_value(v, settings.strength, settings.fade));
        }
    }
    field
}
