use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Curve applied to the clamped elapsed-time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    CubicInOut,
    SinInOut,
}

impl Easing {
    /// Maps `t` in `[0, 1]` to eased progress; inputs outside are clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => t * (2.0 - t),
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let t3 = t2 - 2.0;
                    (t3 * t3 * t3 + 2.0) / 2.0
                }
            }
            Self::SinInOut => (1.0 - (PI * t).cos()) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::Easing;

    #[test]
    fn every_curve_pins_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::CubicInOut,
            Easing::SinInOut,
        ] {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(3.0), 1.0);
        assert_eq!(Easing::CubicInOut.apply(0.5), 0.5);
    }
}
