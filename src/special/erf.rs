//! Error function family and Fresnel integrals.

use std::f64::consts::{FRAC_2_SQRT_PI, FRAC_PI_2};

use crate::integrate::dsolve_simple;
use crate::stream::Stream;

/// The erf system: g = e^{-t²} alongside erf and erfc.
///
/// g' = -2t·g, erf' = (2/√π)·g, erfc' = -(2/√π)·g, with
/// (g, erf, erfc)(0) = (1, 0, 1).
fn erfs() -> Stream<f64, [f64; 3]> {
    dsolve_simple(
        |t, v: &[f64; 3]| {
            let g = v[0];
            [-2.0 * t * g, FRAC_2_SQRT_PI * g, -FRAC_2_SQRT_PI * g]
        },
        0.0,
        [1.0, 0.0, 1.0],
    )
}

/// The error function.
pub fn erf() -> Stream<f64, f64> {
    erfs().map(|v| v[1])
}

/// The complementary error function.
pub fn erfc() -> Stream<f64, f64> {
    erfs().map(|v| v[2])
}

fn fresnel() -> Stream<f64, [f64; 2]> {
    dsolve_simple(
        |t, _v: &[f64; 2]| {
            let arg = FRAC_PI_2 * t * t;
            [arg.cos(), arg.sin()]
        },
        0.0,
        [0.0, 0.0],
    )
}

/// Fresnel cosine integral `C(t) = ∫₀ᵗ cos(πu²/2) du`.
pub fn fresnel_c() -> Stream<f64, f64> {
    fresnel().map(|v| v[0])
}

/// Fresnel sine integral `S(t) = ∫₀ᵗ sin(πu²/2) du`.
pub fn fresnel_s() -> Stream<f64, f64> {
    fresnel().map(|v| v[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_erf() {
        // erf(1) = 0.8427007929497149
        assert_relative_eq!(erf().get(1.0), 0.842_700_792_949_714_9, max_relative = 1e-12);
        assert_eq!(erf().get(0.0), 0.0);
    }

    #[test]
    fn test_erf_is_odd() {
        assert_relative_eq!(erf().get(-1.0), -0.842_700_792_949_714_9, max_relative = 1e-12);
    }

    #[test]
    fn test_erfc_complements_erf() {
        let s = erfc().get(0.5);
        let e = erf().get(0.5);
        assert_relative_eq!(s + e, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_fresnel_at_one() {
        // C(1) = 0.7798934003768228, S(1) = 0.4382591473903548
        assert_relative_eq!(
            fresnel_c().get(1.0),
            0.779_893_400_376_822_8,
            max_relative = 1e-11
        );
        assert_relative_eq!(
            fresnel_s().get(1.0),
            0.438_259_147_390_354_8,
            max_relative = 1e-11
        );
    }
}
