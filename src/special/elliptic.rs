//! Complete elliptic integrals as a coupled ODE in the parameter m.

use std::f64::consts::FRAC_PI_2;

use crate::integrate::dsolve_simple;
use crate::stream::Stream;

/// The coupled (K, E) system over the parameter m:
///
/// ```text
/// dK/dm = (E - (1-m)K) / (2m(1-m))
/// dE/dm = (E - K) / (2m)
/// ```
///
/// with (K, E)(0) = (π/2, π/2). The right-hand side is singular at m = 0;
/// the stage evaluated exactly there returns (0, 0) and the error control
/// absorbs the defect.
fn ke() -> Stream<f64, [f64; 2]> {
    dsolve_simple(
        |m, v: &[f64; 2]| {
            if m == 0.0 {
                return [0.0, 0.0];
            }
            let [k, e] = *v;
            [(e - (1.0 - m) * k) / (2.0 * m * (1.0 - m)), (e - k) / (2.0 * m)]
        },
        0.0,
        [FRAC_PI_2, FRAC_PI_2],
    )
}

/// Complete elliptic integral of the first kind,
/// `K(m) = ∫₀^{π/2} dθ/√(1 - m·sin²θ)`, for m in [0, 1).
pub fn elliptic_k() -> Stream<f64, f64> {
    ke().map(|v| v[0])
}

/// Complete elliptic integral of the second kind,
/// `E(m) = ∫₀^{π/2} √(1 - m·sin²θ) dθ`, for m in [0, 1).
pub fn elliptic_e() -> Stream<f64, f64> {
    ke().map(|v| v[1])
}
