//! Exponential and trigonometric integrals.
//!
//! Each recipe carries the elementary functions it needs as extra state
//! components, so the system is self-contained. The right-hand sides are
//! 0/0-indeterminate at the origin and branch on `t == 0.0` exactly,
//! returning the analytic limit.

use crate::integrate::dsolve_simple;
use crate::stream::Stream;

/// `sinc(t) = sin(t)/t`: y' = (cos t - y)/t with limit 0 at the origin,
/// carrying the sin/cos pair alongside; y(0) = 1.
pub fn sinc() -> Stream<f64, f64> {
    dsolve_simple(
        |t, v: &[f64; 3]| {
            let [y, s, c] = *v;
            let dy = if t == 0.0 { 0.0 } else { (c - y) / t };
            [dy, c, -s]
        },
        0.0,
        [1.0, 0.0, 1.0],
    )
    .map(|v| v[0])
}

/// Sine integral `Si(t) = ∫₀ᵗ sin(u)/u du`: y' = sin(t)/t, limit 1 at the
/// origin.
pub fn si() -> Stream<f64, f64> {
    dsolve_simple(
        |t, v: &[f64; 3]| {
            let [_y, s, c] = *v;
            let dy = if t == 0.0 { 1.0 } else { s / t };
            [dy, c, -s]
        },
        0.0,
        [0.0, 0.0, 1.0],
    )
    .map(|v| v[0])
}

/// Entire cosine integral `Cin(t) = ∫₀ᵗ (1 - cos u)/u du`: limit 0 at the
/// origin.
pub fn cin() -> Stream<f64, f64> {
    dsolve_simple(
        |t, v: &[f64; 3]| {
            let [_y, s, c] = *v;
            let dy = if t == 0.0 { 0.0 } else { (1.0 - c) / t };
            [dy, c, -s]
        },
        0.0,
        [0.0, 0.0, 1.0],
    )
    .map(|v| v[0])
}

/// Hyperbolic analogue `Chin(t) = ∫₀ᵗ (cosh u - 1)/u du`: limit 0 at the
/// origin, carrying the sinh/cosh pair.
pub fn chin() -> Stream<f64, f64> {
    dsolve_simple(
        |t, v: &[f64; 3]| {
            let [_y, sh, ch] = *v;
            let dy = if t == 0.0 { 0.0 } else { (ch - 1.0) / t };
            [dy, ch, sh]
        },
        0.0,
        [0.0, 0.0, 1.0],
    )
    .map(|v| v[0])
}

/// Entire exponential integral `Ein(t) = ∫₀ᵗ (1 - e^{-u})/u du`: limit 1
/// at the origin, carrying g = e^{-t}.
pub fn ein() -> Stream<f64, f64> {
    dsolve_simple(
        |t, v: &[f64; 2]| {
            let [_y, g] = *v;
            let dy = if t == 0.0 { 1.0 } else { (1.0 - g) / t };
            [dy, -g]
        },
        0.0,
        [0.0, 1.0],
    )
    .map(|v| v[0])
}
