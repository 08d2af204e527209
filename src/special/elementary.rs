//! Elementary functions as initial-value problems.

use crate::integrate::dsolve_simple;
use crate::stream::Stream;

/// `exp(t)`: y' = y, y(0) = 1.
pub fn exp() -> Stream<f64, f64> {
    dsolve_simple(|_t, y: &f64| *y, 0.0, 1.0)
}

/// `ln(t)` for t > 0: y' = 1/t, y(1) = 0.
pub fn log() -> Stream<f64, f64> {
    dsolve_simple(|t, _y: &f64| 1.0 / t, 1.0, 0.0)
}

fn sin_cos() -> Stream<f64, [f64; 2]> {
    dsolve_simple(|_t, v: &[f64; 2]| [v[1], -v[0]], 0.0, [0.0, 1.0])
}

/// `sin(t)`: the first component of y' = z, z' = -y, (y, z)(0) = (0, 1).
pub fn sin() -> Stream<f64, f64> {
    sin_cos().map(|v| v[0])
}

/// `cos(t)`: the second component of the [`sin`] system.
pub fn cos() -> Stream<f64, f64> {
    sin_cos().map(|v| v[1])
}

/// `tan(t)`: y' = 1 + y², y(0) = 0.
pub fn tan() -> Stream<f64, f64> {
    dsolve_simple(|_t, y: &f64| 1.0 + y * y, 0.0, 0.0)
}

/// `atan(t)`: y' = 1/(1 + t²), y(0) = 0.
pub fn atan() -> Stream<f64, f64> {
    dsolve_simple(|t, _y: &f64| 1.0 / (1.0 + t * t), 0.0, 0.0)
}

fn sinh_cosh() -> Stream<f64, [f64; 2]> {
    dsolve_simple(|_t, v: &[f64; 2]| [v[1], v[0]], 0.0, [0.0, 1.0])
}

/// `sinh(t)`: the first component of y' = z, z' = y, (y, z)(0) = (0, 1).
pub fn sinh() -> Stream<f64, f64> {
    sinh_cosh().map(|v| v[0])
}

/// `cosh(t)`: the second component of the [`sinh`] system.
pub fn cosh() -> Stream<f64, f64> {
    sinh_cosh().map(|v| v[1])
}

/// `sqrt(t)` for t > 0: y' = 1/(2y), y(1) = 1.
pub fn sqrt() -> Stream<f64, f64> {
    dsolve_simple(|_t, y: &f64| 1.0 / (2.0 * y), 1.0, 1.0)
}
