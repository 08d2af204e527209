//! Bessel and Airy functions.
//!
//! The workhorse is the Bessel ODE recast under the substitution
//! `s = -ln t`, which turns the singular equation
//! `t²y'' + ty' + (t² - a²)y = 0` into the regular system
//!
//! ```text
//! e' = -2e        e(s) = t²
//! y' = z          z = -t·dy/dt
//! z' = (a² - e)y
//! ```
//!
//! integrated in `s` from 0 (that is, from `t = 1`). The solution stream
//! is exposed keyed by the argument itself via `premap(t ↦ -ln t)`.
//! Starting values at `t = 1` come from the integral representations.

use std::f64::consts::PI;

use crate::integrate::{dsolve_simple, integrate_simple, lim_integrate, lim_pinfty};
use crate::stream::Stream;

use super::gamma::gamma;

/// The Bessel recipe of order `a` with starting values
/// `(J, J')` at argument 1. Valid on t > 0.
pub fn bessel(a: f64, init: (f64, f64)) -> Stream<f64, f64> {
    let (j1, dj1) = init;
    dsolve_simple(
        move |_s, v: &[f64; 3]| {
            let [e, y, z] = *v;
            [-2.0 * e, z, (a * a - e) * y]
        },
        0.0,
        [1.0, j1, -dj1],
    )
    .map(|v| v[1])
    .premap(|t: f64| -t.ln())
}

/// `J_a(x)` by quadrature (Schläfli): the oscillatory head on `[0, π]`
/// plus a semi-infinite correction that vanishes at integer orders.
pub fn bessel_j_integral(a: f64, x: f64) -> f64 {
    let head = integrate_simple(move |th: f64| (a * th - x * th.sin()).cos(), 0.0, PI) / PI;
    let tail = lim_integrate(
        move |t| (-x * t.sinh() - a * t).exp(),
        0.0,
        lim_pinfty(1.0),
    );
    head - (a * PI).sin() / PI * tail
}

/// `Y_a(x)` by quadrature, for x > 0.
pub fn bessel_y_integral(a: f64, x: f64) -> f64 {
    let head = integrate_simple(move |th: f64| (x * th.sin() - a * th).sin(), 0.0, PI) / PI;
    let tail = lim_integrate(
        move |t| ((a * t).exp() + (-a * t).exp() * (a * PI).cos()) * (-x * t.sinh()).exp(),
        0.0,
        lim_pinfty(1.0),
    );
    head - tail / PI
}

/// `J_a` as a lazy stream over the argument, seeded at `x = 1` from the
/// integral representation (derivative via `J' = (J_{a-1} - J_{a+1})/2`).
pub fn bessel_j(a: f64) -> Stream<f64, f64> {
    let j1 = bessel_j_integral(a, 1.0);
    let dj1 = 0.5 * (bessel_j_integral(a - 1.0, 1.0) - bessel_j_integral(a + 1.0, 1.0));
    bessel(a, (j1, dj1))
}

/// `Y_a` as a lazy stream over the argument, seeded at `x = 1`.
pub fn bessel_y(a: f64) -> Stream<f64, f64> {
    let y1 = bessel_y_integral(a, 1.0);
    let dy1 = 0.5 * (bessel_y_integral(a - 1.0, 1.0) - bessel_y_integral(a + 1.0, 1.0));
    bessel(a, (y1, dy1))
}

fn airy(y0: f64, z0: f64) -> Stream<f64, f64> {
    dsolve_simple(|t, v: &[f64; 2]| [v[1], t * v[0]], 0.0, [y0, z0]).map(|v| v[0])
}

/// The Airy function `Ai`: y'' = t·y with
/// `Ai(0) = 3^{-2/3}/Γ(2/3)`, `Ai'(0) = -3^{-1/3}/Γ(1/3)`.
pub fn airy_ai() -> Stream<f64, f64> {
    let g13 = gamma(1.0 / 3.0);
    let g23 = gamma(2.0 / 3.0);
    airy(3.0_f64.powf(-2.0 / 3.0) / g23, -(3.0_f64.powf(-1.0 / 3.0)) / g13)
}

/// The Airy function `Bi`: y'' = t·y with
/// `Bi(0) = 3^{-1/6}/Γ(2/3)`, `Bi'(0) = 3^{1/6}/Γ(1/3)`.
pub fn airy_bi() -> Stream<f64, f64> {
    let g13 = gamma(1.0 / 3.0);
    let g23 = gamma(2.0 / 3.0);
    airy(3.0_f64.powf(-1.0 / 6.0) / g23, 3.0_f64.powf(1.0 / 6.0) / g13)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bessel_j_integral_order_zero() {
        // J₀(1) = 0.7651976865579666
        assert_relative_eq!(
            bessel_j_integral(0.0, 1.0),
            0.765_197_686_557_966_6,
            max_relative = 1e-10
        );
        // J₀(2) = 0.22389077914123567
        assert_relative_eq!(
            bessel_j_integral(0.0, 2.0),
            0.223_890_779_141_235_67,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_bessel_j_integral_order_one() {
        // J₁(1) = 0.44005058574493355
        assert_relative_eq!(
            bessel_j_integral(1.0, 1.0),
            0.440_050_585_744_933_55,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_bessel_j_integral_fractional_order() {
        // J_{1/2}(1) = sqrt(2/π)·sin(1) = 0.6713967071418031
        assert_relative_eq!(
            bessel_j_integral(0.5, 1.0),
            0.671_396_707_141_803_1,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_bessel_y_integral_order_zero() {
        // Y₀(1) = 0.08825696421567696
        assert_relative_eq!(
            bessel_y_integral(0.0, 1.0),
            0.088_256_964_215_676_96,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bessel_j_stream() {
        // J₀(0.5) = 0.9384698072408129
        let j0 = bessel_j(0.0);
        assert_relative_eq!(j0.get(0.5), 0.938_469_807_240_812_9, max_relative = 1e-8);
        // the anchor sits at x = 1
        assert_relative_eq!(j0.get(1.0), 0.765_197_686_557_966_6, max_relative = 1e-9);
    }

    #[test]
    fn test_bessel_y_stream() {
        // Y₀(0.5) = -0.4445187335067065
        let y0 = bessel_y(0.0);
        assert_relative_eq!(y0.get(0.5), -0.444_518_733_506_706_5, max_relative = 1e-7);
    }

    #[test]
    fn test_airy_ai() {
        // Ai(1) = 0.13529241631288141, Ai(0) = 0.3550280538878172
        let ai = airy_ai();
        assert_relative_eq!(ai.get(0.0), 0.355_028_053_887_817_2, max_relative = 1e-8);
        assert_relative_eq!(ai.get(1.0), 0.135_292_416_312_881_41, max_relative = 1e-7);
    }

    #[test]
    fn test_airy_bi() {
        // Bi(1) = 1.2074235949528713
        assert_relative_eq!(airy_bi().get(1.0), 1.207_423_594_952_871_3, max_relative = 1e-7);
    }
}
