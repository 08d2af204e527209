//! Solver façade: integrator values, definite integrals, path and residue
//! integrals.

use std::rc::Rc;

use num_complex::Complex64;

use super::dopri5::dopri5;
use super::euler::euler;
use super::rk4::rk4;
use super::{Integrand, Integrator, StepControl};
use crate::stream::Stream;
use crate::vector::Vector;

/// Fixed-step Euler solver.
#[derive(Debug, Clone, Copy)]
pub struct Euler {
    /// Step size magnitude.
    pub h: f64,
}

/// Fixed-step classical Runge-Kutta 4 solver.
#[derive(Debug, Clone, Copy)]
pub struct Rk4 {
    /// Step size magnitude.
    pub h: f64,
}

/// Adaptive Dormand-Prince 5(4) solver.
#[derive(Debug, Clone)]
pub struct Dopri5<Y: Vector> {
    /// Tolerance and step-clipping policy.
    pub control: StepControl<Y>,
}

impl<Y: Vector> Default for Dopri5<Y> {
    fn default() -> Self {
        Self {
            control: StepControl::default(),
        }
    }
}

impl<X: Clone + 'static, Y: Vector> Integrator<X, Y> for Euler {
    fn solve(&self, f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y> {
        euler(self.h, f, t0, xs, y0)
    }
}

impl<X: Clone + 'static, Y: Vector> Integrator<X, Y> for Rk4 {
    fn solve(&self, f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y> {
        rk4(self.h, f, t0, xs, y0)
    }
}

impl<X: Clone + 'static, Y: Vector> Integrator<X, Y> for Dopri5<Y> {
    fn solve(&self, f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y> {
        dopri5(self.control.clone(), f, t0, xs, y0)
    }
}

/// Run an integrator on a right-hand side that needs no auxiliary signal.
pub fn solve_simple<Y, I>(
    integrator: &I,
    f: impl Fn(f64, &Y) -> Y + 'static,
    t0: f64,
    y0: Y,
) -> Stream<f64, Y>
where
    Y: Vector,
    I: Integrator<(), Y>,
{
    let g: Integrand<(), Y> = Rc::new(move |t, _x, y| f(t, y));
    integrator.solve(g, t0, Stream::constant(()), y0)
}

/// Solve dy/dt = f(t, x, y) adaptively under the default [`StepControl`].
pub fn dsolve<X, Y>(f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    Dopri5::default().solve(f, t0, xs, y0)
}

/// Solve dy/dt = f(t, y) adaptively under the default [`StepControl`].
pub fn dsolve_simple<Y: Vector>(
    f: impl Fn(f64, &Y) -> Y + 'static,
    t0: f64,
    y0: Y,
) -> Stream<f64, Y> {
    solve_simple(&Dopri5::default(), f, t0, y0)
}

/// Definite integral of `f(t, x(t))` from `a` to `b`.
///
/// The accumulator rides the adaptive solver: y' = f(t, x(t)), y(a) = 0,
/// evaluated at `b`.
pub fn integrate<X, Y>(
    f: impl Fn(f64, &X) -> Y + 'static,
    xs: Stream<f64, X>,
    a: f64,
    b: f64,
) -> Y
where
    X: Clone + 'static,
    Y: Vector,
{
    let g: Integrand<X, Y> = Rc::new(move |t, x, _y| f(t, x));
    dsolve(g, a, xs, Y::zero()).get(b)
}

/// Definite integral of `f(t)` from `a` to `b`.
pub fn integrate_simple<Y: Vector>(f: impl Fn(f64) -> Y + 'static, a: f64, b: f64) -> Y {
    dsolve_simple(move |t, _y: &Y| f(t), a, Y::zero()).get(b)
}

/// Integral of `f(u(t))·u'(t)` along the path with derivative `du` and
/// `u(a) = u0`, evaluated from `a` to `b`.
///
/// The path position is carried alongside the accumulator as a paired
/// complex state, so `f` only ever sees points on the path.
pub fn path_integral(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    du: impl Fn(f64) -> Complex64 + 'static,
    u0: Complex64,
    a: f64,
    b: f64,
) -> Complex64 {
    let rhs = move |t: f64, v: &[Complex64; 2]| {
        let d = du(t);
        [f(v[1]) * d, d]
    };
    let s = dsolve_simple(rhs, a, [Complex64::new(0.0, 0.0), u0]);
    s.get(b)[0]
}

/// Integral of `f` along the straight line from `u0` to `u1`.
pub fn line_integral(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    u0: Complex64,
    u1: Complex64,
) -> Complex64 {
    let len = (u1 - u0).norm();
    if len == 0.0 {
        return Complex64::new(0.0, 0.0);
    }
    let dir = (u1 - u0) / len;
    path_integral(f, move |_t| dir, u0, 0.0, len)
}

/// Sum of line integrals along an open polyline.
///
/// Panics on an empty polyline.
pub fn lines_integral(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    points: &[Complex64],
) -> Complex64 {
    assert!(!points.is_empty(), "lines_integral: empty polyline");
    let f = Rc::new(f);
    let mut total = Complex64::new(0.0, 0.0);
    for w in points.windows(2) {
        let f = Rc::clone(&f);
        total += line_integral(move |z| f(z), w[0], w[1]);
    }
    total
}

/// Sum of line integrals along a closed polyline (the last point connects
/// back to the first).
///
/// Panics on an empty polyline.
pub fn poly_integral(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    points: &[Complex64],
) -> Complex64 {
    assert!(!points.is_empty(), "poly_integral: empty polyline");
    let mut closed = points.to_vec();
    closed.push(points[0]);
    lines_integral(f, &closed)
}

/// Contour integral of `f` around a square loop of radius `r` centred on
/// `z0`, traversed counter-clockwise.
pub fn residue_square(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    z0: Complex64,
    r: f64,
) -> Complex64 {
    let corners = [
        z0 + Complex64::new(r, -r),
        z0 + Complex64::new(r, r),
        z0 + Complex64::new(-r, r),
        z0 + Complex64::new(-r, -r),
    ];
    poly_integral(f, &corners)
}

/// Contour integral of `f` around the circle of radius `r` centred on
/// `z0`: `u(t) = z0 + r·e^{it}`, `t ∈ [0, 2π]`.
pub fn residue_circ(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    z0: Complex64,
    r: f64,
) -> Complex64 {
    let du = move |t: f64| Complex64::i() * r * (Complex64::i() * t).exp();
    path_integral(f, du, z0 + r, 0.0, std::f64::consts::TAU)
}

/// Contour integral around `z0`; the square loop, which tolerates larger
/// adaptive-step excursions than the circle.
pub fn residue(
    f: impl Fn(Complex64) -> Complex64 + 'static,
    z0: Complex64,
    r: f64,
) -> Complex64 {
    residue_square(f, z0, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_4, PI};

    #[test]
    fn test_simple_adapter_matches_explicit_lift() {
        let i = Dopri5::default();
        let via_adapter = solve_simple(&i, |_t, y: &f64| *y, 0.0, 1.0).get(1.0);
        let g: Integrand<(), f64> = Rc::new(|_t, _x, y| *y);
        let direct = i.solve(g, 0.0, Stream::constant(()), 1.0).get(1.0);
        assert_eq!(via_adapter, direct);
    }

    #[test]
    fn test_integrate_simple_polynomial() {
        let v = integrate_simple(|t| t * t, 0.0, 1.0);
        assert_relative_eq!(v, 1.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn test_integrate_simple_arctan_kernel() {
        let v = integrate_simple(|t| 1.0 / (1.0 + t * t), 0.0, 1.0);
        assert_relative_eq!(v, FRAC_PI_4, max_relative = 1e-12);
    }

    #[test]
    fn test_integrate_with_signal() {
        // integral of x(t) = t over [0, 1]
        let xs = Stream::from_fn(0.0, |t: f64| t);
        let v = integrate(|_t, x: &f64| *x, xs, 0.0, 1.0);
        assert_relative_eq!(v, 0.5, max_relative = 1e-12);
    }

    #[test]
    fn test_line_integral_of_identity() {
        // ∫ z dz from 0 to w is w²/2, path independent
        let w = Complex64::new(1.0, 1.0);
        let v = line_integral(|z| z, Complex64::new(0.0, 0.0), w);
        let exact = w * w / 2.0;
        assert_relative_eq!(v.re, exact.re, epsilon = 1e-10);
        assert_relative_eq!(v.im, exact.im, epsilon = 1e-10);
    }

    #[test]
    fn test_degenerate_line_is_zero() {
        let w = Complex64::new(2.0, -1.0);
        assert_eq!(line_integral(|z| z, w, w), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_residue_square_of_inverse() {
        let v = residue_square(|z| z.inv(), Complex64::new(0.0, 0.0), 1.0);
        assert_relative_eq!(v.re, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.im, 2.0 * PI, max_relative = 1e-9);
    }

    #[test]
    fn test_residue_circ_of_inverse() {
        let v = residue_circ(|z| z.inv(), Complex64::new(0.0, 0.0), 1.0);
        assert_relative_eq!(v.re, 0.0, epsilon = 1e-9);
        assert_relative_eq!(v.im, 2.0 * PI, max_relative = 1e-9);
    }

    #[test]
    fn test_residue_is_radius_independent() {
        let a = residue(|z| z.inv(), Complex64::new(0.0, 0.0), 0.5);
        let b = residue(|z| z.inv(), Complex64::new(0.0, 0.0), 2.0);
        assert_relative_eq!(a.im, b.im, max_relative = 1e-9);
    }

    #[test]
    fn test_residue_off_centre_pole() {
        let z0 = Complex64::new(1.0, -2.0);
        let v = residue(move |z| (z - z0).inv(), z0, 1.0);
        assert_relative_eq!(v.im, 2.0 * PI, max_relative = 1e-9);
    }

    #[test]
    #[should_panic(expected = "empty polyline")]
    fn test_poly_integral_empty_panics() {
        let _ = poly_integral(|z| z, &[]);
    }
}
