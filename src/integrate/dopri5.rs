//! Adaptive Dormand-Prince 5(4) integration.
//!
//! Seven-stage explicit Runge-Kutta pair: steps are taken with the 5th
//! order solution while the embedded 4th order solution drives the error
//! estimate. Step sizes follow the controller in
//! [`StepControl`]: accepted steps grow by `(0.38/err)^(1/5)` clamped to
//! `[0.1, 5]`, rejected steps shrink by the same formula with growth
//! forbidden on retries.
//!
//! # References
//!
//! 1. J. R. Dormand, P. J. Prince, "A family of embedded Runge-Kutta
//!    formulae", J. Comp. Appl. Math., Vol. 6, No. 1, 1980.
//! 2. E. Hairer, S. P. Norsett, G. Wanner, "Solving Ordinary Differential
//!    Equations I: Nonstiff Problems", Sec. II.4 (initial step selection).

use std::rc::Rc;

use super::control::{error_norm, weighted_norm, StepControl};
use super::rk4::rk4_step;
use super::{nan_stream, Integrand};
use crate::stream::Stream;
use crate::vector::Vector;

// Dormand-Prince node offsets
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th order solution weights (b2 = b7 = 0)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Embedded error weights (e2 = 0)
const E1: f64 = -71.0 / 57600.0;
const E3: f64 = 71.0 / 16695.0;
const E4: f64 = -71.0 / 1920.0;
const E5: f64 = 17253.0 / 339200.0;
const E6: f64 = -22.0 / 525.0;
const E7: f64 = 1.0 / 40.0;

/// Step-growth target: `fac = (TARGET / err)^(1/5)`.
const TARGET: f64 = 0.38;
/// Rejections allowed per step before the solution is declared divergent.
const MAX_REJECTIONS: usize = 100;

struct State<X: Clone + 'static, Y: Vector> {
    control: StepControl<Y>,
    h: f64,
    t: f64,
    xs: Stream<f64, X>,
    y: Y,
    f: Integrand<X, Y>,
}

impl<X: Clone + 'static, Y: Vector> Clone for State<X, Y> {
    fn clone(&self) -> Self {
        State {
            control: self.control.clone(),
            h: self.h,
            t: self.t,
            xs: self.xs.clone(),
            y: self.y.clone(),
            f: Rc::clone(&self.f),
        }
    }
}

/// Solve dy/dt = f(t, x, y) adaptively, choosing the initial step size.
pub fn dopri5<X, Y>(
    control: StepControl<Y>,
    f: Integrand<X, Y>,
    t0: f64,
    xs: Stream<f64, X>,
    y0: Y,
) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    let h = initial_step(&control, &f, t0, &xs, &y0);
    dopri5h(control, h, f, t0, xs, y0)
}

/// Solve dy/dt = f(t, x, y) adaptively from an explicit first step size.
pub fn dopri5h<X, Y>(
    control: StepControl<Y>,
    h: f64,
    f: Integrand<X, Y>,
    t0: f64,
    xs: Stream<f64, X>,
    y0: Y,
) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    let st = State {
        control,
        h,
        t: t0,
        xs,
        y: y0,
        f,
    };
    emit(st.y.clone(), st)
}

fn emit<X, Y>(head: Y, st: State<X, Y>) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    Stream::cons(head, move |target| advance(st.clone(), target))
}

/// Drive the integration toward `target` and produce the successor stream.
///
/// A query that lands within the minimum-progress floor of the anchor is
/// answered with a single RK4 extrapolation over the residual interval and
/// leaves the integrator where it was. Likewise, if a committed-size step
/// would carry past `target`, the value is the RK4 extrapolation and the
/// successor keeps the pre-step state — an intermediate query never
/// consumes an adaptive step that a later, larger target will need.
fn advance<X, Y>(mut st: State<X, Y>, target: f64) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    loop {
        let dt = target - st.t;
        let hmin = st.control.clip_step(st.t, dt);
        if dt.is_nan() || hmin.is_nan() || st.y.norm1().is_nan() {
            return nan_stream();
        }
        if dt.abs() < hmin.abs() {
            let (_, y) = rk4_step(dt, &st.f, st.t, &st.xs, &st.y);
            return emit(y, st);
        }
        st.h = st.h.abs().min(dt.abs()).copysign(dt);
        let (h_next, t_new, xs_new, y_new) = match step(&st) {
            Some(s) => s,
            None => return nan_stream(),
        };
        if (t_new - target) * dt.signum() > 0.0 {
            let (_, y) = rk4_step(dt, &st.f, st.t, &st.xs, &st.y);
            return emit(y, st);
        }
        st.h = h_next;
        st.t = t_new;
        st.xs = xs_new;
        st.y = y_new;
        if st.t == target {
            return emit(st.y.clone(), st);
        }
    }
}

/// One adaptive step from the state's anchor.
///
/// Returns the next step size, the new anchor, the advanced auxiliary
/// stream and the accepted solution, or `None` when the rejection budget
/// is exhausted.
fn step<X, Y>(st: &State<X, Y>) -> Option<(f64, f64, Stream<f64, X>, Y)>
where
    X: Clone + 'static,
    Y: Vector,
{
    let c = &st.control;
    let mut h = c.clip_step(st.t, st.h);
    let mut retrying = false;
    for _ in 0..MAX_REJECTIONS {
        let (t_end, xs_end, y7, err) = attempt(st, h);
        let fac = (TARGET / err).powf(0.2);
        let fac = if retrying {
            c.clip_fac_retry(fac)
        } else {
            c.clip_fac(fac)
        };
        if err <= 1.0 {
            return Some((h * fac, t_end, xs_end, y7));
        }
        h = c.clip_step(st.t, h * fac);
        retrying = true;
    }
    None
}

/// Evaluate the seven stages over `[t, t + h]` and estimate the error.
fn attempt<X, Y>(st: &State<X, Y>, h: f64) -> (f64, Stream<f64, X>, Y, f64)
where
    X: Clone + 'static,
    Y: Vector,
{
    let t = st.t;
    let f = &st.f;
    let y = &st.y;
    let k1 = f(t, st.xs.head(), y).scale_real(h);
    let xs2 = st.xs.seek(t + C2 * h);
    let k2 = f(t + C2 * h, xs2.head(), &y.perturb(&k1, A21)).scale_real(h);
    let xs3 = xs2.seek(t + C3 * h);
    let y3 = y.add(&Y::linear_comb(&[A31, A32], &[&k1, &k2]));
    let k3 = f(t + C3 * h, xs3.head(), &y3).scale_real(h);
    let xs4 = xs3.seek(t + C4 * h);
    let y4 = y.add(&Y::linear_comb(&[A41, A42, A43], &[&k1, &k2, &k3]));
    let k4 = f(t + C4 * h, xs4.head(), &y4).scale_real(h);
    let xs5 = xs4.seek(t + C5 * h);
    let y5 = y.add(&Y::linear_comb(&[A51, A52, A53, A54], &[&k1, &k2, &k3, &k4]));
    let k5 = f(t + C5 * h, xs5.head(), &y5).scale_real(h);
    let xs6 = xs5.seek(t + h);
    let x6 = xs6.head();
    let y6 = y.add(&Y::linear_comb(
        &[A61, A62, A63, A64, A65],
        &[&k1, &k2, &k3, &k4, &k5],
    ));
    let k6 = f(t + h, x6, &y6).scale_real(h);
    let y7 = y.add(&Y::linear_comb(
        &[B1, B3, B4, B5, B6],
        &[&k1, &k3, &k4, &k5, &k6],
    ));
    let k7 = f(t + h, x6, &y7).scale_real(h);
    let dy7 = Y::linear_comb(
        &[E1, E3, E4, E5, E6, E7],
        &[&k1, &k3, &k4, &k5, &k6, &k7],
    );
    let err = error_norm(&st.control, y, &y7, &dy7);
    (t + h, xs6, y7, err)
}

/// Propose a first step size (Hairer, Norsett & Wanner, Sec. II.4).
///
/// Weighted norms of the state and its derivative suggest a trial step; a
/// forward Euler probe of that size measures the derivative's variation,
/// and the final proposal is the more conservative of the two estimates.
fn initial_step<X, Y>(
    control: &StepControl<Y>,
    f: &Integrand<X, Y>,
    t0: f64,
    xs: &Stream<f64, X>,
    y0: &Y,
) -> f64
where
    X: Clone + 'static,
    Y: Vector,
{
    let f0 = f(t0, xs.head(), y0);
    let d0 = weighted_norm(control, y0, y0);
    let d1 = weighted_norm(control, y0, &f0);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    };
    let y1 = y0.perturb(&f0, h0);
    let xs1 = xs.seek(t0 + h0);
    let f1 = f(t0 + h0, xs1.head(), &y1);
    let d2 = weighted_norm(control, y0, &f1.sub(&f0)) / h0;
    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(0.2)
    };
    (100.0 * h0).min(h1)
}
