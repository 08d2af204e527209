//! Fixed-step Euler integration.

use std::rc::Rc;

use super::{nan_stream, Integrand};
use crate::stream::Stream;
use crate::vector::Vector;

/// Solve dy/dt = f(t, x, y) with forward Euler steps of size `|h|`.
///
/// The solution is a lazy stream: each query advances from the current
/// anchor in steps of `sign(dt)·|h|`, finishing with one partial step of
/// exactly the remaining distance. The stage derivative is evaluated once
/// per step, at the left endpoint.
pub fn euler<X, Y>(
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
    assert!(h != 0.0, "euler: step size must be nonzero");
    Stream::cons(y0.clone(), move |t1| {
        advance(h, Rc::clone(&f), t0, xs.clone(), y0.clone(), t1)
    })
}

fn advance<X, Y>(
    h: f64,
    f: Integrand<X, Y>,
    mut t0: f64,
    mut xs: Stream<f64, X>,
    mut y0: Y,
    t1: f64,
) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    loop {
        let dt = t1 - t0;
        let k = f(t0, xs.head(), &y0);
        let y1 = y0.perturb(&k, dt);
        if dt.is_nan() || h.is_nan() || y1.norm1().is_nan() {
            return nan_stream();
        }
        if h.abs() >= dt.abs() {
            return euler(h, f, t1, xs.seek(t1), y1);
        }
        let hs = h.abs().copysign(dt);
        y0 = y0.perturb(&k, hs);
        t0 += hs;
        xs = xs.seek(t0);
    }
}
