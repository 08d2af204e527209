//! Fixed-step classical Runge-Kutta 4 integration.

use std::rc::Rc;

use super::{nan_stream, Integrand};
use crate::stream::Stream;
use crate::vector::Vector;

/// One classical RK4 step over `[t0, t0 + h]`.
///
/// The auxiliary stream is queried at the three stage times in order
/// (`t0`, `t0 + h/2`, `t0 + h`) and the advanced stream is handed back so
/// the caller can thread it forward. Also serves as the small-interval
/// fallback of the adaptive solver.
pub(crate) fn rk4_step<X, Y>(
    h: f64,
    f: &Integrand<X, Y>,
    t0: f64,
    xs: &Stream<f64, X>,
    y0: &Y,
) -> (Stream<f64, X>, Y)
where
    X: Clone + 'static,
    Y: Vector,
{
    let t1 = t0 + 0.5 * h;
    let t2 = t0 + h;
    let x0 = xs.head();
    let k1 = f(t0, x0, y0).scale_real(h);
    let xs1 = xs.seek(t1);
    let x1 = xs1.head();
    let k2 = f(t1, x1, &y0.perturb(&k1, 0.5)).scale_real(h);
    let k3 = f(t1, x1, &y0.perturb(&k2, 0.5)).scale_real(h);
    let xs2 = xs1.seek(t2);
    let k4 = f(t2, xs2.head(), &y0.add(&k3)).scale_real(h);
    let incr = Y::linear_comb(
        &[1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
        &[&k1, &k2, &k3, &k4],
    );
    let y2 = y0.add(&incr);
    (xs2, y2)
}

/// Solve dy/dt = f(t, x, y) with classical RK4 steps of size `|h|`.
///
/// Drives toward each query like [`super::euler`]: full steps of `|h|`
/// until one would overshoot, then a final step of exactly the remaining
/// distance.
pub fn rk4<X, Y>(h: f64, f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y>
where
    X: Clone + 'static,
    Y: Vector,
{
    assert!(h != 0.0, "rk4: step size must be nonzero");
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
        if dt.is_nan() || h.is_nan() || y0.norm1().is_nan() {
            return nan_stream();
        }
        if h.abs() >= dt.abs() {
            let (xs1, y1) = rk4_step(dt, &f, t0, &xs, &y0);
            return rk4(h, f, t1, xs1, y1);
        }
        let hs = h.abs().copysign(dt);
        let (xs1, y1) = rk4_step(hs, &f, t0, &xs, &y0);
        t0 += hs;
        xs = xs1;
        y0 = y1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simple<Y: Vector>(
        h: f64,
        f: impl Fn(f64, &Y) -> Y + 'static,
        t0: f64,
        y0: Y,
    ) -> Stream<f64, Y> {
        rk4(h, Rc::new(move |t, _: &(), y: &Y| f(t, y)), t0, Stream::constant(()), y0)
    }

    #[test]
    fn test_anchor_identity() {
        let s = simple(0.1, |_t, y: &f64| *y, 0.5, 2.0);
        assert_eq!(s.get(0.5), 2.0);
    }

    #[test]
    fn test_exponential_fourth_order_accuracy() {
        let s = simple(0.01, |_t, y: &f64| *y, 0.0, 1.0);
        assert_relative_eq!(s.get(1.0), 1.0_f64.exp(), max_relative = 1e-10);
    }

    #[test]
    fn test_harmonic_oscillator_period() {
        // y1' = y2, y2' = -y1; after one period the state returns
        let s = simple(0.01, |_t, v: &[f64; 2]| [v[1], -v[0]], 0.0, [1.0, 0.0]);
        let v = s.get(2.0 * std::f64::consts::PI);
        assert_relative_eq!(v[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(v[1], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn test_successive_queries_extend_integration() {
        let s = simple(0.01, |_t, y: &f64| *y, 0.0, 1.0);
        let (v1, s1) = s.query(1.0);
        let (v2, _) = s1.query(2.0);
        assert_relative_eq!(v1, 1.0_f64.exp(), max_relative = 1e-10);
        assert_relative_eq!(v2, 2.0_f64.exp(), max_relative = 1e-9);
    }

    #[test]
    fn test_nan_state_switches_to_nan_stream() {
        let s = simple(0.1, |_t, _y: &f64| f64::NAN, 0.0, 1.0);
        assert!(s.get(1.0).is_nan());
    }
}
