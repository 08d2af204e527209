//! ODE initial-value solvers with lazy, stream-shaped solutions.
//!
//! This module provides solvers for initial value problems of the form
//! dy/dt = f(t, x(t), y), y(t0) = y0, where `x(t)` is an optional auxiliary
//! driving signal supplied as a [`Stream`]. Solutions are not trajectories
//! but lazy evaluators: a [`Stream`] keyed on `t` that extends integration
//! from its last anchor on every query.
//!
//! # Available Methods
//!
//! | Method | Order | Type | Best For |
//! |--------|-------|------|----------|
//! | [`Euler`] | 1 | Fixed step | Reference results, bootstrapping |
//! | [`Rk4`] | 4 | Fixed step | Smooth problems, tiny-interval fallback |
//! | [`Dopri5`] | 5(4) | Adaptive | General purpose (default) |
//!
//! # Usage
//!
//! [`dsolve`] and [`dsolve_simple`] are the main entry points; both run
//! Dormand-Prince 5(4) under the default [`StepControl`].
//!
//! ```ignore
//! use odestream::integrate::dsolve_simple;
//!
//! // Solve dy/dt = y, y(0) = 1, and evaluate at a few points.
//! let y = dsolve_simple(|_t, y: &f64| *y, 0.0, 1.0);
//! let (e, y) = y.query(1.0);
//! assert!((e - 1.0_f64.exp()).abs() < 1e-12);
//! let (e2, _) = y.query(2.0); // continues from t = 1
//! ```
//!
//! Numerical failure never surfaces as a `Result`: a NaN anywhere in the
//! integration state, or an adaptive step rejected past its retry budget,
//! switches the solution to an infinite stream of NaN vectors.

mod control;
mod dopri5;
mod euler;
mod limits;
mod rk4;
mod solve;

pub use control::StepControl;
pub use dopri5::{dopri5, dopri5h};
pub use euler::euler;
pub use limits::{
    converge, lim2_integrate, lim_inf, lim_integrate, lim_ninfty, lim_pinfty, lim_sup,
};
pub use rk4::rk4;
pub use solve::{
    dsolve, dsolve_simple, integrate, integrate_simple, line_integral, lines_integral,
    path_integral, poly_integral, residue, residue_circ, residue_square, solve_simple, Dopri5,
    Euler, Rk4,
};

use std::rc::Rc;

use crate::stream::Stream;
use crate::vector::Vector;

/// A right-hand side `(t, x, y) -> dy/dt`.
///
/// Shared (`Rc`) so that every successor stream produced during lazy
/// evaluation can re-invoke it.
pub type Integrand<X, Y> = Rc<dyn Fn(f64, &X, &Y) -> Y>;

/// An initial-value solver producing a lazy solution stream.
///
/// `xs` is the auxiliary driving signal, queried by the solver at whatever
/// sub-step times its method requires. Integrands that need no signal go
/// through [`solve_simple`] instead, which supplies `X = ()`.
pub trait Integrator<X, Y: Vector> {
    fn solve(&self, f: Integrand<X, Y>, t0: f64, xs: Stream<f64, X>, y0: Y) -> Stream<f64, Y>;
}

/// The infinite stream of NaN vectors: the solvers' failure value.
pub(crate) fn nan_stream<Y: Vector>() -> Stream<f64, Y> {
    Stream::constant(Y::from_real(f64::NAN))
}
