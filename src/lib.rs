//! Lazy solvers for ordinary differential equations, and a catalogue of
//! mathematical functions defined by them.
//!
//! `odestream` solves initial value problems dy/dt = f(t, x(t), y),
//! y(t0) = y0, where `y` ranges over an abstract vector algebra (real,
//! complex, or fixed-size arrays of either) and `x(t)` is an optional
//! auxiliary driving signal. Solutions are *lazy evaluators*: a
//! [`Stream`] queried at advancing `t` extends the integration from its
//! last anchor rather than restarting it.
//!
//! # Modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`vector`] | Scalar fields and element-wise vector algebra |
//! | [`stream`] | The lazy query stream carrying integrator state |
//! | [`integrate`] | Euler, RK4 and adaptive Dormand-Prince 5(4) solvers, definite/path/residue integrals, limit helpers |
//! | [`special`] | Elementary and special functions as ODE recipes |
//!
//! # Example
//!
//! ```ignore
//! use odestream::integrate::dsolve_simple;
//! use odestream::special;
//!
//! // An IVP of your own…
//! let y = dsolve_simple(|t, y: &f64| t * *y, 0.0, 1.0);
//! assert!((y.get(1.0) - 0.5_f64.exp()).abs() < 1e-12);
//!
//! // …or a function from the catalogue.
//! assert!((special::erf().get(1.0) - 0.8427007929497149).abs() < 1e-12);
//! ```
//!
//! All arithmetic is IEEE 754 binary64. There is no recoverable error
//! type: numerical failure propagates as NaN (an infinite NaN-vector
//! stream), and API misuse panics.

pub mod integrate;
pub mod special;
pub mod stream;
pub mod vector;

pub use integrate::{dsolve, dsolve_simple, Integrand, Integrator, StepControl};
pub use stream::Stream;
pub use vector::{Scalar, Vector};
