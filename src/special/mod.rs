//! Special and elementary functions defined as ODE initial-value problems.
//!
//! Every function here is an ODE recipe: a right-hand side, an initial
//! condition, and a projection, solved lazily by the adaptive integrator
//! under its default tolerances. Functions of one variable come back as
//! solution [`Stream`](crate::stream::Stream)s — query them at the
//! argument — while functions with a parameter inside the integrand
//! (`gamma`, `polygamma`, the Bessel integral representations) evaluate to
//! plain values.
//!
//! # Catalogue
//!
//! | Module | Functions |
//! |--------|-----------|
//! | [`elementary`] | exp, log, sin, cos, tan, atan, sinh, cosh, sqrt |
//! | [`expint`] | sinc, si, cin, chin, ein |
//! | [`erf`] | erf, erfc, fresnel_c, fresnel_s |
//! | [`gamma`] | gamma, polygamma |
//! | [`bessel`] | bessel, bessel_j, bessel_y, integral representations, airy_ai, airy_bi |
//! | [`elliptic`] | elliptic_k, elliptic_e |
//!
//! Right-hand sides that are 0/0-indeterminate at `t = 0` branch on
//! `t == 0.0` exactly and return the analytic limit; the branch is part of
//! each recipe's contract, not error handling.

pub mod bessel;
pub mod elementary;
pub mod elliptic;
pub mod erf;
pub mod expint;
pub mod gamma;

pub use bessel::{
    airy_ai, airy_bi, bessel, bessel_j, bessel_j_integral, bessel_y, bessel_y_integral,
};
pub use elementary::{atan, cos, cosh, exp, log, sin, sinh, sqrt, tan};
pub use elliptic::{elliptic_e, elliptic_k};
pub use erf::{erf, erfc, fresnel_c, fresnel_s};
pub use expint::{chin, cin, ein, si, sinc};
pub use gamma::{gamma, polygamma};

use num_complex::Complex64;

use crate::integrate::residue;

/// π recovered from the contour integral `∮ dz/z = 2πi` around the origin.
pub fn pi() -> f64 {
    residue(|z| z.inv(), Complex64::new(0.0, 0.0), 1.0).im / 2.0
}
