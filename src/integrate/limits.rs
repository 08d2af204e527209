//! Limit sequences and convergence scanning for improper integrals.
//!
//! Semi-infinite and singular-endpoint integrals are evaluated by sampling
//! an integral's solution stream along a sequence tending to the limit
//! point and stopping once consecutive samples agree to machine precision.

use super::solve::dsolve_simple;

/// Samples inspected before [`converge`] settles for the last finite value.
const MAX_SAMPLES: usize = 100;

/// The sequence `x + x0·e^{-k}`, approaching `x` from above.
pub fn lim_inf(x: f64, x0: f64) -> impl Iterator<Item = f64> {
    (0..).map(move |k| x + x0 * (-(k as f64)).exp())
}

/// The sequence `x - x0·e^{-k}`, approaching `x` from below.
pub fn lim_sup(x: f64, x0: f64) -> impl Iterator<Item = f64> {
    (0..).map(move |k| x - x0 * (-(k as f64)).exp())
}

/// The sequence `x0·e^k`, tending to `+∞`.
pub fn lim_pinfty(x0: f64) -> impl Iterator<Item = f64> {
    (0..).map(move |k| x0 * (k as f64).exp())
}

/// The sequence `-x0·e^k`, tending to `-∞`.
pub fn lim_ninfty(x0: f64) -> impl Iterator<Item = f64> {
    (0..).map(move |k| -x0 * (k as f64).exp())
}

/// Scan a sequence for convergence.
///
/// Inspects at most 100 elements, dropping NaNs. Returns the first element
/// that agrees with its predecessor to machine precision, or the last
/// finite element seen if the budget runs out. An all-NaN prefix yields
/// NaN.
pub fn converge(xs: impl IntoIterator<Item = f64>) -> f64 {
    let mut last = f64::NAN;
    for x in xs.into_iter().take(MAX_SAMPLES) {
        if x.is_nan() {
            continue;
        }
        if !last.is_nan() && agrees(last, x) {
            return x;
        }
        last = x;
    }
    last
}

fn agrees(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= f64::EPSILON * b.abs()
}

/// Integrate `f` from `a` outward, sampling the solution stream along
/// `seq` and converging.
pub fn lim_integrate(
    f: impl Fn(f64) -> f64 + 'static,
    a: f64,
    seq: impl IntoIterator<Item = f64>,
) -> f64 {
    let mut s = dsolve_simple(move |t, _y: &f64| f(t), a, 0.0);
    converge(seq.into_iter().take(MAX_SAMPLES).map(move |t| {
        let (v, next) = s.query(t);
        s = next;
        v
    }))
}

/// Two-sided improper integral: integrate `f` from `a` toward both limit
/// sequences and combine.
///
/// Returns `F(hi) - F(lo)` where `F(x) = ∫ₐˣ f`, each endpoint obtained by
/// [`converge`] along its sequence.
pub fn lim2_integrate(
    f: impl Fn(f64) -> f64 + 'static,
    a: f64,
    lo: impl IntoIterator<Item = f64>,
    hi: impl IntoIterator<Item = f64>,
) -> f64 {
    let f = std::rc::Rc::new(f);
    let fu = std::rc::Rc::clone(&f);
    let upper = lim_integrate(move |t| fu(t), a, hi);
    let lower = lim_integrate(move |t| f(t), a, lo);
    upper - lower
}
