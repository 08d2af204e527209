//! Gamma and polygamma functions via improper integrals.

use crate::integrate::{lim2_integrate, lim_inf, lim_pinfty};

/// `Γ(z)` for z > 0, from `∫₀^∞ t^{z-1} e^{-t} dt`.
///
/// Both endpoints are improper (the origin is singular for z < 1), so the
/// integral runs two-sided from 1 along limit sequences toward 0 and ∞.
pub fn gamma(z: f64) -> f64 {
    lim2_integrate(
        move |t| t.powf(z - 1.0) * (-t).exp(),
        1.0,
        lim_inf(0.0, 1.0),
        lim_pinfty(1.0),
    )
}

/// `ψ⁽ᵐ⁾(z)` for m ≥ 1 and z > 0, from
/// `(-1)^{m+1} ∫₀^∞ tᵐ e^{-zt}/(1 - e^{-t}) dt`.
///
/// The integrand's limit at the origin is 1 for m = 1 and 0 otherwise.
/// Panics on m = 0: the representation diverges there.
pub fn polygamma(m: u32, z: f64) -> f64 {
    assert!(m >= 1, "polygamma: the integral representation requires m >= 1");
    let sign = if m % 2 == 1 { 1.0 } else { -1.0 };
    sign * lim2_integrate(
        move |t| {
            if t == 0.0 {
                if m == 1 {
                    1.0
                } else {
                    0.0
                }
            } else {
                t.powi(m as i32) * (-z * t).exp() / (1.0 - (-t).exp())
            }
        },
        1.0,
        lim_inf(0.0, 1.0),
        lim_pinfty(1.0),
    )
}
