//! Tolerance and step-clipping policy for the adaptive solver.

use crate::vector::{Scalar, Vector};

/// Lower clamp on step-size growth factors.
const FAC_MIN: f64 = 0.1;
/// Upper clamp on the first-try growth factor.
const FAC_MAX: f64 = 5.0;
/// Upper clamp once a step has been rejected: retries may only shrink.
const FAC_MAX_RETRY: f64 = 1.0;
/// Minimum-progress floor: |h| is kept above this many ulps of t.
const STEP_FLOOR_ULPS: f64 = 10.0;

/// Tolerances and step-size clamps for [`crate::integrate::Dopri5`].
///
/// `atol` and `rtol` are component-wise vectors over the state carrier.
/// Defaults put both at a broadcast `1e-16` — machine precision; relax them
/// for performance on expensive right-hand sides.
#[derive(Debug, Clone)]
pub struct StepControl<V: Vector> {
    /// Absolute tolerance per component.
    pub atol: V,
    /// Relative tolerance per component.
    pub rtol: V,
    fac_min: f64,
    fac_max: f64,
}

impl<V: Vector> Default for StepControl<V> {
    fn default() -> Self {
        Self {
            atol: V::from_real(1e-16),
            rtol: V::from_real(1e-16),
            fac_min: FAC_MIN,
            fac_max: FAC_MAX,
        }
    }
}

impl<V: Vector> StepControl<V> {
    /// Create a control with uniform tolerances.
    pub fn with_tolerances(atol: f64, rtol: f64) -> Self {
        Self {
            atol: V::from_real(atol),
            rtol: V::from_real(rtol),
            ..Default::default()
        }
    }

    /// Set component-wise tolerance vectors.
    pub fn tolerances(mut self, atol: V, rtol: V) -> Self {
        self.atol = atol;
        self.rtol = rtol;
        self
    }

    /// Clamp a first-try step-size factor.
    pub fn clip_fac(&self, fac: f64) -> f64 {
        fac.clamp(self.fac_min, self.fac_max)
    }

    /// Clamp a step-size factor after a rejection: growth is forbidden.
    pub fn clip_fac_retry(&self, fac: f64) -> f64 {
        fac.clamp(self.fac_min, FAC_MAX_RETRY)
    }

    /// Floor |h| at the minimum progress representable around `t`.
    pub fn clip_step(&self, t: f64, h: f64) -> f64 {
        let floor = STEP_FLOOR_ULPS * ulp(t);
        if h.abs() < floor {
            floor.copysign(h)
        } else {
            h
        }
    }
}

/// Weighted RMS error norm of `dy` against the accepted/candidate pair.
///
/// Per component the scale is `atol + rtol * max(|y1|, |y7|)`; the norm is
/// the root-mean-square of `|dy| / scale`.
pub(crate) fn error_norm<V: Vector>(control: &StepControl<V>, y1: &V, y7: &V, dy: &V) -> f64 {
    let bound = y1.zip_with(y7, |a, b| V::Scalar::from_real(a.modulus().max(b.modulus())));
    let sc = control.atol.add(&control.rtol.hadamard(&bound));
    dy.zip_with(&sc, |d, s| V::Scalar::from_real(d.modulus() / s.modulus()))
        .mean2()
}

/// Weighted RMS norm of `v` against the scale `atol + rtol * |y0|`.
pub(crate) fn weighted_norm<V: Vector>(control: &StepControl<V>, y0: &V, v: &V) -> f64 {
    let mag = y0.map(|s| V::Scalar::from_real(s.modulus()));
    let sc = control.atol.add(&control.rtol.hadamard(&mag));
    v.zip_with(&sc, |a, s| V::Scalar::from_real(a.modulus() / s.modulus()))
        .mean2()
}

/// The next representable value after `x` toward `y`.
///
/// `x == y` returns `y`; a NaN in either argument returns NaN. Overflow to
/// infinity and subnormals get no special handling.
fn next_after(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        f64::NAN
    } else if x == y {
        y
    } else if x == 0.0 {
        if y < 0.0 {
            -f64::from_bits(1)
        } else {
            f64::from_bits(1)
        }
    } else if (y > x) == (x > 0.0) {
        f64::from_bits(x.to_bits().wrapping_add(1))
    } else {
        f64::from_bits(x.to_bits().wrapping_sub(1))
    }
}

/// Distance from `t` to the next representable value above it.
pub(crate) fn ulp(t: f64) -> f64 {
    (next_after(t, f64::INFINITY) - t).abs()
}
