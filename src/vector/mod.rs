//! Scalar fields and the vector algebra consumed by the integrators.
//!
//! The solvers in [`crate::integrate`] are written against two small traits
//! rather than a concrete numeric type:
//!
//! - [`Scalar`] is the field a state vector is built from. It is implemented
//!   for `f64` and [`Complex64`], and carries the one asymmetry the solvers
//!   need: the independent variable `t` is always a real `f64`, so every
//!   scalar must be constructible from a real via [`Scalar::from_real`].
//! - [`Vector`] is the element-wise algebra over a carrier built from a
//!   scalar field: broadcasting, zipping, folding, fused perturbation
//!   (`y + h·dy`) and the weighted norms the step controller uses.
//!
//! Coupled systems pack their components into fixed-size arrays: `[S; N]`
//! implements [`Vector`] for any scalar field `S`, so a two-component
//! oscillator is simply a `[f64; 2]` state and a complex path integral a
//! `[Complex64; 2]` state.

use std::fmt::Debug;
use std::ops::{Div, Neg, Sub};

use num_complex::Complex64;
use num_traits::{One, Zero};

/// A scalar field usable as the component type of an ODE state vector.
///
/// `Zero`/`One` (from `num-traits`) bring the additive and multiplicative
/// structure; the remaining methods cover coercion from the real time axis,
/// magnitudes for norms, and a fused multiply-add against a real factor.
pub trait Scalar:
    Copy
    + PartialEq
    + Debug
    + Zero
    + One
    + Sub<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Embed a real number into the field.
    fn from_real(x: f64) -> Self;

    /// Absolute value (complex modulus).
    fn modulus(self) -> f64;

    /// True if any underlying component is NaN.
    fn is_nan(self) -> bool;

    /// Fused `self * h + b` with a real factor `h`.
    fn mul_add_real(self, h: f64, b: Self) -> Self;
}

impl Scalar for f64 {
    fn from_real(x: f64) -> Self {
        x
    }

    fn modulus(self) -> f64 {
        self.abs()
    }

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    fn mul_add_real(self, h: f64, b: Self) -> Self {
        self.mul_add(h, b)
    }
}

impl Scalar for Complex64 {
    fn from_real(x: f64) -> Self {
        Complex64::new(x, 0.0)
    }

    fn modulus(self) -> f64 {
        self.norm()
    }

    fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    fn mul_add_real(self, h: f64, b: Self) -> Self {
        Complex64::new(self.re.mul_add(h, b.re), self.im.mul_add(h, b.im))
    }
}

/// Element-wise vector algebra over a scalar field.
///
/// Only `broadcast`, `len`, `map`, `zip_with` and `fold` are required; the
/// arithmetic the integrators use is provided on top of them. Butcher
/// weights and step sizes are real `f64` values throughout, so the provided
/// combinators take real factors and coerce via [`Scalar::from_real`].
pub trait Vector: Clone + Debug + 'static {
    type Scalar: Scalar;

    /// Fill every component with the same scalar.
    fn broadcast(s: Self::Scalar) -> Self;

    /// Number of components.
    fn len(&self) -> usize;

    /// Apply `f` to every component.
    fn map(&self, f: impl FnMut(Self::Scalar) -> Self::Scalar) -> Self;

    /// Combine two vectors component by component.
    fn zip_with(
        &self,
        other: &Self,
        f: impl FnMut(Self::Scalar, Self::Scalar) -> Self::Scalar,
    ) -> Self;

    /// Fold the components into a real accumulator.
    fn fold(&self, init: f64, f: impl FnMut(f64, Self::Scalar) -> f64) -> f64;

    /// The additive identity.
    fn zero() -> Self {
        Self::broadcast(Self::Scalar::zero())
    }

    /// Broadcast a real number into every component.
    fn from_real(x: f64) -> Self {
        Self::broadcast(Self::Scalar::from_real(x))
    }

    fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise product.
    fn hadamard(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a * b)
    }

    /// Scale by a field scalar.
    fn scale(&self, s: Self::Scalar) -> Self {
        self.map(|a| a * s)
    }

    /// Scale by a real factor.
    fn scale_real(&self, h: f64) -> Self {
        self.scale(Self::Scalar::from_real(h))
    }

    /// Fused `self + h·d`.
    fn perturb(&self, d: &Self, h: f64) -> Self {
        self.zip_with(d, |a, da| da.mul_add_real(h, a))
    }

    /// `Σ weights[i] · vs[i]` with real weights.
    ///
    /// Panics if the lists are empty or of different lengths.
    fn linear_comb(weights: &[f64], vs: &[&Self]) -> Self {
        assert!(
            !vs.is_empty() && weights.len() == vs.len(),
            "linear_comb: weights and vectors must be non-empty and of equal length"
        );
        let mut acc = vs[0].scale_real(weights[0]);
        for (&w, v) in weights[1..].iter().zip(&vs[1..]) {
            acc = acc.zip_with(v, |a, b| b.mul_add_real(w, a));
        }
        acc
    }

    /// Sum of component magnitudes.
    fn norm1(&self) -> f64 {
        self.fold(0.0, |acc, s| acc + s.modulus())
    }

    /// Root-mean-square of component magnitudes.
    fn mean2(&self) -> f64 {
        let sum_sq = self.fold(0.0, |acc, s| {
            let m = s.modulus();
            acc + m * m
        });
        (sum_sq / self.len() as f64).sqrt()
    }

    /// True if any component is NaN.
    fn has_nan(&self) -> bool {
        self.norm1().is_nan()
    }
}

impl Vector for f64 {
    type Scalar = f64;

    fn broadcast(s: f64) -> Self {
        s
    }

    fn len(&self) -> usize {
        1
    }

    fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        f(*self)
    }

    fn zip_with(&self, other: &Self, mut f: impl FnMut(f64, f64) -> f64) -> Self {
        f(*self, *other)
    }

    fn fold(&self, init: f64, mut f: impl FnMut(f64, f64) -> f64) -> f64 {
        f(init, *self)
    }
}

impl Vector for Complex64 {
    type Scalar = Complex64;

    fn broadcast(s: Complex64) -> Self {
        s
    }

    fn len(&self) -> usize {
        1
    }

    fn map(&self, mut f: impl FnMut(Complex64) -> Complex64) -> Self {
        f(*self)
    }

    fn zip_with(&self, other: &Self, mut f: impl FnMut(Complex64, Complex64) -> Complex64) -> Self {
        f(*self, *other)
    }

    fn fold(&self, init: f64, mut f: impl FnMut(f64, Complex64) -> f64) -> f64 {
        f(init, *self)
    }
}

impl<S: Scalar, const N: usize> Vector for [S; N] {
    type Scalar = S;

    fn broadcast(s: S) -> Self {
        [s; N]
    }

    fn len(&self) -> usize {
        N
    }

    fn map(&self, mut f: impl FnMut(S) -> S) -> Self {
        let mut out = *self;
        for v in &mut out {
            *v = f(*v);
        }
        out
    }

    fn zip_with(&self, other: &Self, mut f: impl FnMut(S, S) -> S) -> Self {
        let mut out = *self;
        for (v, o) in out.iter_mut().zip(other) {
            *v = f(*v, *o);
        }
        out
    }

    fn fold(&self, init: f64, mut f: impl FnMut(f64, S) -> f64) -> f64 {
        self.iter().fold(init, |acc, &s| f(acc, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perturb_is_fused() {
        // 3.0 + 0.1 * 2.0 via mul_add
        let y = 3.0_f64;
        let dy = 2.0_f64;
        assert_eq!(y.perturb(&dy, 0.1), 2.0_f64.mul_add(0.1, 3.0));
    }

    #[test]
    fn test_array_arithmetic() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(a.add(&b), [5.0, 7.0, 9.0]);
        assert_eq!(b.sub(&a), [3.0, 3.0, 3.0]);
        assert_eq!(a.hadamard(&b), [4.0, 10.0, 18.0]);
        assert_eq!(a.scale_real(2.0), [2.0, 4.0, 6.0]);
        assert_eq!(<[f64; 3]>::zero(), [0.0; 3]);
    }

    #[test]
    fn test_linear_comb() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        let c = <[f64; 2]>::linear_comb(&[2.0, 3.0], &[&a, &b]);
        assert_eq!(c, [2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "linear_comb")]
    fn test_linear_comb_empty_panics() {
        let _ = <[f64; 2]>::linear_comb(&[], &[]);
    }

    #[test]
    fn test_norms() {
        let v = [3.0, -4.0];
        assert_eq!(v.norm1(), 7.0);
        // rms of (3, 4) = sqrt(25 / 2)
        assert_eq!(v.mean2(), (25.0_f64 / 2.0).sqrt());
    }

    #[test]
    fn test_complex_modulus_norms() {
        let v: [Complex64; 2] = [Complex64::new(3.0, 4.0), Complex64::new(0.0, 1.0)];
        assert_eq!(v.norm1(), 6.0);
        assert!(Complex64::new(f64::NAN, 0.0).is_nan());
        assert!([Complex64::new(0.0, f64::NAN)].has_nan());
    }

    #[test]
    fn test_from_real_broadcast() {
        let v = <[Complex64; 2]>::from_real(2.5);
        assert_eq!(v, [Complex64::new(2.5, 0.0); 2]);
    }
}
