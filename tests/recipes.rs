//! End-to-end scenarios across the solver stack and function catalogue.

use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, PI};
use std::rc::Rc;

use approx::assert_relative_eq;
use num_complex::Complex64;

use odestream::integrate::{
    dsolve, dsolve_simple, integrate_simple, residue_circ, residue_square, solve_simple, Dopri5,
    Euler, Integrand, Integrator, Rk4,
};
use odestream::special;
use odestream::stream::Stream;

#[test]
fn anchor_identity_holds_for_every_integrator() {
    let f: Integrand<(), f64> = Rc::new(|_t, _x, y| *y);
    let t0 = 0.25;
    let y0 = 3.0;
    for s in [
        Euler { h: 0.1 }.solve(Rc::clone(&f), t0, Stream::constant(()), y0),
        Rk4 { h: 0.1 }.solve(Rc::clone(&f), t0, Stream::constant(()), y0),
        Dopri5::default().solve(Rc::clone(&f), t0, Stream::constant(()), y0),
    ] {
        assert_eq!(s.get(t0), y0);
    }
}

#[test]
fn monotone_queries_agree_with_direct_query() {
    let solution = |t: f64| (t * t / 2.0).exp();
    let stepped = dsolve_simple(|t, y: &f64| t * *y, 0.0, 1.0);
    let (v1, stepped) = stepped.query(0.5);
    let (v2, _) = stepped.query(1.5);
    let direct = dsolve_simple(|t, y: &f64| t * *y, 0.0, 1.0).get(1.5);
    assert_relative_eq!(v1, solution(0.5), max_relative = 1e-11);
    assert_relative_eq!(v2, direct, max_relative = 1e-11);
    assert_relative_eq!(v2, solution(1.5), max_relative = 1e-11);
}

#[test]
fn simple_adapter_equals_explicit_unit_signal() {
    let i = Dopri5::default();
    let a = solve_simple(&i, |t, y: &f64| t + *y, 0.0, 1.0).get(2.0);
    let g: Integrand<(), f64> = Rc::new(|t, _x, y| t + *y);
    let b = dsolve(g, 0.0, Stream::constant(()), 1.0).get(2.0);
    assert_eq!(a, b);
}

#[test]
fn successor_requery_agrees_with_original() {
    let s = dsolve_simple(|_t, y: &f64| -*y, 0.0, 1.0);
    let (v1, s1) = s.query(0.7);
    let v2 = s1.get(0.7);
    let v3 = s.get(0.7);
    assert_relative_eq!(v1, v2, max_relative = 1e-12);
    assert_eq!(v1, v3);
}

#[test]
fn exp_at_one() {
    assert_relative_eq!(special::exp().get(1.0), E, max_relative = 1e-12);
}

#[test]
fn sin_and_cos_at_quarter_and_half_turn() {
    assert_relative_eq!(special::sin().get(FRAC_PI_2), 1.0, max_relative = 1e-12);
    assert_relative_eq!(special::cos().get(PI), -1.0, max_relative = 1e-12);
}

#[test]
fn log_at_computed_e() {
    let e = special::exp().get(1.0);
    assert_relative_eq!(special::log().get(e), 1.0, max_relative = 1e-12);
}

#[test]
fn erf_at_one() {
    assert_relative_eq!(
        special::erf().get(1.0),
        0.842_700_792_949_714_9,
        max_relative = 1e-12
    );
}

#[test]
fn residue_loops_agree_on_simple_pole() {
    let sq = residue_square(|z| z.inv(), Complex64::new(0.0, 0.0), 1.0);
    let ci = residue_circ(|z| z.inv(), Complex64::new(0.0, 0.0), 1.0);
    assert_relative_eq!(sq.im, 2.0 * PI, max_relative = 1e-9);
    assert_relative_eq!(ci.im, 2.0 * PI, max_relative = 1e-9);
    assert_relative_eq!(sq.re, 0.0, epsilon = 1e-9);
    assert_relative_eq!(ci.re, 0.0, epsilon = 1e-9);
    assert_relative_eq!(special::pi(), PI, max_relative = 1e-9);
}

#[test]
fn residue_loops_agree_at_other_radii() {
    for r in [0.5, 3.0] {
        let sq = residue_square(|z| z.inv(), Complex64::new(0.0, 0.0), r);
        let ci = residue_circ(|z| z.inv(), Complex64::new(0.0, 0.0), r);
        assert_relative_eq!(sq.im, ci.im, max_relative = 1e-8);
    }
}

#[test]
fn definite_integrals() {
    assert_relative_eq!(
        integrate_simple(|x| x * x, 0.0, 1.0),
        1.0 / 3.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        integrate_simple(|x| 1.0 / (1.0 + x * x), 0.0, 1.0),
        FRAC_PI_4,
        max_relative = 1e-12
    );
}

#[test]
fn fixed_step_solvers_approach_adaptive_answer() {
    let exact = E;
    let euler = solve_simple(&Euler { h: 1e-5 }, |_t, y: &f64| *y, 0.0, 1.0).get(1.0);
    let rk4 = solve_simple(&Rk4 { h: 1e-2 }, |_t, y: &f64| *y, 0.0, 1.0).get(1.0);
    let dopri = dsolve_simple(|_t, y: &f64| *y, 0.0, 1.0).get(1.0);
    assert_relative_eq!(euler, exact, max_relative = 1e-4);
    assert_relative_eq!(rk4, exact, max_relative = 1e-9);
    assert_relative_eq!(dopri, exact, max_relative = 1e-12);
}

#[test]
fn nan_integrand_yields_nan_stream_everywhere() {
    let s = dsolve_simple(|_t, _y: &f64| f64::NAN, 0.0, 1.0);
    let (v, rest) = s.query(1.0);
    assert!(v.is_nan());
    assert!(rest.get(5.0).is_nan());
}
