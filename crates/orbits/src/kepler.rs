//! Unperturbed two-body propagation using Lagrange coefficients in universal variables.
//!
//! The formulation covers elliptic, parabolic and hyperbolic arcs with a single
//! Newton iteration on the universal anomaly, with Stumpff functions c2/c3.

use std::f64::consts::PI;

use log::warn;
use sf_core::vector::{self, Vector3};

const MAX_ITERATIONS: usize = 100;
const TOLERANCE: f64 = 1e-14;
// Below this |alpha * r0| the orbit is treated as parabolic.
const PARABOLIC_THRESHOLD: f64 = 1e-12;

/// Advance `position`/`velocity` by `dt` seconds of Keplerian motion about a body with
/// gravitational parameter `mu`. A negative `dt` propagates backwards in time.
///
/// Units only need to be consistent (e.g. m, m/s, m³/s² or km, km/s, km³/s²).
/// `mu` must be strictly positive; a zero `dt` leaves the state untouched.
pub fn propagate_lagrangian(position: &mut Vector3, velocity: &mut Vector3, dt: f64, mu: f64) {
    if dt == 0.0 {
        return;
    }

    let r0 = vector::norm(position);
    let v0_sq = vector::dot(velocity, velocity);
    let sqrt_mu = mu.sqrt();
    let sigma0 = vector::dot(position, velocity) / sqrt_mu;
    // Reciprocal semi-major axis; positive for ellipses, negative for hyperbolas.
    let alpha = 2.0 / r0 - v0_sq / mu;

    let dt = if alpha * r0 > PARABOLIC_THRESHOLD {
        // Whole revolutions are dropped so the iteration only covers a fraction of an orbit.
        let period = 2.0 * PI / (alpha * alpha * alpha * mu).sqrt();
        dt % period
    } else {
        dt
    };
    if dt == 0.0 {
        return;
    }

    let mut chi = initial_guess(r0, sigma0, alpha, dt, mu);
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let chi2 = chi * chi;
        let psi = alpha * chi2;
        let (c2, c3) = stumpff_c2c3(psi);

        let r = chi2 * c2 + sigma0 * chi * (1.0 - psi * c3) + r0 * (1.0 - psi * c2);
        let residual =
            r0 * chi * (1.0 - psi * c3) + sigma0 * chi2 * c2 + chi2 * chi * c3 - sqrt_mu * dt;

        let delta = residual / r;
        chi -= delta;

        if delta.abs() <= TOLERANCE * chi.abs() || delta == 0.0 {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!("kepler iteration did not converge (dt = {dt} s, alpha = {alpha:e})");
    }

    let chi2 = chi * chi;
    let psi = alpha * chi2;
    let (c2, c3) = stumpff_c2c3(psi);
    let r = chi2 * c2 + sigma0 * chi * (1.0 - psi * c3) + r0 * (1.0 - psi * c2);

    let f = 1.0 - chi2 / r0 * c2;
    let g = dt - chi2 * chi / sqrt_mu * c3;
    let f_dot = sqrt_mu / (r * r0) * chi * (psi * c3 - 1.0);
    let g_dot = 1.0 - chi2 / r * c2;

    let r_vec = *position;
    let v_vec = *velocity;
    for axis in 0..3 {
        position[axis] = f * r_vec[axis] + g * v_vec[axis];
        velocity[axis] = f_dot * r_vec[axis] + g_dot * v_vec[axis];
    }
}

fn initial_guess(r0: f64, sigma0: f64, alpha: f64, dt: f64, mu: f64) -> f64 {
    let sqrt_mu = mu.sqrt();
    if alpha * r0 > PARABOLIC_THRESHOLD {
        return sqrt_mu * dt * alpha;
    }
    if alpha * r0 < -PARABOLIC_THRESHOLD {
        let a = 1.0 / alpha;
        let sign_dt = dt.signum();
        let rdotv = sigma0 * sqrt_mu;
        let argument =
            (-2.0 * mu * alpha * dt) / (rdotv + sign_dt * (-mu * a).sqrt() * (1.0 - r0 * alpha));
        if argument.is_finite() && argument > 0.0 {
            return sign_dt * (-a).sqrt() * argument.ln();
        }
    }
    sqrt_mu * dt / r0
}

/// Stumpff functions c2(psi) and c3(psi).
fn stumpff_c2c3(psi: f64) -> (f64, f64) {
    if psi > 1e-6 {
        let sqrt_psi = psi.sqrt();
        let c2 = (1.0 - sqrt_psi.cos()) / psi;
        let c3 = (sqrt_psi - sqrt_psi.sin()) / (psi * sqrt_psi);
        (c2, c3)
    } else if psi < -1e-6 {
        let sqrt_neg_psi = (-psi).sqrt();
        let c2 = (1.0 - sqrt_neg_psi.cosh()) / psi;
        let c3 = (sqrt_neg_psi.sinh() - sqrt_neg_psi) / ((-psi) * sqrt_neg_psi);
        (c2, c3)
    } else {
        let c2 = 1.0 / 2.0 - psi / 24.0 + psi * psi / 720.0;
        let c3 = 1.0 / 6.0 - psi / 120.0 + psi * psi / 5040.0;
        (c2, c3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use sf_core::constants::{AU_KM, MU_SUN_KM3_S2};

    use crate::{circular_speed, orbital_period};

    fn energy(r: &Vector3, v: &Vector3, mu: f64) -> f64 {
        0.5 * vector::dot(v, v) - mu / vector::norm(r)
    }

    fn angular_momentum(r: &Vector3, v: &Vector3) -> Vector3 {
        [
            r[1] * v[2] - r[2] * v[1],
            r[2] * v[0] - r[0] * v[2],
            r[0] * v[1] - r[1] * v[0],
        ]
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut r = [AU_KM, 0.0, 0.0];
        let mut v = [0.0, 29.78, 0.0];
        propagate_lagrangian(&mut r, &mut v, 0.0, MU_SUN_KM3_S2);
        assert_eq!(r, [AU_KM, 0.0, 0.0]);
        assert_eq!(v, [0.0, 29.78, 0.0]);
    }

    #[test]
    fn circular_quarter_orbit_lands_on_y_axis() {
        let speed = circular_speed(MU_SUN_KM3_S2, AU_KM);
        let period = orbital_period(MU_SUN_KM3_S2, AU_KM);
        let mut r = [AU_KM, 0.0, 0.0];
        let mut v = [0.0, speed, 0.0];
        propagate_lagrangian(&mut r, &mut v, period / 4.0, MU_SUN_KM3_S2);

        assert_abs_diff_eq!(r[0], 0.0, epsilon = 1e-3);
        assert_relative_eq!(r[1], AU_KM, max_relative = 1e-12);
        assert_relative_eq!(v[0], -speed, max_relative = 1e-12);
        assert_abs_diff_eq!(v[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn multi_revolution_matches_fractional_propagation() {
        let speed = circular_speed(MU_SUN_KM3_S2, AU_KM) * 1.1;
        let mut r_long = [AU_KM, 0.0, 0.0];
        let mut v_long = [0.0, speed, 0.0];
        let mut r_short = r_long;
        let mut v_short = v_long;

        let alpha = 2.0 / AU_KM - speed * speed / MU_SUN_KM3_S2;
        let period = orbital_period(MU_SUN_KM3_S2, 1.0 / alpha);
        let dt = 0.3 * period;

        propagate_lagrangian(&mut r_long, &mut v_long, dt + 3.0 * period, MU_SUN_KM3_S2);
        propagate_lagrangian(&mut r_short, &mut v_short, dt, MU_SUN_KM3_S2);

        for axis in 0..3 {
            assert_abs_diff_eq!(r_long[axis], r_short[axis], epsilon = 1.0);
            assert_abs_diff_eq!(v_long[axis], v_short[axis], epsilon = 1e-7);
        }
    }

    #[test]
    fn forward_then_backward_returns_to_start() {
        let r_start = [1.2 * AU_KM, -0.1 * AU_KM, 0.05 * AU_KM];
        let v_start = [3.0, 27.0, 1.5];
        let mut r = r_start;
        let mut v = v_start;
        let dt = 123.0 * 86_400.0;

        propagate_lagrangian(&mut r, &mut v, dt, MU_SUN_KM3_S2);
        propagate_lagrangian(&mut r, &mut v, -dt, MU_SUN_KM3_S2);

        for axis in 0..3 {
            assert_relative_eq!(r[axis], r_start[axis], epsilon = 1e-2, max_relative = 1e-9);
            assert_relative_eq!(v[axis], v_start[axis], epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn hyperbolic_arc_conserves_energy_and_momentum() {
        let mu = 398_600.4418;
        let mut r = [7_000.0, 0.0, 0.0];
        let mut v = [0.0, 12.0, 1.0];
        let e0 = energy(&r, &v, mu);
        let h0 = angular_momentum(&r, &v);
        assert!(e0 > 0.0);

        propagate_lagrangian(&mut r, &mut v, 20_000.0, mu);

        assert_relative_eq!(energy(&r, &v, mu), e0, max_relative = 1e-9);
        let h1 = angular_momentum(&r, &v);
        for axis in 0..3 {
            assert_relative_eq!(h1[axis], h0[axis], epsilon = 1e-6, max_relative = 1e-9);
        }
        assert!(vector::norm(&r) > 7_000.0);
    }

    #[test]
    fn eccentric_ellipse_conserves_energy() {
        let mu = 398_600.4418;
        let mut r = [6_778.0, 0.0, 0.0];
        let mut v = [0.0, 9.5, 0.8];
        let e0 = energy(&r, &v, mu);
        assert!(e0 < 0.0);

        propagate_lagrangian(&mut r, &mut v, -7_654.0, mu);
        assert_relative_eq!(energy(&r, &v, mu), e0, max_relative = 1e-9);
    }
}
