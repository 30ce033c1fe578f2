//! Orbit utility helpers: Keplerian propagation and circular-orbit estimates.

pub mod kepler;

pub use kepler::propagate_lagrangian;

/// Speed of a circular orbit of radius `radius` about a body with parameter `mu`.
pub fn circular_speed(mu: f64, radius: f64) -> f64 {
    (mu / radius).sqrt()
}

/// Period of an elliptic orbit with semi-major axis `semi_major_axis`.
pub fn orbital_period(mu: f64, semi_major_axis: f64) -> f64 {
    2.0 * std::f64::consts::PI * (semi_major_axis.powi(3) / mu).sqrt()
}
