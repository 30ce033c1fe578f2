//! Spacecraft propulsion model used by low-thrust legs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Spacecraft able to deliver a bounded thrust at a fixed specific impulse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacecraft {
    /// Reference (wet) mass in kg.
    pub mass_kg: f64,
    /// Maximum thrust in N.
    pub thrust_newtons: f64,
    /// Specific impulse in s.
    pub isp_seconds: f64,
}

impl Spacecraft {
    pub fn new(mass_kg: f64, thrust_newtons: f64, isp_seconds: f64) -> Self {
        Self {
            mass_kg,
            thrust_newtons,
            isp_seconds,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass_kg
    }

    pub fn thrust(&self) -> f64 {
        self.thrust_newtons
    }

    pub fn isp(&self) -> f64 {
        self.isp_seconds
    }

    /// Acceleration available at full thrust with the reference mass (m/s²).
    pub fn max_acceleration(&self) -> f64 {
        self.thrust_newtons / self.mass_kg
    }
}

impl fmt::Display for Spacecraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mass {} kg, thrust {} N, isp {} s",
            self.mass_kg, self.thrust_newtons, self.isp_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_report_fields() {
        let sc = Spacecraft::new(1_000.0, 0.5, 3_000.0);
        assert_eq!(sc.mass(), 1_000.0);
        assert_eq!(sc.thrust(), 0.5);
        assert_eq!(sc.isp(), 3_000.0);
        assert_eq!(sc.max_acceleration(), 0.0005);
    }
}
