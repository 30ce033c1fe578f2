use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::Vector3;

/// Spacecraft state: position, velocity and mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub position: Vector3,
    pub velocity: Vector3,
    pub mass: f64,
}

impl StateVector {
    pub const fn new(position: Vector3, velocity: Vector3, mass: f64) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// Flattened `[rx, ry, rz, vx, vy, vz, m]`.
    pub fn to_array(&self) -> [f64; 7] {
        let [rx, ry, rz] = self.position;
        let [vx, vy, vz] = self.velocity;
        [rx, ry, rz, vx, vy, vz, self.mass]
    }

    pub fn from_array(values: [f64; 7]) -> Self {
        let [rx, ry, rz, vx, vy, vz, mass] = values;
        Self::new([rx, ry, rz], [vx, vy, vz], mass)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r = [{:e}, {:e}, {:e}], v = [{:e}, {:e}, {:e}], m = {}",
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
            self.mass
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_layout_is_position_velocity_mass() {
        let state = StateVector::new([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], 7.0);
        assert_eq!(state.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(StateVector::from_array(state.to_array()), state);
    }
}
