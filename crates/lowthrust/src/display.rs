use std::fmt;

use crate::leg::Leg;

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sims-Flanagan leg")?;
        writeln!(f, "  mu:            {:e}", self.mu)?;
        writeln!(f, "  spacecraft:    {}", self.spacecraft)?;
        writeln!(f, "  t_i:           {}", self.t_i)?;
        writeln!(f, "  x_i:           {}", self.x_i)?;
        writeln!(f, "  t_f:           {}", self.t_f)?;
        writeln!(f, "  x_f:           {}", self.x_f)?;
        writeln!(f, "  segments:      {}", self.throttles.len())?;
        for (index, segment) in self.throttles.iter().enumerate() {
            let [x, y, z] = *segment.value();
            writeln!(
                f,
                "    #{index:<3} [{:.6}, {:.6}] ({:+.6}, {:+.6}, {:+.6}) |u| = {:.6}",
                segment.start().mjd2000(),
                segment.end().mjd2000(),
                x,
                y,
                z,
                segment.norm()
            )?;
        }
        Ok(())
    }
}
