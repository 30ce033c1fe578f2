use log::debug;
use sf_core::{Epoch, StateVector};
use sf_propulsion::Spacecraft;

use crate::error::ConfigurationError;
use crate::throttle::ThrottleSegment;

/// A low-thrust trajectory leg in the Sims-Flanagan transcription.
///
/// A default leg is empty and must be configured (see [`Leg::set_leg`]) before evaluation;
/// evaluating an unconfigured leg fails with [`ConfigurationError`]. The leg can be reused
/// across optimiser iterations by overwriting its fields in place.
///
/// Throttle segments are expected to be time-ordered and to partition `[t_i, t_f]`. The
/// evaluators do not check this; [`Leg::check_throttle_coverage`] is available for callers
/// that want to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leg {
    pub(crate) t_i: Epoch,
    pub(crate) x_i: StateVector,
    pub(crate) throttles: Vec<ThrottleSegment>,
    pub(crate) t_f: Epoch,
    pub(crate) x_f: StateVector,
    pub(crate) spacecraft: Spacecraft,
    pub(crate) mu: f64,
}

impl Leg {
    /// Build a fully configured leg.
    pub fn new<I>(
        t_i: Epoch,
        x_i: StateVector,
        throttles: I,
        t_f: Epoch,
        x_f: StateVector,
        spacecraft: Spacecraft,
        mu: f64,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = ThrottleSegment>,
    {
        let mut leg = Leg {
            spacecraft,
            ..Leg::default()
        };
        leg.set_leg(t_i, x_i, throttles, t_f, x_f, mu)?;
        Ok(leg)
    }

    /// Set boundary epochs, boundary states, throttles and the gravitational parameter.
    ///
    /// Fails without touching the leg if `t_f <= t_i` or `mu <= 0`.
    pub fn set_leg<I>(
        &mut self,
        t_i: Epoch,
        x_i: StateVector,
        throttles: I,
        t_f: Epoch,
        x_f: StateVector,
        mu: f64,
    ) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = ThrottleSegment>,
    {
        check_epochs(t_i, t_f)?;
        check_mu(mu)?;
        self.t_i = t_i;
        self.x_i = x_i;
        self.t_f = t_f;
        self.x_f = x_f;
        self.throttles.clear();
        self.throttles.extend(throttles);
        self.mu = mu;
        Ok(())
    }

    pub fn set_spacecraft(&mut self, spacecraft: Spacecraft) {
        self.spacecraft = spacecraft;
    }

    pub fn spacecraft(&self) -> &Spacecraft {
        &self.spacecraft
    }

    pub fn set_mu(&mut self, mu: f64) -> Result<(), ConfigurationError> {
        check_mu(mu)?;
        self.mu = mu;
        Ok(())
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Replace the whole throttle list.
    pub fn set_throttles<I>(&mut self, throttles: I)
    where
        I: IntoIterator<Item = ThrottleSegment>,
    {
        self.throttles.clear();
        self.throttles.extend(throttles);
    }

    /// Resize the throttle list, padding with default (zero) segments.
    pub fn set_throttles_size(&mut self, size: usize) {
        self.throttles.resize(size, ThrottleSegment::default());
    }

    pub fn set_throttle(
        &mut self,
        index: usize,
        throttle: ThrottleSegment,
    ) -> Result<(), ConfigurationError> {
        let len = self.throttles.len();
        let slot = self
            .throttles
            .get_mut(index)
            .ok_or(ConfigurationError::ThrottleIndex { index, len })?;
        *slot = throttle;
        Ok(())
    }

    /// Overwrite the throttle vectors from a flat `(x1, y1, z1, ..., xn, yn, zn)` slice,
    /// keeping each segment's time bounds.
    pub fn set_throttle_values(&mut self, values: &[f64]) -> Result<(), ConfigurationError> {
        let expected = 3 * self.throttles.len();
        if values.len() != expected {
            return Err(ConfigurationError::ThrottleValuesLength {
                expected,
                found: values.len(),
            });
        }
        for (segment, chunk) in self.throttles.iter_mut().zip(values.chunks_exact(3)) {
            *segment = segment.with_value([chunk[0], chunk[1], chunk[2]]);
        }
        Ok(())
    }

    pub fn throttles(&self) -> &[ThrottleSegment] {
        &self.throttles
    }

    pub fn throttles_len(&self) -> usize {
        self.throttles.len()
    }

    pub fn throttle(&self, index: usize) -> Option<&ThrottleSegment> {
        self.throttles.get(index)
    }

    /// Set both boundary epochs at once.
    pub fn set_epochs(&mut self, t_i: Epoch, t_f: Epoch) -> Result<(), ConfigurationError> {
        check_epochs(t_i, t_f)?;
        self.t_i = t_i;
        self.t_f = t_f;
        Ok(())
    }

    /// Set the initial epoch; it must precede the current final epoch.
    pub fn set_t_i(&mut self, epoch: Epoch) -> Result<(), ConfigurationError> {
        check_epochs(epoch, self.t_f)?;
        self.t_i = epoch;
        Ok(())
    }

    /// Set the final epoch; it must follow the current initial epoch.
    pub fn set_t_f(&mut self, epoch: Epoch) -> Result<(), ConfigurationError> {
        check_epochs(self.t_i, epoch)?;
        self.t_f = epoch;
        Ok(())
    }

    pub fn t_i(&self) -> Epoch {
        self.t_i
    }

    pub fn t_f(&self) -> Epoch {
        self.t_f
    }

    pub fn set_x_i(&mut self, state: StateVector) {
        self.x_i = state;
    }

    pub fn set_x_f(&mut self, state: StateVector) {
        self.x_f = state;
    }

    pub fn x_i(&self) -> &StateVector {
        &self.x_i
    }

    pub fn x_f(&self) -> &StateVector {
        &self.x_f
    }

    /// Check the epoch ordering and gravitational parameter invariants.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_epochs(self.t_i, self.t_f)?;
        check_mu(self.mu)
    }

    /// Verify that the segments are time-ordered, non-empty, contiguous and span exactly
    /// `[t_i, t_f]`. The evaluators never call this.
    pub fn check_throttle_coverage(&self) -> Result<(), ConfigurationError> {
        let gap = |index, reason| Err(ConfigurationError::ThrottleCoverage { index, reason });
        let mut cursor = self.t_i;
        for (index, segment) in self.throttles.iter().enumerate() {
            if segment.start() != cursor {
                return if index == 0 {
                    gap(index, "does not start at the initial epoch")
                } else {
                    gap(index, "does not start where the previous segment ends")
                };
            }
            if !(segment.end() > segment.start()) {
                return gap(index, "ends before it starts");
            }
            cursor = segment.end();
        }
        match self.throttles.len() {
            0 => Ok(()),
            n if cursor != self.t_f => gap(n - 1, "does not end at the final epoch"),
            _ => Ok(()),
        }
    }
}

fn check_epochs(t_i: Epoch, t_f: Epoch) -> Result<(), ConfigurationError> {
    if t_f.mjd2000() > t_i.mjd2000() {
        Ok(())
    } else {
        debug!("rejecting leg epochs: t_i = {t_i}, t_f = {t_f}");
        Err(ConfigurationError::EpochOrder { t_i, t_f })
    }
}

fn check_mu(mu: f64) -> Result<(), ConfigurationError> {
    if mu > 0.0 {
        Ok(())
    } else {
        debug!("rejecting gravitational parameter {mu}");
        Err(ConfigurationError::NonPositiveMu(mu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch(days: f64) -> Epoch {
        Epoch::from_mjd2000(days)
    }

    fn state(mass: f64) -> StateVector {
        StateVector::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], mass)
    }

    fn configured() -> Leg {
        Leg::new(
            epoch(0.0),
            state(1_000.0),
            ThrottleSegment::uniform_grid(epoch(0.0), epoch(10.0), 4),
            epoch(10.0),
            state(900.0),
            Spacecraft::new(1_000.0, 0.1, 2_500.0),
            1.0,
        )
        .expect("valid leg")
    }

    #[test]
    fn rejects_non_increasing_epochs() {
        let mut leg = Leg::default();
        for t_f in [5.0, 4.0] {
            let err = leg
                .set_leg(epoch(5.0), state(1.0), Vec::new(), epoch(t_f), state(1.0), 1.0)
                .unwrap_err();
            assert!(matches!(err, ConfigurationError::EpochOrder { .. }));
        }
        assert_eq!(leg, Leg::default(), "failed configuration must not write");
    }

    #[test]
    fn rejects_non_positive_mu() {
        let mut leg = Leg::default();
        for mu in [0.0, -1.0, f64::NAN] {
            let err = leg
                .set_leg(epoch(0.0), state(1.0), Vec::new(), epoch(1.0), state(1.0), mu)
                .unwrap_err();
            assert!(matches!(err, ConfigurationError::NonPositiveMu(_)));
        }
        let mut leg = configured();
        assert!(leg.set_mu(0.0).is_err());
        assert_eq!(leg.mu(), 1.0);
        leg.set_mu(2.5).unwrap();
        assert_eq!(leg.mu(), 2.5);
    }

    #[test]
    fn individual_epoch_setters_keep_ordering() {
        let mut leg = configured();
        assert!(leg.set_t_i(epoch(10.0)).is_err());
        assert!(leg.set_t_f(epoch(-1.0)).is_err());
        leg.set_t_f(epoch(20.0)).unwrap();
        leg.set_t_i(epoch(15.0)).unwrap();
        assert_eq!((leg.t_i(), leg.t_f()), (epoch(15.0), epoch(20.0)));
        leg.set_epochs(epoch(100.0), epoch(110.0)).unwrap();
        assert_eq!(leg.t_i(), epoch(100.0));
        assert!(leg.set_epochs(epoch(3.0), epoch(3.0)).is_err());
    }

    #[test]
    fn default_leg_is_unconfigured() {
        assert!(Leg::default().validate().is_err());
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn throttle_setters() {
        let mut leg = configured();
        assert_eq!(leg.throttles_len(), 4);

        let seg = ThrottleSegment::new(epoch(0.0), epoch(2.5), [0.1, 0.2, 0.3]);
        leg.set_throttle(0, seg).unwrap();
        assert_eq!(leg.throttle(0), Some(&seg));
        assert_eq!(
            leg.set_throttle(4, seg),
            Err(ConfigurationError::ThrottleIndex { index: 4, len: 4 })
        );
        assert!(leg.throttle(4).is_none());

        leg.set_throttles_size(6);
        assert_eq!(leg.throttles_len(), 6);
        assert_eq!(leg.throttles()[5], ThrottleSegment::default());

        leg.set_throttles(ThrottleSegment::uniform_grid(epoch(0.0), epoch(10.0), 2));
        assert_eq!(leg.throttles_len(), 2);
    }

    #[test]
    fn flat_throttle_values() {
        let mut leg = configured();
        let values: Vec<f64> = (0..12).map(|k| k as f64 / 12.0).collect();
        leg.set_throttle_values(&values).unwrap();
        assert_eq!(leg.throttles()[1].value(), &[3.0 / 12.0, 4.0 / 12.0, 5.0 / 12.0]);
        assert_eq!(leg.throttles()[1].start(), epoch(2.5));

        assert_eq!(
            leg.set_throttle_values(&values[..11]),
            Err(ConfigurationError::ThrottleValuesLength {
                expected: 12,
                found: 11
            })
        );
    }

    #[test]
    fn coverage_check_reports_first_gap() {
        let mut leg = configured();
        assert!(leg.check_throttle_coverage().is_ok());

        let shifted = ThrottleSegment::new(epoch(2.6), epoch(5.0), [0.0; 3]);
        leg.set_throttle(1, shifted).unwrap();
        assert!(matches!(
            leg.check_throttle_coverage(),
            Err(ConfigurationError::ThrottleCoverage { index: 1, .. })
        ));

        leg.set_throttles(ThrottleSegment::uniform_grid(epoch(0.0), epoch(9.0), 3));
        assert!(matches!(
            leg.check_throttle_coverage(),
            Err(ConfigurationError::ThrottleCoverage { index: 2, .. })
        ));

        leg.set_throttles(ThrottleSegment::uniform_grid(epoch(1.0), epoch(10.0), 3));
        assert!(matches!(
            leg.check_throttle_coverage(),
            Err(ConfigurationError::ThrottleCoverage { index: 0, .. })
        ));

        leg.set_throttles(Vec::new());
        assert!(leg.check_throttle_coverage().is_ok());
    }
}
