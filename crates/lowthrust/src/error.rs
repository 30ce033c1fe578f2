use sf_core::Epoch;
use thiserror::Error;

/// Invalid leg configuration or evaluation request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("final epoch ({t_f}) must be after initial epoch ({t_i})")]
    EpochOrder { t_i: Epoch, t_f: Epoch },
    #[error("gravitational parameter must be positive, got {0}")]
    NonPositiveMu(f64),
    #[error("mismatch destination must hold 7 values, got {found}")]
    MismatchBufferLength { found: usize },
    #[error("constraint destination must hold one value per segment ({expected}), got {found}")]
    ConstraintBufferLength { expected: usize, found: usize },
    #[error("throttle index {index} out of range for {len} segments")]
    ThrottleIndex { index: usize, len: usize },
    #[error("throttle values must hold 3 numbers per segment ({expected}), got {found}")]
    ThrottleValuesLength { expected: usize, found: usize },
    #[error("throttle segment {index} {reason}")]
    ThrottleCoverage { index: usize, reason: &'static str },
}
