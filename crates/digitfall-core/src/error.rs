use thiserror::Error;

/// Rejected animation constants.
///
/// Every preset is validated once, when its simulator is built. A config that
/// passes validation cannot produce a frozen or instantly-recycling column.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("reset offset must lie strictly above the visible area (max {max} is not < 0)")]
    ResetOffsetNotAbove { max: f32 },

    #[error("symbol count range {min}..={max} is invalid; min must be at least 1")]
    SymbolCount { min: usize, max: usize },

    #[error("{field} must lie in (0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("fixed lane {index} is invalid: {reason}")]
    FixedLane { index: usize, reason: &'static str },
}
