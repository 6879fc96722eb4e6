//! Screen configuration errors
//!
//! All of these are static configuration problems detected at
//! initialization or on a capability query. The decision to halt
//! belongs to the caller's policy layer; the core only reports.

use epd_specs::SpecError;
use thiserror_no_std::Error;

/// Unrecoverable configuration errors.
///
/// Thermal degradation and out-of-bounds draws are *not* errors: the
/// former resolves to a safer [`crate::UpdateMode`], the latter is
/// silently clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The SKU could not be resolved against the driver's COG family.
    #[error("panel specification rejected: {0}")]
    Spec(SpecError),

    /// A large panel needs the auxiliary chip-select for its second
    /// half-screen, and the driver reports it is not wired.
    #[error("required auxiliary chip-select line is not connected")]
    MissingChipSelect,

    /// A touch capability was requested on a panel without one.
    #[error("panel has no touch capability")]
    TouchNotAvailable,
}

impl From<SpecError> for ScreenError {
    fn from(err: SpecError) -> Self {
        Self::Spec(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_conversion() {
        let err: ScreenError = SpecError::UnsupportedSize(999).into();
        assert_eq!(err, ScreenError::Spec(SpecError::UnsupportedSize(999)));
    }

    #[test]
    fn test_error_messages() {
        let err = ScreenError::MissingChipSelect;
        assert_eq!(
            err.to_string(),
            "required auxiliary chip-select line is not connected"
        );

        let err: ScreenError = SpecError::UnsupportedSize(999).into();
        assert!(err.to_string().contains("999"));
    }
}
