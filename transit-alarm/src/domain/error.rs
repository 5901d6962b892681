//! Domain error types.

/// Validation failures when building a monitored region.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Radius is zero, negative or not finite
    #[error("invalid region radius: {0} m")]
    InvalidRadius(f64),

    /// Radius is not strictly below the provider's monitoring limit
    #[error("region radius {radius} m must be less than the maximum monitoring distance {max} m")]
    RadiusTooLarge { radius: f64, max: f64 },

    /// Region identifier is empty
    #[error("region identifier must not be empty")]
    EmptyIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidRadius(-1.0);
        assert_eq!(err.to_string(), "invalid region radius: -1 m");

        let err = DomainError::RadiusTooLarge {
            radius: 500.0,
            max: 400.0,
        };
        assert_eq!(
            err.to_string(),
            "region radius 500 m must be less than the maximum monitoring distance 400 m"
        );

        let err = DomainError::EmptyIdentifier;
        assert_eq!(err.to_string(), "region identifier must not be empty");
    }
}
