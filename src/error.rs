//! Error type shared by instance construction, decoding and the GA layer.

use std::fmt;

use crate::ga::CapacityViolation;

/// Errors reported by this crate.
///
/// All of them describe programming-contract or input-data problems; none is
/// retried internally.
#[derive(Debug)]
pub enum RoutingError {
    /// The instance data is unusable (no depot, no vehicles, negative demand, ...).
    InvalidInstance(String),
    /// A chromosome's route segment is not a permutation of the customers.
    InvalidChromosome(String),
    /// A chromosome does not have `store_count + vehicles - 1` genes.
    ChromosomeLength {
        /// Length required by the instance.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A vehicle's slice still exceeds its capacity after repair.
    CapacityExceeded(CapacityViolation),
    /// A segment operator broke the arity or length contract.
    OperatorContract(String),
    /// Instance JSON could not be parsed.
    Json(serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RoutingError>;

impl fmt::Display for RoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingError::InvalidInstance(msg) => write!(f, "invalid instance: {msg}"),
            RoutingError::InvalidChromosome(msg) => write!(f, "invalid chromosome: {msg}"),
            RoutingError::ChromosomeLength { expected, actual } => write!(
                f,
                "chromosome has {actual} genes, instance requires {expected}"
            ),
            RoutingError::CapacityExceeded(violation) => write!(f, "{violation}"),
            RoutingError::OperatorContract(msg) => write!(f, "operator contract violated: {msg}"),
            RoutingError::Json(err) => write!(f, "malformed instance json: {err}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoutingError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(err: serde_json::Error) -> Self {
        RoutingError::Json(err)
    }
}

impl From<CapacityViolation> for RoutingError {
    fn from(violation: CapacityViolation) -> Self {
        RoutingError::CapacityExceeded(violation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_chromosome_length() {
        let err = RoutingError::ChromosomeLength {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "chromosome has 3 genes, instance requires 5"
        );
    }

    #[test]
    fn test_json_error_has_source() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err = RoutingError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("malformed instance json"));
    }
}
