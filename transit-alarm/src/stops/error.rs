//! Stop lookup error types.

use crate::domain::InvalidStopNumber;

/// Errors that can occur while resolving a stop number.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The input is not a positive integer
    #[error("Please enter a valid stop number ({0})")]
    InvalidInput(#[from] InvalidStopNumber),

    /// The lookup URL could not be built
    #[error("Could not create request from stop number: {0}")]
    RequestConstruction(String),

    /// Transport failure (DNS, connect, timeout, ...)
    #[error("Error sending request: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with no body
    #[error("Did not receive any data")]
    EmptyResponse,

    /// The body is not JSON or lacks the expected fields
    #[error("Could not parse stop response: {0}")]
    Parse(String),

    /// The API reported an error message
    #[error("{0}")]
    Remote(String),
}
