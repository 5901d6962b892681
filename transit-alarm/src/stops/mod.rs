//! TransLink RTTI stop lookup.
//!
//! Resolves a stop number typed by the user into the coordinate of that
//! stop, via a single `GET /rttiapi/v1/stops/{stop}` request.

mod cache;
mod client;
mod error;

use std::future::Future;

pub use cache::{CachedStopResolver, StopCacheConfig};
pub use client::{TranslinkClient, TranslinkConfig, parse_stop_response};
pub use error::ResolveError;

use crate::domain::Coordinate;

/// Anything that can turn user-entered stop text into a coordinate.
///
/// This abstraction lets the controller be exercised without HTTP.
pub trait StopResolver {
    /// Resolve a stop number to its coordinate.
    ///
    /// Input that is not a positive integer fails with
    /// [`ResolveError::InvalidInput`] before any network traffic.
    fn resolve(&self, input: &str) -> impl Future<Output = Result<Coordinate, ResolveError>> + Send;
}
