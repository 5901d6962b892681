//! The location provider trait.

use crate::domain::{MonitoredRegion, RegionShape};

use super::event::LocationEvent;

/// Errors reported by the location provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// No position fix is available yet
    #[error("location unknown")]
    LocationUnknown,

    /// The user has not granted "always" location access
    #[error("location access denied")]
    AuthorizationDenied,

    /// Region monitoring is not available on this device
    #[error("region monitoring unavailable")]
    MonitoringUnavailable,

    /// Anything else the platform reports
    #[error("{0}")]
    Other(String),
}

/// Platform location services.
///
/// Calls never report failure directly: problems such as monitoring a
/// region without authorization surface later as
/// [`LocationEvent::MonitoringFailed`].
pub trait LocationProvider {
    /// Ask the user for "always" access. The outcome arrives as
    /// [`LocationEvent::AuthorizationChanged`].
    fn request_always_authorization(&mut self);

    /// Begin continuous position updates.
    fn start_updating_location(&mut self);

    /// Stop continuous position updates.
    fn stop_updating_location(&mut self);

    /// Whether regions of the given shape can be monitored at all.
    fn is_monitoring_available(&self, shape: RegionShape) -> bool;

    /// Largest region radius, in metres, the platform will monitor.
    fn maximum_region_monitoring_distance(&self) -> f64;

    /// Regions currently registered for monitoring.
    fn monitored_regions(&self) -> Vec<MonitoredRegion>;

    /// Register a region. A region with the same identifier is replaced.
    fn start_monitoring(&mut self, region: MonitoredRegion);

    /// Unregister the region with the given identifier, if any.
    fn stop_monitoring(&mut self, identifier: &str);

    /// Take all events produced since the last call, oldest first.
    fn drain_events(&mut self) -> Vec<LocationEvent>;
}
