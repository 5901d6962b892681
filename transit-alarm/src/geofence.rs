//! Destination geofence lifecycle.
//!
//! The monitor owns at most one region, registered with the location
//! provider under [`DESTINATION_REGION_ID`]. Starting always replaces
//! whatever was registered before; stopping is idempotent.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    Coordinate, DEFAULT_MONITOR_RADIUS_M, DESTINATION_REGION_ID, DomainError, MonitoredRegion,
    RegionShape,
};
use crate::location::LocationProvider;

/// Errors from starting or running region monitoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeofenceError {
    /// The provider could not monitor the region
    #[error("Monitoring failed for region with identifier: {0}")]
    MonitoringFailed(String),

    /// Region monitoring is not available on this hardware/OS configuration
    #[error(
        "Tracking not supported on this device. Check if Background App Refresh is on and Airplane mode is off."
    )]
    UnsupportedDevice,

    /// The region itself is invalid (e.g. radius too large)
    #[error(transparent)]
    Region(#[from] DomainError),

    /// No destination has been resolved yet
    #[error("no destination has been set")]
    NoDestination,
}

/// Monitor lifecycle state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MonitorState {
    #[default]
    Idle,
    Monitoring {
        region: MonitoredRegion,
    },
}

/// Owner of the single destination geofence.
#[derive(Debug, Clone)]
pub struct GeofenceMonitor {
    state: MonitorState,
    radius_m: f64,
}

impl Default for GeofenceMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_MONITOR_RADIUS_M)
    }
}

impl GeofenceMonitor {
    /// Create an idle monitor that will use `radius_m` for its regions.
    pub fn new(radius_m: f64) -> Self {
        Self {
            state: MonitorState::Idle,
            radius_m,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn is_monitoring(&self) -> bool {
        matches!(self.state, MonitorState::Monitoring { .. })
    }

    pub fn active_region(&self) -> Option<&MonitoredRegion> {
        match &self.state {
            MonitorState::Idle => None,
            MonitorState::Monitoring { region } => Some(region),
        }
    }

    /// Start monitoring a region around `center`, replacing any active one.
    ///
    /// Device support and the radius limit are checked before anything is
    /// registered. Authorization is not: an unauthorized provider reports
    /// the failure later as a monitoring-failed event.
    pub fn start<P: LocationProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        center: Coordinate,
    ) -> Result<MonitoredRegion, GeofenceError> {
        if !provider.is_monitoring_available(RegionShape::Circular) {
            return Err(GeofenceError::UnsupportedDevice);
        }

        let region = MonitoredRegion::destination(
            center,
            self.radius_m,
            provider.maximum_region_monitoring_distance(),
        )?;

        self.unregister(provider);
        provider.start_monitoring(region.clone());
        info!(center = %region.center(), radius = region.radius_m(), "geofence started");

        self.state = MonitorState::Monitoring {
            region: region.clone(),
        };
        Ok(region)
    }

    /// Stop monitoring. Calling this while idle is a no-op.
    pub fn stop<P: LocationProvider + ?Sized>(&mut self, provider: &mut P) {
        self.unregister(provider);
        if self.is_monitoring() {
            info!("geofence stopped");
        }
        self.state = MonitorState::Idle;
    }

    /// Whether a region-entry event should raise an alert.
    pub fn accepts_entry(&self, identifier: &str, shape: RegionShape) -> bool {
        shape == RegionShape::Circular
            && identifier == DESTINATION_REGION_ID
            && self.is_monitoring()
    }

    /// Record an asynchronous monitoring failure reported by the provider.
    ///
    /// A failure for our region (or an unnamed one) drops back to `Idle`.
    pub fn on_monitoring_failed(&mut self, identifier: Option<&str>) -> GeofenceError {
        let identifier = identifier.unwrap_or("unknown");
        if identifier == DESTINATION_REGION_ID || identifier == "unknown" {
            self.state = MonitorState::Idle;
        }
        warn!(region = identifier, "region monitoring failed");
        GeofenceError::MonitoringFailed(identifier.to_string())
    }

    /// Remove every provider region registered under our identifier.
    fn unregister<P: LocationProvider + ?Sized>(&self, provider: &mut P) {
        for region in provider.monitored_regions() {
            if region.identifier() == DESTINATION_REGION_ID {
                debug!(region = region.identifier(), "unregistering region");
                provider.stop_monitoring(region.identifier());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuthorizationStatus;
    use crate::location::{LocationEvent, SimulatedLocationProvider};

    fn stop_50095() -> Coordinate {
        Coordinate::new(49.2827, -123.1207).unwrap()
    }

    fn elsewhere() -> Coordinate {
        Coordinate::new(49.2634, -123.1386).unwrap()
    }

    fn authorized() -> SimulatedLocationProvider {
        SimulatedLocationProvider::new().with_authorization(AuthorizationStatus::AuthorizedAlways)
    }

    #[test]
    fn starts_idle() {
        let monitor = GeofenceMonitor::default();
        assert_eq!(monitor.state(), &MonitorState::Idle);
        assert_eq!(monitor.radius_m(), 500.0);
        assert!(monitor.active_region().is_none());
    }

    #[test]
    fn start_registers_region() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();

        let region = monitor.start(&mut provider, stop_50095()).unwrap();
        assert_eq!(region.identifier(), "destination");
        assert_eq!(region.radius_m(), 500.0);
        assert!(monitor.is_monitoring());
        assert_eq!(provider.monitored_regions(), vec![region]);
    }

    #[test]
    fn start_replaces_existing_region() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();

        monitor.start(&mut provider, stop_50095()).unwrap();
        monitor.start(&mut provider, elsewhere()).unwrap();

        let regions = provider.monitored_regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].center(), elsewhere());
        assert_eq!(monitor.active_region().unwrap().center(), elsewhere());
    }

    #[test]
    fn stop_twice_is_idempotent() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();

        monitor.start(&mut provider, stop_50095()).unwrap();
        monitor.stop(&mut provider);
        monitor.stop(&mut provider);

        assert_eq!(monitor.state(), &MonitorState::Idle);
        assert!(provider.monitored_regions().is_empty());
    }

    #[test]
    fn stop_when_never_started_is_noop() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();
        monitor.stop(&mut provider);
        assert_eq!(monitor.state(), &MonitorState::Idle);
    }

    #[test]
    fn radius_at_platform_max_rejected_before_registration() {
        let mut provider = authorized().with_max_distance(500.0);
        let mut monitor = GeofenceMonitor::default();

        let err = monitor.start(&mut provider, stop_50095()).unwrap_err();
        assert!(matches!(
            err,
            GeofenceError::Region(DomainError::RadiusTooLarge { .. })
        ));
        assert!(provider.monitored_regions().is_empty());
        assert!(!monitor.is_monitoring());
    }

    #[test]
    fn unsupported_device_rejected() {
        let mut provider = authorized().with_monitoring_available(false);
        let mut monitor = GeofenceMonitor::default();
        assert_eq!(
            monitor.start(&mut provider, stop_50095()).unwrap_err(),
            GeofenceError::UnsupportedDevice
        );
    }

    #[test]
    fn unauthorized_start_fails_asynchronously() {
        let mut provider = SimulatedLocationProvider::new();
        let mut monitor = GeofenceMonitor::default();

        assert!(monitor.start(&mut provider, stop_50095()).is_ok());
        let events = provider.drain_events();
        assert!(matches!(
            events.as_slice(),
            [LocationEvent::MonitoringFailed { .. }]
        ));

        let err = monitor.on_monitoring_failed(Some("destination"));
        assert_eq!(
            err.to_string(),
            "Monitoring failed for region with identifier: destination"
        );
        assert!(!monitor.is_monitoring());
    }

    #[test]
    fn foreign_failure_keeps_monitoring() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();
        monitor.start(&mut provider, stop_50095()).unwrap();
        monitor.on_monitoring_failed(Some("someone-else"));
        assert!(monitor.is_monitoring());
    }

    #[test]
    fn accepts_only_circular_destination_entries_while_monitoring() {
        let mut provider = authorized();
        let mut monitor = GeofenceMonitor::default();

        assert!(!monitor.accepts_entry("destination", RegionShape::Circular));

        monitor.start(&mut provider, stop_50095()).unwrap();
        assert!(monitor.accepts_entry("destination", RegionShape::Circular));
        assert!(!monitor.accepts_entry("destination", RegionShape::Beacon));
        assert!(!monitor.accepts_entry("lobby", RegionShape::Circular));
    }
}
