//! In-process location provider for tests and the headless shell.
//!
//! Behaves like a platform location manager: region containment is
//! evaluated on every simulated move, and everything it has to say is
//! queued as [`LocationEvent`]s until drained.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::domain::{AuthorizationStatus, Coordinate, MonitoredRegion, RegionShape};

use super::event::LocationEvent;
use super::provider::{LocationProvider, ProviderError};

/// Default platform limit on region radius, in metres.
const DEFAULT_MAX_MONITORING_DISTANCE_M: f64 = 10_000.0;

/// A location provider driven by explicit calls instead of hardware.
#[derive(Debug, Clone)]
pub struct SimulatedLocationProvider {
    status: AuthorizationStatus,
    authorization_requested: bool,
    updating: bool,
    monitoring_available: bool,
    max_distance_m: f64,
    regions: Vec<MonitoredRegion>,
    /// Identifiers of regions the device is currently inside.
    inside: HashSet<String>,
    location: Option<Coordinate>,
    pending: VecDeque<LocationEvent>,
}

impl Default for SimulatedLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedLocationProvider {
    /// Create a provider with undetermined authorization and no fix.
    pub fn new() -> Self {
        Self {
            status: AuthorizationStatus::NotDetermined,
            authorization_requested: false,
            updating: false,
            monitoring_available: true,
            max_distance_m: DEFAULT_MAX_MONITORING_DISTANCE_M,
            regions: Vec::new(),
            inside: HashSet::new(),
            location: None,
            pending: VecDeque::new(),
        }
    }

    /// Start with the given authorization already decided.
    pub fn with_authorization(mut self, status: AuthorizationStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the platform's maximum monitorable radius.
    pub fn with_max_distance(mut self, metres: f64) -> Self {
        self.max_distance_m = metres;
        self
    }

    /// Simulate hardware without region monitoring support.
    pub fn with_monitoring_available(mut self, available: bool) -> Self {
        self.monitoring_available = available;
        self
    }

    /// The user changed permission (prompt answer or Settings).
    pub fn set_authorization(&mut self, status: AuthorizationStatus) {
        debug!(?status, "simulated authorization change");
        self.status = status;
        self.pending
            .push_back(LocationEvent::AuthorizationChanged(status));
    }

    /// Move the device, emitting a fix and any region entries.
    pub fn move_to(&mut self, location: Coordinate) {
        self.location = Some(location);

        if !self.status.is_authorized() {
            trace!(%location, "move ignored: not authorized");
            return;
        }

        if self.updating {
            self.pending
                .push_back(LocationEvent::LocationUpdated(location));
        }

        for region in &self.regions {
            let now_inside = region.contains(&location);
            let was_inside = self.inside.contains(region.identifier());

            if now_inside && !was_inside {
                self.inside.insert(region.identifier().to_string());
                if region.notify_on_entry() {
                    debug!(region = region.identifier(), %location, "region entered");
                    self.pending.push_back(LocationEvent::RegionEntered {
                        identifier: region.identifier().to_string(),
                        shape: RegionShape::Circular,
                    });
                }
            } else if !now_inside && was_inside {
                self.inside.remove(region.identifier());
            }
        }
    }

    /// Report a beacon region entry, which circular-region consumers ignore.
    pub fn emit_beacon_entry(&mut self, identifier: impl Into<String>) {
        self.pending.push_back(LocationEvent::RegionEntered {
            identifier: identifier.into(),
            shape: RegionShape::Beacon,
        });
    }

    /// Report a failure of position updates.
    pub fn fail_location(&mut self, error: ProviderError) {
        self.pending.push_back(LocationEvent::LocationFailed(error));
    }

    pub fn is_updating_location(&self) -> bool {
        self.updating
    }

    pub fn authorization_requested(&self) -> bool {
        self.authorization_requested
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_always_authorization(&mut self) {
        self.authorization_requested = true;
        self.pending
            .push_back(LocationEvent::AuthorizationChanged(self.status));
    }

    fn start_updating_location(&mut self) {
        self.updating = true;
        if self.status.is_authorized()
            && let Some(location) = self.location
        {
            self.pending
                .push_back(LocationEvent::LocationUpdated(location));
        }
    }

    fn stop_updating_location(&mut self) {
        self.updating = false;
    }

    fn is_monitoring_available(&self, shape: RegionShape) -> bool {
        self.monitoring_available && shape == RegionShape::Circular
    }

    fn maximum_region_monitoring_distance(&self) -> f64 {
        self.max_distance_m
    }

    fn monitored_regions(&self) -> Vec<MonitoredRegion> {
        self.regions.clone()
    }

    fn start_monitoring(&mut self, region: MonitoredRegion) {
        let identifier = region.identifier().to_string();

        let failure = if !self.monitoring_available {
            Some(ProviderError::MonitoringUnavailable)
        } else if !self.status.is_authorized() {
            Some(ProviderError::AuthorizationDenied)
        } else {
            None
        };

        if let Some(error) = failure {
            debug!(region = %identifier, %error, "monitoring failed");
            self.pending.push_back(LocationEvent::MonitoringFailed {
                identifier: Some(identifier),
                error,
            });
            return;
        }

        self.stop_monitoring(&identifier);

        // A device already inside at registration does not get an entry event.
        if self.location.is_some_and(|here| region.contains(&here)) {
            self.inside.insert(identifier.clone());
        }

        debug!(region = %identifier, center = %region.center(), radius = region.radius_m(), "monitoring started");
        self.regions.push(region);
    }

    fn stop_monitoring(&mut self, identifier: &str) {
        self.regions.retain(|r| r.identifier() != identifier);
        self.inside.remove(identifier);
    }

    fn drain_events(&mut self) -> Vec<LocationEvent> {
        self.pending.drain(..).collect()
    }
}
