//! Location events and their consumer.

use crate::domain::{AuthorizationStatus, Coordinate, RegionShape};

use super::provider::ProviderError;

/// Something the location provider wants to tell its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    /// A new position fix
    LocationUpdated(Coordinate),

    /// The device crossed into a monitored region
    RegionEntered {
        identifier: String,
        shape: RegionShape,
    },

    /// Permission changed (also sent once in response to a request)
    AuthorizationChanged(AuthorizationStatus),

    /// A region could not be monitored
    MonitoringFailed {
        identifier: Option<String>,
        error: ProviderError,
    },

    /// Position updates failed
    LocationFailed(ProviderError),
}

impl LocationEvent {
    /// Hand this event to the matching sink callback.
    pub fn deliver<S: LocationEventSink + ?Sized>(self, sink: &mut S) {
        match self {
            LocationEvent::LocationUpdated(location) => sink.on_location_update(location),
            LocationEvent::RegionEntered { identifier, shape } => {
                sink.on_region_entry(&identifier, shape)
            }
            LocationEvent::AuthorizationChanged(status) => sink.on_authorization_change(status),
            LocationEvent::MonitoringFailed { identifier, error } => {
                sink.on_monitoring_failure(identifier.as_deref(), &error)
            }
            LocationEvent::LocationFailed(error) => sink.on_location_error(&error),
        }
    }
}

/// Receiver of location provider callbacks.
pub trait LocationEventSink {
    fn on_location_update(&mut self, location: Coordinate);

    /// Called for every region entry; shapes other than circular must be
    /// ignored by the implementor.
    fn on_region_entry(&mut self, identifier: &str, shape: RegionShape);

    fn on_authorization_change(&mut self, status: AuthorizationStatus);

    fn on_monitoring_failure(&mut self, identifier: Option<&str>, error: &ProviderError);

    fn on_location_error(&mut self, error: &ProviderError);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl LocationEventSink for RecordingSink {
        fn on_location_update(&mut self, location: Coordinate) {
            self.calls.push(format!("update {location}"));
        }

        fn on_region_entry(&mut self, identifier: &str, shape: RegionShape) {
            self.calls.push(format!("entry {identifier} {shape:?}"));
        }

        fn on_authorization_change(&mut self, status: AuthorizationStatus) {
            self.calls.push(format!("auth {status:?}"));
        }

        fn on_monitoring_failure(&mut self, identifier: Option<&str>, error: &ProviderError) {
            self.calls.push(format!("monitor-fail {identifier:?} {error}"));
        }

        fn on_location_error(&mut self, error: &ProviderError) {
            self.calls.push(format!("error {error}"));
        }
    }

    #[test]
    fn deliver_routes_each_variant() {
        let mut sink = RecordingSink::default();
        let here = Coordinate::new(49.0, -123.0).unwrap();

        LocationEvent::LocationUpdated(here).deliver(&mut sink);
        LocationEvent::RegionEntered {
            identifier: "destination".into(),
            shape: RegionShape::Circular,
        }
        .deliver(&mut sink);
        LocationEvent::AuthorizationChanged(AuthorizationStatus::Denied).deliver(&mut sink);
        LocationEvent::MonitoringFailed {
            identifier: Some("destination".into()),
            error: ProviderError::AuthorizationDenied,
        }
        .deliver(&mut sink);
        LocationEvent::LocationFailed(ProviderError::LocationUnknown).deliver(&mut sink);

        assert_eq!(
            sink.calls,
            vec![
                "update (49.000000, -123.000000)",
                "entry destination Circular",
                "auth Denied",
                "monitor-fail Some(\"destination\") location access denied",
                "error location unknown",
            ]
        );
    }
}
