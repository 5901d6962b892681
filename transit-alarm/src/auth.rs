//! Location authorization gatekeeping.
//!
//! Permission can change at any time (the user may flip it in Settings
//! while the app is backgrounded), so every callback re-derives the UI
//! from the status it carries.

use tracing::{info, warn};

use crate::domain::AuthorizationStatus;
use crate::location::LocationProvider;
use crate::ui::{Controls, Dialog};

/// Tracks the latest authorization status and the one-shot recenter flag.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationGatekeeper {
    status: AuthorizationStatus,
    recenter_pending: bool,
}

impl AuthorizationGatekeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> AuthorizationStatus {
        self.status
    }

    pub fn is_authorized(&self) -> bool {
        self.status.is_authorized()
    }

    /// React to a provider-reported status.
    ///
    /// When authorized, continuous updates are (re)started and the map is
    /// armed to recenter on the next fix. Otherwise updates are stopped and
    /// the returned dialog explains how to enable location access.
    pub fn observe<P: LocationProvider + ?Sized>(
        &mut self,
        provider: &mut P,
        status: AuthorizationStatus,
    ) -> Option<Dialog> {
        self.status = status;

        if status.is_authorized() {
            info!("location access granted");
            provider.start_updating_location();
            self.recenter_pending = true;
            None
        } else {
            warn!(?status, "location access not granted");
            provider.stop_updating_location();
            self.recenter_pending = false;
            Some(Dialog::alert(
                "No GPS Data",
                "Please enable location service for this app in the Settings.",
            ))
        }
    }

    /// Whether the map should render the user's position.
    pub fn shows_user_location(&self) -> bool {
        self.is_authorized()
    }

    /// Control enablement for the current status.
    ///
    /// Without full authorization every control is disabled.
    pub fn controls(&self, has_destination: bool) -> Controls {
        let authorized = self.is_authorized();
        Controls {
            show_current_location: authorized,
            show_destination: authorized && has_destination,
            start_stop: authorized && has_destination,
        }
    }

    /// Consume the recenter flag.
    pub fn take_recenter(&mut self) -> bool {
        std::mem::take(&mut self.recenter_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SimulatedLocationProvider;

    #[test]
    fn authorized_starts_updates_and_arms_recenter() {
        let mut provider = SimulatedLocationProvider::new();
        let mut gate = AuthorizationGatekeeper::new();

        let dialog = gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        assert!(dialog.is_none());
        assert!(provider.is_updating_location());
        assert!(gate.shows_user_location());
        assert!(gate.take_recenter());
        assert!(!gate.take_recenter());
    }

    #[test]
    fn other_states_show_settings_dialog() {
        for status in [
            AuthorizationStatus::NotDetermined,
            AuthorizationStatus::Denied,
            AuthorizationStatus::Restricted,
            AuthorizationStatus::AuthorizedWhenInUse,
        ] {
            let mut provider = SimulatedLocationProvider::new();
            let mut gate = AuthorizationGatekeeper::new();
            let dialog = gate.observe(&mut provider, status).unwrap();
            assert_eq!(dialog.title, "No GPS Data");
            assert_eq!(gate.controls(true), Controls::default());
            assert!(!gate.shows_user_location());
        }
    }

    #[test]
    fn flapping_rederives_controls() {
        let mut provider = SimulatedLocationProvider::new();
        let mut gate = AuthorizationGatekeeper::new();

        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        assert_eq!(
            gate.controls(true),
            Controls {
                show_current_location: true,
                show_destination: true,
                start_stop: true,
            }
        );

        gate.observe(&mut provider, AuthorizationStatus::Denied);
        assert_eq!(gate.controls(true), Controls::default());

        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        assert!(gate.controls(true).start_stop);
    }

    #[test]
    fn repeated_authorization_is_idempotent() {
        let mut provider = SimulatedLocationProvider::new();
        let mut gate = AuthorizationGatekeeper::new();

        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        assert_eq!(gate.status(), AuthorizationStatus::AuthorizedAlways);
        assert!(provider.is_updating_location());
        assert_eq!(gate.controls(false).show_current_location, true);
    }

    #[test]
    fn revocation_disables_every_control() {
        let mut provider = SimulatedLocationProvider::new();
        let mut gate = AuthorizationGatekeeper::new();

        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        assert!(gate.controls(true).start_stop);

        gate.observe(&mut provider, AuthorizationStatus::Restricted);
        assert_eq!(gate.controls(true), Controls::default());
        assert!(!provider.is_updating_location());
        assert!(!gate.take_recenter());
    }

    #[test]
    fn no_destination_disables_destination_controls() {
        let mut provider = SimulatedLocationProvider::new();
        let mut gate = AuthorizationGatekeeper::new();
        gate.observe(&mut provider, AuthorizationStatus::AuthorizedAlways);
        let controls = gate.controls(false);
        assert!(controls.show_current_location);
        assert!(!controls.show_destination);
        assert!(!controls.start_stop);
    }
}
