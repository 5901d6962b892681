//! The alarm controller.
//!
//! Glues user actions and location callbacks to the geofence monitor,
//! notification router and authorization gatekeeper, and renders the
//! outcome through a [`Presenter`].
//!
//! All state is mutated through `&mut self`. Location events are queued by
//! the provider and delivered one at a time by
//! [`AlarmController::process_pending_events`], so callbacks never
//! interleave with user actions.

use tracing::{debug, info, warn};

use crate::auth::AuthorizationGatekeeper;
use crate::domain::{ActivityState, AuthorizationStatus, Coordinate, RegionShape};
use crate::geofence::{GeofenceError, GeofenceMonitor};
use crate::location::{LocationEventSink, LocationProvider, ProviderError};
use crate::notify::{Action, NotificationOptions, NotificationRouter};
use crate::stops::{ResolveError, StopResolver};
use crate::ui::{Controls, Dialog, DialogChoice, MonitorLabel, Presenter};

/// Map span, in metres, when centring on the user.
pub const DEFAULT_MAP_SPAN_M: f64 = 1000.0;

/// Owns the location provider and the UI it drives.
#[derive(Debug)]
pub struct AlarmController<P, V> {
    provider: P,
    presenter: V,
    monitor: GeofenceMonitor,
    gatekeeper: AuthorizationGatekeeper,
    router: NotificationRouter,
    activity: ActivityState,
    current_location: Option<Coordinate>,
    destination: Option<Coordinate>,
}

impl<P: LocationProvider, V: Presenter> AlarmController<P, V> {
    /// Create a controller monitoring with the default radius.
    pub fn new(provider: P, presenter: V) -> Self {
        Self {
            provider,
            presenter,
            monitor: GeofenceMonitor::default(),
            gatekeeper: AuthorizationGatekeeper::new(),
            router: NotificationRouter::new(),
            activity: ActivityState::Active,
            current_location: None,
            destination: None,
        }
    }

    /// Use a different geofence radius.
    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.monitor = GeofenceMonitor::new(radius_m);
        self
    }

    /// First-screen setup: ask for permission and check device support.
    pub fn launch(&mut self) {
        info!("launching");
        self.presenter.request_notification_permission(NotificationOptions::ALL);
        self.presenter.cancel_pending_notifications();
        self.provider.request_always_authorization();

        if !self.provider.is_monitoring_available(RegionShape::Circular) {
            warn!("region monitoring unavailable");
            self.alert("No Region Tracking", GeofenceError::UnsupportedDevice.to_string());
        }

        self.refresh_controls();
    }

    /// Deliver every queued location event, oldest first.
    pub fn process_pending_events(&mut self) {
        for event in self.provider.drain_events() {
            event.deliver(self);
        }
    }

    /// Resolve `input` and apply the result.
    pub async fn search<R: StopResolver>(&mut self, resolver: &R, input: &str) {
        let result = resolver.resolve(input).await;
        self.apply_search_result(result);
    }

    /// Apply the outcome of a stop lookup.
    ///
    /// Split from [`Self::search`] so callers can run the lookup without
    /// holding the controller.
    pub fn apply_search_result(&mut self, result: Result<Coordinate, ResolveError>) {
        match result {
            Ok(destination) => {
                info!(%destination, "destination set");
                self.destination = Some(destination);
                self.presenter.drop_destination_pin(destination);
                self.refresh_controls();
            }
            Err(e) => {
                warn!(error = %e, "stop lookup failed");
                self.alert("Error Processing Stop Number", e.to_string());
            }
        }
    }

    /// The GO/STOP button.
    pub fn toggle_monitoring(&mut self) {
        if let Some(here) = self.current_location {
            self.presenter.center_map(here, DEFAULT_MAP_SPAN_M);
        }

        if self.monitor.is_monitoring() {
            self.stop_monitoring();
        } else if let Err(e) = self.start_monitoring() {
            warn!(error = %e, "could not start monitoring");
            self.alert("Cannot Start Monitoring", e.to_string());
        }
    }

    /// Start (or restart) the geofence around the current destination.
    ///
    /// An already-active geofence is replaced.
    pub fn start_monitoring(&mut self) -> Result<(), GeofenceError> {
        let destination = self.destination.ok_or(GeofenceError::NoDestination)?;
        let region = self.monitor.start(&mut self.provider, destination)?;

        self.presenter.clear_overlays();
        self.presenter.show_region_overlay(&region);
        self.refresh_controls();
        Ok(())
    }

    /// Stop the geofence and remove its overlay. Safe to call when idle.
    pub fn stop_monitoring(&mut self) {
        self.monitor.stop(&mut self.provider);
        self.presenter.clear_overlays();
        self.refresh_controls();
    }

    /// Frame the destination and its geofence.
    pub fn show_destination(&mut self) {
        match self.destination {
            Some(destination) => self
                .presenter
                .center_map(destination, self.monitor.radius_m() * 2.0),
            None => self.alert("No Destination", "Search for a stop number first."),
        }
    }

    /// Centre the map on the user.
    pub fn show_current_location(&mut self) {
        match self.current_location {
            Some(here) => self.presenter.center_map(here, DEFAULT_MAP_SPAN_M),
            None => self.alert("Location Unknown", ProviderError::LocationUnknown.to_string()),
        }
    }

    /// Handle a tapped dialog button.
    pub fn respond_to_dialog(&mut self, choice: DialogChoice) {
        debug!(?choice, "dialog answered");
        match choice {
            DialogChoice::StopMonitoring => self.stop_monitoring(),
            DialogChoice::KeepMonitoring | DialogChoice::Ok => {}
        }
    }

    /// The app moved between foreground and background.
    pub fn set_activity(&mut self, activity: ActivityState) {
        debug!(?activity, "activity changed");
        self.activity = activity;
    }

    pub fn activity(&self) -> ActivityState {
        self.activity
    }

    pub fn authorization(&self) -> AuthorizationStatus {
        self.gatekeeper.status()
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    pub fn current_location(&self) -> Option<Coordinate> {
        self.current_location
    }

    pub fn monitor(&self) -> &GeofenceMonitor {
        &self.monitor
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn presenter(&self) -> &V {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut V {
        &mut self.presenter
    }

    /// Control enablement derived from the current state.
    pub fn controls(&self) -> Controls {
        self.gatekeeper.controls(self.destination.is_some())
    }

    fn refresh_controls(&mut self) {
        let controls = self.controls();
        let label = if self.monitor.is_monitoring() {
            MonitorLabel::Stop
        } else {
            MonitorLabel::Go
        };

        self.presenter.set_controls(controls);
        self.presenter.set_monitor_label(label);
        self.presenter
            .set_shows_user_location(self.gatekeeper.shows_user_location());
    }

    fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.presenter.present_dialog(Dialog::alert(title, message));
    }
}

impl<P: LocationProvider, V: Presenter> LocationEventSink for AlarmController<P, V> {
    fn on_location_update(&mut self, location: Coordinate) {
        self.current_location = Some(location);

        if self.gatekeeper.take_recenter() {
            self.presenter.center_map(location, DEFAULT_MAP_SPAN_M);
        }
    }

    fn on_region_entry(&mut self, identifier: &str, shape: RegionShape) {
        if !self.monitor.accepts_entry(identifier, shape) {
            debug!(identifier, ?shape, "ignoring region entry");
            return;
        }

        info!(identifier, activity = ?self.activity, "destination reached");
        match self.router.route(self.activity) {
            Action::ShowDialog(dialog) => self.presenter.present_dialog(dialog),
            Action::ShowLocalNotification(notification) => {
                self.presenter.schedule_notification(notification)
            }
        }
    }

    fn on_authorization_change(&mut self, status: AuthorizationStatus) {
        if let Some(dialog) = self.gatekeeper.observe(&mut self.provider, status) {
            self.presenter.present_dialog(dialog);
        }
        self.refresh_controls();
    }

    fn on_monitoring_failure(&mut self, identifier: Option<&str>, error: &ProviderError) {
        let err = self.monitor.on_monitoring_failed(identifier);
        warn!(%error, "monitoring failure reported by provider");

        if !self.monitor.is_monitoring() {
            self.presenter.clear_overlays();
        }
        self.refresh_controls();
        self.alert("Invalid coordinates", format!("{err} ({error})"));
    }

    fn on_location_error(&mut self, error: &ProviderError) {
        warn!(%error, "location provider error");
        self.alert(
            "Location Unavailable",
            format!("Location Manager failed with the following error: {error}"),
        );
    }
}
