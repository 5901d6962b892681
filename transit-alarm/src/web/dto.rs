//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ActivityState, AuthorizationStatus, Coordinate};
use crate::geofence::MonitorState;
use crate::notify::{LocalNotification, NotificationOptions};
use crate::ui::{Controls, Dialog, DialogChoice, MapState, MonitorLabel};

use super::state::SimController;

/// Request to look up a stop.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Stop number as typed by the user
    pub stop: String,
}

/// A tapped dialog button.
#[derive(Debug, Deserialize)]
pub struct DialogResponseRequest {
    pub choice: DialogChoice,
}

/// A simulated position fix.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// A simulated permission change.
#[derive(Debug, Deserialize)]
pub struct AuthorizationRequest {
    pub status: AuthorizationStatus,
}

/// A simulated foreground/background transition.
#[derive(Debug, Deserialize)]
pub struct ActivityRequest {
    pub state: ActivityState,
}

/// Snapshot of everything the user could see.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub authorization: AuthorizationStatus,
    pub activity: ActivityState,
    pub monitor: MonitorState,
    pub destination: Option<Coordinate>,
    pub current_location: Option<Coordinate>,
    pub label: MonitorLabel,
    pub controls: Controls,
    pub map: MapState,
    /// Unanswered dialogs, the one on screen first
    pub dialogs: Vec<Dialog>,
    /// Local notifications delivered so far
    pub notifications: Vec<LocalNotification>,
    /// Alert styles requested at launch, if any
    pub notification_permission: Option<NotificationOptions>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

impl StateResponse {
    /// Capture the controller's current state.
    pub fn from_controller(controller: &SimController) -> Self {
        let presenter = controller.presenter();
        Self {
            authorization: controller.authorization(),
            activity: controller.activity(),
            monitor: controller.monitor().state().clone(),
            destination: controller.destination(),
            current_location: controller.current_location(),
            label: presenter.label,
            controls: presenter.controls,
            map: presenter.map.clone(),
            dialogs: presenter.dialogs.iter().cloned().collect(),
            notifications: presenter.notifications.clone(),
            notification_permission: presenter.notification_permission,
        }
    }
}
