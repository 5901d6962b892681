//! Presentation surface.
//!
//! The controller never touches a real UI toolkit: it talks to a
//! [`Presenter`]. [`HeadlessPresenter`] keeps the resulting screen state in
//! memory so it can be inspected by tests and served by the web shell.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, MonitoredRegion};
use crate::notify::{LocalNotification, NotificationOptions};

/// What a dialog button does when tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogChoice {
    /// Plain acknowledgement of an error or notice
    Ok,
    StopMonitoring,
    KeepMonitoring,
}

/// A button in a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogButton {
    pub label: String,
    pub choice: DialogChoice,
}

impl DialogButton {
    pub fn new(label: impl Into<String>, choice: DialogChoice) -> Self {
        Self {
            label: label.into(),
            choice,
        }
    }
}

/// A modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub title: String,
    pub message: String,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    /// An error or notice with a single "OK" button.
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec![DialogButton::new("OK", DialogChoice::Ok)],
        }
    }

    /// Shown when the destination is reached while the app is active.
    pub fn destination_reached() -> Self {
        Self {
            title: "Destination reached".to_string(),
            message: "Destination reached!".to_string(),
            buttons: vec![
                DialogButton::new("Stop Monitoring", DialogChoice::StopMonitoring),
                DialogButton::new("Keep Monitoring", DialogChoice::KeepMonitoring),
            ],
        }
    }

    pub fn offers(&self, choice: DialogChoice) -> bool {
        self.buttons.iter().any(|b| b.choice == choice)
    }
}

/// Enablement of the three map buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Controls {
    pub show_current_location: bool,
    pub show_destination: bool,
    pub start_stop: bool,
}

/// Label of the start/stop button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MonitorLabel {
    #[default]
    #[serde(rename = "GO")]
    Go,
    #[serde(rename = "STOP")]
    Stop,
}

/// The UI the controller drives.
pub trait Presenter {
    /// Animate the map to `center`, framing `diameter_m` metres.
    fn center_map(&mut self, center: Coordinate, diameter_m: f64);

    /// Draw the translucent circle for the active geofence.
    fn show_region_overlay(&mut self, region: &MonitoredRegion);

    /// Remove every overlay from the map.
    fn clear_overlays(&mut self);

    /// Replace any existing pin with one at `at`, and frame it.
    fn drop_destination_pin(&mut self, at: Coordinate);

    fn set_shows_user_location(&mut self, shows: bool);

    fn set_controls(&mut self, controls: Controls);

    fn set_monitor_label(&mut self, label: MonitorLabel);

    fn present_dialog(&mut self, dialog: Dialog);

    fn schedule_notification(&mut self, notification: LocalNotification);

    /// Ask the user to allow local notifications.
    fn request_notification_permission(&mut self, options: NotificationOptions);

    /// Withdraw every local notification this app has scheduled.
    fn cancel_pending_notifications(&mut self);
}

/// A circle drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleOverlay {
    pub center: Coordinate,
    pub radius_m: f64,
}

/// The visible map state.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapState {
    pub center: Option<Coordinate>,
    pub span_m: Option<f64>,
    pub overlays: Vec<CircleOverlay>,
    pub pin: Option<Coordinate>,
    pub shows_user_location: bool,
}

/// In-memory screen state.
///
/// Dialogs stack: the oldest unanswered one is in front.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadlessPresenter {
    pub map: MapState,
    pub controls: Controls,
    pub label: MonitorLabel,
    pub dialogs: VecDeque<Dialog>,
    pub notifications: Vec<LocalNotification>,
    pub notification_permission: Option<NotificationOptions>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialog currently on screen, if any.
    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    /// Dismiss the dialog on screen.
    pub fn dismiss_dialog(&mut self) -> Option<Dialog> {
        self.dialogs.pop_front()
    }
}

impl Presenter for HeadlessPresenter {
    fn center_map(&mut self, center: Coordinate, diameter_m: f64) {
        self.map.center = Some(center);
        self.map.span_m = Some(diameter_m);
    }

    fn show_region_overlay(&mut self, region: &MonitoredRegion) {
        self.map.overlays.push(CircleOverlay {
            center: region.center(),
            radius_m: region.radius_m(),
        });
    }

    fn clear_overlays(&mut self) {
        self.map.overlays.clear();
    }

    fn drop_destination_pin(&mut self, at: Coordinate) {
        self.map.pin = Some(at);
        self.map.center = Some(at);
    }

    fn set_shows_user_location(&mut self, shows: bool) {
        self.map.shows_user_location = shows;
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    fn set_monitor_label(&mut self, label: MonitorLabel) {
        self.label = label;
    }

    fn present_dialog(&mut self, dialog: Dialog) {
        self.dialogs.push_back(dialog);
    }

    fn schedule_notification(&mut self, notification: LocalNotification) {
        self.notifications.push(notification);
    }

    fn request_notification_permission(&mut self, options: NotificationOptions) {
        self.notification_permission = Some(options);
    }

    fn cancel_pending_notifications(&mut self) {
        self.notifications.clear();
    }
}
