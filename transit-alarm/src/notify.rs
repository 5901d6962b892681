//! Region-entry notification routing.
//!
//! The decision between an in-app dialog and a local notification is made
//! from the activity state at the instant the entry event arrives.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::ActivityState;
use crate::ui::Dialog;

/// Title and body of the background alert.
pub const DESTINATION_REACHED: &str = "Destination Reached";

/// Sound played with a local notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationSound {
    Default,
}

/// Alert styles requested from the user at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl NotificationOptions {
    /// Banner, sound and badge.
    pub const ALL: Self = Self {
        alert: true,
        sound: true,
        badge: true,
    };
}

/// An OS-delivered alert scheduled by the app itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
    pub fire_at: DateTime<Utc>,
}

impl LocalNotification {
    /// Immediate "Destination Reached" alert with the default sound.
    pub fn destination_reached(now: DateTime<Utc>) -> Self {
        Self {
            title: DESTINATION_REACHED.to_string(),
            body: DESTINATION_REACHED.to_string(),
            sound: NotificationSound::Default,
            fire_at: now,
        }
    }
}

/// How to tell the user they have arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowDialog(Dialog),
    ShowLocalNotification(LocalNotification),
}

/// Chooses the alert channel for a region entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationRouter;

impl NotificationRouter {
    pub fn new() -> Self {
        Self
    }

    /// Route using the current wall-clock time.
    pub fn route(&self, activity: ActivityState) -> Action {
        self.route_at(activity, Utc::now())
    }

    /// Foreground gets a dialog; anything else gets a notification.
    pub fn route_at(&self, activity: ActivityState, now: DateTime<Utc>) -> Action {
        if activity.is_foreground() {
            Action::ShowDialog(Dialog::destination_reached())
        } else {
            Action::ShowLocalNotification(LocalNotification::destination_reached(now))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::DialogChoice;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn active_shows_dialog() {
        let action = NotificationRouter::new().route_at(ActivityState::Active, noon());
        match action {
            Action::ShowDialog(dialog) => {
                assert!(dialog.offers(DialogChoice::StopMonitoring));
                assert!(dialog.offers(DialogChoice::KeepMonitoring));
            }
            other => panic!("expected dialog, got {other:?}"),
        }
    }

    #[test]
    fn background_schedules_notification() {
        let action = NotificationRouter::new().route_at(ActivityState::Background, noon());
        assert_eq!(
            action,
            Action::ShowLocalNotification(LocalNotification {
                title: "Destination Reached".into(),
                body: "Destination Reached".into(),
                sound: NotificationSound::Default,
                fire_at: noon(),
            })
        );
    }

    #[test]
    fn inactive_schedules_notification() {
        let action = NotificationRouter::new().route(ActivityState::Inactive);
        assert!(matches!(action, Action::ShowLocalNotification(_)));
    }
}
