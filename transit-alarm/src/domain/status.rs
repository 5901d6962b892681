//! Authorization and app activity states.

use serde::{Deserialize, Serialize};

/// Location permission as reported by the location provider.
///
/// Only [`AuthorizationStatus::AuthorizedAlways`] allows region monitoring
/// to keep running while the app is in the background, so it is the only
/// state treated as authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        self == AuthorizationStatus::AuthorizedAlways
    }
}

/// Whether the app is currently in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    #[default]
    Active,
    Inactive,
    Background,
}

impl ActivityState {
    /// True when an in-app dialog can be shown.
    pub fn is_foreground(self) -> bool {
        self == ActivityState::Active
    }
}
