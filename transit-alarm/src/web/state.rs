//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::controller::AlarmController;
use crate::location::SimulatedLocationProvider;
use crate::stops::CachedStopResolver;
use crate::ui::HeadlessPresenter;

/// The controller as driven by the shell.
pub type SimController = AlarmController<SimulatedLocationProvider, HeadlessPresenter>;

/// Shared application state.
///
/// The controller sits behind a single mutex: that mutex is the serial
/// context every action and location event runs on.
#[derive(Clone)]
pub struct AppState {
    /// Cached RTTI stop resolver
    pub resolver: Arc<CachedStopResolver>,

    /// The one controller (and the one location provider it owns)
    pub controller: Arc<Mutex<SimController>>,
}

impl AppState {
    /// Create a new app state around an already-launched controller.
    pub fn new(resolver: CachedStopResolver, controller: SimController) -> Self {
        Self {
            resolver: Arc::new(resolver),
            controller: Arc::new(Mutex::new(controller)),
        }
    }
}
