//! Headless HTTP shell.
//!
//! Exposes the app's buttons and the device's location events as HTTP
//! endpoints, so the whole alarm flow can be driven without a phone.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::{AppState, SimController};
