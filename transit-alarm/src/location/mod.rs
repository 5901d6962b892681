//! Location provider seam.
//!
//! The location provider owns authorization, continuous position updates
//! and OS-level region monitoring. It reports back through
//! [`LocationEvent`]s, which the owner drains and delivers serially to a
//! [`LocationEventSink`].

mod event;
mod provider;
mod simulated;

pub use event::{LocationEvent, LocationEventSink};
pub use provider::{LocationProvider, ProviderError};
pub use simulated::SimulatedLocationProvider;
