//! Domain types for the transit alarm.
//!
//! Everything in here is validated at construction time, so the monitor,
//! router and controller can trust the values they are handed.

mod coordinate;
mod error;
mod region;
mod status;
mod stop_number;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::DomainError;
pub use region::{DEFAULT_MONITOR_RADIUS_M, DESTINATION_REGION_ID, MonitoredRegion, RegionShape};
pub use status::{ActivityState, AuthorizationStatus};
pub use stop_number::{InvalidStopNumber, StopNumber};
