//! Circular monitored regions.

use serde::Serialize;

use super::coordinate::Coordinate;
use super::error::DomainError;

/// Identifier under which the destination geofence is registered.
pub const DESTINATION_REGION_ID: &str = "destination";

/// Radius of the destination geofence in metres.
pub const DEFAULT_MONITOR_RADIUS_M: f64 = 500.0;

/// Shape of a region reported by the location provider.
///
/// Providers can emit events for beacon regions too; only circular regions
/// are geofences this app registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionShape {
    Circular,
    Beacon,
}

/// A circular geofence registered with the location provider.
///
/// The radius is always positive and strictly below the provider's maximum
/// monitoring distance it was validated against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoredRegion {
    identifier: String,
    center: Coordinate,
    radius_m: f64,
    notify_on_entry: bool,
    notify_on_exit: bool,
}

impl MonitoredRegion {
    /// Build the destination geofence: entry notifications only.
    pub fn destination(
        center: Coordinate,
        radius_m: f64,
        max_distance_m: f64,
    ) -> Result<Self, DomainError> {
        Self::new(DESTINATION_REGION_ID, center, radius_m, max_distance_m)
    }

    /// Build an entry-only circular region with an arbitrary identifier.
    pub fn new(
        identifier: impl Into<String>,
        center: Coordinate,
        radius_m: f64,
        max_distance_m: f64,
    ) -> Result<Self, DomainError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }

        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(DomainError::InvalidRadius(radius_m));
        }

        if radius_m >= max_distance_m {
            return Err(DomainError::RadiusTooLarge {
                radius: radius_m,
                max: max_distance_m,
            });
        }

        Ok(Self {
            identifier,
            center,
            radius_m,
            notify_on_entry: true,
            notify_on_exit: false,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn notify_on_entry(&self) -> bool {
        self.notify_on_entry
    }

    pub fn notify_on_exit(&self) -> bool {
        self.notify_on_exit
    }

    /// True if `point` lies within the circle (boundary inclusive).
    pub fn contains(&self, point: &Coordinate) -> bool {
        self.center.distance_to(point) <= self.radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downtown() -> Coordinate {
        Coordinate::new(49.2827, -123.1207).unwrap()
    }

    #[test]
    fn destination_defaults() {
        let region = MonitoredRegion::destination(downtown(), 500.0, 1000.0).unwrap();
        assert_eq!(region.identifier(), DESTINATION_REGION_ID);
        assert_eq!(region.radius_m(), 500.0);
        assert!(region.notify_on_entry());
        assert!(!region.notify_on_exit());
        assert_eq!(region.center(), downtown());
    }

    #[test]
    fn radius_equal_to_max_rejected() {
        let err = MonitoredRegion::destination(downtown(), 500.0, 500.0).unwrap_err();
        assert_eq!(
            err,
            DomainError::RadiusTooLarge {
                radius: 500.0,
                max: 500.0
            }
        );
    }

    #[test]
    fn radius_above_max_rejected() {
        assert!(MonitoredRegion::destination(downtown(), 600.0, 500.0).is_err());
    }

    #[test]
    fn non_positive_radius_rejected() {
        assert_eq!(
            MonitoredRegion::destination(downtown(), 0.0, 1000.0).unwrap_err(),
            DomainError::InvalidRadius(0.0)
        );
        assert!(MonitoredRegion::destination(downtown(), -5.0, 1000.0).is_err());
        assert!(MonitoredRegion::destination(downtown(), f64::NAN, 1000.0).is_err());
    }

    #[test]
    fn empty_identifier_rejected() {
        assert_eq!(
            MonitoredRegion::new("", downtown(), 100.0, 1000.0).unwrap_err(),
            DomainError::EmptyIdentifier
        );
    }

    #[test]
    fn contains_center_and_excludes_far_points() {
        let region = MonitoredRegion::destination(downtown(), 500.0, 1000.0).unwrap();
        assert!(region.contains(&downtown()));

        // ~333 m north
        let near = Coordinate::new(49.2857, -123.1207).unwrap();
        assert!(region.contains(&near));

        // ~1.1 km north
        let far = Coordinate::new(49.2927, -123.1207).unwrap();
        assert!(!region.contains(&far));
    }
}
