//! # Geodetic coordinates and ECEF → geodetic resolution
//!
//! This module gathers the **output types** of the conversion pipeline and the two
//! independent ways to obtain them from an ECEF [`PositionVector`](crate::position::PositionVector):
//!
//! - [`resolver::GeodeticResolver`] – longitude via `atan2`, latitude via a bounded fixed-point
//!   iteration on an oblate-spheroid model. This is the production path.
//! - [`closed_form::ecef_to_geodetic`] – Heikkinen's closed-form inverse, which also yields the
//!   ellipsoidal height. Used as a cross-check of the iterative path.
//!
//! ## Conventions
//!
//! - Latitudes: **degrees**, geodetic (normal to the ellipsoid), in `[-90, 90]`.
//! - Longitudes: **degrees**, east positive, in `(-180, 180]`.
//! - Heights: **kilometers** above the ellipsoid.

pub mod closed_form;
pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Kilometer};

/// Latitude/longitude pair in degrees, derived fresh from each position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticCoordinate {
    pub latitude: Degree,
    pub longitude: Degree,
}

impl GeodeticCoordinate {
    pub fn new(latitude: Degree, longitude: Degree) -> Self {
        GeodeticCoordinate {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeodeticCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude < 0.0 { 'S' } else { 'N' };
        let ew = if self.longitude < 0.0 { 'W' } else { 'E' };
        write!(
            f,
            "{:.4}°{ns} {:.4}°{ew}",
            self.latitude.abs(),
            self.longitude.abs()
        )
    }
}

/// Geodetic coordinate with ellipsoidal height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPosition {
    pub latitude: Degree,
    pub longitude: Degree,
    pub height: Kilometer,
}

impl GeodeticPosition {
    pub fn new(latitude: Degree, longitude: Degree, height: Kilometer) -> Self {
        GeodeticPosition {
            latitude,
            longitude,
            height,
        }
    }

    /// Drop the height component.
    pub fn coordinate(&self) -> GeodeticCoordinate {
        GeodeticCoordinate::new(self.latitude, self.longitude)
    }
}

impl From<GeodeticPosition> for GeodeticCoordinate {
    fn from(p: GeodeticPosition) -> Self {
        p.coordinate()
    }
}
