//! # Oblate-spheroid Earth models
//!
//! An [`EllipsoidModel`] is a pair of semi-axes `(a, b)` in kilometers. It is a read-only value
//! shared freely across conversions and threads.
//!
//! Besides the derived shape quantities (eccentricity, flattening, prime-vertical radius),
//! the model provides the **forward** conversion from geodetic coordinates to ECEF, used to
//! synthesize positions on or above the ellipsoid.

use serde::{Deserialize, Serialize};

use crate::constants::{
    Kilometer, REFERENCE_MAJOR_AXIS, REFERENCE_MINOR_AXIS, WGS84_MAJOR_AXIS, WGS84_MINOR_AXIS,
};
use crate::geodetic::GeodeticPosition;
use crate::position::PositionVector;
use crate::satgeo_errors::SatGeoError;

/// Ellipse of revolution approximating the Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsoidModel {
    /// Semi-major (equatorial) axis, km
    a: Kilometer,
    /// Semi-minor (polar) axis, km
    b: Kilometer,
}

impl Default for EllipsoidModel {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl EllipsoidModel {
    /// Axes used by the satellite viewer: a = 6378 km, b = 6357 km.
    pub const REFERENCE: EllipsoidModel = EllipsoidModel {
        a: REFERENCE_MAJOR_AXIS,
        b: REFERENCE_MINOR_AXIS,
    };

    /// GRS1980/WGS84 axes.
    pub const WGS84: EllipsoidModel = EllipsoidModel {
        a: WGS84_MAJOR_AXIS,
        b: WGS84_MINOR_AXIS,
    };

    /// Build a custom ellipsoid.
    ///
    /// Arguments
    /// -----------------
    /// * `a`: semi-major axis in kilometers.
    /// * `b`: semi-minor axis in kilometers.
    ///
    /// Return
    /// ----------
    /// * The model, or [`SatGeoError::InvalidEllipsoid`] unless `0 < b ≤ a` with both axes finite.
    pub fn new(a: Kilometer, b: Kilometer) -> Result<Self, SatGeoError> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(SatGeoError::InvalidEllipsoid(
                "axes must be finite".into(),
            ));
        }
        if b <= 0.0 || b > a {
            return Err(SatGeoError::InvalidEllipsoid(format!(
                "require 0 < b <= a, got a = {a}, b = {b}"
            )));
        }
        Ok(EllipsoidModel { a, b })
    }

    pub fn semi_major_axis(&self) -> Kilometer {
        self.a
    }

    pub fn semi_minor_axis(&self) -> Kilometer {
        self.b
    }

    /// First eccentricity squared, `1 − (b/a)²`.
    pub fn eccentricity_squared(&self) -> f64 {
        1.0 - (self.b / self.a).powi(2)
    }

    /// Second eccentricity squared, `(a² − b²) / b²`.
    pub fn second_eccentricity_squared(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.b * self.b)
    }

    /// Flattening, `(a − b) / a`.
    pub fn flattening(&self) -> f64 {
        (self.a - self.b) / self.a
    }

    /// Radius of curvature in the prime vertical at a geodetic latitude (radians).
    pub fn prime_vertical_radius(&self, latitude_rad: f64) -> Kilometer {
        let sin_lat = latitude_rad.sin();
        self.a / (1.0 - self.eccentricity_squared() * sin_lat * sin_lat).sqrt()
    }

    /// Convert a geodetic position into an ECEF vector.
    ///
    /// Arguments
    /// -----------------
    /// * `geo`: geodetic latitude/longitude in degrees and ellipsoidal height in kilometers.
    ///
    /// Return
    /// ----------
    /// * The ECEF position in kilometers:
    ///   `x = (N + h) cos φ cos λ`, `y = (N + h) cos φ sin λ`, `z = (N (1 − e²) + h) sin φ`.
    ///
    /// See also
    /// ------------
    /// * [`GeodeticResolver::resolve`](crate::geodetic::resolver::GeodeticResolver::resolve) – inverse direction.
    pub fn geodetic_to_ecef(&self, geo: &GeodeticPosition) -> PositionVector {
        let lat = geo.latitude.to_radians();
        let lon = geo.longitude.to_radians();
        let n = self.prime_vertical_radius(lat);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        PositionVector::new(
            (n + geo.height) * cos_lat * cos_lon,
            (n + geo.height) * cos_lat * sin_lon,
            (n * (1.0 - self.eccentricity_squared()) + geo.height) * sin_lat,
        )
    }
}
