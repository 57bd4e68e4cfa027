//! # ECEF position vectors and unit normalization
//!
//! The external propagator reports positions in its own length unit. This module keeps the
//! two representations apart at the type level:
//!
//! - [`RawPosition`] – the propagator output, in **native propagator units**.
//! - [`PositionVector`] – an ECEF position in **kilometers**, the only input accepted by the
//!   geodetic resolvers.
//!
//! The single conversion point between them is [`UnitNormalizer::normalize`].
//!
//! ```text
//! Propagator ──RawPosition──▶ UnitNormalizer ──PositionVector (km)──▶ GeodeticResolver
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{Kilometer, PROPAGATOR_UNIT_TO_KM};
use crate::satgeo_errors::DomainError;

/// Position reported by the propagator, expressed in its native length unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition(pub Vector3<f64>);

impl RawPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        RawPosition(Vector3::new(x, y, z))
    }
}

impl From<[f64; 3]> for RawPosition {
    fn from(v: [f64; 3]) -> Self {
        RawPosition(Vector3::from(v))
    }
}

/// An Earth-Centered-Earth-Fixed position in kilometers.
///
/// Immutable once built. A zero or polar vector is representable; the resolvers reject it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionVector(Vector3<Kilometer>);

impl PositionVector {
    pub fn new(x: Kilometer, y: Kilometer, z: Kilometer) -> Self {
        PositionVector(Vector3::new(x, y, z))
    }

    pub fn x(&self) -> Kilometer {
        self.0.x
    }

    pub fn y(&self) -> Kilometer {
        self.0.y
    }

    pub fn z(&self) -> Kilometer {
        self.0.z
    }

    /// Underlying nalgebra vector.
    pub fn as_vector(&self) -> &Vector3<Kilometer> {
        &self.0
    }

    /// Square of the distance to the polar axis, `x² + y²`.
    pub fn equatorial_radius_squared(&self) -> f64 {
        self.0.x * self.0.x + self.0.y * self.0.y
    }

    /// Geocentric distance in kilometers.
    pub fn norm(&self) -> Kilometer {
        self.0.norm()
    }

    /// Check that every component is finite.
    ///
    /// Return
    /// ----------
    /// * `Ok(())`, or [`DomainError::NonFinite`] carrying the offending components.
    pub fn ensure_finite(&self) -> Result<(), DomainError> {
        if self.0.iter().all(|c| c.is_finite()) {
            Ok(())
        } else {
            Err(DomainError::NonFinite {
                x: self.0.x,
                y: self.0.y,
                z: self.0.z,
            })
        }
    }
}

impl From<Vector3<Kilometer>> for PositionVector {
    fn from(v: Vector3<Kilometer>) -> Self {
        PositionVector(v)
    }
}

impl From<PositionVector> for Vector3<Kilometer> {
    fn from(p: PositionVector) -> Self {
        p.0
    }
}

/// Rescales propagator output to kilometers.
///
/// The default normalizer multiplies each component by [`PROPAGATOR_UNIT_TO_KM`]. Some
/// propagator builds report the equatorial axes reversed with respect to the canonical ECEF
/// frame; `flip_equatorial_axes` negates x and y after scaling to compensate.
///
/// No magnitude validation happens here: a zero vector goes through unchanged and is
/// rejected by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitNormalizer {
    pub scale: f64,
    pub flip_equatorial_axes: bool,
}

impl Default for UnitNormalizer {
    fn default() -> Self {
        UnitNormalizer {
            scale: PROPAGATOR_UNIT_TO_KM,
            flip_equatorial_axes: false,
        }
    }
}

impl UnitNormalizer {
    pub fn new(scale: f64) -> Self {
        UnitNormalizer {
            scale,
            flip_equatorial_axes: false,
        }
    }

    pub fn with_flipped_equatorial_axes(mut self) -> Self {
        self.flip_equatorial_axes = true;
        self
    }

    /// Convert a propagator position into an ECEF vector in kilometers.
    ///
    /// Arguments
    /// -----------------
    /// * `raw`: the position in native propagator units.
    ///
    /// Return
    /// ----------
    /// * The same position in kilometers, scaled exactly once.
    pub fn normalize(&self, raw: RawPosition) -> PositionVector {
        let mut km = raw.0 * self.scale;
        if self.flip_equatorial_axes {
            km.x = -km.x;
            km.y = -km.y;
        }
        PositionVector(km)
    }
}

#[cfg(test)]
mod position_test {
    use super::*;

    #[test]
    fn test_normalize_scales_once() {
        let pos = UnitNormalizer::default().normalize(RawPosition::new(1.0, 2.0, 3.0));
        assert_eq!(pos, PositionVector::new(1e6, 2e6, 3e6));
    }

    #[test]
    fn test_normalize_zero_vector_passes_through() {
        let pos = UnitNormalizer::default().normalize(RawPosition::new(0.0, 0.0, 0.0));
        assert_eq!(pos, PositionVector::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_flipped_axes() {
        let normalizer = UnitNormalizer::default().with_flipped_equatorial_axes();
        let pos = normalizer.normalize(RawPosition::from([0.004, -0.002, 0.005]));
        assert_eq!(pos.x(), -4000.0);
        assert_eq!(pos.y(), 2000.0);
        assert_eq!(pos.z(), 5000.0);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(PositionVector::new(1.0, 2.0, 3.0).ensure_finite().is_ok());
        let err = PositionVector::new(f64::NAN, 0.0, 1.0)
            .ensure_finite()
            .unwrap_err();
        assert!(matches!(err, DomainError::NonFinite { .. }));
    }
}
