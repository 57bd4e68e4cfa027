//! Closed-form ECEF → geodetic conversion (Heikkinen, 1982).
//!
//! Exact to floating-point rounding for points at any height outside the Earth's core, and
//! independent of the fixed-point iteration in [`resolver`](crate::geodetic::resolver). It is
//! the reference the iterative resolver is checked against.

use crate::ellipsoid::EllipsoidModel;
use crate::geodetic::GeodeticPosition;
use crate::position::PositionVector;
use crate::satgeo_errors::DomainError;

/// Convert an ECEF position into geodetic latitude, longitude and ellipsoidal height.
///
/// Arguments
/// -----------------
/// * `pos`: ECEF position in kilometers.
/// * `ellipsoid`: the reference ellipsoid.
///
/// Return
/// ----------
/// * A [`GeodeticPosition`] (degrees, degrees, km), or:
///   - [`DomainError::NonFinite`] for non-finite components,
///   - [`DomainError::PolarAxis`] when `x = y = 0`,
///   - [`DomainError::ClosedFormBreakdown`] deep inside the ellipsoid (`g < 0`) or when the
///     intermediate terms overflow.
pub fn ecef_to_geodetic(
    pos: &PositionVector,
    ellipsoid: &EllipsoidModel,
) -> Result<GeodeticPosition, DomainError> {
    pos.ensure_finite()?;

    let r_squared = pos.equatorial_radius_squared();
    if r_squared == 0.0 {
        return Err(DomainError::PolarAxis);
    }

    let a = ellipsoid.semi_major_axis();
    let b = ellipsoid.semi_minor_axis();
    let e2 = ellipsoid.eccentricity_squared();
    let ep2 = ellipsoid.second_eccentricity_squared();
    let z = pos.z();
    let r = r_squared.sqrt();

    let f = 54.0 * b * b * z * z;
    let g = r_squared + (1.0 - e2) * z * z - e2 * (a * a - b * b);
    let c = e2 * e2 * f * r_squared / g.powi(3);
    let s = (1.0 + c + (c * c + 2.0 * c).sqrt()).cbrt();
    let k = s + 1.0 + 1.0 / s;
    let p = f / (3.0 * k * k * g * g);
    let q = (1.0 + 2.0 * e2 * e2 * p).sqrt();
    let r0 = -(p * e2 * r) / (1.0 + q)
        + (0.5 * a * a * (1.0 + 1.0 / q)
            - p * (1.0 - e2) * z * z / (q * (1.0 + q))
            - 0.5 * p * r_squared)
            .sqrt();

    let u = ((r - e2 * r0).powi(2) + z * z).sqrt();
    let v = ((r - e2 * r0).powi(2) + (1.0 - e2) * z * z).sqrt();
    let z0 = b * b * z / (a * v);

    let height = u * (1.0 - b * b / (a * v));
    let latitude = (z + ep2 * z0).atan2(r).to_degrees();
    if !(latitude.is_finite() && height.is_finite()) {
        return Err(DomainError::ClosedFormBreakdown { r_squared, g });
    }
    let longitude = pos.y().atan2(pos.x()).to_degrees();

    Ok(GeodeticPosition::new(latitude, longitude, height))
}

#[cfg(test)]
mod closed_form_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equator_surface() {
        let geo = ecef_to_geodetic(
            &PositionVector::new(6378.0, 0.0, 0.0),
            &EllipsoidModel::REFERENCE,
        )
        .unwrap();
        assert_abs_diff_eq!(geo.latitude, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geo.longitude, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(geo.height, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_recovers_forward_conversion() {
        let model = EllipsoidModel::WGS84;
        for &(lat, lon, h) in &[
            (20.707233557, -156.255910, 3.067694),
            (-33.8688, 151.2093, 0.0),
            (51.4779, -0.0015, 0.046),
            (64.0, 100.0, 550.0),
            (-75.0, -60.0, 35_786.0),
        ] {
            let pos = model.geodetic_to_ecef(&GeodeticPosition::new(lat, lon, h));
            let geo = ecef_to_geodetic(&pos, &model).unwrap();
            assert_abs_diff_eq!(geo.latitude, lat, epsilon = 1e-7);
            assert_abs_diff_eq!(geo.longitude, lon, epsilon = 1e-9);
            assert_abs_diff_eq!(geo.height, h, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_polar_axis() {
        assert_eq!(
            ecef_to_geodetic(&PositionVector::new(0.0, 0.0, 6357.0), &EllipsoidModel::REFERENCE),
            Err(DomainError::PolarAxis)
        );
    }

    #[test]
    fn test_deep_interior_is_domain_error() {
        let err = ecef_to_geodetic(
            &PositionVector::new(10.0, 0.0, 10.0),
            &EllipsoidModel::REFERENCE,
        )
        .unwrap_err();
        match err {
            DomainError::ClosedFormBreakdown { r_squared, g } => {
                assert_eq!(r_squared, 100.0);
                assert!(g < 0.0);
            }
            other => panic!("expected ClosedFormBreakdown, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_input_is_domain_error() {
        let err = ecef_to_geodetic(
            &PositionVector::new(1e200, 1e200, 1e200),
            &EllipsoidModel::REFERENCE,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::ClosedFormBreakdown { .. }));
    }
}
