use thiserror::Error;

use crate::constants::{Kilometer, MJD};

/// Mathematical precondition violated by an input vector or an ellipsoid.
///
/// None of these are retryable with the same input: the caller must supply a different
/// vector or treat the satellite as non-resolvable at that instant.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("Position lies on the polar axis (x = y = 0): longitude and radial term are undefined")]
    PolarAxis,

    #[error("Longitude ratio y/x is undefined for x = 0 (y = {y})")]
    UndefinedLongitudeRatio { y: Kilometer },

    #[error(
        "Latitude iteration hit a degenerate denominator (iterate = {iterate}, p² = {p_squared})"
    )]
    DegenerateDenominator { iterate: f64, p_squared: f64 },

    #[error("Position has non-finite components ({x}, {y}, {z})")]
    NonFinite {
        x: Kilometer,
        y: Kilometer,
        z: Kilometer,
    },

    #[error("Ellipsoid (a = {a}, b = {b}) has zero eccentricity: latitude iteration is undefined")]
    DegenerateEllipsoid { a: Kilometer, b: Kilometer },

    #[error("Closed-form conversion is undefined for this position (r² = {r_squared}, g = {g})")]
    ClosedFormBreakdown { r_squared: f64, g: f64 },
}

/// Failure reported by the external orbital propagator.
///
/// These are passed through unchanged by [`SatGeo`](crate::satgeo::SatGeo).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    #[error("Satellite not found in element source: {0}")]
    SatelliteNotFound(String),

    #[error("Epoch MJD {epoch_mjd} is outside the valid range of the element set")]
    EpochOutOfRange { epoch_mjd: MJD },

    #[error("Propagator failure: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum SatGeoError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error(
        "Latitude iteration did not converge after {iterations} steps (last = {last_iterate}, previous = {previous_iterate})"
    )]
    NonConvergence {
        last_iterate: f64,
        previous_iterate: f64,
        iterations: usize,
    },

    #[error("Propagation error: {0}")]
    Propagation(#[from] PropagationError),

    #[error("Invalid resolver parameter: {0}")]
    InvalidResolverParameter(String),

    #[error("Invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),

    #[error("Unable to read the system clock: {0}")]
    SystemClock(String),
}

impl PartialEq for SatGeoError {
    fn eq(&self, other: &Self) -> bool {
        use SatGeoError::*;
        match (self, other) {
            (Domain(a), Domain(b)) => a == b,
            (
                NonConvergence {
                    last_iterate: l1,
                    previous_iterate: p1,
                    iterations: i1,
                },
                NonConvergence {
                    last_iterate: l2,
                    previous_iterate: p2,
                    iterations: i2,
                },
            ) => l1 == l2 && p1 == p2 && i1 == i2,
            (Propagation(a), Propagation(b)) => a == b,
            (InvalidResolverParameter(a), InvalidResolverParameter(b)) => a == b,
            (InvalidEllipsoid(a), InvalidEllipsoid(b)) => a == b,
            (SystemClock(a), SystemClock(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod satgeo_errors_test {
    use super::*;

    #[test]
    fn test_error_kinds_stay_distinct() {
        let domain: SatGeoError = DomainError::PolarAxis.into();
        let propagation: SatGeoError = PropagationError::SatelliteNotFound("ISS".into()).into();

        assert_eq!(domain, SatGeoError::Domain(DomainError::PolarAxis));
        assert_ne!(domain, propagation);
        assert_eq!(
            propagation.to_string(),
            "Propagation error: Satellite not found in element source: ISS"
        );
    }

    #[test]
    fn test_non_convergence_message() {
        let err = SatGeoError::NonConvergence {
            last_iterate: 1.5,
            previous_iterate: 1.25,
            iterations: 3,
        };
        assert_eq!(
            err.to_string(),
            "Latitude iteration did not converge after 3 steps (last = 1.5, previous = 1.25)"
        );
    }
}
