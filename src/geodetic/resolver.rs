//! # Iterative ECEF → geodetic resolver
//!
//! [`GeodeticResolver`] converts an ECEF [`PositionVector`] (km) into a [`GeodeticCoordinate`]
//! (degrees) on an [`EllipsoidModel`], without a closed-form ellipsoidal inverse.
//!
//! ## Longitude
//!
//! Computed directly with the two-argument arctangent, [`longitude`], which resolves all four
//! quadrants. The half-circle formula `atan(y / x)` is still available as
//! [`principal_longitude`] for callers that need it.
//!
//! ## Latitude
//!
//! Fixed-point iteration on the auxiliary quantity `κ = (p / z) · tan φ`:
//!
//! ```text
//! p²    = x² + y²
//! e²    = 1 − (b/a)²
//! κ₀    = 1 / (1 − e²)
//! c     = (p² + (1 − e²) z² κₙ²)^{3/2} / (a e²)
//! κₙ₊₁  = 1 + (p² + (1 − e²) z² κₙ³) / (c − p²)
//! ```
//!
//! Iteration stops once `|κₙ₊₁ − κₙ| < tolerance`, and the latitude is recovered from
//! `tan φ = κ z / p`. For a point on the ellipsoid surface, `κ₀` is already the fixed point.
//!
//! The number of steps is capped by [`ResolverParams::max_iterations`]; reaching the cap
//! yields [`SatGeoError::NonConvergence`] with the last two iterates.
//!
//! ## Observability
//!
//! Every step emits a `tracing` event at `TRACE` level and is forwarded to an optional
//! [`IterationObserver`]. The computation itself has no side effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, DEFAULT_LATITUDE_TOLERANCE, DEFAULT_MAX_ITERATIONS};
use crate::ellipsoid::EllipsoidModel;
use crate::geodetic::GeodeticCoordinate;
use crate::position::PositionVector;
use crate::satgeo_errors::{DomainError, SatGeoError};

/// Stopping rules of the latitude iteration.
///
/// Defaults
/// -----------------
/// * `tolerance`: 0.1 (dimensionless, on the iterate κ)
/// * `max_iterations`: 50
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverParams {
    /// Threshold on `|κₙ₊₁ − κₙ|` below which the iteration is considered converged.
    pub tolerance: f64,
    /// Maximum number of iteration steps before reporting non-convergence.
    pub max_iterations: usize,
}

impl Default for ResolverParams {
    fn default() -> Self {
        ResolverParams {
            tolerance: DEFAULT_LATITUDE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ResolverParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`ResolverParamsBuilder`] initialized with the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use satgeo::geodetic::resolver::ResolverParams;
    ///
    /// let params = ResolverParams::builder()
    ///     .tolerance(1e-12)
    ///     .max_iterations(20)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.max_iterations, 20);
    /// ```
    pub fn builder() -> ResolverParamsBuilder {
        ResolverParamsBuilder::new()
    }
}

impl fmt::Display for ResolverParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResolverParams {{ tolerance = {:e}, max_iterations = {} }}",
            self.tolerance, self.max_iterations
        )
    }
}

/// Builder for [`ResolverParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ResolverParamsBuilder {
    params: ResolverParams,
}

impl ResolverParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ResolverParams::default(),
        }
    }

    pub fn tolerance(mut self, v: f64) -> Self {
        self.params.tolerance = v;
        self
    }

    pub fn max_iterations(mut self, v: usize) -> Self {
        self.params.max_iterations = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `tolerance` must be finite and strictly positive.
    /// * `max_iterations ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(ResolverParams)`, or [`SatGeoError::InvalidResolverParameter`] naming the rule that failed.
    pub fn build(self) -> Result<ResolverParams, SatGeoError> {
        let p = &self.params;

        if !(p.tolerance.is_finite() && p.tolerance > 0.0) {
            return Err(SatGeoError::InvalidResolverParameter(
                "tolerance must be finite and > 0".into(),
            ));
        }
        if p.max_iterations == 0 {
            return Err(SatGeoError::InvalidResolverParameter(
                "max_iterations must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}

/// One step of the latitude iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStep {
    /// 1-based step index.
    pub iteration: usize,
    pub previous: f64,
    pub current: f64,
}

/// Receives every latitude iteration step.
///
/// Implemented for any `FnMut(&IterationStep)`, so a closure can be passed directly.
pub trait IterationObserver {
    fn on_step(&mut self, step: &IterationStep);
}

impl<F> IterationObserver for F
where
    F: FnMut(&IterationStep),
{
    fn on_step(&mut self, step: &IterationStep) {
        self(step)
    }
}

/// Observer that ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {
    fn on_step(&mut self, _step: &IterationStep) {}
}

/// Quadrant-aware longitude, `atan2(y, x)`, in degrees within `(-180, 180]`.
///
/// Return
/// ----------
/// * The longitude, or [`DomainError::PolarAxis`] when `x = y = 0`
///   ([`DomainError::NonFinite`] for non-finite input).
pub fn longitude(pos: &PositionVector) -> Result<Degree, DomainError> {
    pos.ensure_finite()?;
    if pos.x() == 0.0 && pos.y() == 0.0 {
        return Err(DomainError::PolarAxis);
    }
    Ok(pos.y().atan2(pos.x()).to_degrees())
}

/// Half-circle longitude, `atan(y / x)`, in degrees within `(-90, 90)`.
///
/// This formula cannot tell `(x, y)` from `(−x, −y)`; use [`longitude`] for a full-circle
/// result.
///
/// Return
/// ----------
/// * The longitude, or [`DomainError::UndefinedLongitudeRatio`] when `x = 0`.
pub fn principal_longitude(pos: &PositionVector) -> Result<Degree, DomainError> {
    pos.ensure_finite()?;
    if pos.x() == 0.0 {
        return Err(DomainError::UndefinedLongitudeRatio { y: pos.y() });
    }
    Ok((pos.y() / pos.x()).atan().to_degrees())
}

/// Inputs of one κ update that do not change between steps.
#[derive(Debug, Clone, Copy)]
struct LatitudeTerms {
    p_squared: f64,
    /// `(1 − e²) z²`
    scaled_z_squared: f64,
    /// `a e²`
    a_ecc_squared: f64,
}

impl LatitudeTerms {
    fn step(&self, kappa: f64) -> Result<f64, DomainError> {
        let c = (self.p_squared + self.scaled_z_squared * kappa * kappa).powf(1.5)
            / self.a_ecc_squared;
        let denominator = c - self.p_squared;
        if denominator == 0.0 {
            return Err(DomainError::DegenerateDenominator {
                iterate: kappa,
                p_squared: self.p_squared,
            });
        }

        let next = 1.0 + (self.p_squared + self.scaled_z_squared * kappa.powi(3)) / denominator;
        if !next.is_finite() {
            return Err(DomainError::DegenerateDenominator {
                iterate: kappa,
                p_squared: self.p_squared,
            });
        }
        Ok(next)
    }
}

/// ECEF → geodetic converter bound to an ellipsoid and iteration settings.
///
/// The resolver holds no mutable state: calling it twice on the same vector gives identical
/// results, and a single instance can be shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodeticResolver {
    ellipsoid: EllipsoidModel,
    params: ResolverParams,
}

impl GeodeticResolver {
    pub fn new(ellipsoid: EllipsoidModel, params: ResolverParams) -> Self {
        GeodeticResolver { ellipsoid, params }
    }

    pub fn ellipsoid(&self) -> &EllipsoidModel {
        &self.ellipsoid
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Convert an ECEF position into geodetic latitude and longitude.
    ///
    /// Arguments
    /// -----------------
    /// * `pos`: ECEF position in kilometers.
    ///
    /// Return
    /// ----------
    /// * A [`GeodeticCoordinate`] in degrees, or:
    ///   - [`SatGeoError::Domain`] for polar, non-finite or degenerate inputs,
    ///   - [`SatGeoError::NonConvergence`] when the iteration cap is reached.
    ///
    /// See also
    /// ------------
    /// * [`GeodeticResolver::resolve_with_observer`] – same conversion, with step reporting.
    /// * [`closed_form::ecef_to_geodetic`](crate::geodetic::closed_form::ecef_to_geodetic) – non-iterative alternative.
    pub fn resolve(&self, pos: &PositionVector) -> Result<GeodeticCoordinate, SatGeoError> {
        self.resolve_with_observer(pos, &mut NoopObserver)
    }

    /// Same as [`GeodeticResolver::resolve`], reporting every latitude step to `observer`.
    pub fn resolve_with_observer<O: IterationObserver + ?Sized>(
        &self,
        pos: &PositionVector,
        observer: &mut O,
    ) -> Result<GeodeticCoordinate, SatGeoError> {
        let longitude = longitude(pos)?;
        let latitude = self.latitude_with_observer(pos, observer)?;
        Ok(GeodeticCoordinate::new(latitude, longitude))
    }

    /// Geodetic latitude in degrees, by bounded fixed-point iteration.
    pub fn latitude(&self, pos: &PositionVector) -> Result<Degree, SatGeoError> {
        self.latitude_with_observer(pos, &mut NoopObserver)
    }

    /// Geodetic latitude in degrees, reporting every step to `observer`.
    ///
    /// Inside the evolute of the meridian ellipse (`p < a e²`, a few tens of kilometers from
    /// the center) several surface normals pass through the point, and the result is not unique.
    ///
    /// Arguments
    /// -----------------
    /// * `pos`: ECEF position in kilometers.
    /// * `observer`: receives `(iteration, previous, current)` after each update of κ.
    ///
    /// Return
    /// ----------
    /// * The latitude in `[-90, 90]`, or:
    ///   - [`DomainError::PolarAxis`] if `x² + y² = 0`,
    ///   - [`DomainError::DegenerateEllipsoid`] if the ellipsoid is a sphere,
    ///   - [`DomainError::DegenerateDenominator`] if `c − p² = 0` or κ stops being finite,
    ///   - [`SatGeoError::NonConvergence`] after `max_iterations` steps without meeting the tolerance.
    pub fn latitude_with_observer<O: IterationObserver + ?Sized>(
        &self,
        pos: &PositionVector,
        observer: &mut O,
    ) -> Result<Degree, SatGeoError> {
        pos.ensure_finite()?;

        let p_squared = pos.equatorial_radius_squared();
        if p_squared == 0.0 {
            return Err(DomainError::PolarAxis.into());
        }

        let ecc_squared = self.ellipsoid.eccentricity_squared();
        if ecc_squared == 0.0 {
            return Err(DomainError::DegenerateEllipsoid {
                a: self.ellipsoid.semi_major_axis(),
                b: self.ellipsoid.semi_minor_axis(),
            }
            .into());
        }

        let terms = LatitudeTerms {
            p_squared,
            scaled_z_squared: (1.0 - ecc_squared) * pos.z() * pos.z(),
            a_ecc_squared: self.ellipsoid.semi_major_axis() * ecc_squared,
        };

        let mut previous = 1.0 / (1.0 - ecc_squared);
        let mut current = previous;

        for iteration in 1..=self.params.max_iterations {
            current = terms.step(previous)?;

            tracing::trace!(iteration, previous, current, "latitude iteration step");
            observer.on_step(&IterationStep {
                iteration,
                previous,
                current,
            });

            if (current - previous).abs() < self.params.tolerance {
                let latitude = (current * pos.z()).atan2(p_squared.sqrt()).to_degrees();
                tracing::debug!(iterations = iteration, latitude, "latitude converged");
                return Ok(latitude);
            }

            if iteration < self.params.max_iterations {
                previous = current;
            }
        }

        tracing::debug!(
            max_iterations = self.params.max_iterations,
            last = current,
            "latitude iteration hit its cap"
        );
        Err(SatGeoError::NonConvergence {
            last_iterate: current,
            previous_iterate: previous,
            iterations: self.params.max_iterations,
        })
    }
}
