//! # SatGeo: sub-satellite point façade
//!
//! This module defines [`SatGeo`](crate::satgeo::SatGeo), which wires the three stages of the
//! pipeline together:
//!
//! 1. **Propagation** – a caller-provided [`Propagator`] evaluates an [`ElementSet`] at an epoch.
//! 2. **Unit normalization** – [`UnitNormalizer`] turns the native output into kilometers.
//! 3. **Geodetic resolution** – [`GeodeticResolver`] yields latitude and longitude.
//!
//! ```text
//! ElementSet, Epoch ──▶ Propagator ──RawPosition──▶ UnitNormalizer ──PositionVector──▶ GeodeticResolver ──▶ GeodeticCoordinate
//! ```
//!
//! Every failure surfaces as a distinct [`SatGeoError`] variant: propagator failures are passed
//! through unchanged inside [`SatGeoError::Propagation`], domain and convergence failures come
//! from the resolver. Nothing is swallowed, including in the catalog-wide
//! [`locate_all`](crate::satgeo::SatGeo::locate_all).
//!
//! ## Typical usage
//!
//! ```rust
//! use hifitime::{Epoch, TimeScale};
//! use satgeo::position::RawPosition;
//! use satgeo::propagator::{ElementSet, Propagator};
//! use satgeo::satgeo::SatGeo;
//! use satgeo::satgeo_errors::PropagationError;
//!
//! struct Parked;
//!
//! impl Propagator for Parked {
//!     fn propagate(&self, _: &ElementSet, _: &Epoch) -> Result<RawPosition, PropagationError> {
//!         Ok(RawPosition::new(0.042164, 0.0, 0.0))
//!     }
//! }
//!
//! let satgeo = SatGeo::new(Parked);
//! let epoch = Epoch::from_mjd_in_time_scale(59336.35625, TimeScale::UTC);
//! let coord = satgeo.locate(&ElementSet::new("GEO-1", ""), &epoch)?;
//! assert!(coord.latitude.abs() < 1e-9);
//! # Ok::<(), satgeo::satgeo_errors::SatGeoError>(())
//! ```

use hifitime::{Duration, Epoch};

use crate::{
    geodetic::{
        resolver::{GeodeticResolver, IterationObserver},
        GeodeticCoordinate,
    },
    position::{PositionVector, UnitNormalizer},
    propagator::{ElementSet, Propagator},
    satgeo_errors::SatGeoError,
};

#[derive(Debug, Clone)]
pub struct SatGeo<P> {
    propagator: P,
    normalizer: UnitNormalizer,
    resolver: GeodeticResolver,
}

impl<P: Propagator> SatGeo<P> {
    /// Build a pipeline around `propagator` with the default normalizer (×10⁶) and the default
    /// resolver (reference ellipsoid, tolerance 0.1, at most 50 steps).
    pub fn new(propagator: P) -> Self {
        SatGeo {
            propagator,
            normalizer: UnitNormalizer::default(),
            resolver: GeodeticResolver::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: UnitNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_resolver(mut self, resolver: GeodeticResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    pub fn normalizer(&self) -> &UnitNormalizer {
        &self.normalizer
    }

    pub fn resolver(&self) -> &GeodeticResolver {
        &self.resolver
    }

    /// ECEF position of a satellite in kilometers.
    ///
    /// Arguments
    /// -----------------
    /// * `elements`: element set of the satellite.
    /// * `epoch`: evaluation epoch, forwarded untouched to the propagator.
    ///
    /// Return
    /// ----------
    /// * The normalized [`PositionVector`], or [`SatGeoError::Propagation`].
    pub fn position(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<PositionVector, SatGeoError> {
        let raw = self.propagator.propagate(elements, epoch)?;
        Ok(self.normalizer.normalize(raw))
    }

    /// Geodetic latitude and longitude of the sub-satellite point at `epoch`.
    ///
    /// Return
    /// ----------
    /// * A [`GeodeticCoordinate`] in degrees, or the first failure met along the pipeline.
    ///
    /// See also
    /// ------------
    /// * [`SatGeo::locate_with_observer`] – same, with latitude iteration steps reported.
    /// * [`SatGeo::locate_now`] – evaluation at the current system time.
    pub fn locate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<GeodeticCoordinate, SatGeoError> {
        let pos = self.position(elements, epoch)?;
        let coord = self.resolver.resolve(&pos)?;
        tracing::debug!(
            designation = %elements.designation,
            %epoch,
            latitude = coord.latitude,
            longitude = coord.longitude,
            "satellite located"
        );
        Ok(coord)
    }

    pub fn locate_with_observer<O: IterationObserver + ?Sized>(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
        observer: &mut O,
    ) -> Result<GeodeticCoordinate, SatGeoError> {
        let pos = self.position(elements, epoch)?;
        self.resolver.resolve_with_observer(&pos, observer)
    }

    /// Locate a satellite at the current system time.
    pub fn locate_now(&self, elements: &ElementSet) -> Result<GeodeticCoordinate, SatGeoError> {
        let now = Epoch::now().map_err(|e| SatGeoError::SystemClock(e.to_string()))?;
        self.locate(elements, &now)
    }

    /// Locate every satellite of a catalog at the same epoch.
    ///
    /// Each entry keeps its own result, so one unresolvable satellite does not hide the others
    /// and every failure stays inspectable.
    ///
    /// Return
    /// ----------
    /// * One `(designation, result)` pair per element set, in input order.
    pub fn locate_all<'a>(
        &self,
        catalog: &'a [ElementSet],
        epoch: &Epoch,
    ) -> Vec<(&'a str, Result<GeodeticCoordinate, SatGeoError>)> {
        catalog
            .iter()
            .map(|elements| {
                let result = self.locate(elements, epoch);
                if let Err(err) = &result {
                    tracing::warn!(designation = %elements.designation, %err, "satellite not resolved");
                }
                (elements.designation.as_str(), result)
            })
            .collect()
    }

    /// Sub-satellite points at `count` epochs spaced by `step`, starting at `start`.
    ///
    /// Return
    /// ----------
    /// * The `(epoch, coordinate)` samples, or the first failure (the track is not truncated
    ///   silently).
    pub fn ground_track(
        &self,
        elements: &ElementSet,
        start: Epoch,
        step: Duration,
        count: usize,
    ) -> Result<Vec<(Epoch, GeodeticCoordinate)>, SatGeoError> {
        let mut track = Vec::with_capacity(count);
        let mut epoch = start;
        for _ in 0..count {
            track.push((epoch, self.locate(elements, &epoch)?));
            epoch = epoch + step;
        }
        Ok(track)
    }
}

#[cfg(test)]
mod satgeo_test {
    use super::*;
    use crate::{
        geodetic::resolver::IterationStep,
        position::RawPosition,
        satgeo_errors::{DomainError, PropagationError},
    };
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    /// Returns a fixed native-unit position per designation.
    struct Table;

    impl Propagator for Table {
        fn propagate(
            &self,
            elements: &ElementSet,
            epoch: &Epoch,
        ) -> Result<RawPosition, PropagationError> {
            if epoch.to_mjd_utc_days() > 70000.0 {
                return Err(PropagationError::EpochOutOfRange {
                    epoch_mjd: epoch.to_mjd_utc_days(),
                });
            }
            match elements.designation.as_str() {
                "EQUATOR" => Ok(RawPosition::new(0.006378, 0.0, 0.0)),
                "POLE" => Ok(RawPosition::new(0.0, 0.0, 0.006357)),
                "WEST" => Ok(RawPosition::new(-0.005, -0.003, 0.002)),
                other => Err(PropagationError::SatelliteNotFound(other.to_string())),
            }
        }
    }

    fn epoch() -> Epoch {
        Epoch::from_mjd_in_time_scale(59336.35625, TimeScale::UTC)
    }

    #[test]
    fn test_locate_equator() {
        let satgeo = SatGeo::new(Table);
        let coord = satgeo
            .locate(&ElementSet::new("EQUATOR", ""), &epoch())
            .unwrap();
        assert_abs_diff_eq!(coord.latitude, 0.0, epsilon = 1e-9);
        assert_eq!(coord.longitude, 0.0);
    }

    #[test]
    fn test_locate_keeps_quadrant() {
        let satgeo = SatGeo::new(Table);
        let coord = satgeo
            .locate(&ElementSet::new("WEST", ""), &epoch())
            .unwrap();
        assert!(coord.longitude < -90.0);
        assert!(coord.latitude > 0.0);
    }

    #[test]
    fn test_locate_all_keeps_failures_distinct() {
        let satgeo = SatGeo::new(Table);
        let catalog = vec![
            ElementSet::new("EQUATOR", ""),
            ElementSet::new("POLE", ""),
            ElementSet::new("CALSPHERE 1", ""),
        ];
        let results = satgeo.locate_all(&catalog, &epoch());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "EQUATOR");
        assert!(results[0].1.is_ok());
        assert_eq!(
            results[1].1,
            Err(SatGeoError::Domain(DomainError::PolarAxis))
        );
        assert_eq!(
            results[2].1,
            Err(SatGeoError::Propagation(PropagationError::SatelliteNotFound(
                "CALSPHERE 1".into()
            )))
        );
    }

    #[test]
    fn test_epoch_out_of_range_passes_through() {
        let satgeo = SatGeo::new(Table);
        let late = Epoch::from_mjd_in_time_scale(80000.0, TimeScale::UTC);
        let err = satgeo
            .locate(&ElementSet::new("EQUATOR", ""), &late)
            .unwrap_err();
        assert!(matches!(
            err,
            SatGeoError::Propagation(PropagationError::EpochOutOfRange { .. })
        ));
    }

    #[test]
    fn test_ground_track_stops_on_error() {
        let satgeo = SatGeo::new(Table);
        let track = satgeo
            .ground_track(
                &ElementSet::new("EQUATOR", ""),
                epoch(),
                Duration::from_seconds(60.0),
                5,
            )
            .unwrap();
        assert_eq!(track.len(), 5);
        assert_eq!(track[1].0 - track[0].0, Duration::from_seconds(60.0));

        let start = Epoch::from_mjd_in_time_scale(69999.999, TimeScale::UTC);
        let err = satgeo
            .ground_track(
                &ElementSet::new("EQUATOR", ""),
                start,
                Duration::from_seconds(3600.0),
                3,
            )
            .unwrap_err();
        assert!(matches!(err, SatGeoError::Propagation(_)));
    }

    #[test]
    fn test_locate_with_observer() {
        let satgeo = SatGeo::new(Table);
        let mut count = 0usize;
        let mut counter = |_: &IterationStep| count += 1;
        satgeo
            .locate_with_observer(&ElementSet::new("WEST", ""), &epoch(), &mut counter)
            .unwrap();
        assert!(count >= 1);
    }
}
