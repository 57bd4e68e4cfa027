use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use satgeo::geodetic::GeodeticCoordinate;
use satgeo::position::RawPosition;
use satgeo::propagator::{ElementSet, Propagator};
use satgeo::satgeo_errors::PropagationError;

pub fn assert_coordinate_close(
    actual: &GeodeticCoordinate,
    expected: &GeodeticCoordinate,
    epsilon: f64,
) {
    assert_abs_diff_eq!(actual.latitude, expected.latitude, epsilon = epsilon);
    assert_abs_diff_eq!(actual.longitude, expected.longitude, epsilon = epsilon);
}

/// Propagator returning stored native-unit positions, keyed by designation.
#[allow(dead_code)]
pub struct CatalogPropagator {
    pub entries: Vec<(&'static str, RawPosition)>,
    /// Last MJD (UTC) the element sets are valid for.
    pub valid_until_mjd: f64,
}

impl Propagator for CatalogPropagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<RawPosition, PropagationError> {
        let mjd = epoch.to_mjd_utc_days();
        if mjd > self.valid_until_mjd {
            return Err(PropagationError::EpochOutOfRange { epoch_mjd: mjd });
        }
        self.entries
            .iter()
            .find(|(name, _)| *name == elements.designation)
            .map(|(_, pos)| *pos)
            .ok_or_else(|| PropagationError::SatelliteNotFound(elements.designation.clone()))
    }
}
