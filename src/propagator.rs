//! # Propagation boundary
//!
//! The orbital propagator (SGP4/SDP4 or any other model) is an external collaborator. This
//! module only fixes the contract the rest of the crate relies on:
//!
//! - an [`ElementSet`] – an orbital element record loaded elsewhere (e.g. a TLE), keyed by
//!   designation and kept opaque here;
//! - the [`Propagator`] trait – `propagate(elements, epoch)` returning a [`RawPosition`] in the
//!   propagator's native unit, or a [`PropagationError`].
//!
//! Element sets are never parsed or validated by this crate.

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::{Designation, MJD};
use crate::position::RawPosition;
use crate::satgeo_errors::PropagationError;

/// Orbital element record of one satellite, as loaded from an external source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementSet {
    /// Key used by the source to find the satellite (name or catalog number).
    pub designation: Designation,
    /// Source payload, passed verbatim to the propagator.
    pub payload: String,
}

impl ElementSet {
    pub fn new(designation: impl Into<Designation>, payload: impl Into<String>) -> Self {
        ElementSet {
            designation: designation.into(),
            payload: payload.into(),
        }
    }
}

/// Black-box orbital propagator.
///
/// Implementations return the satellite position in **their native length unit**; the
/// conversion to kilometers is done by [`UnitNormalizer`](crate::position::UnitNormalizer).
pub trait Propagator {
    /// Position of the satellite described by `elements` at `epoch`.
    ///
    /// Errors
    /// -----------------
    /// * [`PropagationError::SatelliteNotFound`] if the designation is absent from the source.
    /// * [`PropagationError::EpochOutOfRange`] if `epoch` is outside the element set validity.
    fn propagate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<RawPosition, PropagationError>;
}

impl<P: Propagator + ?Sized> Propagator for &P {
    fn propagate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<RawPosition, PropagationError> {
        (**self).propagate(elements, epoch)
    }
}

impl<P: Propagator + ?Sized> Propagator for Box<P> {
    fn propagate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<RawPosition, PropagationError> {
        (**self).propagate(elements, epoch)
    }
}

/// Modified Julian Date (UTC) of an epoch, the time argument most propagators expect.
pub fn epoch_to_mjd(epoch: &Epoch) -> MJD {
    epoch.to_mjd_utc_days()
}

#[cfg(test)]
mod propagator_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::TimeScale;

    struct Fixed;

    impl Propagator for Fixed {
        fn propagate(
            &self,
            elements: &ElementSet,
            _epoch: &Epoch,
        ) -> Result<RawPosition, PropagationError> {
            if elements.designation == "ISS (ZARYA)" {
                Ok(RawPosition::new(0.004, 0.003, 0.004))
            } else {
                Err(PropagationError::SatelliteNotFound(
                    elements.designation.clone(),
                ))
            }
        }
    }

    #[test]
    fn test_boxed_and_borrowed_propagators() {
        let epoch = Epoch::from_mjd_in_time_scale(59336.35625, TimeScale::UTC);
        let iss = ElementSet::new("ISS (ZARYA)", "");
        let boxed: Box<dyn Propagator> = Box::new(Fixed);

        assert_eq!(
            boxed.propagate(&iss, &epoch),
            (&Fixed).propagate(&iss, &epoch)
        );
        assert_eq!(
            boxed.propagate(&ElementSet::new("LCS 1", ""), &epoch),
            Err(PropagationError::SatelliteNotFound("LCS 1".into()))
        );
    }

    #[test]
    fn test_epoch_to_mjd() {
        let epoch = Epoch::from_mjd_in_time_scale(59336.35625, TimeScale::UTC);
        assert_abs_diff_eq!(epoch_to_mjd(&epoch), 59336.35625, epsilon = 1e-9);
    }
}
