//! Locate a few satellites with a toy circular-orbit propagator.
//!
//! Run with `RUST_LOG=satgeo=trace` to see every latitude iteration step.

use std::f64::consts::TAU;

use hifitime::{Duration, Epoch, TimeScale};
use satgeo::position::RawPosition;
use satgeo::propagator::{epoch_to_mjd, ElementSet, Propagator};
use satgeo::satgeo::SatGeo;
use satgeo::satgeo_errors::PropagationError;

/// Circular orbits described by `"<radius km> <inclination deg> <period min>"` payloads.
///
/// Output is in the propagator's native unit (10⁶ km), and the Earth's rotation is ignored.
struct CircularOrbit {
    reference_mjd: f64,
}

impl Propagator for CircularOrbit {
    fn propagate(
        &self,
        elements: &ElementSet,
        epoch: &Epoch,
    ) -> Result<RawPosition, PropagationError> {
        let fields: Vec<f64> = elements
            .payload
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<_, _>>()
            .map_err(|_| PropagationError::SatelliteNotFound(elements.designation.clone()))?;
        let [radius, inclination, period] = fields[..] else {
            return Err(PropagationError::SatelliteNotFound(
                elements.designation.clone(),
            ));
        };

        let dt_days = epoch_to_mjd(epoch) - self.reference_mjd;
        if dt_days.abs() > 30.0 {
            return Err(PropagationError::EpochOutOfRange {
                epoch_mjd: epoch_to_mjd(epoch),
            });
        }

        let u = TAU * (dt_days * 1440.0 / period).fract();
        let inc = inclination.to_radians();
        let (x, y, z) = (
            radius * u.cos(),
            radius * u.sin() * inc.cos(),
            radius * u.sin() * inc.sin(),
        );
        Ok(RawPosition::new(x / 1e6, y / 1e6, z / 1e6))
    }
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let epoch = Epoch::from_mjd_in_time_scale(59336.35625, TimeScale::UTC);
    let satgeo = SatGeo::new(CircularOrbit {
        reference_mjd: 59336.0,
    });

    let catalog = vec![
        ElementSet::new("ISS (ZARYA)", "6778 51.64 92.68"),
        ElementSet::new("NOAA 19", "7229 99.19 102.12"),
        ElementSet::new("BROKEN", "not an element set"),
    ];

    for (designation, result) in satgeo.locate_all(&catalog, &epoch) {
        match result {
            Ok(coord) => println!("{designation:<12} {coord}"),
            Err(err) => println!("{designation:<12} unresolved: {err}"),
        }
    }

    match satgeo.ground_track(&catalog[0], epoch, Duration::from_seconds(600.0), 6) {
        Ok(track) => {
            for (t, coord) in track {
                println!("{t}  {coord}");
            }
        }
        Err(err) => eprintln!("ground track failed: {err}"),
    }
}
