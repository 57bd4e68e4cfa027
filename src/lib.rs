pub mod constants;
pub mod ellipsoid;
pub mod geodetic;
pub mod position;
pub mod propagator;
pub mod satgeo;
pub mod satgeo_errors;
