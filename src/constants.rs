//! # Constants and type definitions for satgeo
//!
//! This module centralizes the **geodetic constants**, **unit conversion factors**, and
//! **type aliases** shared by the normalizer, the geodetic resolvers and the propagation
//! façade.
//!
//! ## Overview
//!
//! - Reference ellipsoid axes (in kilometers)
//! - Propagator unit → kilometer scale factor
//! - Default settings of the latitude fixed-point iteration
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Ellipsoid axes
// -------------------------------------------------------------------------------------------------

/// Equatorial radius of the reference ellipsoid used by the satellite viewer, in kilometers
pub const REFERENCE_MAJOR_AXIS: Kilometer = 6378.0;

/// Polar radius of the reference ellipsoid used by the satellite viewer, in kilometers
pub const REFERENCE_MINOR_AXIS: Kilometer = 6357.0;

/// Earth equatorial radius in kilometers (GRS1980/WGS84)
pub const WGS84_MAJOR_AXIS: Kilometer = 6_378.137;

/// Earth polar radius in kilometers (GRS1980/WGS84)
pub const WGS84_MINOR_AXIS: Kilometer = 6_356.7523;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Propagator native unit → kilometers.
///
/// The propagator reports positions in a unit 10⁶ times larger than a kilometer.
/// This factor must be applied exactly once, by [`UnitNormalizer`](crate::position::UnitNormalizer).
pub const PROPAGATOR_UNIT_TO_KM: f64 = 1.0e6;

// -------------------------------------------------------------------------------------------------
// Latitude iteration defaults
// -------------------------------------------------------------------------------------------------

/// Default stopping threshold on the change of the latitude iterate (dimensionless).
pub const DEFAULT_LATITUDE_TOLERANCE: f64 = 0.1;

/// Default cap on the number of latitude iteration steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
/// Satellite designation used to key element sets (catalog number or name)
pub type Designation = String;
