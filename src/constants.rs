// Semi-major axis a
pub(crate) const WGS84_A: f64 = 6_378_137.;
// Flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// UPS central scale factor
pub(crate) const UPS_K0: f64 = 994.0 / 1000.;
// Offset added to both UPS axes when falsed
pub(crate) const UPS_FALSE_OFFSET: f64 = 2_000_000.;

/// Meters per international foot
pub const M_PER_FT: f64 = 0.3048;

// Pole marker position in the survey frame on 2000-01-01, in feet
pub(crate) const POLE2000_N: f64 = 50_809.76;
pub(crate) const POLE2000_E: f64 = 49_491.12;

// Marker drift fit to survey data, 1989-2020
pub(crate) const DRIFT_SPEED_M_PER_YR: f64 = 10.04;
pub(crate) const DRIFT_HEADING_DEG: f64 = 129.72;
pub(crate) const DRIFT_FIT_FIRST_YEAR: i32 = 1989;
pub(crate) const DRIFT_FIT_LAST_YEAR: i32 = 2020;

// Fixed-length year used to turn elapsed days into years
pub(crate) const DAYS_PER_YEAR: f64 = 365.24;
