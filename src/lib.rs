#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Time-dependent conversion between the South Pole survey frame
//! (northing/easting in feet, relative to the 2000 pole marker), the
//! [UPS](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
//! projection and WGS84 latitude/longitude.
//!
//! The survey marker sits on moving ice, so every conversion takes the date
//! of the survey and corrects for the marker's linear drift since 2000-01-01.
//!
//! ```
//! use chrono::NaiveDate;
//! use polecoords::pole_to_ups;
//!
//! let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let ups = pole_to_ups(50809.76, 49491.12, date, false);
//!
//! assert!(ups.northing().abs() < 1e-9);
//! assert!(ups.easting().abs() < 1e-9);
//! ```

use thiserror::Error;

pub mod converter;
pub mod drift;
pub mod latlon;
pub mod pole;
pub mod projector;
pub mod ups;
pub(crate) mod utility;

pub use constants::M_PER_FT;
pub use converter::{
    latlon_to_pole, pole_to_latlon, pole_to_ups, ups_to_pole, DriftCorrectedConverter,
};
pub use drift::{ConverterConfig, DriftModel, ReferenceFrame};
pub use latlon::LatLon;
pub use pole::PoleCoordinate;
pub use projector::GeodesyProjector;
pub use ups::{Pole, UpsCoordinate, UpsProjector};

pub(crate) mod projections {
    pub mod polar_stereographic;
}

pub(crate) mod constants;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Coordinate parameters are not valid: {0}")]
    InvalidCoord(String),
    #[error("UPS coords are invalid: {0}")]
    InvalidUpsCoords(String),
    #[error("Coordinate type {coord_type} not valid for conversion to {dest_type}: {msg}")]
    InvalidRange {
        coord_type: String,
        dest_type: String,
        msg: String,
    },
    #[error("Drift model is invalid: {0}")]
    InvalidDriftModel(String),
    #[error("Could not parse coordinate: {0}")]
    Parse(String),
}

pub trait ParseCoord {
    /// Parses a coordinate from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text is not a valid coordinate.
    fn parse_coord(value: &str) -> Result<Self, Error>
    where Self: Sized;
}

/// Parses any [`ParseCoord`] type from a string.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not a valid coordinate.
///
/// # Usage
///
/// ```
/// use polecoords::{from_str, PoleCoordinate};
///
/// let coord: PoleCoordinate = from_str("50809.76 49491.12").unwrap();
/// assert_eq!(coord.northing(), 50809.76);
/// ```
pub fn from_str<S, T>(value: S) -> Result<T, Error>
where
    S: AsRef<str>,
    T: ParseCoord
{
    T::parse_coord(value.as_ref())
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
