use std::fmt::Display;

use crate::{utility::parse_pair, Error, ParseCoord};

/// A position in the South Pole survey frame: northing and easting in feet,
/// on the grid defined by the pole marker as surveyed on 2000-01-01.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoleCoordinate {
    #[cfg_attr(feature = "serde", serde(alias = "northing"))]
    pub(crate) northing_ft: f64,
    #[cfg_attr(feature = "serde", serde(alias = "easting"))]
    pub(crate) easting_ft: f64,
}

impl PoleCoordinate {
    /// Creates a survey-frame point. No range checks are applied.
    ///
    /// ```
    /// use polecoords::PoleCoordinate;
    ///
    /// let coord = PoleCoordinate::new(50809.76, 49491.12);
    /// assert_eq!(coord.northing(), 50809.76);
    /// assert_eq!(coord.easting(), 49491.12);
    /// ```
    pub fn new(northing_ft: f64, easting_ft: f64) -> PoleCoordinate {
        Self {
            northing_ft,
            easting_ft,
        }
    }

    /// Northing in feet.
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing_ft
    }

    /// Easting in feet.
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting_ft
    }
}

impl From<(f64, f64)> for PoleCoordinate {
    fn from((northing_ft, easting_ft): (f64, f64)) -> Self {
        PoleCoordinate::new(northing_ft, easting_ft)
    }
}

impl ParseCoord for PoleCoordinate {
    fn parse_coord(value: &str) -> Result<Self, Error> {
        let (northing, easting) = parse_pair(value, "Pole coordinate")?;
        if !northing.is_finite() || !easting.is_finite() {
            return Err(Error::Parse(format!("Pole coordinate `{value}` is not finite")));
        }
        Ok(PoleCoordinate::new(northing, easting))
    }
}

impl Display for PoleCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing_ft);
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting_ft);
        write!(f, "{northing} {easting}")
    }
}
