use std::fmt::Display;

use lazy_static::lazy_static;
use tracing::debug;

use crate::{
    constants::UPS_FALSE_OFFSET,
    latlon::LatLon,
    projections::polar_stereographic::PolarStereographic,
    projector::GeodesyProjector,
    Error, ThisOrThat,
};

const TILE: f64 = 100_000.;
// Validity square of falsed UPS coordinates, in tiles, south then north
const MIN_UPS_IND: [f64; 2] = [8., 13.];
const MAX_UPS_IND: [f64; 2] = [32., 27.];

// Latitude limits of the UPS zones, overlapping UTM by half a degree
const UPS_S_MAX_LAT: f64 = -79.5;
const UPS_N_MIN_LAT: f64 = 83.5;

lazy_static! {
    static ref POLAR_STEREOGRAPHIC: PolarStereographic = PolarStereographic::ups();
}

/// Which pole a UPS coordinate is projected about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pole {
    #[cfg_attr(feature = "serde", serde(alias = "N"))]
    North,
    #[cfg_attr(feature = "serde", serde(alias = "S"))]
    South,
}

impl Pole {
    pub fn is_north(self) -> bool {
        self == Pole::North
    }

    /// Hemisphere letter, `N` or `S`.
    pub fn letter(self) -> char {
        self.is_north().ternary('N', 'S')
    }

    fn index(self) -> usize {
        self.is_north().ternary(1, 0)
    }
}

impl Display for Pole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A UPS point in meters. When `falsed` is set both axes carry the
/// 2,000,000 m false origin; otherwise the pole itself is `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpsCoordinate {
    #[cfg_attr(feature = "serde", serde(alias = "northing"))]
    pub(crate) northing_m: f64,
    #[cfg_attr(feature = "serde", serde(alias = "easting"))]
    pub(crate) easting_m: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) falsed: bool,
}

impl UpsCoordinate {
    pub fn new(northing_m: f64, easting_m: f64, falsed: bool) -> UpsCoordinate {
        Self {
            northing_m,
            easting_m,
            falsed,
        }
    }

    /// Northing in meters, including the false origin if [`Self::is_falsed`].
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing_m
    }

    /// Easting in meters, including the false origin if [`Self::is_falsed`].
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting_m
    }

    #[inline]
    pub fn is_falsed(&self) -> bool {
        self.falsed
    }

    /// Returns the same point with the false origin applied.
    ///
    /// ```
    /// use polecoords::UpsCoordinate;
    ///
    /// let coord = UpsCoordinate::new(-120.5, 30.0, false).to_falsed();
    /// assert!(coord.is_falsed());
    /// assert_eq!(coord.northing(), 1_999_879.5);
    /// assert_eq!(coord.to_falsed(), coord);
    /// ```
    pub fn to_falsed(&self) -> UpsCoordinate {
        if self.falsed {
            *self
        } else {
            UpsCoordinate::new(
                self.northing_m + UPS_FALSE_OFFSET,
                self.easting_m + UPS_FALSE_OFFSET,
                true,
            )
        }
    }

    /// Returns the same point relative to the pole.
    pub fn to_unfalsed(&self) -> UpsCoordinate {
        if self.falsed {
            UpsCoordinate::new(
                self.northing_m - UPS_FALSE_OFFSET,
                self.easting_m - UPS_FALSE_OFFSET,
                false,
            )
        } else {
            *self
        }
    }
}

impl Display for UpsCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let northing = buf.format(self.northing_m);
        let mut buf = ryu::Buffer::new();
        let easting = buf.format(self.easting_m);
        write!(f, "{northing} {easting}{}", self.falsed.ternary(" (falsed)", ""))
    }
}

/// WGS84 Universal Polar Stereographic projector.
///
/// In strict mode (the default) latitudes outside the UPS zone of the
/// requested pole are rejected. [`UpsProjector::lenient`] projects any
/// latitude on the requested pole's side of the equator and beyond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpsProjector {
    strict: bool,
}

impl Default for UpsProjector {
    fn default() -> Self {
        UpsProjector { strict: true }
    }
}

impl UpsProjector {
    pub fn strict() -> UpsProjector {
        UpsProjector { strict: true }
    }

    pub fn lenient() -> UpsProjector {
        UpsProjector { strict: false }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl GeodesyProjector for UpsProjector {
    /// Projects UPS meters back onto the ellipsoid.
    ///
    /// ```
    /// use polecoords::{GeodesyProjector, Pole, UpsProjector};
    ///
    /// let ll = UpsProjector::default()
    ///     .to_geographic(2_000_000.0, 2_000_000.0, Pole::South, true)
    ///     .unwrap();
    /// assert_eq!(ll.latitude(), -90.0);
    /// assert_eq!(ll.longitude(), 0.0);
    /// ```
    fn to_geographic(&self, northing_m: f64, easting_m: f64, pole: Pole, falsed: bool) -> Result<LatLon, Error> {
        let ups = UpsCoordinate::new(northing_m, easting_m, falsed).to_unfalsed();

        check_coords(pole, ups.easting_m, ups.northing_m).map_err(|e| {
            debug!(%pole, northing_m, easting_m, falsed, "rejected UPS coordinate");
            e
        })?;

        Ok(POLAR_STEREOGRAPHIC.to_latlon(pole, ups.easting_m, ups.northing_m))
    }

    /// Projects a lat/lon point onto the UPS grid of `pole`.
    ///
    /// ```
    /// use polecoords::{GeodesyProjector, Pole, UpsProjector};
    ///
    /// let ups = UpsProjector::default()
    ///     .to_projected(-90.0, 0.0, Pole::South, false)
    ///     .unwrap();
    /// assert!(ups.northing().abs() < 1e-6);
    /// assert!(ups.easting().abs() < 1e-6);
    ///
    /// // Well outside the southern UPS zone
    /// assert!(UpsProjector::default().to_projected(-40.0, 0.0, Pole::South, false).is_err());
    /// ```
    fn to_projected(&self, lat_deg: f64, lon_deg: f64, pole: Pole, falsed: bool) -> Result<UpsCoordinate, Error> {
        let latlon = LatLon::create(lat_deg, lon_deg)?;

        if self.strict {
            check_latitude(pole, latlon.latitude).map_err(|e| {
                debug!(%pole, lat_deg, lon_deg, "rejected latitude outside UPS zone");
                e
            })?;
        }

        let (x, y) = POLAR_STEREOGRAPHIC.from_latlon(pole, latlon.latitude, latlon.longitude);
        let ups = UpsCoordinate::new(y, x, false);

        Ok(falsed.ternary_lazy(|| ups.to_falsed(), || ups))
    }
}

fn check_latitude(pole: Pole, lat: f64) -> Result<(), Error> {
    let in_zone = if pole.is_north() {
        lat >= UPS_N_MIN_LAT
    } else {
        lat <= UPS_S_MAX_LAT
    };

    if in_zone {
        Ok(())
    } else {
        Err(Error::InvalidRange {
            coord_type: "LatLon".to_string(),
            dest_type: format!("Ups{}", pole.letter()),
            msg: format!(
                "Latitude {lat} outside of UPS zone {}",
                pole.is_north().ternary(
                    format!("[{UPS_N_MIN_LAT}, 90]"),
                    format!("[-90, {UPS_S_MAX_LAT}]"),
                ),
            ),
        })
    }
}

/// Checks unfalsed UPS meters against the validity square of `pole`.
pub(crate) fn check_coords(pole: Pole, x: f64, y: f64) -> Result<(), Error> {
    if !x.is_finite() || !y.is_finite() {
        return Err(Error::InvalidUpsCoords(format!("Coordinate ({y}, {x}) is not finite")));
    }

    let ind = pole.index();
    let min = MIN_UPS_IND[ind] * TILE - UPS_FALSE_OFFSET - TILE;
    let max = MAX_UPS_IND[ind] * TILE - UPS_FALSE_OFFSET + TILE;

    for (axis, value) in [("Easting", x), ("Northing", y)] {
        if !(min..=max).contains(&value) {
            return Err(Error::InvalidUpsCoords(
                format!(
                    "{axis} {:.2}km not in UPS range for {} hemisphere [{:.2}km, {:.2}km]",
                    (value + UPS_FALSE_OFFSET) / 1000.0,
                    pole.letter(),
                    (min + UPS_FALSE_OFFSET) / 1000.0,
                    (max + UPS_FALSE_OFFSET) / 1000.0,
                )
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsing_is_reversible() {
        let coord = UpsCoordinate::new(-1234.5, 678.25, false);
        assert_eq!(coord.to_falsed().to_unfalsed(), coord);
        assert_eq!(coord.to_unfalsed(), coord);
    }

    #[test]
    fn validity_square_depends_on_pole() {
        // 1,250 km from the pole is inside the southern slop but outside the north
        assert!(check_coords(Pole::South, 1_250_000., 0.).is_ok());
        assert!(matches!(
            check_coords(Pole::North, 1_250_000., 0.),
            Err(Error::InvalidUpsCoords(_))
        ));
        assert!(check_coords(Pole::South, 0., -1_400_000.).is_err());
        assert!(check_coords(Pole::South, f64::NAN, 0.).is_err());
    }

    #[test]
    fn strict_latitude_band() {
        assert!(check_latitude(Pole::South, -79.5).is_ok());
        assert!(check_latitude(Pole::South, -79.4).is_err());
        assert!(check_latitude(Pole::North, 83.5).is_ok());
        assert!(check_latitude(Pole::North, -89.).is_err());
    }

    #[test]
    fn lenient_projects_outside_zone() {
        let ups = UpsProjector::lenient().to_projected(-70., 10., Pole::South, true);
        assert!(ups.is_ok());
        assert!(ups.unwrap().is_falsed());
    }

    #[test]
    fn display() {
        assert_eq!(UpsCoordinate::new(1.5, -2.0, false).to_string(), "1.5 -2.0");
        assert_eq!(UpsCoordinate::new(1.5, -2.0, true).to_string(), "1.5 -2.0 (falsed)");
        assert_eq!(Pole::South.to_string(), "S");
    }
}
