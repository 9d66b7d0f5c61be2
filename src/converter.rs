use chrono::NaiveDate;
use lazy_static::lazy_static;
use tracing::trace;

use crate::{
    constants::M_PER_FT,
    drift::ConverterConfig,
    latlon::LatLon,
    pole::PoleCoordinate,
    projector::GeodesyProjector,
    ups::{Pole, UpsCoordinate, UpsProjector},
    Error,
};

lazy_static! {
    static ref DEFAULT_CONVERTER: DriftCorrectedConverter = DriftCorrectedConverter::default();
}

/// Converts between the drifting South Pole survey frame and UPS, and on to
/// latitude/longitude through a [`GeodesyProjector`].
///
/// Every conversion takes the survey date: the survey grid is fixed to the
/// pole marker, which moves with the ice, so the offset between the grid and
/// UPS grows linearly from the reference epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftCorrectedConverter<P = UpsProjector> {
    config: ConverterConfig,
    projector: P,
}

impl Default for DriftCorrectedConverter {
    fn default() -> Self {
        Self::from_config(ConverterConfig::default())
    }
}

impl DriftCorrectedConverter {
    /// Uses the WGS84 UPS projector with a custom marker or drift fit.
    pub fn from_config(config: ConverterConfig) -> Self {
        Self::new(config, UpsProjector::default())
    }
}

impl<P: GeodesyProjector> DriftCorrectedConverter<P> {
    pub fn new(config: ConverterConfig, projector: P) -> Self {
        Self { config, projector }
    }

    /// Uses the 2000 pole marker and its 1989-2020 drift fit with a custom
    /// projector.
    pub fn with_projector(projector: P) -> Self {
        Self::new(ConverterConfig::default(), projector)
    }

    #[inline]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    #[inline]
    pub fn projector(&self) -> &P {
        &self.projector
    }

    /// Converts survey northing/easting in feet to UPS meters for `date`.
    ///
    /// # Usage
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use polecoords::DriftCorrectedConverter;
    ///
    /// let converter: DriftCorrectedConverter = DriftCorrectedConverter::default();
    /// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    ///
    /// let ups = converter.pole_to_ups(50809.76, 49491.12, date, true);
    /// assert_eq!(ups.northing(), 2_000_000.0);
    /// assert_eq!(ups.easting(), 2_000_000.0);
    /// ```
    pub fn pole_to_ups(&self, northing_ft: f64, easting_ft: f64, date: NaiveDate, falsed: bool) -> UpsCoordinate {
        let (dn_ft, de_ft) = self.config.drift_ft(date);
        let frame = &self.config.frame;

        let ups_n_ft = northing_ft + dn_ft - frame.northing_ft;
        let ups_e_ft = easting_ft + de_ft - frame.easting_ft;

        let ups = UpsCoordinate::new(ups_n_ft * M_PER_FT, ups_e_ft * M_PER_FT, false);
        let ups = if falsed { ups.to_falsed() } else { ups };

        trace!(northing_ft, easting_ft, %date, %ups, "pole to UPS");
        ups
    }

    /// Converts UPS meters to survey northing/easting in feet for `date`.
    /// `falsed` says whether the inputs carry the 2,000,000 m false origin.
    ///
    /// # Usage
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use polecoords::DriftCorrectedConverter;
    ///
    /// let converter: DriftCorrectedConverter = DriftCorrectedConverter::default();
    /// let date = NaiveDate::from_ymd_opt(2015, 6, 1).unwrap();
    ///
    /// let ups = converter.pole_to_ups(51000.0, 49000.0, date, false);
    /// let pole = converter.ups_to_pole(ups.northing(), ups.easting(), date, false);
    ///
    /// assert!((pole.northing() - 51000.0).abs() < 1e-6);
    /// assert!((pole.easting() - 49000.0).abs() < 1e-6);
    /// ```
    pub fn ups_to_pole(&self, northing_m: f64, easting_m: f64, date: NaiveDate, falsed: bool) -> PoleCoordinate {
        let ups = UpsCoordinate::new(northing_m, easting_m, falsed).to_unfalsed();

        let ups_n_ft = ups.northing_m / M_PER_FT;
        let ups_e_ft = ups.easting_m / M_PER_FT;

        let (dn_ft, de_ft) = self.config.drift_ft(date);
        let frame = &self.config.frame;

        let pole = PoleCoordinate::new(
            ups_n_ft - dn_ft + frame.northing_ft,
            ups_e_ft - de_ft + frame.easting_ft,
        );

        trace!(northing_m, easting_m, falsed, %date, %pole, "UPS to pole");
        pole
    }

    /// Same as [`Self::ups_to_pole`], using the coordinate's own falsing.
    pub fn ups_coord_to_pole(&self, ups: &UpsCoordinate, date: NaiveDate) -> PoleCoordinate {
        self.ups_to_pole(ups.northing_m, ups.easting_m, date, ups.falsed)
    }

    /// Converts survey northing/easting in feet to latitude/longitude for
    /// `date`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the projector raises for the drift-corrected
    /// UPS point.
    ///
    /// # Usage
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use polecoords::DriftCorrectedConverter;
    ///
    /// let converter: DriftCorrectedConverter = DriftCorrectedConverter::default();
    /// let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    ///
    /// // The marker sat on the geographic pole at the epoch
    /// let ll = converter.pole_to_latlon(50809.76, 49491.12, date).unwrap();
    /// assert!((ll.latitude() + 90.0).abs() < 1e-9);
    /// ```
    pub fn pole_to_latlon(&self, northing_ft: f64, easting_ft: f64, date: NaiveDate) -> Result<LatLon, Error> {
        let ups = self.pole_to_ups(northing_ft, easting_ft, date, false);
        self.projector.to_geographic(ups.northing_m, ups.easting_m, Pole::South, false)
    }

    /// Converts latitude/longitude in degrees to survey northing/easting in
    /// feet for `date`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the projector raises for the lat/lon point,
    /// e.g. a latitude outside the southern UPS zone.
    pub fn latlon_to_pole(&self, lat_deg: f64, lon_deg: f64, date: NaiveDate) -> Result<PoleCoordinate, Error> {
        let ups = self.projector.to_projected(lat_deg, lon_deg, Pole::South, false)?;
        Ok(self.ups_coord_to_pole(&ups, date))
    }
}

/// [`DriftCorrectedConverter::pole_to_ups`] with the default 2000 marker,
/// drift fit and WGS84 UPS projector.
pub fn pole_to_ups(northing_ft: f64, easting_ft: f64, date: NaiveDate, falsed: bool) -> UpsCoordinate {
    DEFAULT_CONVERTER.pole_to_ups(northing_ft, easting_ft, date, falsed)
}

/// [`DriftCorrectedConverter::ups_to_pole`] with the default converter.
pub fn ups_to_pole(northing_m: f64, easting_m: f64, date: NaiveDate, falsed: bool) -> PoleCoordinate {
    DEFAULT_CONVERTER.ups_to_pole(northing_m, easting_m, date, falsed)
}

/// [`DriftCorrectedConverter::pole_to_latlon`] with the default converter.
///
/// # Errors
///
/// Returns [`Error::InvalidUpsCoords`] if the point is too far from the pole
/// to be projected.
pub fn pole_to_latlon(northing_ft: f64, easting_ft: f64, date: NaiveDate) -> Result<LatLon, Error> {
    DEFAULT_CONVERTER.pole_to_latlon(northing_ft, easting_ft, date)
}

/// [`DriftCorrectedConverter::latlon_to_pole`] with the default converter.
///
/// # Errors
///
/// Returns [`Error::InvalidCoord`] for an invalid lat/lon and
/// [`Error::InvalidRange`] for a latitude outside the southern UPS zone.
pub fn latlon_to_pole(lat_deg: f64, lon_deg: f64, date: NaiveDate) -> Result<PoleCoordinate, Error> {
    DEFAULT_CONVERTER.latlon_to_pole(lat_deg, lon_deg, date)
}
