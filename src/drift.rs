//! Linear drift of the pole marker relative to the fixed UPS grid.
//!
//! The survey grid is tied to a marker on the ice sheet, which moves at a
//! roughly constant velocity. A [`DriftModel`] holds that velocity and a
//! [`ReferenceFrame`] holds the date and survey position at which the marker
//! sat exactly on the UPS origin.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use tracing::debug;

use crate::{
    constants::{
        DAYS_PER_YEAR, DRIFT_FIT_FIRST_YEAR, DRIFT_FIT_LAST_YEAR, DRIFT_HEADING_DEG,
        DRIFT_SPEED_M_PER_YR, M_PER_FT, POLE2000_E, POLE2000_N,
    },
    Error,
};

lazy_static! {
    static ref EPOCH_2000: NaiveDate = NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("2000-01-01 is a valid calendar date");
}

/// The epoch at which the survey frame and the UPS frame coincide, and the
/// survey position of the marker (the UPS origin) at that epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceFrame {
    pub(crate) epoch: NaiveDate,
    pub(crate) northing_ft: f64,
    pub(crate) easting_ft: f64,
}

impl Default for ReferenceFrame {
    /// The pole marker as surveyed on 2000-01-01.
    fn default() -> Self {
        ReferenceFrame::new(*EPOCH_2000, POLE2000_N, POLE2000_E)
    }
}

impl ReferenceFrame {
    /// Marker at survey position (`northing_ft`, `easting_ft`) sitting on the
    /// UPS origin at `epoch`.
    pub fn new(epoch: NaiveDate, northing_ft: f64, easting_ft: f64) -> ReferenceFrame {
        Self {
            epoch,
            northing_ft,
            easting_ft,
        }
    }

    #[inline]
    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Marker northing at the epoch, in feet.
    #[inline]
    pub fn northing(&self) -> f64 {
        self.northing_ft
    }

    /// Marker easting at the epoch, in feet.
    #[inline]
    pub fn easting(&self) -> f64 {
        self.easting_ft
    }

    /// Whole days from the epoch to `date`, negative before the epoch.
    pub fn elapsed_days(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.epoch).num_days()
    }

    /// Elapsed time in years of `days_per_year` days. Leap years are not
    /// accounted for beyond the fractional year length.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use polecoords::{DriftModel, ReferenceFrame};
    ///
    /// let frame = ReferenceFrame::default();
    /// let date = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
    /// let year = DriftModel::default().year_length();
    ///
    /// assert_eq!(frame.elapsed_years(date, year), 365.0 / 365.24);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    pub fn elapsed_years(&self, date: NaiveDate, days_per_year: f64) -> f64 {
        self.elapsed_days(date) as f64 / days_per_year
    }
}

/// Constant-velocity motion of the marker: a speed in meters per year along
/// a heading in degrees. The northing component is `sin(heading)` and the
/// easting component `cos(heading)` of the speed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftModel {
    pub(crate) speed_m_per_yr: f64,
    pub(crate) heading_deg: f64,
    /// Fixed year length used to turn elapsed days into years
    pub(crate) days_per_year: f64,
    /// First and last calendar year of the survey data the model was fit to
    pub(crate) fit_years: (i32, i32),
}

impl Default for DriftModel {
    /// Fit to pole marker movement, 1989-2020.
    fn default() -> Self {
        Self {
            speed_m_per_yr: DRIFT_SPEED_M_PER_YR,
            heading_deg: DRIFT_HEADING_DEG,
            days_per_year: DAYS_PER_YEAR,
            fit_years: (DRIFT_FIT_FIRST_YEAR, DRIFT_FIT_LAST_YEAR),
        }
    }
}

impl DriftModel {
    /// Creates a drift model with years of 365.24 days and an unbounded fit
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDriftModel`] if either value is not finite or
    /// the speed is negative.
    ///
    /// # Usage
    ///
    /// ```
    /// use polecoords::DriftModel;
    ///
    /// let model = DriftModel::new(9.8, 130.0).unwrap();
    /// assert_eq!(model.speed(), 9.8);
    ///
    /// assert!(DriftModel::new(-1.0, 130.0).is_err());
    /// assert!(DriftModel::new(9.8, f64::NAN).is_err());
    /// ```
    pub fn new(speed_m_per_yr: f64, heading_deg: f64) -> Result<DriftModel, Error> {
        if !speed_m_per_yr.is_finite() || speed_m_per_yr < 0. {
            return Err(Error::InvalidDriftModel(format!(
                "Speed {speed_m_per_yr} m/yr must be finite and non-negative"
            )));
        }
        if !heading_deg.is_finite() {
            return Err(Error::InvalidDriftModel(format!(
                "Heading {heading_deg} degrees must be finite"
            )));
        }

        Ok(Self {
            speed_m_per_yr,
            heading_deg,
            days_per_year: DAYS_PER_YEAR,
            fit_years: (i32::MIN, i32::MAX),
        })
    }

    /// Records the calendar years covered by the data the model was fit to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDriftModel`] if `first_year > last_year`.
    pub fn with_fit_window(self, first_year: i32, last_year: i32) -> Result<DriftModel, Error> {
        if first_year > last_year {
            return Err(Error::InvalidDriftModel(format!(
                "Fit window {first_year}-{last_year} is empty"
            )));
        }

        Ok(Self {
            fit_years: (first_year, last_year),
            ..self
        })
    }

    /// Replaces the year length, in days, used to convert elapsed days to
    /// years.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDriftModel`] unless `days_per_year` is finite
    /// and positive.
    ///
    /// # Usage
    ///
    /// ```
    /// use polecoords::DriftModel;
    ///
    /// let model = DriftModel::default().with_year_length(365.25).unwrap();
    /// assert_eq!(model.year_length(), 365.25);
    ///
    /// assert!(DriftModel::default().with_year_length(0.0).is_err());
    /// ```
    pub fn with_year_length(self, days_per_year: f64) -> Result<DriftModel, Error> {
        if !days_per_year.is_finite() || days_per_year <= 0. {
            return Err(Error::InvalidDriftModel(format!(
                "Year length {days_per_year} days must be finite and positive"
            )));
        }

        Ok(Self {
            days_per_year,
            ..self
        })
    }

    /// Speed in meters per year.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_m_per_yr
    }

    /// Heading in degrees.
    #[inline]
    pub fn heading(&self) -> f64 {
        self.heading_deg
    }

    /// Days per year.
    #[inline]
    pub fn year_length(&self) -> f64 {
        self.days_per_year
    }

    #[inline]
    pub fn fit_window(&self) -> (i32, i32) {
        self.fit_years
    }

    /// Whether `date` falls outside the years the model was fit to.
    pub fn extrapolates(&self, date: NaiveDate) -> bool {
        let (first, last) = self.fit_years;
        !(first..=last).contains(&date.year())
    }

    /// Northing and easting displacement in feet after `years`.
    pub fn displacement_ft(&self, years: f64) -> (f64, f64) {
        let (sin, cos) = self.heading_deg.to_radians().sin_cos();
        let speed_ft_per_yr = self.speed_m_per_yr / M_PER_FT;

        (sin * speed_ft_per_yr * years, cos * speed_ft_per_yr * years)
    }
}

/// Everything a [`DriftCorrectedConverter`](crate::DriftCorrectedConverter)
/// needs besides a projector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConverterConfig {
    pub frame: ReferenceFrame,
    pub drift: DriftModel,
}

impl ConverterConfig {
    /// Pairs a reference frame with the drift model of its marker.
    pub fn new(frame: ReferenceFrame, drift: DriftModel) -> ConverterConfig {
        Self { frame, drift }
    }

    /// Drift of the marker between the epoch and `date`, in feet.
    pub(crate) fn drift_ft(&self, date: NaiveDate) -> (f64, f64) {
        if self.drift.extrapolates(date) {
            let (first, last) = self.drift.fit_years;
            debug!(%date, first, last, "extrapolating marker drift outside its fit window");
        }

        self.drift
            .displacement_ft(self.frame.elapsed_years(date, self.drift.days_per_year))
    }
}
