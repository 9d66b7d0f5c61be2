use crate::{latlon::LatLon, ups::{Pole, UpsCoordinate}, Error};

/// Conversion between UPS meters and geographic coordinates.
///
/// [`DriftCorrectedConverter`](crate::DriftCorrectedConverter) only corrects
/// for marker drift; the ellipsoidal projection is delegated to an
/// implementation of this trait. [`UpsProjector`](crate::UpsProjector) is the
/// WGS84 implementation used by default.
pub trait GeodesyProjector {
    /// Converts UPS northing/easting in meters about `pole` to latitude and
    /// longitude. `falsed` says whether the inputs carry the 2,000,000 m
    /// false origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is outside the projection's domain.
    fn to_geographic(&self, northing_m: f64, easting_m: f64, pole: Pole, falsed: bool) -> Result<LatLon, Error>;

    /// Converts latitude and longitude in degrees to UPS meters about `pole`,
    /// falsed if requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the point is outside the projection's domain.
    fn to_projected(&self, lat_deg: f64, lon_deg: f64, pole: Pole, falsed: bool) -> Result<UpsCoordinate, Error>;
}

impl<P: GeodesyProjector + ?Sized> GeodesyProjector for &P {
    fn to_geographic(&self, northing_m: f64, easting_m: f64, pole: Pole, falsed: bool) -> Result<LatLon, Error> {
        (**self).to_geographic(northing_m, easting_m, pole, falsed)
    }

    fn to_projected(&self, lat_deg: f64, lon_deg: f64, pole: Pole, falsed: bool) -> Result<UpsCoordinate, Error> {
        (**self).to_projected(lat_deg, lon_deg, pole, falsed)
    }
}
