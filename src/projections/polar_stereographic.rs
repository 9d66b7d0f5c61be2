use crate::{
    constants::{UPS_K0, WGS84_A, WGS84_F},
    latlon::LatLon,
    ups::Pole,
    utility::{dms, GeoMath},
    ThisOrThat,
};

const F: f64 = WGS84_F;
const E2: f64 = F * (2. - F);

/// Polar stereographic projection on the WGS84 ellipsoid, centred on either
/// pole. Coordinates are unfalsed meters, `x` easting and `y` northing.
pub(crate) struct PolarStereographic {
    a: f64,
    k0: f64,
    es: f64,
    c: f64,
}

impl PolarStereographic {
    pub fn ups() -> PolarStereographic {
        let es = (F < 0.).ternary(-1., 1.) * E2.abs().sqrt();
        let c = (1. - F) * 1_f64.eatanhe(es).exp();

        Self {
            a: WGS84_A,
            k0: UPS_K0,
            es,
            c,
        }
    }

    fn scale(&self) -> f64 {
        2. * self.k0 * self.a / self.c
    }

    pub fn from_latlon(&self, pole: Pole, lat: f64, lon: f64) -> (f64, f64) {
        let northp = pole.is_north();
        let lat = lat * northp.ternary(1., -1.);

        let tau = lat.to_radians().tan();
        let taup = tau.taupf(self.es);
        let mut rho = 1_f64.hypot(taup) + taup.abs();
        rho = (taup >= 0.).ternary_lazy(
            || (lat < f64::from(dms::QD)).ternary_lazy(|| 1. / rho, || 0.),
            || rho,
        );
        rho *= self.scale();

        let (x, y) = lon.to_radians().sin_cos();

        (x * rho, y * northp.ternary(-rho, rho))
    }

    pub fn to_latlon(&self, pole: Pole, x: f64, y: f64) -> LatLon {
        let northp = pole.is_north();
        let rho = x.hypot(y);
        let t = (!rho.is_zero())
            .ternary_lazy(
                || rho / self.scale(),
                || f64::EPSILON.powi(2)
            );
        let taup = (1. / t - t) / 2.;
        let tau = taup.tauf(self.es);

        let lat = northp.ternary(1., -1.) * tau.atan().to_degrees();
        // Longitude is undefined at the pole itself; report the prime meridian
        let lon = (!rho.is_zero()).ternary_lazy(
            || x.atan2(northp.ternary(-y, y)).to_degrees(),
            || 0.,
        );
        // atan2 yields +180 on the antimeridian; keep longitude in [-180, 180)
        let lon = (lon >= f64::from(dms::HD)).ternary(lon - f64::from(dms::TD), lon);

        LatLon::new(lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn pole_maps_to_origin() {
        let ps = PolarStereographic::ups();
        let (x, y) = ps.from_latlon(Pole::South, -90., 0.);
        assert_abs_diff_eq!(x, 0., epsilon = 1e-9);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-9);

        let ll = ps.to_latlon(Pole::South, 0., 0.);
        assert_abs_diff_eq!(ll.latitude(), -90., epsilon = 1e-12);
        assert_abs_diff_eq!(ll.longitude(), 0., epsilon = 1e-12);
    }

    #[test]
    fn south_grid_north_follows_prime_meridian() {
        let ps = PolarStereographic::ups();

        let (x, y) = ps.from_latlon(Pole::South, -89., 0.);
        assert_abs_diff_eq!(x, 0., epsilon = 1e-6);
        // Roughly k0 times one degree of meridian arc at the pole
        assert_abs_diff_eq!(y, 111_024., epsilon = 100.);

        let (x, y) = ps.from_latlon(Pole::South, -89., 90.);
        assert_abs_diff_eq!(x, 111_024., epsilon = 100.);
        assert_abs_diff_eq!(y, 0., epsilon = 1e-6);
    }

    #[test]
    fn antimeridian_longitude_is_negative() {
        let ps = PolarStereographic::ups();

        let ll = ps.to_latlon(Pole::South, 0., -3_294.81);
        assert_eq!(ll.longitude(), -180.);
        assert!(LatLon::create(ll.latitude(), ll.longitude()).is_ok());

        let ll = ps.to_latlon(Pole::North, 0., 3_294.81);
        assert_eq!(ll.longitude(), -180.);
    }

    #[test]
    fn north_grid_north_points_away_from_prime_meridian() {
        let ps = PolarStereographic::ups();
        let (_, y) = ps.from_latlon(Pole::North, 89., 0.);
        assert!(y < 0.);
    }

    #[test]
    fn inverse_recovers_latlon() {
        let ps = PolarStereographic::ups();
        for pole in [Pole::South, Pole::North] {
            let sign = pole.is_north().ternary(1., -1.);
            for (lat, lon) in [(80.5, -170.), (84.2, 33.3), (89.999, 120.), (87., -45.)] {
                let (x, y) = ps.from_latlon(pole, sign * lat, lon);
                let ll = ps.to_latlon(pole, x, y);
                assert_abs_diff_eq!(ll.latitude(), sign * lat, epsilon = 1e-9);
                assert_abs_diff_eq!(ll.longitude(), lon, epsilon = 1e-9);
            }
        }
    }
}
