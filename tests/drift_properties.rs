use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{Duration, NaiveDate};
use polecoords::{
    pole_to_ups, ups_to_pole, ConverterConfig, DriftCorrectedConverter, DriftModel,
    ReferenceFrame, M_PER_FT,
};

const POLE2000_N: f64 = 50809.76;
const POLE2000_E: f64 = 49491.12;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A spread of survey points within 100,000 ft of the frame origin.
fn survey_points() -> impl Iterator<Item = (f64, f64)> {
    (0..9).flat_map(|i| {
        (0..9).map(move |j| {
            (
                -100_000. + 25_000. * f64::from(i) + 0.37,
                100_000. - 25_000. * f64::from(j) - 0.91,
            )
        })
    })
}

fn survey_dates() -> impl Iterator<Item = NaiveDate> {
    (0_u32..=40).step_by(3).map(|y| date(2000 + y as i32, 1 + y % 12, 1 + y % 28))
}

#[test]
fn epoch_marker_is_ups_origin() {
    let ups = pole_to_ups(POLE2000_N, POLE2000_E, date(2000, 1, 1), false);

    assert_eq!(ups.northing(), 0.0);
    assert_eq!(ups.easting(), 0.0);
    assert!(!ups.is_falsed());
}

#[test]
fn round_trip_pole_ups_pole() {
    for d in survey_dates() {
        for (n, e) in survey_points() {
            let ups = pole_to_ups(n, e, d, false);
            let pole = ups_to_pole(ups.northing(), ups.easting(), d, false);

            assert_abs_diff_eq!(pole.northing(), n, epsilon = 1e-6);
            assert_abs_diff_eq!(pole.easting(), e, epsilon = 1e-6);
        }
    }
}

#[test]
fn round_trip_ups_pole_ups() {
    let d = date(2031, 7, 19);
    for (n, e) in survey_points() {
        for falsed in [false, true] {
            let offset = if falsed { 2_000_000. } else { 0. };
            let (n_m, e_m) = (n * 0.5 + offset, e * 0.5 + offset);
            let pole = ups_to_pole(n_m, e_m, d, falsed);
            let ups = pole_to_ups(pole.northing(), pole.easting(), d, falsed);

            assert_relative_eq!(ups.northing(), n_m, epsilon = 1e-7, max_relative = 1e-9);
            assert_relative_eq!(ups.easting(), e_m, epsilon = 1e-7, max_relative = 1e-9);
        }
    }
}

#[test]
fn falsing_adds_exact_offset() {
    for d in [date(1995, 3, 3), date(2000, 1, 1), date(2024, 2, 29)] {
        for (n, e) in survey_points() {
            let unfalsed = pole_to_ups(n, e, d, false);
            let falsed = pole_to_ups(n, e, d, true);

            assert!(falsed.is_falsed());
            assert_eq!(falsed.northing(), unfalsed.northing() + 2_000_000.0);
            assert_eq!(falsed.easting(), unfalsed.easting() + 2_000_000.0);
        }
    }
}

#[test]
fn ups_coord_to_pole_honours_falsing() {
    let converter: DriftCorrectedConverter = DriftCorrectedConverter::default();
    let d = date(2012, 12, 12);
    let ups = converter.pole_to_ups(48_000., 52_000., d, true);

    let from_falsed = converter.ups_coord_to_pole(&ups, d);
    let from_unfalsed = converter.ups_coord_to_pole(&ups.to_unfalsed(), d);

    assert_abs_diff_eq!(from_falsed.northing(), 48_000., epsilon = 1e-6);
    assert_abs_diff_eq!(from_falsed.easting(), from_unfalsed.easting(), epsilon = 1e-6);
}

#[test]
fn displacement_is_linear_in_time() {
    let (n, e) = (51_234.5, 47_654.3);
    let d1 = date(2003, 4, 5);
    let model = DriftModel::default();
    let (sin, cos) = model.heading().to_radians().sin_cos();

    for days in [1_i64, 30, 365, 4_000, 10_000] {
        let d2 = d1 + Duration::days(days);
        let a = pole_to_ups(n, e, d1, false);
        let b = pole_to_ups(n, e, d2, false);

        let per_day = model.speed() / 365.24;
        assert_abs_diff_eq!(b.northing() - a.northing(), sin * per_day * days as f64, epsilon = 1e-8);
        assert_abs_diff_eq!(b.easting() - a.easting(), cos * per_day * days as f64, epsilon = 1e-8);
    }
}

#[test]
fn meters_are_feet_times_survey_factor() {
    let converter: DriftCorrectedConverter = DriftCorrectedConverter::default();
    let config = converter.config();
    let d = date(2019, 11, 2);
    let (n, e) = (50_100.25, 49_900.75);

    let (dn, de) = config
        .drift
        .displacement_ft(config.frame.elapsed_years(d, config.drift.year_length()));
    let ups = converter.pole_to_ups(n, e, d, false);

    assert_eq!(M_PER_FT, 0.3048);
    assert_eq!(ups.northing(), (n + dn - POLE2000_N) * 0.3048);
    assert_eq!(ups.easting(), (e + de - POLE2000_E) * 0.3048);
}

#[test]
fn dates_before_epoch_extrapolate_backwards() {
    let d = date(1990, 1, 1);
    let ups = pole_to_ups(POLE2000_N, POLE2000_E, d, false);
    let model = DriftModel::default();

    // The marker was upstream of the origin before 2000
    let years = -3652. / 365.24;
    let (sin, cos) = model.heading().to_radians().sin_cos();
    assert_abs_diff_eq!(ups.northing(), sin * model.speed() * years, epsilon = 1e-9);
    assert_abs_diff_eq!(ups.easting(), cos * model.speed() * years, epsilon = 1e-9);
}

#[test]
fn stationary_marker_ignores_date() {
    let config = ConverterConfig::new(
        ReferenceFrame::default(),
        DriftModel::new(0.0, 129.72).unwrap(),
    );
    let converter = DriftCorrectedConverter::from_config(config);

    let a = converter.pole_to_ups(40_000., 60_000., date(2000, 1, 1), false);
    let b = converter.pole_to_ups(40_000., 60_000., date(2040, 1, 1), false);
    assert_eq!(a, b);
}

#[test]
fn custom_reference_frame() {
    let frame = ReferenceFrame::new(date(2010, 1, 1), 1_000., 2_000.);
    let converter = DriftCorrectedConverter::from_config(ConverterConfig::new(frame, DriftModel::default()));

    let ups = converter.pole_to_ups(1_000., 2_000., date(2010, 1, 1), false);
    assert_eq!(ups.northing(), 0.0);
    assert_eq!(ups.easting(), 0.0);

    let pole = converter.ups_to_pole(0.0, 0.0, date(2011, 1, 1), false);
    let (dn, de) = DriftModel::default().displacement_ft(365. / 365.24);
    assert_abs_diff_eq!(pole.northing(), 1_000. - dn, epsilon = 1e-9);
    assert_abs_diff_eq!(pole.easting(), 2_000. - de, epsilon = 1e-9);
}
