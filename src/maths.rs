//! Spherical trigonometry and angle normalization.
//!
//! Everything here is total: NaN and infinities flow through the arithmetic
//! instead of being rejected.

use std::f64::consts::PI;

use crate::coordinate::Coordinate;
use crate::units::Units;

/// Converts degrees to radians. Zero maps to exactly zero.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    if degrees == 0.0 {
        return 0.0;
    }
    degrees * (PI / 180.0)
}

/// Converts radians to degrees. Zero maps to exactly zero.
pub fn radians_to_degrees(radians: f64) -> f64 {
    if radians == 0.0 {
        return 0.0;
    }
    radians * (180.0 / PI)
}

/// Initial great-circle bearing from `origin` to `destination`, in [0, 360).
pub fn bearing_initial(origin: &Coordinate, destination: &Coordinate) -> f64 {
    let phi1 = degrees_to_radians(origin.latitude());
    let phi2 = degrees_to_radians(destination.latitude());
    let delta_lambda = degrees_to_radians(destination.longitude() - origin.longitude());

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    (radians_to_degrees(y.atan2(x)) + 360.0) % 360.0
}

/// Final bearing on arrival at `destination` when travelling from `origin`, in [0, 360).
pub fn bearing_final(origin: &Coordinate, destination: &Coordinate) -> f64 {
    (bearing_initial(destination, origin) + 180.0) % 360.0
}

/// Great-circle distance using the spherical law of cosines.
///
/// Cheap, but loses precision for points only a few metres apart.
pub fn distance_cosine(origin: &Coordinate, destination: &Coordinate, units: Units) -> f64 {
    // sin² + cos² is not exactly 1 for every latitude.
    if origin.equals_2d(destination) {
        return 0.0;
    }

    let phi1 = degrees_to_radians(origin.latitude());
    let phi2 = degrees_to_radians(destination.latitude());
    let delta_lambda = degrees_to_radians(destination.longitude() - origin.longitude());

    let cos_c = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();

    // Rounding can push nearly identical points just past 1.0.
    constrain_value(cos_c, -1.0, 1.0).acos() * units.mean_radius()
}

/// Great-circle distance using the haversine formula.
pub fn distance_haversine(origin: &Coordinate, destination: &Coordinate, units: Units) -> f64 {
    let phi1 = degrees_to_radians(origin.latitude());
    let phi2 = degrees_to_radians(destination.latitude());
    let delta_phi = degrees_to_radians(destination.latitude() - origin.latitude());
    let delta_lambda = degrees_to_radians(destination.longitude() - origin.longitude());

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // f64::min would swallow NaN.
    let c = 2.0 * constrain_value(a.sqrt(), 0.0, 1.0).asin();

    units.mean_radius() * c
}

/// Solves the direct geodesic problem on the sphere.
///
/// Starting at `origin` and travelling `distance` (in `units`) along the initial
/// bearing `bearing` (radians), returns the point reached. Altitude and
/// altitude mode are carried over from `origin`.
pub fn destination(origin: &Coordinate, distance: f64, bearing: f64, units: Units) -> Coordinate {
    let delta = distance / units.mean_radius();
    let phi1 = degrees_to_radians(origin.latitude());
    let lambda1 = degrees_to_radians(origin.longitude());

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * bearing.cos()).asin();
    let lambda2 = lambda1
        + (bearing.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    Coordinate::new(
        radians_to_degrees(phi2),
        radians_to_degrees(lambda2),
        origin.altitude(),
        origin.altitude_mode(),
    )
}

/// Clamps a latitude to [-90, 90].
pub fn fix_latitude(latitude: f64) -> f64 {
    constrain_value(latitude, -90.0, 90.0)
}

/// Wraps a longitude into (-180, 180]. -180 itself maps to 180.
pub fn fix_longitude(longitude: f64) -> f64 {
    wrap_value(longitude, -180.0, 180.0, false)
}

/// Wraps `value` into the range spanned by `min` and `max`.
///
/// Values strictly inside the range are returned untouched. A value landing
/// exactly on a boundary resolves to `max`, or to `min` when `favor_min` is set.
pub fn wrap_value(value: f64, min: f64, max: f64, favor_min: bool) -> f64 {
    if value > min && value < max {
        return value;
    }

    let width = max - min;
    let wrapped = (value - min).rem_euclid(width) + min;

    // rem_euclid can round up to the full width, which lands on max as well.
    if wrapped <= min || wrapped >= max {
        if favor_min {
            min
        } else {
            max
        }
    } else {
        wrapped
    }
}

/// Clamps `value` to [min, max]. NaN is returned unchanged.
pub fn constrain_value(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng, 0.0, Default::default())
    }

    #[test]
    fn test_degrees_radians_zero_is_exact() {
        assert_eq!(degrees_to_radians(0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(degrees_to_radians(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(radians_to_degrees(-0.0).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_degrees_radians_scaling() {
        assert!((degrees_to_radians(180.0) - PI).abs() < 1e-10);
        assert!((radians_to_degrees(PI / 2.0) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_fix_latitude_clamps() {
        assert_eq!(fix_latitude(95.0), 90.0);
        assert_eq!(fix_latitude(-120.0), -90.0);
        assert_eq!(fix_latitude(45.5), 45.5);
        for x in [-1e9, -180.0, -90.0, 0.0, 12.3, 90.0, 91.0, 1e9] {
            let once = fix_latitude(x);
            assert!((-90.0..=90.0).contains(&once));
            assert_eq!(fix_latitude(once), once);
        }
    }

    #[test]
    fn test_fix_longitude_boundaries() {
        assert_eq!(fix_longitude(180.0), 180.0);
        assert_eq!(fix_longitude(-180.0), 180.0);
        assert_eq!(fix_longitude(540.0), 180.0);
        assert_eq!(fix_longitude(-540.0), 180.0);
        assert_eq!(fix_longitude(0.0), 0.0);
        assert_eq!(fix_longitude(-0.12), -0.12);
    }

    #[test]
    fn test_fix_longitude_wraps() {
        assert!((fix_longitude(190.0) - (-170.0)).abs() < 1e-10);
        assert!((fix_longitude(-190.0) - 170.0).abs() < 1e-10);
        assert!((fix_longitude(720.0 + 45.0) - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_fix_longitude_range_and_idempotence() {
        for x in [-1000.0, -360.0, -181.0, -180.0, -179.9, 0.0, 179.9, 180.0, 181.0, 359.0, 1e6] {
            let once = fix_longitude(x);
            assert!(once > -180.0 && once <= 180.0, "{} -> {}", x, once);
            assert_eq!(fix_longitude(once), once);
        }
    }

    #[test]
    fn test_wrap_value_favor_min() {
        assert_eq!(wrap_value(180.0, -180.0, 180.0, true), -180.0);
        assert_eq!(wrap_value(-180.0, -180.0, 180.0, true), -180.0);
        assert_eq!(wrap_value(360.0, 0.0, 360.0, true), 0.0);
        assert_eq!(wrap_value(360.0, 0.0, 360.0, false), 360.0);
        assert!((wrap_value(370.0, 0.0, 360.0, true) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_constrain_value() {
        assert_eq!(constrain_value(5.0, 0.0, 1.0), 1.0);
        assert_eq!(constrain_value(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(constrain_value(0.5, 0.0, 1.0), 0.5);
        assert!(constrain_value(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for c in [coord(0.0, 0.0), coord(51.5, -0.12), coord(-33.9, 151.2), coord(89.0, 179.0)] {
            assert_eq!(distance_cosine(&c, &c, Units::Metric), 0.0);
            assert_eq!(distance_haversine(&c, &c, Units::Metric), 0.0);
        }
    }

    #[test]
    fn test_distance_symmetry() {
        let a = coord(51.5, -0.12);
        let b = coord(48.85, 2.35);
        let ab = distance_haversine(&a, &b, Units::Metric);
        let ba = distance_haversine(&b, &a, Units::Metric);
        assert!((ab - ba).abs() < 1e-9);
        let ab = distance_cosine(&a, &b, Units::Metric);
        let ba = distance_cosine(&b, &a, Units::Metric);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_distance_london_paris() {
        let london = coord(51.5, -0.12);
        let paris = coord(48.85, 2.35);
        let km = distance_haversine(&london, &paris, Units::Metric);
        assert!((km - 343.0).abs() < 2.0, "got {}", km);
        let cos_km = distance_cosine(&london, &paris, Units::Metric);
        assert!((km - cos_km).abs() < 1e-3);
        let mi = distance_haversine(&london, &paris, Units::Imperial);
        assert!((mi - km * 3959.0 / 6371.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let km = distance_haversine(&coord(0.0, 0.0), &coord(1.0, 0.0), Units::Metric);
        assert!((km - 6371.0 * PI / 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = coord(0.0, 0.0);
        assert!((bearing_initial(&origin, &coord(10.0, 0.0)) - 0.0).abs() < 1e-10);
        assert!((bearing_initial(&origin, &coord(0.0, 10.0)) - 90.0).abs() < 1e-10);
        assert!((bearing_initial(&origin, &coord(-10.0, 0.0)) - 180.0).abs() < 1e-10);
        assert!((bearing_initial(&origin, &coord(0.0, -10.0)) - 270.0).abs() < 1e-10);
    }

    #[test]
    fn test_bearings_in_range() {
        let points = [
            coord(0.0, 0.0),
            coord(51.5, -0.12),
            coord(-33.9, 151.2),
            coord(40.7, -74.0),
            coord(0.0, 180.0),
        ];
        for a in &points {
            for b in &points {
                let initial = bearing_initial(a, b);
                let final_ = bearing_final(a, b);
                assert!((0.0..360.0).contains(&initial), "{}", initial);
                assert!((0.0..360.0).contains(&final_), "{}", final_);
            }
        }
    }

    #[test]
    fn test_bearing_final_along_equator() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 20.0);
        assert!((bearing_final(&a, &b) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_destination_round_trip_distance() {
        let origin = coord(51.5, -0.12);
        let target = destination(&origin, 100.0, degrees_to_radians(45.0), Units::Metric);
        let km = distance_haversine(&origin, &target, Units::Metric);
        assert!((km - 100.0).abs() < 1e-6);
        assert!((bearing_initial(&origin, &target) - 45.0).abs() < 1e-6);
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let origin = coord(0.0, 179.0);
        let two_degrees = 2.0 * 6371.0 * PI / 180.0;
        let target = destination(&origin, two_degrees, degrees_to_radians(90.0), Units::Metric);
        assert!((target.longitude() - (-179.0)).abs() < 1e-9);
        assert!(target.latitude().abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let nan = coord(f64::NAN, 0.0);
        assert!(distance_haversine(&nan, &coord(1.0, 1.0), Units::Metric).is_nan());
        assert!(fix_longitude(f64::NAN).is_nan());
    }
}
