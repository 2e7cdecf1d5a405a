use crate::coordinate::Coordinate;

/// Mean radius of the earth in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in km.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);

    // Rounding can push h just past 1 for near-antipodal points, and asin(>1) is NaN.
    let h = h.clamp(0., 1.);
    let c = 2. * f64::asin(f64::sqrt(h));

    EARTH_RADIUS_KM * c
}

/// Adds the leg from `previous` to `next` onto `running_total`.
pub fn accumulate(previous: Coordinate, next: Coordinate, running_total: f64) -> f64 {
    running_total + haversine_distance(previous, next)
}

/// Length of a path in km, summing consecutive legs in order.
pub fn path_distance(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .fold(0., |total, leg| accumulate(leg[0], leg[1], total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = haversine_distance(Coordinate::new(0., 0.), Coordinate::new(0., 1.));
        assert_close(d, 111.19, 0.01);
    }

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(55.6761, 12.5683);
        assert_eq!(haversine_distance(p, p), 0.);
    }

    #[test]
    fn is_symmetric() {
        let copenhagen = Coordinate::new(55.6761, 12.5683);
        let aarhus = Coordinate::new(56.1629, 10.2039);
        assert_close(
            haversine_distance(copenhagen, aarhus),
            haversine_distance(aarhus, copenhagen),
            1e-9,
        );
        assert_close(haversine_distance(copenhagen, aarhus), 156.9, 0.5);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let d = haversine_distance(Coordinate::new(0., 0.), Coordinate::new(0., 180.));
        assert!(d.is_finite());
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1e-6);

        let d = haversine_distance(Coordinate::new(90., 0.), Coordinate::new(-90., 0.));
        assert!(d.is_finite());
    }

    #[test]
    fn accumulate_adds_onto_the_running_total() {
        let total = accumulate(Coordinate::new(0., 0.), Coordinate::new(0., 1.), 5.);
        assert_close(total, 116.19, 0.01);
    }

    #[test]
    fn path_distance_of_short_paths_is_zero() {
        assert_eq!(path_distance(&[]), 0.);
        assert_eq!(path_distance(&[Coordinate::new(10., 10.)]), 0.);
    }

    #[test]
    fn path_distance_depends_on_order() {
        let a = Coordinate::new(0., 0.);
        let b = Coordinate::new(0., 1.);
        let c = Coordinate::new(0., 2.);

        assert_close(path_distance(&[a, b, c]), 2. * 111.19, 0.02);
        assert_close(path_distance(&[a, c, b]), 3. * 111.19, 0.03);
    }
}
