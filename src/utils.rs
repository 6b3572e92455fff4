pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two lat/lng pairs on a spherical Earth,
/// in kilometers.
pub fn haversine_distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{assert_f64_near, assert_float_absolute_eq};

    use crate::utils::haversine_distance_km;

    #[test]
    fn zero_for_identical_points() {
        assert_f64_near!(
            haversine_distance_km(35.6762, 139.6503, 35.6762, 139.6503),
            0.0
        );
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        // half of Earth's circumference, ~20015 km
        assert_float_absolute_eq!(haversine_distance_km(0.0, 0.0, 0.0, 180.0), 20015.0, 1.0);
        assert_float_absolute_eq!(haversine_distance_km(90.0, 0.0, -90.0, 0.0), 20015.0, 1.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        assert_float_absolute_eq!(haversine_distance_km(0.0, 0.0, 1.0, 0.0), 111.19, 0.05);
    }

    #[test]
    fn symmetric() {
        let d1 = haversine_distance_km(52.52, 13.405, 41.9028, 12.4964);
        let d2 = haversine_distance_km(41.9028, 12.4964, 52.52, 13.405);
        assert_f64_near!(d1, d2);
    }
}
