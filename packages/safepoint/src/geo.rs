//! Great-circle distance and linear proximity search.
//!
//! The scan visits every point, so it is O(n) per query. Certified point
//! sets are small (hundreds per corridor), which keeps this comfortably
//! fast; larger deployments can swap in the R-tree index crate, which
//! honors the same contract.

use custodia_safepoint_models::{NearbySafePoint, SafePoint};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default search radius for "stops near here" queries.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Haversine great-circle distance between two positions, in kilometers.
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Safe points within `radius_km` of the position, nearest first.
///
/// Full scan over `points`; every returned entry carries its computed
/// distance and no entry exceeds the radius.
#[must_use]
pub fn find_nearby(
    points: &[SafePoint],
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Vec<NearbySafePoint> {
    let mut nearby: Vec<NearbySafePoint> = points
        .iter()
        .filter_map(|point| {
            let distance = distance_km(latitude, longitude, point.latitude, point.longitude);
            (distance <= radius_km).then(|| NearbySafePoint {
                point: point.clone(),
                distance_km: distance,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    log::debug!(
        "Found {} of {} safe points within {radius_km} km of ({latitude}, {longitude})",
        nearby.len(),
        points.len()
    );

    nearby
}

#[cfg(test)]
mod tests {
    use custodia_safepoint_models::{CertificationLevel, SafePointCriteria};

    use super::*;

    fn point(id: &str, latitude: f64, longitude: f64) -> SafePoint {
        SafePoint {
            id: id.to_string(),
            name: format!("Punto {id}"),
            latitude,
            longitude,
            address: String::new(),
            municipality: String::new(),
            state: String::new(),
            notes: None,
            criteria: SafePointCriteria::default(),
            total_score: 0,
            certification_level: CertificationLevel::Precaucion,
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let (lat1, lng1) = (19.4326, -99.1332);
        let (lat2, lng2) = (20.6597, -103.3496);

        let there = distance_km(lat1, lng1, lat2, lng2);
        let back = distance_km(lat2, lng2, lat1, lng1);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert!(distance_km(19.4326, -99.1332, 19.4326, -99.1332).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_matches_known_city_pair() {
        // Mexico City to Guadalajara, roughly 460 km great-circle.
        let distance = distance_km(19.4326, -99.1332, 20.6597, -103.3496);
        assert!(
            (distance - 461.0).abs() < 5.0,
            "expected ~461 km, got {distance}"
        );
    }

    #[test]
    fn nearby_respects_radius_and_orders_by_distance() {
        let points = vec![
            point("far", 20.0, -99.1332),
            point("close", 19.44, -99.1332),
            point("closest", 19.433, -99.1332),
        ];

        let nearby = find_nearby(&points, 19.4326, -99.1332, 5.0);

        let ids: Vec<&str> = nearby.iter().map(|n| n.point.id.as_str()).collect();
        assert_eq!(ids, vec!["closest", "close"]);
        for entry in &nearby {
            assert!(entry.distance_km <= 5.0);
        }
        for pair in nearby.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn point_exactly_on_the_radius_is_included() {
        let origin = point("origin", 19.4326, -99.1332);
        let nearby = find_nearby(&[origin], 19.4326, -99.1332, 0.0);
        assert_eq!(nearby.len(), 1);
        assert!(nearby[0].distance_km.abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_finds_nothing() {
        assert!(find_nearby(&[], 19.4326, -99.1332, DEFAULT_NEARBY_RADIUS_KM).is_empty());
    }
}
