#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory R-tree proximity index over certified safe points.
//!
//! Drop-in replacement for the linear scan in `custodia_safepoint::geo`
//! when a deployment carries enough points for O(n) queries to hurt.
//! Queries pre-filter with a degree-padded bounding envelope, then apply
//! the exact haversine check, so results match the scan entry for entry.

use custodia_safepoint::geo::distance_km;
use custodia_safepoint_models::{NearbySafePoint, SafePoint};
use geo::Point;
use rstar::{AABB, RTree, RTreeObject};

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 110.574;

/// A safe point stored in the R-tree with its location envelope.
struct SafePointEntry {
    point: SafePoint,
    location: Point<f64>,
}

impl RTreeObject for SafePointEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x(), self.location.y()])
    }
}

/// Pre-built proximity index over a set of safe points.
///
/// Constructed once per point-set refresh and shared across queries.
pub struct SafePointIndex {
    tree: RTree<SafePointEntry>,
}

impl SafePointIndex {
    /// Bulk-loads the points into an R-tree keyed on `[lng, lat]`.
    #[must_use]
    pub fn build(points: Vec<SafePoint>) -> Self {
        let entries: Vec<SafePointEntry> = points
            .into_iter()
            .map(|point| {
                let location = Point::new(point.longitude, point.latitude);
                SafePointEntry { point, location }
            })
            .collect();

        let tree = RTree::bulk_load(entries);
        log::info!("Loaded {} safe points into spatial index", tree.size());

        Self { tree }
    }

    /// Safe points within `radius_km` of the position, nearest first.
    ///
    /// Same contract as `custodia_safepoint::geo::find_nearby`: no entry
    /// exceeds the radius and distances are non-decreasing.
    #[must_use]
    pub fn find_nearby(&self, latitude: f64, longitude: f64, radius_km: f64) -> Vec<NearbySafePoint> {
        let lat_padding = radius_km / KM_PER_DEGREE;
        // A degree of longitude shrinks with latitude; the cosine floor
        // keeps the envelope finite near the poles.
        let lng_padding = radius_km / (KM_PER_DEGREE * latitude.to_radians().cos().abs().max(1e-6));

        let query_env = AABB::from_corners(
            [longitude - lng_padding, latitude - lat_padding],
            [longitude + lng_padding, latitude + lat_padding],
        );

        let mut nearby: Vec<NearbySafePoint> = self
            .tree
            .locate_in_envelope_intersecting(&query_env)
            .filter_map(|entry| {
                let distance =
                    distance_km(latitude, longitude, entry.location.y(), entry.location.x());
                (distance <= radius_km).then(|| NearbySafePoint {
                    point: entry.point.clone(),
                    distance_km: distance,
                })
            })
            .collect();

        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        nearby
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use custodia_safepoint::geo::find_nearby;
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

    fn corridor() -> Vec<SafePoint> {
        vec![
            point("cdmx", 19.4326, -99.1332),
            point("tepotzotlan", 19.7160, -99.2246),
            point("queretaro", 20.5888, -100.3899),
            point("irapuato", 20.6767, -101.3563),
            point("guadalajara", 20.6597, -103.3496),
            point("near-origin", 19.4400, -99.1300),
        ]
    }

    #[test]
    fn matches_the_linear_scan_for_every_radius() {
        let points = corridor();
        let index = SafePointIndex::build(points.clone());

        for radius_km in [0.5, 5.0, 50.0, 500.0] {
            let from_index = index.find_nearby(19.4326, -99.1332, radius_km);
            let from_scan = find_nearby(&points, 19.4326, -99.1332, radius_km);

            let index_ids: Vec<&str> = from_index.iter().map(|n| n.point.id.as_str()).collect();
            let scan_ids: Vec<&str> = from_scan.iter().map(|n| n.point.id.as_str()).collect();
            assert_eq!(
                index_ids, scan_ids,
                "index and scan disagree at radius {radius_km}"
            );
        }
    }

    #[test]
    fn results_respect_radius_and_ordering() {
        let index = SafePointIndex::build(corridor());

        let nearby = index.find_nearby(19.4326, -99.1332, 50.0);

        assert!(!nearby.is_empty());
        for entry in &nearby {
            assert!(entry.distance_km <= 50.0);
        }
        for pair in nearby.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        assert_eq!(nearby[0].point.id, "cdmx");
    }

    #[test]
    fn empty_index_finds_nothing() {
        let index = SafePointIndex::build(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.find_nearby(19.4326, -99.1332, 50.0).is_empty());
    }

    #[test]
    fn build_reports_point_count() {
        let index = SafePointIndex::build(corridor());
        assert_eq!(index.len(), 6);
        assert!(!index.is_empty());
    }
}
