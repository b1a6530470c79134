//! Core data models for sortie planning.

use serde::{Deserialize, Serialize};

use crate::spatial;

/// Identifier of a flight: 1-based position in the loaded mission set.
pub type FlightId = u32;

/// Cell marker for sortie slots with no flight assigned.
pub const NO_FLIGHT: &str = "No Flight";

// ========== GEOMETRY MODELS ==========

/// A position in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One connected piece of a footprint: a lone point, an open path,
/// or a closed polygon ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub vertices: Vec<LatLon>,
    /// Closed parts are polygon exterior rings; the edge from the last
    /// vertex back to the first is implied and the interior counts as
    /// covered ground.
    pub closed: bool,
}

impl Part {
    /// Project vertices onto a local east-north plane around `origin`, in meters.
    fn project(&self, origin: LatLon) -> Vec<(f64, f64)> {
        self.vertices
            .iter()
            .map(|v| {
                (
                    spatial::lon_to_meters(v.lon - origin.lon, origin.lat),
                    spatial::lat_to_meters(v.lat - origin.lat, origin.lat),
                )
            })
            .collect()
    }
}

/// The buffered ground footprint of a flight path or restricted zone.
///
/// Dissolved missions can span several disconnected parts; the buffer
/// radius applies around every part. Two footprints intersect when any
/// part pair comes within the sum of the two buffer radii, or when one
/// part sits inside the other's closed ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Footprint {
    pub parts: Vec<Part>,
    /// Buffer radius in meters applied around every part.
    pub buffer_m: f64,
}

impl Footprint {
    pub fn new(buffer_m: f64) -> Self {
        Self {
            parts: Vec::new(),
            buffer_m,
        }
    }

    /// Add a single point part.
    pub fn push_point(&mut self, point: LatLon) {
        self.parts.push(Part {
            vertices: vec![point],
            closed: false,
        });
    }

    /// Add an open path part. Empty paths are ignored.
    pub fn push_path(&mut self, vertices: Vec<LatLon>) {
        if vertices.is_empty() {
            return;
        }
        self.parts.push(Part {
            vertices,
            closed: false,
        });
    }

    /// Add a polygon ring part. A repeated closing vertex is dropped,
    /// the closing edge stays implied. Empty rings are ignored.
    pub fn push_ring(&mut self, mut vertices: Vec<LatLon>) {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.is_empty() {
            return;
        }
        self.parts.push(Part {
            vertices,
            closed: true,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.vertices.is_empty())
    }

    /// Check whether the buffered footprints touch or overlap.
    pub fn intersects(&self, other: &Footprint) -> bool {
        let threshold_m = self.buffer_m + other.buffer_m;
        self.parts
            .iter()
            .any(|a| other.parts.iter().any(|b| parts_in_contact(a, b, threshold_m)))
    }
}

fn parts_in_contact(a: &Part, b: &Part, threshold_m: f64) -> bool {
    let (Some(a0), Some(b0)) = (a.vertices.first(), b.vertices.first()) else {
        return false;
    };
    // Shared local origin keeps both projections on one plane
    let origin = LatLon::new((a0.lat + b0.lat) / 2.0, (a0.lon + b0.lon) / 2.0);
    let a_xy = a.project(origin);
    let b_xy = b.project(origin);

    // Containment counts as contact even when the edges stay apart
    if a.closed && b_xy.iter().any(|p| spatial::point_in_ring_2d(*p, &a_xy)) {
        return true;
    }
    if b.closed && a_xy.iter().any(|p| spatial::point_in_ring_2d(*p, &b_xy)) {
        return true;
    }

    min_separation_2d(&a_xy, a.closed, &b_xy, b.closed) <= threshold_m
}

fn edges_of(points: &[(f64, f64)], closed: bool) -> Vec<((f64, f64), (f64, f64))> {
    let mut edges: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed && points.len() >= 3 {
        edges.push((points[points.len() - 1], points[0]));
    }
    edges
}

fn min_separation_2d(
    a_pts: &[(f64, f64)],
    a_closed: bool,
    b_pts: &[(f64, f64)],
    b_closed: bool,
) -> f64 {
    let a_edges = edges_of(a_pts, a_closed);
    let b_edges = edges_of(b_pts, b_closed);
    let mut min = f64::INFINITY;

    if a_edges.is_empty() && b_edges.is_empty() {
        for p in a_pts {
            for q in b_pts {
                let d = ((p.0 - q.0).powi(2) + (p.1 - q.1).powi(2)).sqrt();
                min = min.min(d);
            }
        }
    } else if a_edges.is_empty() {
        for p in a_pts {
            for (s, e) in &b_edges {
                min = min.min(spatial::point_to_segment_distance_2d(*p, *s, *e));
            }
        }
    } else if b_edges.is_empty() {
        for q in b_pts {
            for (s, e) in &a_edges {
                min = min.min(spatial::point_to_segment_distance_2d(*q, *s, *e));
            }
        }
    } else {
        for (a1, a2) in &a_edges {
            for (b1, b2) in &b_edges {
                min = min.min(spatial::segment_to_segment_distance_2d(*a1, *a2, *b1, *b2));
                if min == 0.0 {
                    return 0.0;
                }
            }
        }
    }

    min
}

// ========== SORTIE MODELS ==========

/// A flight's conflict record after ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedFlight {
    pub id: FlightId,
    /// Conflicting flight ids in ascending order, zone offenders removed.
    pub conflicts: Vec<FlightId>,
}

/// One launch group: flights that fly concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sortie {
    pub label: String,
    pub flights: Vec<FlightId>,
}

/// The complete assignment of flights to ordered sorties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortiePlan {
    /// Drones available per sortie; every formatted row has this many cells.
    pub drone_count: usize,
    pub sorties: Vec<Sortie>,
}

/// A formatted assignment row: sortie label plus one cell per drone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortieRow {
    pub sortie: String,
    pub drones: Vec<String>,
}

impl SortiePlan {
    /// Total number of flights across all sorties.
    pub fn flight_count(&self) -> usize {
        self.sorties.iter().map(|s| s.flights.len()).sum()
    }

    /// Format the plan as tabular rows. Sorties shorter than the drone
    /// count are padded with [`NO_FLIGHT`].
    pub fn rows(&self) -> Vec<SortieRow> {
        self.sorties
            .iter()
            .map(|sortie| {
                let mut drones: Vec<String> =
                    sortie.flights.iter().map(|id| id.to_string()).collect();
                while drones.len() < self.drone_count {
                    drones.push(NO_FLIGHT.to_string());
                }
                SortieRow {
                    sortie: sortie.label.clone(),
                    drones,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{meters_to_lat, meters_to_lon};

    const BASE_LAT: f64 = 33.6846;
    const BASE_LON: f64 = -117.8265;

    fn point_at(north_m: f64, east_m: f64) -> LatLon {
        LatLon::new(
            BASE_LAT + meters_to_lat(north_m, BASE_LAT),
            BASE_LON + meters_to_lon(east_m, BASE_LAT),
        )
    }

    fn path_footprint(buffer_m: f64, points: &[(f64, f64)]) -> Footprint {
        let mut fp = Footprint::new(buffer_m);
        fp.push_path(points.iter().map(|&(n, e)| point_at(n, e)).collect());
        fp
    }

    #[test]
    fn crossing_paths_intersect() {
        let a = path_footprint(3.0, &[(0.0, 0.0), (100.0, 100.0)]);
        let b = path_footprint(3.0, &[(100.0, 0.0), (0.0, 100.0)]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn buffers_bridge_small_gaps_only() {
        let a = path_footprint(3.0, &[(0.0, 0.0), (0.0, 100.0)]);
        let b = path_footprint(3.0, &[(50.0, 0.0), (50.0, 100.0)]);
        // 50m apart, 6m of combined buffer
        assert!(!a.intersects(&b));

        let wide_a = path_footprint(30.0, &[(0.0, 0.0), (0.0, 100.0)]);
        let wide_b = path_footprint(30.0, &[(50.0, 0.0), (50.0, 100.0)]);
        // Same gap, 60m of combined buffer
        assert!(wide_a.intersects(&wide_b));
    }

    #[test]
    fn point_near_path_respects_buffer() {
        let path = path_footprint(3.0, &[(0.0, 0.0), (0.0, 200.0)]);
        let mut near = Footprint::new(20.0);
        near.push_point(point_at(20.0, 100.0));
        assert!(path.intersects(&near));

        let mut far = Footprint::new(3.0);
        far.push_point(point_at(100.0, 100.0));
        assert!(!path.intersects(&far));
    }

    #[test]
    fn path_inside_ring_intersects_without_edge_contact() {
        let mut zone = Footprint::new(0.0);
        zone.push_ring(vec![
            point_at(0.0, 0.0),
            point_at(0.0, 400.0),
            point_at(400.0, 400.0),
            point_at(400.0, 0.0),
        ]);
        // Well inside the ring, over 100m from every edge
        let inner = path_footprint(3.0, &[(180.0, 180.0), (220.0, 220.0)]);
        assert!(zone.intersects(&inner));
        assert!(inner.intersects(&zone));
    }

    #[test]
    fn ring_closing_edge_is_implied() {
        let mut zone = Footprint::new(1.0);
        // Closing vertex repeated, as GeoJSON rings do
        zone.push_ring(vec![
            point_at(0.0, 0.0),
            point_at(0.0, 100.0),
            point_at(100.0, 100.0),
            point_at(100.0, 0.0),
            point_at(0.0, 0.0),
        ]);
        assert_eq!(zone.parts[0].vertices.len(), 4);

        // 1m outside the square, within buffer reach of nothing but the
        // edge from the last vertex back to the first
        let mut probe = Footprint::new(1.0);
        probe.push_point(point_at(50.0, -1.0));
        assert!(zone.intersects(&probe));
    }

    #[test]
    fn empty_footprints_never_intersect() {
        let empty = Footprint::new(10.0);
        let path = path_footprint(10.0, &[(0.0, 0.0), (10.0, 10.0)]);
        assert!(!empty.intersects(&path));
        assert!(!path.intersects(&empty));
        assert!(empty.is_empty());
        assert!(!path.is_empty());
    }

    #[test]
    fn rows_pad_short_sorties() {
        let plan = SortiePlan {
            drone_count: 3,
            sorties: vec![
                Sortie {
                    label: "flight 1".to_string(),
                    flights: vec![4, 1, 3],
                },
                Sortie {
                    label: "flight 2".to_string(),
                    flights: vec![2],
                },
            ],
        };

        let rows = plan.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sortie, "flight 1");
        assert_eq!(rows[0].drones, vec!["4", "1", "3"]);
        assert_eq!(rows[1].drones, vec!["2", NO_FLIGHT, NO_FLIGHT]);
        assert_eq!(plan.flight_count(), 4);
    }

    #[test]
    fn rows_of_empty_plan_are_empty() {
        let plan = SortiePlan {
            drone_count: 3,
            sorties: Vec::new(),
        };
        assert!(plan.rows().is_empty());
        assert_eq!(plan.flight_count(), 0);
    }
}
