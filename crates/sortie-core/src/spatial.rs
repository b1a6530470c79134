//! Spatial math for footprint conflict checks.
//!
//! Coordinates arrive as WGS84 lat/lon degrees and are projected onto a
//! local east-north plane (meters) before any distance or intersection
//! test runs. All distances returned here are meters.

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

/// Convert a north/south offset in meters to degrees latitude.
pub fn meters_to_lat(meters: f64, ref_lat_deg: f64) -> f64 {
    let meters_per_deg = meters_per_deg_lat(ref_lat_deg).max(1e-9);
    meters / meters_per_deg
}

/// Convert an east/west offset in meters to degrees longitude.
/// Requires the reference latitude for proper scaling.
pub fn meters_to_lon(meters: f64, ref_lat_deg: f64) -> f64 {
    let meters_per_deg = meters_per_deg_lon(ref_lat_deg).max(1e-9);
    meters / meters_per_deg
}

/// Convert degrees latitude to meters using local scaling.
pub fn lat_to_meters(deg: f64, ref_lat_deg: f64) -> f64 {
    deg * meters_per_deg_lat(ref_lat_deg)
}

/// Convert degrees longitude to meters at a given latitude.
pub fn lon_to_meters(deg: f64, ref_lat_deg: f64) -> f64 {
    deg * meters_per_deg_lon(ref_lat_deg)
}

pub(crate) fn segments_intersect_2d(
    a1: (f64, f64),
    a2: (f64, f64),
    b1: (f64, f64),
    b2: (f64, f64),
) -> bool {
    // Epsilon in meters. This runs on locally-projected coordinates; the tolerance
    // absorbs floating-point error from projection and arithmetic.
    const EPS_M: f64 = 1e-6;

    fn orient(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    }

    fn within(a: f64, b: f64, value: f64) -> bool {
        let min = a.min(b) - EPS_M;
        let max = a.max(b) + EPS_M;
        value >= min && value <= max
    }

    fn on_segment(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
        within(p.0, q.0, r.0) && within(p.1, q.1, r.1)
    }

    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);

    if o1.abs() <= EPS_M && on_segment(a1, a2, b1) {
        return true;
    }
    if o2.abs() <= EPS_M && on_segment(a1, a2, b2) {
        return true;
    }
    if o3.abs() <= EPS_M && on_segment(b1, b2, a1) {
        return true;
    }
    if o4.abs() <= EPS_M && on_segment(b1, b2, a2) {
        return true;
    }

    let a_crosses = (o1 > EPS_M && o2 < -EPS_M) || (o1 < -EPS_M && o2 > EPS_M);
    let b_crosses = (o3 > EPS_M && o4 < -EPS_M) || (o3 < -EPS_M && o4 > EPS_M);
    a_crosses && b_crosses
}

/// Minimum distance from a point to a line segment, all in local meters.
pub(crate) fn point_to_segment_distance_2d(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let px = p.0 - a.0;
    let py = p.1 - a.1;
    let sx = b.0 - a.0;
    let sy = b.1 - a.1;

    let seg_len_sq = sx * sx + sy * sy;

    if seg_len_sq < 0.0001 {
        // Segment is essentially a point
        return (px * px + py * py).sqrt();
    }

    // Project point onto segment line: t = ((P-A) · (B-A)) / |B-A|²
    let t = ((px * sx + py * sy) / seg_len_sq).clamp(0.0, 1.0);

    let closest_x = t * sx;
    let closest_y = t * sy;

    let dx = px - closest_x;
    let dy = py - closest_y;

    (dx * dx + dy * dy).sqrt()
}

/// Minimum distance between two line segments in local meters.
///
/// Crossing (including touches and collinear overlaps) is 0; otherwise the
/// minimum over the four endpoint-to-opposite-segment distances, which is
/// exact for non-crossing segments.
pub(crate) fn segment_to_segment_distance_2d(
    a1: (f64, f64),
    a2: (f64, f64),
    b1: (f64, f64),
    b2: (f64, f64),
) -> f64 {
    // Detect true crossings first; endpoint-only distance checks can miss X-crossings.
    if segments_intersect_2d(a1, a2, b1, b2) {
        return 0.0;
    }

    let d1 = point_to_segment_distance_2d(a1, b1, b2);
    let d2 = point_to_segment_distance_2d(a2, b1, b2);
    let d3 = point_to_segment_distance_2d(b1, a1, a2);
    let d4 = point_to_segment_distance_2d(b2, a1, a2);

    d1.min(d2).min(d3).min(d4)
}

/// Check if a point lies inside a polygon ring using ray casting.
///
/// The ring is a list of local-meter vertices; it does not need to repeat
/// the first vertex at the end. Fewer than 3 vertices never contain anything.
pub(crate) fn point_in_ring_2d(point: (f64, f64), ring: &[(f64, f64)]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    // Ray casting: count crossings of polygon edges by a ray going east
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];

        if ((yi > point.1) != (yj > point.1))
            && (point.0 < (xj - xi) * (point.1 - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}
