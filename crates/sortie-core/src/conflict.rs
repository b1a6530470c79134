//! Conflict detection for sortie planning.
//!
//! Builds the restricted-zone conflict set and the pairwise conflict
//! ranking consumed by the scheduler. Every check is a static geometric
//! test over buffered footprints; nothing here models motion or timing.

use crate::models::{FlightId, Footprint, RankedFlight};

/// Find flights whose footprint touches the restricted zone.
///
/// Returns 1-based flight ids in ascending order.
pub fn zone_conflicts(flights: &[Footprint], zone: &Footprint) -> Vec<FlightId> {
    flights
        .iter()
        .enumerate()
        .filter(|(_, flight)| flight.intersects(zone))
        .map(|(idx, _)| idx as FlightId + 1)
        .collect()
}

/// All flight ids with the zone offenders removed, ascending.
pub fn safe_flights(flight_count: usize, zone_conflicts: &[FlightId]) -> Vec<FlightId> {
    (1..=flight_count as FlightId)
        .filter(|id| !zone_conflicts.contains(id))
        .collect()
}

/// Build the pairwise conflict ranking.
///
/// Every flight is tested against every flight including itself, so a
/// non-empty footprint always lists its own id. Zone offenders are then
/// removed from every list (they keep their own record, emptied of the
/// stripped ids) and the records are sorted ascending by list length.
/// The sort is stable: equal-length records keep their id order.
pub fn rank_by_conflicts(flights: &[Footprint], zone_conflicts: &[FlightId]) -> Vec<RankedFlight> {
    let mut ranked: Vec<RankedFlight> = flights
        .iter()
        .enumerate()
        .map(|(i, flight)| {
            let conflicts = flights
                .iter()
                .enumerate()
                .filter(|(_, other)| flight.intersects(other))
                .map(|(j, _)| j as FlightId + 1)
                .filter(|id| !zone_conflicts.contains(id))
                .collect();
            RankedFlight {
                id: i as FlightId + 1,
                conflicts,
            }
        })
        .collect();

    ranked.sort_by_key(|flight| flight.conflicts.len());
    ranked
}
