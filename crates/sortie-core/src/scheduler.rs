//! Sortie scheduling: orders flights and splits them into launch groups.
//!
//! The scheduler turns a conflict ranking into one global launch
//! ordering (greedy pass, completion pass, one randomized repair pass),
//! then divides the ordering into near-equal sorties sized for the
//! available drones.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::conflict;
use crate::models::{FlightId, Footprint, RankedFlight, Sortie, SortiePlan};

/// Errors from sortie scheduling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("drone count must be at least 1")]
    InvalidDroneCount,
}

/// Ordered set of flight ids under construction.
///
/// Keeps insertion order and rejects duplicates, so the scheduling
/// passes can append freely without re-scanning what is already placed.
#[derive(Debug, Default)]
pub struct LaunchOrder {
    ids: Vec<FlightId>,
    seen: HashSet<FlightId>,
}

impl LaunchOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: FlightId) -> bool {
        self.seen.contains(&id)
    }

    /// Append `id` unless it is already placed. Returns whether it was added.
    pub fn push(&mut self, id: FlightId) -> bool {
        if self.seen.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn into_inner(self) -> Vec<FlightId> {
        self.ids
    }
}

/// Build the sortie plan from a conflict ranking.
///
/// Three passes produce one launch ordering covering every flight
/// exactly once:
///
/// 1. Greedy pass over the ranking, fewest conflicts first. A candidate
///    is appended unless it is already placed or its id directly
///    follows the preceding list entry (0 stands in before the first
///    entry), which defers tight sequential runs.
/// 2. Completion pass appending whatever the greedy pass left out,
///    safe flights first, zone offenders at the tail.
/// 3. One repair sweep over adjacent pairs: a sequential pair at
///    (i, i + 1) is a launch hazard, so the leading id moves to a
///    random earlier slot. The draw from `rng` happens on every
///    iteration whether or not a swap follows, so a seeded generator
///    reproduces the same plan. Sequential pairs can survive the single
///    sweep; the ordering is best effort.
///
/// The ordering is then split into ceil(N / drone_count) contiguous
/// near-equal sorties labeled "flight 1", "flight 2", and so on, the
/// earlier sorties taking the remainder.
pub fn schedule(
    ranking: &[RankedFlight],
    zone_conflicts: &[FlightId],
    safe: &[FlightId],
    drone_count: usize,
    rng: &mut impl Rng,
) -> Result<SortiePlan, PlanError> {
    if drone_count == 0 {
        return Err(PlanError::InvalidDroneCount);
    }

    let mut order = LaunchOrder::new();

    for flight in ranking {
        for (j, &candidate) in flight.conflicts.iter().enumerate() {
            if order.contains(candidate) {
                continue;
            }
            let previous = if j == 0 { 0 } else { flight.conflicts[j - 1] };
            if candidate.saturating_sub(1) != previous {
                order.push(candidate);
            }
        }
    }

    for &id in safe {
        order.push(id);
    }
    for &id in zone_conflicts {
        order.push(id);
    }

    let mut ids = order.into_inner();

    for i in 0..ids.len().saturating_sub(1) {
        let j = rng.random_range(0..=i + 1);
        if ids[i] + 1 == ids[i + 1] {
            ids.swap(i, j);
        }
    }

    Ok(partition(ids, drone_count))
}

/// Run the full planning pipeline over loaded footprints.
///
/// Composes zone conflict detection, pairwise ranking and scheduling.
pub fn build_sortie_plan(
    flights: &[Footprint],
    zone: &Footprint,
    drone_count: usize,
    rng: &mut impl Rng,
) -> Result<SortiePlan, PlanError> {
    if drone_count == 0 {
        return Err(PlanError::InvalidDroneCount);
    }

    let danger = conflict::zone_conflicts(flights, zone);
    let safe = conflict::safe_flights(flights.len(), &danger);
    let ranking = conflict::rank_by_conflicts(flights, &danger);
    schedule(&ranking, &danger, &safe, drone_count, rng)
}

fn partition(ids: Vec<FlightId>, drone_count: usize) -> SortiePlan {
    let group_count = ids.len().div_ceil(drone_count);
    let mut sorties = Vec::with_capacity(group_count);

    if group_count > 0 {
        let base = ids.len() / group_count;
        let extra = ids.len() % group_count;
        let mut rest = ids.as_slice();
        for idx in 0..group_count {
            let take = if idx < extra { base + 1 } else { base };
            let (chunk, tail) = rest.split_at(take);
            rest = tail;
            sorties.push(Sortie {
                label: format!("flight {}", idx + 1),
                flights: chunk.to_vec(),
            });
        }
    }

    SortiePlan {
        drone_count,
        sorties,
    }
}
