pub mod conflict;
pub mod models;
pub mod scheduler;
pub mod spatial;

pub use conflict::{rank_by_conflicts, safe_flights, zone_conflicts};
pub use models::{
    FlightId, Footprint, LatLon, Part, RankedFlight, Sortie, SortiePlan, SortieRow, NO_FLIGHT,
};
pub use scheduler::{build_sortie_plan, schedule, LaunchOrder, PlanError};
