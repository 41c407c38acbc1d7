//! Pure candidate selection: specialization filtering plus nearest-neighbor
//! ranking over a directory snapshot.

mod geo;
mod keywords;

pub use geo::haversine_distance_km;
pub use keywords::derive_required_specializations;

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::workflows::dispatch::domain::{GeoPoint, Specialization, Technician};

/// A qualifying technician together with the distance used to rank it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub distance_km: f64,
    pub technician: Technician,
}

/// Filter a directory snapshot down to available technicians holding at
/// least one required specialization, then order them nearest-first.
///
/// Contract for missing coordinates: when the complaint carries no location
/// every surviving candidate gets `f64::INFINITY`, and because the sort is
/// stable, equal distances (including the all-infinite case) preserve the
/// snapshot's original order.
pub fn rank_candidates(
    complaint_location: Option<GeoPoint>,
    required: &BTreeSet<Specialization>,
    snapshot: &[Technician],
) -> Vec<RankedCandidate> {
    let mut candidates: Vec<RankedCandidate> = snapshot
        .iter()
        .filter(|technician| technician.is_available())
        .filter(|technician| technician.has_any_specialization(required))
        .map(|technician| RankedCandidate {
            distance_km: complaint_location
                .map(|location| haversine_distance_km(location, technician.location))
                .unwrap_or(f64::INFINITY),
            technician: technician.clone(),
        })
        .collect();

    // Distances are finite or +inf, never NaN, so the comparison is total.
    candidates.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    candidates
}
