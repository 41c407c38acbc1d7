//! Complaint intake, technician dispatch, and tamper-evident recording.
//!
//! The dispatch service wires three pieces together: the
//! [`directory::TechnicianDirectory`] storage seam, the pure
//! [`matching`] engine, and the hash-chained complaint ledger.

pub mod directory;
pub mod domain;
pub mod matching;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, TechnicianDirectory};
pub use domain::{
    AssignedTechnician, AssignmentOutcome, ComplaintId, ComplaintRecord, ComplaintSubmission,
    GeoPoint, Specialization, Technician, TechnicianId, TechnicianStatus,
    encode_specializations, parse_specializations,
};
pub use matching::{derive_required_specializations, haversine_distance_km, rank_candidates};
pub use router::dispatch_router;
pub use service::{
    ChainStatus, ChainView, ComplaintLedger, DispatchError, DispatchService, SubmissionReceipt,
};
