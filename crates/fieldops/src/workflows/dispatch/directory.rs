use super::domain::{Technician, TechnicianId};

/// Storage abstraction over the technician directory so the dispatch
/// service can run against an in-memory roster or a durable store.
///
/// Provisioning and releasing technicians are operational concerns outside
/// this seam; the dispatch core only reads snapshots and claims rows.
pub trait TechnicianDirectory: Send + Sync {
    /// Snapshot of technicians currently marked available, in directory
    /// order.
    fn available(&self) -> Result<Vec<Technician>, DirectoryError>;

    /// Snapshot of the full roster, in directory order.
    fn roster(&self) -> Result<Vec<Technician>, DirectoryError>;

    /// Transition a technician from available to busy and return the
    /// updated row.
    ///
    /// The check and the transition must be atomic: a row that is no longer
    /// available fails with [`DirectoryError::Conflict`] instead of being
    /// claimed a second time. Backends that cannot complete the write must
    /// fail the claim as a whole, leaving the row untouched.
    fn claim(&self, id: TechnicianId) -> Result<Technician, DirectoryError>;
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("technician is no longer available")]
    Conflict,
    #[error("technician not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
