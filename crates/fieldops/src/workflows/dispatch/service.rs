use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::ledger::{Block, Ledger, MiningPolicy};

use super::directory::{DirectoryError, TechnicianDirectory};
use super::domain::{
    AssignmentOutcome, ComplaintId, ComplaintRecord, ComplaintSubmission, GeoPoint, Technician,
};
use super::matching::{derive_required_specializations, rank_candidates};

/// The complaint ledger is a hash chain whose entries are complaint records.
pub type ComplaintLedger = Ledger<ComplaintRecord>;

static COMPLAINT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_complaint_id() -> ComplaintId {
    let id = COMPLAINT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ComplaintId(format!("cmp-{id:06}"))
}

/// Service composing the technician directory, the matching engine, and the
/// complaint ledger. The only component that mutates technician state.
pub struct DispatchService<D> {
    directory: Arc<D>,
    ledger: Mutex<ComplaintLedger>,
    // Selection depends on a consistent snapshot across all rows, so the
    // whole read-filter-select-claim sequence runs under one directory-wide
    // gate rather than per-row locking.
    assign_gate: Mutex<()>,
}

impl<D> DispatchService<D>
where
    D: TechnicianDirectory + 'static,
{
    pub fn new(directory: Arc<D>, mining: MiningPolicy) -> Self {
        Self {
            directory,
            ledger: Mutex::new(ComplaintLedger::new(mining)),
            assign_gate: Mutex::new(()),
        }
    }

    /// Pick the nearest qualified available technician and claim it.
    ///
    /// Runs as a single critical section: once a caller's claim commits,
    /// no later caller can observe or select that technician. Exhaustion
    /// cases come back as outcomes, not errors.
    pub fn assign(
        &self,
        location: Option<GeoPoint>,
        problem: &str,
        error_code: Option<&str>,
    ) -> Result<AssignmentOutcome, DispatchError> {
        let _gate = self.assign_gate.lock().expect("assign gate poisoned");

        let available = self.directory.available()?;
        if available.is_empty() {
            warn!("no technicians available for assignment");
            return Ok(AssignmentOutcome::NoAvailableTechnician);
        }

        let required = derive_required_specializations(problem, error_code);
        let ranked = rank_candidates(location, &required, &available);
        let Some(best) = ranked.first() else {
            warn!("no available technician matches the required specializations");
            return Ok(AssignmentOutcome::NoSuitableTechnician);
        };

        let claimed = self.directory.claim(best.technician.id)?;
        info!(
            technician = %claimed.id,
            name = %claimed.name,
            distance_km = best.distance_km,
            "assigned technician"
        );
        Ok(AssignmentOutcome::Assigned {
            technician: (&claimed).into(),
        })
    }

    /// Run the full complaint pipeline: assign a technician, compose the
    /// immutable ledger record, and append it to the chain.
    ///
    /// Mining happens synchronously while the ledger lock is held, so
    /// concurrent submissions serialize behind each other's proof-of-work.
    pub fn submit(
        &self,
        submission: ComplaintSubmission,
    ) -> Result<SubmissionReceipt, DispatchError> {
        let complaint_id = next_complaint_id();
        let error_code = submission.normalized_error_code();
        let location = submission.location();

        let outcome = self.assign(location, &submission.problem, error_code.as_deref())?;

        let record = ComplaintRecord {
            complaint_id: complaint_id.clone(),
            submitter_id: submission.submitter_id,
            problem: submission.problem,
            address: submission.address,
            location,
            error_code,
            created_at: Utc::now(),
            assigned_technician: outcome.technician_name().map(str::to_string),
        };

        let block_hash = {
            let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
            ledger.append(record.clone())
        };
        info!(complaint = %complaint_id, sealed = block_hash.is_some(), "complaint recorded");

        Ok(SubmissionReceipt {
            complaint_id,
            outcome,
            block_hash,
            record,
        })
    }

    /// Read-only chain integrity diagnostic.
    pub fn verify_ledger(&self) -> ChainStatus {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ChainStatus {
            valid: ledger.verify(),
            chain_length: ledger.len(),
            last_block_hash: ledger.last_block_hash(),
        }
    }

    /// Read-only snapshot of the block sequence and pending buffer.
    pub fn chain_view(&self) -> ChainView {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        ChainView {
            length: ledger.len(),
            chain: ledger.blocks().to_vec(),
            pending_entries: ledger.pending().to_vec(),
        }
    }

    /// Full roster snapshot for operational views.
    pub fn roster(&self) -> Result<Vec<Technician>, DispatchError> {
        Ok(self.directory.roster()?)
    }
}

/// Combined result of one accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub complaint_id: ComplaintId,
    pub outcome: AssignmentOutcome,
    /// Digest of the sealed block; absent only while a batching mining
    /// policy is still buffering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    pub record: ComplaintRecord,
}

/// Chain verification result.
#[derive(Debug, Clone, Serialize)]
pub struct ChainStatus {
    pub valid: bool,
    pub chain_length: usize,
    pub last_block_hash: Option<String>,
}

/// Ordered block sequence plus the not-yet-sealed entries.
#[derive(Debug, Clone, Serialize)]
pub struct ChainView {
    pub length: usize,
    pub chain: Vec<Block<ComplaintRecord>>,
    pub pending_entries: Vec<ComplaintRecord>,
}

/// Error raised by the dispatch service.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
