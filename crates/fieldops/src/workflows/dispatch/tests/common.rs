use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::ledger::MiningPolicy;
use crate::workflows::dispatch::directory::{DirectoryError, TechnicianDirectory};
use crate::workflows::dispatch::domain::{
    ComplaintSubmission, GeoPoint, Specialization, Technician, TechnicianId, TechnicianStatus,
};
use crate::workflows::dispatch::router::dispatch_router;
use crate::workflows::dispatch::service::DispatchService;

pub(super) fn shivajinagar() -> GeoPoint {
    GeoPoint {
        latitude: 18.5204,
        longitude: 73.8567,
    }
}

pub(super) fn hinjewadi() -> GeoPoint {
    GeoPoint {
        latitude: 18.5913,
        longitude: 73.7389,
    }
}

pub(super) fn specs(tags: &[Specialization]) -> BTreeSet<Specialization> {
    tags.iter().copied().collect()
}

pub(super) fn technician(
    id: u32,
    name: &str,
    location: GeoPoint,
    status: TechnicianStatus,
    tags: &[Specialization],
) -> Technician {
    Technician {
        id: TechnicianId(id),
        name: name.to_string(),
        contact_no: format!("9{:09}", 100_000_000 + id as u64),
        location,
        status,
        specializations: specs(tags),
    }
}

pub(super) fn ac_submission() -> ComplaintSubmission {
    ComplaintSubmission {
        submitter_id: 42,
        problem: "AC not cooling at all".to_string(),
        address: "Flat 2B, FC Road, Shivajinagar, Pune".to_string(),
        contact_no: "9822011223".to_string(),
        error_code: Some("E1".to_string()),
        latitude: Some(shivajinagar().latitude),
        longitude: Some(shivajinagar().longitude),
    }
}

pub(super) fn fast_policy() -> MiningPolicy {
    MiningPolicy {
        difficulty: 2,
        batch_size: 1,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    rows: Arc<Mutex<Vec<Technician>>>,
}

impl MemoryDirectory {
    pub(super) fn with_rows(rows: Vec<Technician>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub(super) fn rows(&self) -> Vec<Technician> {
        self.rows.lock().expect("directory mutex poisoned").clone()
    }
}

impl TechnicianDirectory for MemoryDirectory {
    fn available(&self) -> Result<Vec<Technician>, DirectoryError> {
        let guard = self.rows.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| row.is_available())
            .cloned()
            .collect())
    }

    fn roster(&self) -> Result<Vec<Technician>, DirectoryError> {
        Ok(self.rows())
    }

    fn claim(&self, id: TechnicianId) -> Result<Technician, DirectoryError> {
        let mut guard = self.rows.lock().expect("directory mutex poisoned");
        let row = guard
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(DirectoryError::NotFound)?;
        if !row.is_available() {
            return Err(DirectoryError::Conflict);
        }
        row.status = TechnicianStatus::Busy;
        Ok(row.clone())
    }
}

/// Reports an available row but refuses every claim, simulating a raced
/// conditional update in a backing store.
pub(super) struct ContestedDirectory;

impl TechnicianDirectory for ContestedDirectory {
    fn available(&self) -> Result<Vec<Technician>, DirectoryError> {
        Ok(vec![technician(
            1,
            "Rahul Kumar",
            shivajinagar(),
            TechnicianStatus::Available,
            &[Specialization::Ac],
        )])
    }

    fn roster(&self) -> Result<Vec<Technician>, DirectoryError> {
        self.available()
    }

    fn claim(&self, _id: TechnicianId) -> Result<Technician, DirectoryError> {
        Err(DirectoryError::Conflict)
    }
}

pub(super) struct UnavailableDirectory;

impl TechnicianDirectory for UnavailableDirectory {
    fn available(&self) -> Result<Vec<Technician>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn roster(&self) -> Result<Vec<Technician>, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }

    fn claim(&self, _id: TechnicianId) -> Result<Technician, DirectoryError> {
        Err(DirectoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service(
    rows: Vec<Technician>,
) -> (Arc<DispatchService<MemoryDirectory>>, Arc<MemoryDirectory>) {
    let directory = Arc::new(MemoryDirectory::with_rows(rows));
    let service = Arc::new(DispatchService::new(directory.clone(), fast_policy()));
    (service, directory)
}

pub(super) fn router_with_rows(rows: Vec<Technician>) -> axum::Router {
    let (service, _) = build_service(rows);
    dispatch_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
