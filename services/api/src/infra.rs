use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeSet;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use fieldops::workflows::dispatch::{
    DirectoryError, GeoPoint, Specialization, Technician, TechnicianDirectory, TechnicianId,
    TechnicianStatus,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Mutex-guarded roster implementing the directory seam. The claim check and
/// the status write happen under one lock acquisition, so a row can never be
/// claimed twice.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTechnicianDirectory {
    rows: Arc<Mutex<Vec<Technician>>>,
}

impl InMemoryTechnicianDirectory {
    pub(crate) fn with_rows(rows: Vec<Technician>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self::with_rows(seed_roster())
    }
}

impl TechnicianDirectory for InMemoryTechnicianDirectory {
    fn available(&self) -> Result<Vec<Technician>, DirectoryError> {
        let guard = self.rows.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| row.is_available())
            .cloned()
            .collect())
    }

    fn roster(&self) -> Result<Vec<Technician>, DirectoryError> {
        let guard = self.rows.lock().expect("directory mutex poisoned");
        Ok(guard.clone())
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

fn row(
    id: u32,
    name: &str,
    contact_no: &str,
    latitude: f64,
    longitude: f64,
    status: TechnicianStatus,
    tags: &[Specialization],
) -> Technician {
    Technician {
        id: TechnicianId(id),
        name: name.to_string(),
        contact_no: contact_no.to_string(),
        location: GeoPoint {
            latitude,
            longitude,
        },
        status,
        specializations: tags.iter().copied().collect::<BTreeSet<_>>(),
    }
}

/// Deterministic Pune-region roster used by `serve` and the CLI demo until a
/// durable directory backend is wired in.
pub(crate) fn seed_roster() -> Vec<Technician> {
    use Specialization::*;
    use TechnicianStatus::{Available, Busy};

    vec![
        row(1, "Rahul Kumar", "9820000001", 18.5204, 73.8567, Available, &[Ac, Refrigerator]),
        row(2, "Priya Patil", "9820000002", 18.6255, 73.8096, Busy, &[WashingMachine]),
        row(3, "Amit Joshi", "9820000003", 18.5137, 73.9310, Available, &[Television, Induction]),
        row(4, "Sneha Singh", "9820000004", 18.5913, 73.7389, Available, &[Ac]),
        row(5, "Vikas Sharma", "9820000005", 18.5082, 73.7915, Busy, &[Geyser, Microwave]),
        row(6, "Pooja Reddy", "9820000006", 18.5140, 73.8407, Available, &[Refrigerator, Dishwasher]),
        row(7, "Sanjay Yadav", "9820000007", 18.5583, 73.8092, Available, &[WashingMachine, WaterPurifier]),
        row(8, "Meena Gupta", "9820000008", 18.5670, 73.9400, Busy, &[Television]),
        row(9, "Arjun Malik", "9820000009", 18.5630, 73.9180, Available, &[Microwave, Induction]),
        row(10, "Kavita Verma", "9820000010", 18.6600, 73.7740, Available, &[Geyser, Ac]),
    ]
}
