use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::directory::{DirectoryError, TechnicianDirectory};
use super::domain::ComplaintSubmission;
use super::service::{DispatchError, DispatchService};

/// Router builder exposing HTTP endpoints for complaint intake, ledger
/// inspection, and the live roster.
pub fn dispatch_router<D>(service: Arc<DispatchService<D>>) -> Router
where
    D: TechnicianDirectory + 'static,
{
    Router::new()
        .route("/api/v1/complaints", post(submit_handler::<D>))
        .route("/api/v1/ledger", get(chain_handler::<D>))
        .route("/api/v1/ledger/verify", get(verify_handler::<D>))
        .route("/api/v1/technicians", get(roster_handler::<D>))
        .with_state(service)
}

pub(crate) async fn submit_handler<D>(
    State(service): State<Arc<DispatchService<D>>>,
    axum::Json(submission): axum::Json<ComplaintSubmission>,
) -> Response
where
    D: TechnicianDirectory + 'static,
{
    match service.submit(submission) {
        // Exhaustion outcomes ride inside the receipt; they are results,
        // not transport-level failures.
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(DispatchError::Directory(DirectoryError::Conflict)) => {
            let payload = json!({
                "error": "technician was claimed concurrently, retry the submission",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn chain_handler<D>(
    State(service): State<Arc<DispatchService<D>>>,
) -> Response
where
    D: TechnicianDirectory + 'static,
{
    let view = service.chain_view();
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn verify_handler<D>(
    State(service): State<Arc<DispatchService<D>>>,
) -> Response
where
    D: TechnicianDirectory + 'static,
{
    let status = service.verify_ledger();
    (StatusCode::OK, axum::Json(status)).into_response()
}

pub(crate) async fn roster_handler<D>(
    State(service): State<Arc<DispatchService<D>>>,
) -> Response
where
    D: TechnicianDirectory + 'static,
{
    match service.roster() {
        Ok(technicians) => {
            let payload = json!({ "technicians": technicians });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
