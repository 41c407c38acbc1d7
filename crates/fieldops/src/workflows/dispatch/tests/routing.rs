use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::dispatch::domain::{Specialization, TechnicianStatus};
use crate::workflows::dispatch::router;
use crate::workflows::dispatch::service::DispatchService;

#[tokio::test]
async fn submit_handler_returns_conflict_on_contested_claim() {
    let service = Arc::new(DispatchService::new(
        Arc::new(ContestedDirectory),
        fast_policy(),
    ));

    let response = router::submit_handler::<ContestedDirectory>(
        State(service),
        axum::Json(ac_submission()),
    )
    .await;

    assert_conflict_response(response);
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_directory_failure() {
    let service = Arc::new(DispatchService::new(
        Arc::new(UnavailableDirectory),
        fast_policy(),
    ));

    let response = router::submit_handler::<UnavailableDirectory>(
        State(service),
        axum::Json(ac_submission()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn submit_route_returns_receipt_with_assignment() {
    let router = router_with_rows(vec![technician(
        1,
        "Rahul Kumar",
        shivajinagar(),
        TechnicianStatus::Available,
        &[Specialization::Ac],
    )]);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/complaints")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&ac_submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("complaint_id").is_some());
    assert!(payload.get("block_hash").is_some());
    assert_eq!(
        payload
            .pointer("/outcome/status")
            .and_then(Value::as_str),
        Some("assigned")
    );
    assert_eq!(
        payload
            .pointer("/outcome/technician/name")
            .and_then(Value::as_str),
        Some("Rahul Kumar")
    );
}

#[tokio::test]
async fn submit_route_reports_exhaustion_as_a_result() {
    let router = router_with_rows(Vec::new());

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/complaints")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&ac_submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/outcome/status")
            .and_then(Value::as_str),
        Some("no_available_technician")
    );
}

#[tokio::test]
async fn verify_route_reports_chain_health() {
    let router = router_with_rows(Vec::new());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/ledger/verify")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("valid"), Some(&Value::Bool(true)));
    assert_eq!(
        payload.get("chain_length").and_then(Value::as_u64),
        Some(1)
    );
}

#[tokio::test]
async fn ledger_route_exposes_blocks_and_pending_buffer() {
    let router = router_with_rows(Vec::new());

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/ledger")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("length").and_then(Value::as_u64), Some(1));
    assert_eq!(
        payload
            .get("chain")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(1)
    );
    assert_eq!(
        payload
            .get("pending_entries")
            .and_then(Value::as_array)
            .map(Vec::len),
        Some(0)
    );
}

#[tokio::test]
async fn technicians_route_returns_the_roster() {
    let router = router_with_rows(vec![
        technician(
            1,
            "Rahul Kumar",
            shivajinagar(),
            TechnicianStatus::Available,
            &[Specialization::Ac],
        ),
        technician(
            2,
            "Priya Patil",
            hinjewadi(),
            TechnicianStatus::Busy,
            &[Specialization::Television],
        ),
    ]);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/technicians")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let technicians = payload
        .get("technicians")
        .and_then(Value::as_array)
        .expect("roster array");
    assert_eq!(technicians.len(), 2);
    assert_eq!(
        technicians[1].get("status").and_then(Value::as_str),
        Some("busy")
    );
}
