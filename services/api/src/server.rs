use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryTechnicianDirectory};
use crate::routes::with_dispatch_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fieldops::config::AppConfig;
use fieldops::error::AppError;
use fieldops::telemetry;
use fieldops::workflows::dispatch::DispatchService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryTechnicianDirectory::seeded());
    let dispatch_service = Arc::new(DispatchService::new(
        directory,
        config.ledger.mining_policy(),
    ));

    let app = with_dispatch_routes(dispatch_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "field service dispatch ready");

    axum::serve(listener, app).await?;
    Ok(())
}
