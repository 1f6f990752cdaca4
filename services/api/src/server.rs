use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::with_audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clause_audit::audit::{AuditService, FileReportStore};
use clause_audit::config::AppConfig;
use clause_audit::error::AppError;
use clause_audit::telemetry;
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

    let engine = Arc::new(build_engine(&config.engine, args.rules.as_deref())?);
    let report_dir = config.engine.report_dir.clone();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        report_dir: Arc::new(report_dir.clone()),
    };

    let store = Arc::new(FileReportStore::new(report_dir));
    let audit_service = Arc::new(AuditService::new(engine, store));

    let app = with_audit_routes(audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "clause audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
