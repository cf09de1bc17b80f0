use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_insight::config::AppConfig;
use lead_insight::error::AppError;
use lead_insight::telemetry;
use lead_insight::workflows::analytics::TracingAnalyticsSink;
use lead_insight::workflows::leads::LeadScoringService;
use lead_insight::workflows::roi::{RoiCalculatorService, RoiProjector, SavingsAssumptions};
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

    let rules = config.scoring.scoring_rules()?;
    let multipliers = config.scoring.industry_multipliers()?;
    info!(
        rules = ?config.scoring.rules_path,
        multipliers = ?config.scoring.multipliers_path,
        industries = multipliers.industries().count(),
        "scoring tables loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLeadRepository::default());
    let analytics = Arc::new(TracingAnalyticsSink);
    let lead_service = Arc::new(LeadScoringService::new(
        repository,
        analytics.clone(),
        rules,
    ));
    let roi_service = Arc::new(RoiCalculatorService::new(
        RoiProjector::new(multipliers, SavingsAssumptions::standard()),
        analytics,
    ));

    let app = with_service_routes(lead_service, roi_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead insight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
