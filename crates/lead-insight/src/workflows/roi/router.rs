use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::RoiInputs;
use super::service::RoiCalculatorService;
use crate::workflows::analytics::AnalyticsSink;

/// Router builder exposing the ROI calculator endpoint.
pub fn roi_router<S>(service: Arc<RoiCalculatorService<S>>) -> Router
where
    S: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/roi/projection", post(projection_handler::<S>))
        .with_state(service)
}

pub(crate) async fn projection_handler<S>(
    State(service): State<Arc<RoiCalculatorService<S>>>,
    axum::Json(inputs): axum::Json<RoiInputs>,
) -> Response
where
    S: AnalyticsSink + 'static,
{
    match service.calculate(&inputs) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::analytics::TracingAnalyticsSink;
    use crate::workflows::roi::RoiProjector;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> Router {
        let service = RoiCalculatorService::new(
            RoiProjector::default(),
            Arc::new(TracingAnalyticsSink),
        );
        roi_router(Arc::new(service))
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::post("/api/v1/roi/projection")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn projection_route_applies_industry_integration_multiplier() {
        let (status, body) = post_json(json!({
            "industry": "ecommerce",
            "annual_revenue": 1_000_000.0,
            "employee_count": 30,
            "month_end_days": 10.0
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["implementation_cost"], 35_000);
        assert_eq!(body["industry"], "ecommerce");
    }

    #[tokio::test]
    async fn projection_route_rejects_negative_inputs() {
        let (status, body) = post_json(json!({
            "annual_revenue": -5.0,
            "employee_count": 30,
            "month_end_days": 10.0
        }))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("annual_revenue"));
    }
}
