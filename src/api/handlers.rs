//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{CarbonQuery, ErrorResponse, PrivacyQuery, TariffQuery};
use crate::config::ScenarioConfig;
use crate::runner::{
    CarbonReport, PrivacyReport, TariffReport, run_carbon, run_privacy, run_tariff,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Validates `cfg`, reporting only the fields of `section`.
fn check(cfg: &ScenarioConfig, section: &str) -> Result<(), ApiError> {
    let messages: Vec<String> = cfg
        .validate()
        .into_iter()
        .filter(|e| e.field.starts_with(section))
        .map(|e| e.to_string())
        .collect();
    if messages.is_empty() {
        Ok(())
    } else {
        warn!(section, errors = messages.len(), "rejected request");
        Err(error(StatusCode::BAD_REQUEST, messages.join("; ")))
    }
}

/// `GET /tariff` → 200 + `TariffReport` JSON
/// `GET /tariff?flex_pct=55` → 400 + `ErrorResponse`
pub async fn get_tariff(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TariffQuery>,
) -> Result<Json<TariffReport>, ApiError> {
    let cfg = ScenarioConfig {
        tariff: query.apply(&state.base.tariff),
        ..state.base.clone()
    };
    check(&cfg, "tariff.")?;
    run_tariff(&cfg.tariff)
        .map(Json)
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// `GET /privacy` → 200 + `PrivacyReport` JSON
/// `GET /privacy?synthetic_rows=60` → 400 + `ErrorResponse`
pub async fn get_privacy(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PrivacyQuery>,
) -> Result<Json<PrivacyReport>, ApiError> {
    let cfg = ScenarioConfig {
        privacy: query.apply(&state.base.privacy),
        ..state.base.clone()
    };
    check(&cfg, "privacy.")?;
    run_privacy(&cfg.privacy)
        .map(Json)
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// `GET /carbon` → 200 + `CarbonReport` JSON, infeasible windows included
/// `GET /carbon?duration=9` → 400 + `ErrorResponse`
pub async fn get_carbon(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CarbonQuery>,
) -> Result<Json<CarbonReport>, ApiError> {
    let cfg = ScenarioConfig {
        carbon: query.apply(&state.base.carbon),
        ..state.base.clone()
    };
    check(&cfg, "carbon.")?;
    Ok(Json(run_carbon(&cfg.carbon)))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            base: ScenarioConfig::generic(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn tariff_returns_200() {
        let (status, json) = get_json("/tariff").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["scheme"], "critical_peak");
        assert!(json["savings"]["savings"].as_f64().is_some_and(|s| s > 0.0));
        assert_eq!(json["outcome"]["readings"].as_array().map(Vec::len), Some(168));
        assert!(json["savings"]["annual_savings"].is_number());
    }

    #[tokio::test]
    async fn tariff_invalid_flex_returns_400() {
        let (status, json) = get_json("/tariff?flex_pct=55").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|e| e.contains("tariff.flex_pct"))
        );
    }

    #[tokio::test]
    async fn privacy_honors_row_override() {
        let (status, json) = get_json("/privacy?synthetic_rows=200").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["synthetic"].as_array().map(Vec::len), Some(200));
        assert!(json["assessment"]["k_real"].is_u64());
    }

    #[tokio::test]
    async fn carbon_default_window() {
        let (status, json) = get_json("/carbon").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["outcome"]["status"], "found");
        assert_eq!(json["result"]["outcome"]["start"], 15);
    }

    #[tokio::test]
    async fn carbon_infeasible_is_not_an_error() {
        let (status, json) =
            get_json("/carbon?duration=6&earliest_start=20&latest_end=23").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["result"]["outcome"]["status"], "infeasible");
    }

    #[tokio::test]
    async fn carbon_out_of_range_returns_400() {
        let (status, json) = get_json("/carbon?duration=9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
