use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use intent_insights::analysis::{
    normalize_article_url, score_report, AnalysisRequest, ContentAnalysis, ContentAnalyzer,
    ScoreReport,
};
use intent_insights::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) campaign_definition: Option<String>,
    #[serde(default)]
    pub(crate) vertical: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeResponse {
    pub(crate) requested_url: String,
    pub(crate) analyzed_url: String,
    pub(crate) analysis_mode: AnalysisMode,
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) scores: ScoreReport,
    pub(crate) analysis: ContentAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AnalysisMode {
    Basic,
    Campaign,
}

pub(crate) fn dashboard_router<A>(analyzer: Arc<A>) -> Router
where
    A: ContentAnalyzer + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/analysis", post(analyze_endpoint::<A>))
        .with_state(analyzer)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn analyze_endpoint<A>(
    State(analyzer): State<Arc<A>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError>
where
    A: ContentAnalyzer,
{
    let AnalyzeRequest {
        url,
        campaign_definition,
        vertical,
    } = payload;

    let analyzed_url = normalize_article_url(&url)?;
    let request = AnalysisRequest {
        url: analyzed_url.clone(),
        campaign_definition,
        vertical,
    };
    let analysis_mode = if request.wants_campaign_analysis() {
        AnalysisMode::Campaign
    } else {
        AnalysisMode::Basic
    };

    let analysis = analyzer.analyze(&request).await?;
    let scores = score_report(&analysis);

    Ok(Json(AnalyzeResponse {
        requested_url: url,
        analyzed_url,
        analysis_mode,
        generated_at: Utc::now(),
        scores,
        analysis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use intent_insights::analysis::{ScoreType, WebhookError};
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    struct StubAnalyzer {
        payload: Value,
        requests: Mutex<Vec<AnalysisRequest>>,
    }

    impl StubAnalyzer {
        fn returning(payload: Value) -> Self {
            Self {
                payload,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentAnalyzer for StubAnalyzer {
        async fn analyze(
            &self,
            request: &AnalysisRequest,
        ) -> Result<ContentAnalysis, WebhookError> {
            self.requests
                .lock()
                .expect("request log mutex poisoned")
                .push(request.clone());
            serde_json::from_value(self.payload.clone()).map_err(WebhookError::Decode)
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl ContentAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _: &AnalysisRequest) -> Result<ContentAnalysis, WebhookError> {
            Err(WebhookError::Upstream {
                message: "The article could not be retrieved.".to_string(),
                suggestions: vec!["Check that the URL is public".to_string()],
            })
        }
    }

    fn sample_analysis() -> Value {
        json!({
            "intention": { "primary": "transactional", "confidence": "high" },
            "intentionality_breakdown": { "transactional": 100.0 }
        })
    }

    #[tokio::test]
    async fn analyze_endpoint_scores_and_normalizes() {
        let analyzer = Arc::new(StubAnalyzer::returning(sample_analysis()));
        let request = AnalyzeRequest {
            url: "example.com/article".to_string(),
            campaign_definition: None,
            vertical: None,
        };

        let Json(body) = analyze_endpoint(State(analyzer.clone()), Json(request))
            .await
            .expect("analysis succeeds");

        assert_eq!(body.requested_url, "example.com/article");
        assert_eq!(body.analyzed_url, "https://example.com/article");
        assert_eq!(body.analysis_mode, AnalysisMode::Basic);
        assert_eq!(body.scores.action_intent.score, 95);
        assert_eq!(body.scores.final_intention.score_type, ScoreType::ActionOnly);

        let seen = analyzer.requests.lock().expect("request log mutex poisoned");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://example.com/article");
    }

    #[tokio::test]
    async fn campaign_fields_switch_the_analysis_mode() {
        let analyzer = Arc::new(StubAnalyzer::returning(sample_analysis()));
        let request = AnalyzeRequest {
            url: "https://example.com/article".to_string(),
            campaign_definition: Some("Developer awareness push".to_string()),
            vertical: Some("Technology".to_string()),
        };

        let Json(body) = analyze_endpoint(State(analyzer), Json(request))
            .await
            .expect("analysis succeeds");

        assert_eq!(body.analysis_mode, AnalysisMode::Campaign);
    }

    #[tokio::test]
    async fn invalid_url_never_reaches_the_analyzer() {
        let analyzer = Arc::new(StubAnalyzer::returning(sample_analysis()));
        let request = AnalyzeRequest {
            url: "   ".to_string(),
            campaign_definition: None,
            vertical: None,
        };

        let result = analyze_endpoint(State(analyzer.clone()), Json(request)).await;
        assert!(matches!(result, Err(AppError::InvalidUrl(_))));
        assert!(analyzer
            .requests
            .lock()
            .expect("request log mutex poisoned")
            .is_empty());
    }

    #[tokio::test]
    async fn upstream_errors_map_to_unprocessable_entity() {
        let app = dashboard_router(Arc::new(FailingAnalyzer));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analysis")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({ "url": "https://example.com/article" }).to_string(),
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: Value = serde_json::from_slice(&bytes).expect("body is json");
        assert_eq!(body["error"], "The article could not be retrieved.");
        assert_eq!(body["suggestions"][0], "Check that the URL is public");
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = dashboard_router(Arc::new(StubAnalyzer::returning(sample_analysis())));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
