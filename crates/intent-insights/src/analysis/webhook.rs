//! Client for the external content-analysis webhook.
//!
//! The webhook is an opaque GET endpoint: it accepts the article URL (plus
//! campaign parameters when campaign analysis is requested) as query
//! parameters and answers with a JSON document, sometimes wrapped in a
//! single-element array. Upstream failures come back as an array whose first
//! element carries an `error` key alongside a message and suggestions.

use super::schema::ContentAnalysis;
use crate::config::WebhookConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const ERROR_BODY_SNIPPET_LEN: usize = 500;

/// Parameters forwarded to the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub url: String,
    pub campaign_definition: Option<String>,
    pub vertical: Option<String>,
}

impl AnalysisRequest {
    pub fn basic(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            campaign_definition: None,
            vertical: None,
        }
    }

    /// Campaign mode is driven by the campaign definition alone; a vertical
    /// without a definition still runs the basic flow.
    pub fn wants_campaign_analysis(&self) -> bool {
        self.campaign_definition
            .as_deref()
            .is_some_and(|definition| !definition.trim().is_empty())
    }
}

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis request failed with status {status}")]
    Status { status: StatusCode, body: String },
    #[error("analysis service returned an empty payload")]
    EmptyPayload,
    #[error("could not decode analysis response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("{message}")]
    Upstream {
        message: String,
        suggestions: Vec<String>,
    },
}

/// Seam between the HTTP service and the analysis backend, so routes can be
/// exercised against a canned analyzer.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ContentAnalysis, WebhookError>;
}

/// Production analyzer speaking to the configured webhook endpoints.
pub struct WebhookAnalyzer {
    client: reqwest::Client,
    basic_url: String,
    campaign_url: String,
}

impl WebhookAnalyzer {
    pub fn from_config(config: &WebhookConfig) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            basic_url: config.basic_url.clone(),
            campaign_url: config.campaign_url.clone(),
        })
    }
}

#[async_trait]
impl ContentAnalyzer for WebhookAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ContentAnalysis, WebhookError> {
        let mut params: Vec<(&str, &str)> = vec![("url", request.url.as_str())];
        let endpoint = if request.wants_campaign_analysis() {
            params.push((
                "campaign_definition",
                request.campaign_definition.as_deref().unwrap_or_default(),
            ));
            params.push(("vertical", request.vertical.as_deref().unwrap_or_default()));
            &self.campaign_url
        } else {
            &self.basic_url
        };

        debug!(endpoint = %endpoint, url = %request.url, campaign = request.wants_campaign_analysis(), "dispatching analysis request");

        let response = self.client.get(endpoint).query(&params).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status {
                status,
                body: snippet(&body),
            });
        }

        let payload: Value = response.json().await?;
        parse_analysis_payload(payload)
    }
}

/// Unwraps the webhook envelope and surfaces upstream-reported errors.
pub fn parse_analysis_payload(payload: Value) -> Result<ContentAnalysis, WebhookError> {
    let document = match payload {
        Value::Array(mut items) => {
            if items.is_empty() {
                return Err(WebhookError::EmptyPayload);
            }
            items.remove(0)
        }
        other => other,
    };

    if let Value::Object(ref fields) = document {
        if fields.contains_key("error") {
            let message = fields
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("The analysis service reported an error.")
                .to_string();
            let suggestions = fields
                .get("suggestions")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            return Err(WebhookError::Upstream {
                message,
                suggestions,
            });
        }
    }

    serde_json::from_value(document).map_err(WebhookError::Decode)
}

fn snippet(body: &str) -> String {
    let mut end = body.len().min(ERROR_BODY_SNIPPET_LEN);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn campaign_mode_requires_nonblank_definition() {
        let mut request = AnalysisRequest::basic("https://example.com/article");
        assert!(!request.wants_campaign_analysis());

        request.campaign_definition = Some("   ".to_string());
        assert!(!request.wants_campaign_analysis());

        request.campaign_definition = Some("Q4 developer awareness push".to_string());
        assert!(request.wants_campaign_analysis());
    }

    #[test]
    fn unwraps_single_element_array_envelope() {
        let analysis = parse_analysis_payload(json!([
            { "intention": { "confidence": "high" } }
        ]))
        .expect("array envelope parses");
        assert_eq!(analysis.intention.confidence.as_deref(), Some("high"));
    }

    #[test]
    fn accepts_bare_object_payload() {
        let analysis = parse_analysis_payload(json!({
            "intentionality_breakdown": { "transactional": 60.0 }
        }))
        .expect("bare object parses");
        assert_eq!(
            analysis.intentionality_breakdown.get("transactional"),
            Some(&60.0)
        );
    }

    #[test]
    fn empty_array_is_an_error() {
        assert!(matches!(
            parse_analysis_payload(json!([])),
            Err(WebhookError::EmptyPayload)
        ));
    }

    #[test]
    fn upstream_error_envelope_carries_message_and_suggestions() {
        let result = parse_analysis_payload(json!([{
            "error": "fetch_failed",
            "message": "The article could not be retrieved.",
            "suggestions": ["Check that the URL is public", "Try again later"]
        }]));

        match result {
            Err(WebhookError::Upstream {
                message,
                suggestions,
            }) => {
                assert_eq!(message, "The article could not be retrieved.");
                assert_eq!(suggestions.len(), 2);
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn upstream_error_without_message_uses_generic_text() {
        let result = parse_analysis_payload(json!({ "error": true }));
        match result {
            Err(WebhookError::Upstream { message, .. }) => {
                assert_eq!(message, "The analysis service reported an error.");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let long = "é".repeat(600);
        let cut = snippet(&long);
        assert!(cut.len() <= ERROR_BODY_SNIPPET_LEN);
        assert!(cut.chars().all(|c| c == 'é'));
    }
}
