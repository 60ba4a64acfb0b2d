//! Content-analysis domain: webhook schema, request plumbing, URL hygiene,
//! and the intention scoring engine.

pub mod schema;
pub mod scoring;
pub mod validate;
pub mod webhook;

pub use schema::{AudienceProfile, CampaignRelevancy, ContentAnalysis, Intention};
pub use scoring::{
    action_intent_grade, action_intent_score, content_completeness_score, final_intention_grade,
    final_intention_score, intent_accuracy_estimate, score_report, Confidence, FinalIntention,
    Grade, ScoreReport, ScoreType,
};
pub use validate::{normalize_article_url, UrlValidationError};
pub use webhook::{AnalysisRequest, ContentAnalyzer, WebhookAnalyzer, WebhookError};
