//! Typed view of the analysis document returned by the contextual webhook.
//!
//! Every field is optional or defaulted: the upstream pipeline omits sections
//! freely, and the scoring engine degrades to documented fallbacks instead of
//! rejecting partial documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentAnalysis {
    #[serde(default)]
    pub intention: Intention,
    /// Intent category name to percentage in [0,100]. Categories outside the
    /// recognized four carry no scoring weight but are kept for display.
    #[serde(default)]
    pub intentionality_breakdown: HashMap<String, f64>,
    #[serde(default)]
    pub summary_rationale: Option<String>,
    #[serde(default)]
    pub tier1_category: Option<String>,
    #[serde(default)]
    pub tier2_categories: Vec<String>,
    #[serde(default)]
    pub primary_keywords: Vec<String>,
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
    #[serde(default)]
    pub audience_profile: AudienceProfile,
    #[serde(default)]
    pub performance_summary: Option<PerformanceSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_relevancy: Option<CampaignRelevancy>,
    /// Fields this service does not interpret are carried through untouched
    /// so the dashboard can render whatever the pipeline adds.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Intention {
    #[serde(default)]
    pub primary: Option<String>,
    /// Raw confidence label (`high`/`medium`/`low`, any casing). Kept as text
    /// because each scoring formula applies its own fallback rule.
    #[serde(default)]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AudienceProfile {
    #[serde(default, rename = "type")]
    pub audience_types: Vec<String>,
    #[serde(default)]
    pub interest_groups: Vec<String>,
    #[serde(default)]
    pub demographics: Demographics,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Demographics {
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub income_range: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region: Vec<String>,
    #[serde(default)]
    pub profession: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PerformanceSummary {
    #[serde(default)]
    pub content_intent: Option<String>,
    #[serde(default)]
    pub campaign_suitability: Option<String>,
    #[serde(default)]
    pub overall_relevancy: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Campaign-fit result computed upstream; `overall_relevancy_score` is the
/// only field the scoring engine consumes, the rest is display material.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CampaignRelevancy {
    #[serde(default)]
    pub overall_relevancy_score: Option<u8>,
    #[serde(default)]
    pub relevancy_level: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub intent_alignment_score: Option<u8>,
    #[serde(default)]
    pub keyword_alignment_score: Option<u8>,
    #[serde(default)]
    pub audience_match_score: Option<u8>,
    #[serde(default)]
    pub vertical_alignment_score: Option<u8>,
    #[serde(default)]
    pub matching_keywords: Vec<String>,
    #[serde(default)]
    pub content_strengths_for_campaign: Vec<String>,
    #[serde(default)]
    pub content_gaps_for_campaign: Vec<String>,
    #[serde(default)]
    pub optimization_suggestions: Vec<String>,
}

impl ContentAnalysis {
    /// Relevancy score to blend into the final intention score, when the
    /// upstream campaign analysis actually produced one.
    pub fn campaign_relevancy_score(&self) -> Option<u8> {
        self.campaign_relevancy
            .as_ref()
            .and_then(|relevancy| relevancy.overall_relevancy_score)
    }
}
