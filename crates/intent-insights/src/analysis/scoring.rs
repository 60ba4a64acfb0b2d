//! Intention scoring engine.
//!
//! Pure functions over an analysis document: a weighted action-intent score,
//! two independent grade tables, the 80/20 campaign blend, and two auxiliary
//! quality estimates. No I/O and no state; every call is deterministic.

use super::schema::ContentAnalysis;
use serde::Serialize;
use std::collections::HashMap;

/// Classifier certainty attached to the detected intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Case-insensitive parse; anything outside the three labels is `None`
    /// so each formula can apply its own fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    fn action_multiplier(self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.85,
            Self::Low => 0.7,
        }
    }
}

/// Action likelihood carried by each recognized intent category, out of 100.
const CATEGORY_WEIGHTS: &[(&str, f64)] = &[
    ("transactional", 95.0),
    ("commercial", 75.0),
    ("navigational", 45.0),
    ("informational", 15.0),
];

fn category_weight(category: &str) -> f64 {
    CATEGORY_WEIGHTS
        .iter()
        .find(|(name, _)| category.eq_ignore_ascii_case(name))
        .map(|(_, weight)| *weight)
        .unwrap_or(0.0)
}

/// Weighted action-intent score in [0,100].
///
/// An empty breakdown is "no signal" and short-circuits to 0 before any
/// confidence weighting. A missing or unrecognized confidence label weighs
/// in at the medium multiplier.
pub fn action_intent_score(breakdown: &HashMap<String, f64>, confidence: Option<&str>) -> u8 {
    if breakdown.is_empty() {
        return 0;
    }

    let weighted: f64 = breakdown
        .iter()
        .map(|(category, percentage)| (percentage / 100.0) * category_weight(category))
        .sum();

    let multiplier = confidence
        .and_then(Confidence::parse)
        .map(Confidence::action_multiplier)
        .unwrap_or(0.85);

    (weighted * multiplier).round().min(100.0) as u8
}

/// Letter grade plus reader-facing description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub letter: &'static str,
    pub description: String,
}

const ACTION_GRADE_BANDS: &[(u8, &str, &str)] = &[
    (85, "A+", "Very High Action Intent"),
    (75, "A", "High Action Intent"),
    (65, "B+", "Good Action Intent"),
    (55, "B", "Moderate Action Intent"),
    (45, "C+", "Some Action Intent"),
    (35, "C", "Low Action Intent"),
    (25, "D", "Very Low Action Intent"),
];

pub fn action_intent_grade(score: u8) -> Grade {
    for (floor, letter, description) in ACTION_GRADE_BANDS {
        if score >= *floor {
            return Grade {
                letter,
                description: (*description).to_string(),
            };
        }
    }
    Grade {
        letter: "F",
        description: "Minimal Action Intent".to_string(),
    }
}

/// Whether a final score blends campaign relevancy or stands on content
/// intent alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    ActionOnly,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalIntention {
    pub score: u8,
    pub score_type: ScoreType,
}

/// Blends campaign relevancy and action intent at fixed 80/20 weights.
/// Campaign fit dominates the raw content-intent signal on purpose; the
/// split is not configurable. Without relevancy data the action-intent
/// score passes through unchanged.
pub fn final_intention_score(action_intent: u8, campaign_relevancy: Option<u8>) -> FinalIntention {
    match campaign_relevancy {
        None => FinalIntention {
            score: action_intent,
            score_type: ScoreType::ActionOnly,
        },
        Some(relevancy) => {
            let blended = f64::from(relevancy) * 0.8 + f64::from(action_intent) * 0.2;
            FinalIntention {
                score: blended.round().min(100.0) as u8,
                score_type: ScoreType::Combined,
            }
        }
    }
}

// Distinct thresholds from the action-intent table; the two must not drift
// toward each other.
const FINAL_GRADE_BANDS: &[(u8, &str, &str)] = &[
    (90, "A+", "Exceptional"),
    (80, "A", "Excellent"),
    (70, "B+", "Very Good"),
    (60, "B", "Good"),
    (50, "C+", "Fair"),
    (40, "C", "Below Average"),
    (30, "D", "Poor"),
];

pub fn final_intention_grade(score: u8, score_type: ScoreType) -> Grade {
    let prefix = match score_type {
        ScoreType::ActionOnly => "Action Intent: ",
        ScoreType::Combined => "Overall Intent: ",
    };

    for (floor, letter, label) in FINAL_GRADE_BANDS {
        if score >= *floor {
            return Grade {
                letter,
                description: format!("{prefix}{label}"),
            };
        }
    }
    Grade {
        letter: "F",
        description: format!("{prefix}Very Poor"),
    }
}

/// Rough estimate of how accurate the intent classification is, in [0,99].
///
/// A missing confidence label reads as the low tier; a present but
/// unrecognized label falls back to the high-tier base. The asymmetry and
/// the 99 cap are deliberate and differ from the other formulas' defaults.
pub fn intent_accuracy_estimate(analysis: &ContentAnalysis) -> u8 {
    let base: u8 = match analysis.intention.confidence.as_deref() {
        None => 50,
        Some(raw) => match Confidence::parse(raw) {
            Some(Confidence::High) | None => 85,
            Some(Confidence::Medium) => 70,
            Some(Confidence::Low) => 50,
        },
    };

    let has_signal = analysis
        .intentionality_breakdown
        .values()
        .any(|value| *value > 0.0);

    let estimate = if has_signal { base + 10 } else { base };
    estimate.min(99)
}

/// How completely the pipeline filled in the analysis document, in [0,100].
pub fn content_completeness_score(analysis: &ContentAnalysis) -> u8 {
    let confidence_points: usize = match analysis
        .intention
        .confidence
        .as_deref()
        .and_then(Confidence::parse)
    {
        Some(Confidence::High) => 40,
        Some(Confidence::Medium) => 30,
        Some(Confidence::Low) | None => 20,
    };

    let keyword_points =
        (analysis.primary_keywords.len() * 3 + analysis.secondary_keywords.len() * 2).min(20);
    let category_points = (analysis.tier2_categories.len() * 5).min(15);
    let audience_points = (analysis.audience_profile.audience_types.len() * 3
        + analysis.audience_profile.interest_groups.len() * 2)
        .min(15);

    (confidence_points + keyword_points + category_points + audience_points).min(100) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionIntentView {
    pub score: u8,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalIntentionView {
    pub score: u8,
    pub score_type: ScoreType,
    pub grade: Grade,
}

/// Everything the dashboard renders as score cards for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub action_intent: ActionIntentView,
    pub final_intention: FinalIntentionView,
    pub intent_accuracy: u8,
    pub content_completeness: u8,
}

pub fn score_report(analysis: &ContentAnalysis) -> ScoreReport {
    let action = action_intent_score(
        &analysis.intentionality_breakdown,
        analysis.intention.confidence.as_deref(),
    );
    let final_intention = final_intention_score(action, analysis.campaign_relevancy_score());

    ScoreReport {
        action_intent: ActionIntentView {
            score: action,
            grade: action_intent_grade(action),
        },
        final_intention: FinalIntentionView {
            score: final_intention.score,
            score_type: final_intention.score_type,
            grade: final_intention_grade(final_intention.score, final_intention.score_type),
        },
        intent_accuracy: intent_accuracy_estimate(analysis),
        content_completeness: content_completeness_score(analysis),
    }
}
