use clap::Args;
use intent_insights::analysis::webhook::parse_analysis_payload;
use intent_insights::analysis::{score_report, ContentAnalysis, ScoreReport};
use intent_insights::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON document previously returned by the analysis webhook
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Emit the score report as pretty-printed JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let payload: serde_json::Value = serde_json::from_str(&raw)?;
    let analysis = parse_analysis_payload(payload)?;
    let report = score_report(&analysis);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_score_report(&analysis, &report);
    }

    Ok(())
}

fn render_score_report(analysis: &ContentAnalysis, report: &ScoreReport) {
    println!("Content intention score report");

    if let Some(primary) = analysis.intention.primary.as_deref() {
        println!("  primary intent: {primary}");
    }
    if let Some(confidence) = analysis.intention.confidence.as_deref() {
        println!("  classifier confidence: {confidence}");
    }

    if !analysis.intentionality_breakdown.is_empty() {
        println!("  intent breakdown:");
        let mut entries: Vec<_> = analysis.intentionality_breakdown.iter().collect();
        entries.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
        for (category, percentage) in entries {
            println!("    {category}: {percentage:.0}%");
        }
    }

    println!(
        "  action intent: {} ({} - {})",
        report.action_intent.score,
        report.action_intent.grade.letter,
        report.action_intent.grade.description
    );
    println!(
        "  final intention: {} ({} - {})",
        report.final_intention.score,
        report.final_intention.grade.letter,
        report.final_intention.grade.description
    );
    println!("  intent accuracy estimate: {}%", report.intent_accuracy);
    println!(
        "  content completeness: {}/100",
        report.content_completeness
    );

    if let Some(relevancy) = analysis.campaign_relevancy.as_ref() {
        println!("  campaign relevancy:");
        if let Some(score) = relevancy.overall_relevancy_score {
            println!("    overall: {score}/100");
        }
        if let Some(level) = relevancy.relevancy_level.as_deref() {
            println!("    level: {level}");
        }
        if let Some(recommendation) = relevancy.recommendation.as_deref() {
            println!("    recommendation: {recommendation}");
        }
        for suggestion in &relevancy.optimization_suggestions {
            println!("    suggestion: {suggestion}");
        }
    }
}
