pub mod markdown;
pub mod report;
pub mod sarif;

use crate::parser::model::PipelineDefinition;
use crate::risk_score::Scorer;
use crate::security;
use log::info;
use report::AnalysisResult;

/// Run all rules on a pipeline and score the findings with default weights.
pub fn analyze(pipeline: &PipelineDefinition) -> AnalysisResult {
    analyze_with(pipeline, &Scorer::default())
}

/// Run all rules on a pipeline and score the findings with `scorer`.
pub fn analyze_with(pipeline: &PipelineDefinition, scorer: &Scorer) -> AnalysisResult {
    let findings = security::scan(pipeline);
    let result = scorer.score(findings);

    info!(
        "Analyzed '{}': {} jobs, {} steps, {} findings, score {}/100 ({})",
        pipeline.name.as_deref().unwrap_or("unnamed workflow"),
        pipeline.job_count(),
        pipeline.step_count(),
        result.findings.len(),
        result.score,
        result.risk_level
    );

    result
}
