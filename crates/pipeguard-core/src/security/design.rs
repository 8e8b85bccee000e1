use crate::analyzer::report::{Finding, RuleId, Severity};
use crate::parser::model::PipelineDefinition;

/// Keywords in a step's name or command that indicate a quality or security check.
const QUALITY_KEYWORDS: &[&str] = &["test", "lint", "scan", "security", "audit"];

/// Pipeline-level checks: deploys without tests, and no quality gates at all.
pub fn detect_weak_pipeline_design(pipeline: &PipelineDefinition) -> Vec<Finding> {
    let mut findings = Vec::new();

    if pipeline.jobs.is_empty() {
        return findings;
    }

    let first_deploy = pipeline.jobs.iter().find(|job| job.mentions("deploy"));
    let has_test_job = pipeline.jobs.iter().any(|job| job.mentions("test"));

    if let (Some(deploy), false) = (first_deploy, has_test_job) {
        findings.push(Finding {
            id: "pipeline_missing_test_before_deploy".to_string(),
            severity: Severity::Medium,
            rule_id: RuleId::WeakPipelineDesign,
            title: "Deploy jobs found without explicit test jobs".to_string(),
            description: "The workflow defines deployment jobs but does not contain any explicit \
                          test jobs. This increases the risk of releasing untested changes."
                .to_string(),
            job_id: Some(deploy.id.clone()),
            step_name: None,
        });
    }

    if !has_quality_steps(pipeline) {
        findings.push(Finding {
            id: "pipeline_missing_quality_checks".to_string(),
            severity: Severity::Low,
            rule_id: RuleId::WeakPipelineDesign,
            title: "No explicit quality or security checks detected".to_string(),
            description: "No steps mentioning test, lint, scan, security, or audit were detected. \
                          Consider adding explicit quality and security checks in the pipeline."
                .to_string(),
            job_id: None,
            step_name: None,
        });
    }

    findings
}

fn has_quality_steps(pipeline: &PipelineDefinition) -> bool {
    pipeline.jobs.iter().flat_map(|job| &job.steps).any(|step| {
        let text = format!("{} {}", step.name_text(), step.run_text()).to_lowercase();
        QUALITY_KEYWORDS.iter().any(|k| text.contains(k))
    })
}
