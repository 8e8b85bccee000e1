use crate::analyzer::report::{Finding, RuleId, Severity};
use crate::parser::model::{PipelineDefinition, Step};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Literal fragments that suggest a credential assignment in a run command.
const RUN_SECRET_MARKERS: &[&str] = &["api_key=", "token=", "password"];

/// Fragments of environment variable names that usually hold credentials.
const ENV_SECRET_NAME_MARKERS: &[&str] = &["key", "token", "secret", "password"];

/// Long alphanumeric runs look like embedded tokens or keys.
static LONG_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]{20,}").expect("token pattern is valid"));

/// Detect hard-coded secrets in step run commands and environment variables.
pub fn detect_secret_exposure(pipeline: &PipelineDefinition) -> Vec<Finding> {
    let mut findings = Vec::new();

    for job in &pipeline.jobs {
        for (index, step) in job.steps.iter().enumerate() {
            if step_exposes_secret(step) {
                findings.push(Finding {
                    id: format!("{}_{}_secret_exposure", job.id, index),
                    severity: Severity::High,
                    rule_id: RuleId::SecretExposure,
                    title: format!("Possible secret exposure in job '{}'", job.id),
                    description:
                        "Run command or environment variables appear to contain hard-coded secrets."
                            .to_string(),
                    job_id: Some(job.id.clone()),
                    step_name: step.name.clone(),
                });
            }
        }
    }

    findings
}

fn step_exposes_secret(step: &Step) -> bool {
    run_looks_like_secret(step.run_text()) || env_contains_secret(&step.env)
}

fn run_looks_like_secret(cmd: &str) -> bool {
    let lowered = cmd.to_lowercase();
    RUN_SECRET_MARKERS.iter().any(|m| lowered.contains(m)) || LONG_TOKEN.is_match(cmd)
}

fn env_contains_secret(env: &BTreeMap<String, String>) -> bool {
    env.iter().any(|(key, value)| {
        let key = key.to_lowercase();
        ENV_SECRET_NAME_MARKERS.iter().any(|m| key.contains(m)) && !value.trim().is_empty()
    })
}
