use crate::analyzer::report::{Finding, RuleId, Severity};
use crate::parser::model::PipelineDefinition;

/// Download tool paired with the shell it is piped into.
///
/// Plain substring checks: `sh` also matches inside words such as `bash` or
/// `push`.
const DOWNLOAD_AND_EXECUTE: &[(&str, &str)] = &[("curl", "bash"), ("wget", "sh")];

/// Detect download-and-execute patterns such as `curl | bash` or `wget | sh`.
pub fn detect_dangerous_commands(pipeline: &PipelineDefinition) -> Vec<Finding> {
    let mut findings = Vec::new();

    for job in &pipeline.jobs {
        for (index, step) in job.steps.iter().enumerate() {
            let Some(run) = step.run.as_deref() else {
                continue;
            };
            if is_dangerous_command(run) {
                findings.push(Finding {
                    id: format!("{}_dangerous_command_{}", job.id, index),
                    severity: Severity::High,
                    rule_id: RuleId::DangerousCommand,
                    title: format!("Dangerous command pattern in job '{}'", job.id),
                    description: "This step uses a potentially dangerous download-and-execute \
                                  pattern such as 'curl | bash' or 'wget | sh', which can be \
                                  abused by attackers."
                        .to_string(),
                    job_id: Some(job.id.clone()),
                    step_name: step.name.clone(),
                });
            }
        }
    }

    findings
}

fn is_dangerous_command(run: &str) -> bool {
    let cmd = run.to_lowercase();
    DOWNLOAD_AND_EXECUTE
        .iter()
        .any(|(fetch, shell)| cmd.contains(fetch) && cmd.contains(shell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::{Job, Step};

    fn pipeline_with_runs(runs: &[Option<&str>]) -> PipelineDefinition {
        let mut job = Job::new("setup".into());
        for run in runs {
            job.steps.push(Step {
                name: Some("Install".into()),
                run: run.map(String::from),
                ..Default::default()
            });
        }
        let mut pipeline = PipelineDefinition::default();
        pipeline.add_job(job);
        pipeline
    }

    #[test]
    fn test_curl_pipe_bash() {
        let findings = detect_dangerous_commands(&pipeline_with_runs(&[Some("curl https://x | bash")]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "setup_dangerous_command_0");
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].rule_id, RuleId::DangerousCommand);
        assert_eq!(findings[0].step_name.as_deref(), Some("Install"));
    }

    #[test]
    fn test_curl_alone_is_fine() {
        assert!(detect_dangerous_commands(&pipeline_with_runs(&[Some("curl https://x")])).is_empty());
    }

    #[test]
    fn test_wget_and_sh() {
        let findings =
            detect_dangerous_commands(&pipeline_with_runs(&[Some("wget file && sh install.sh")]));
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_case_insensitive_and_substring() {
        let findings = detect_dangerous_commands(&pipeline_with_runs(&[
            Some("CURL -fsSL https://get.example | BASH"),
            Some("wget https://example.com/archive.tgz && git push"),
        ]));
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[1].id, "setup_dangerous_command_1");
    }

    #[test]
    fn test_step_without_run_never_trips() {
        assert!(detect_dangerous_commands(&pipeline_with_runs(&[None])).is_empty());
    }
}
