use crate::analyzer::report::{AnalysisResult, Finding};

/// Generate a Markdown report summarizing one analysis run.
///
/// `source_file` is shown in the summary when given.
pub fn render(result: &AnalysisResult, source_file: Option<&str>) -> String {
    let mut lines = vec![
        "# CI/CD Security Linter Report".to_string(),
        String::new(),
        "## Summary".to_string(),
    ];
    if let Some(source) = source_file {
        lines.push(format!("- Workflow: `{}`", source));
    }
    lines.push(format!("- Score: {}/100", result.score));
    lines.push(format!(
        "- Risk level: {} {}",
        result.risk_level,
        result.risk_level.traffic_light()
    ));
    lines.push(format!("- Total findings: {}", result.findings.len()));
    lines.push(String::new());

    lines.push("## Findings".to_string());
    lines.push(String::new());
    if result.findings.is_empty() {
        lines.push("No issues detected.".to_string());
    } else {
        lines.extend(findings_table(&result.findings));
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.push(String::new());
    lines.extend(recommendations(result));

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Join several rendered reports into one document.
pub fn combine(reports: &[String]) -> String {
    reports.join("\n---\n\n")
}

fn findings_table(findings: &[Finding]) -> Vec<String> {
    let mut lines = vec![
        "| Severity | Rule | Job | Step | Title | Description |".to_string(),
        "|---|---|---|---|---|---|".to_string(),
    ];

    for finding in findings {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            finding.severity,
            finding.rule_id,
            cell(finding.job_id.as_deref().unwrap_or("-")),
            cell(finding.step_name.as_deref().unwrap_or("-")),
            cell(&finding.title),
            cell(&finding.description),
        ));
    }

    lines
}

fn recommendations(result: &AnalysisResult) -> Vec<String> {
    let rules = result.rules();
    if rules.is_empty() {
        return vec!["- No recommendations. Your pipeline looks good!".to_string()];
    }
    rules
        .iter()
        .map(|rule| format!("- {}", rule.recommendation()))
        .collect()
}

/// Table cells must stay on one line and must not contain bare pipes.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer;
    use crate::parser::model::PipelineDefinition;
    use crate::parser::WorkflowParser;

    #[test]
    fn test_clean_report() {
        let result = analyzer::analyze(&PipelineDefinition::default());
        let md = render(&result, Some("ci.yml"));

        assert!(md.starts_with("# CI/CD Security Linter Report\n"));
        assert!(md.contains("- Workflow: `ci.yml`"));
        assert!(md.contains("- Score: 0/100"));
        assert!(md.contains("- Risk level: LOW 🟢"));
        assert!(md.contains("- Total findings: 0"));
        assert!(md.contains("No issues detected."));
        assert!(md.contains("- No recommendations. Your pipeline looks good!"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_report_with_findings() {
        let yaml = r#"
jobs:
  setup:
    steps:
      - name: Bootstrap
        run: curl https://x | bash
"#;
        let result = analyzer::analyze(&WorkflowParser::parse(yaml).unwrap());
        let md = render(&result, None);

        assert!(!md.contains("- Workflow:"));
        assert!(md.contains("| Severity | Rule | Job | Step | Title | Description |"));
        assert!(md.contains("| HIGH | DANGEROUS_COMMAND | setup | Bootstrap |"));
        assert!(md.contains("| LOW | WEAK_PIPELINE_DESIGN | - | - |"));
        assert!(md.contains("'curl \\| bash'"));
        assert!(md.contains("- Avoid piping remote scripts directly to shells"));
        assert!(md.contains("- Add explicit test, lint, or security audit jobs"));
        assert!(!md.contains("No issues detected."));
    }

    #[test]
    fn test_recommendations_are_deduplicated() {
        let yaml = r#"
jobs:
  lint:
    steps:
      - run: echo token=a
      - run: echo token=b
"#;
        let result = analyzer::analyze(&WorkflowParser::parse(yaml).unwrap());
        let md = render(&result, None);
        assert_eq!(md.matches("- Use GitHub Secrets").count(), 1);
    }

    #[test]
    fn test_combine() {
        let combined = combine(&["a\n".to_string(), "b\n".to_string()]);
        assert_eq!(combined, "a\n\n---\n\nb\n");
    }
}
