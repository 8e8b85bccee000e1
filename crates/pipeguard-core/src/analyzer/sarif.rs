use crate::analyzer::report::{AnalysisResult, Finding, RuleId, Severity};
use serde_json::json;

/// Generate a SARIF 2.1.0 log from an analysis result.
/// SARIF (Static Analysis Results Interchange Format) is consumed by
/// GitHub Code Scanning, VS Code, and other tools.
pub fn to_sarif(result: &AnalysisResult, source_file: &str) -> serde_json::Value {
    let rules: Vec<serde_json::Value> = result.rules().iter().map(sarif_rule).collect();

    let results: Vec<serde_json::Value> = result
        .findings
        .iter()
        .map(|f| sarif_result(f, source_file))
        .collect();

    json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "PipeGuard",
                    "version": env!("CARGO_PKG_VERSION"),
                    "informationUri": "https://github.com/mackeh/pipeguard",
                    "rules": rules,
                }
            },
            "results": results,
            "properties": {
                "score": result.score,
                "riskLevel": result.risk_level.label(),
            },
            "invocations": [{
                "executionSuccessful": true,
                "toolExecutionNotifications": [],
            }]
        }]
    })
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

fn sarif_rule(rule: &RuleId) -> serde_json::Value {
    json!({
        "id": rule.as_str(),
        "name": rule.label(),
        "shortDescription": {
            "text": rule.label(),
        },
        "help": {
            "text": rule.recommendation(),
        },
    })
}

fn sarif_result(finding: &Finding, source_file: &str) -> serde_json::Value {
    let mut result = json!({
        "ruleId": finding.rule_id.as_str(),
        "level": level(finding.severity),
        "message": {
            "text": format!("{}: {}", finding.title, finding.description),
        },
        "partialFingerprints": {
            "findingId": finding.id,
        },
        "locations": [{
            "physicalLocation": {
                "artifactLocation": {
                    "uri": source_file,
                },
                "region": {
                    "startLine": 1,
                }
            }
        }],
    });

    let logical = match (&finding.job_id, &finding.step_name) {
        (Some(job), Some(step)) => Some(format!("{}/{}", job, step)),
        (Some(job), None) => Some(job.clone()),
        _ => None,
    };
    if let Some(name) = logical {
        result["locations"][0]["logicalLocations"] = json!([{
            "fullyQualifiedName": name,
            "kind": "module",
        }]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer;
    use crate::parser::WorkflowParser;

    #[test]
    fn test_sarif_output_is_valid() {
        let yaml = r#"
name: CI
on: push
jobs:
  deploy:
    runs-on: ubuntu-latest
    steps:
      - name: Install
        run: wget https://x/install && sh install
"#;
        let result = analyzer::analyze(&WorkflowParser::parse(yaml).unwrap());
        let sarif = to_sarif(&result, "ci.yml");

        assert_eq!(sarif["version"], "2.1.0");
        let runs = sarif["runs"].as_array().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0]["tool"]["driver"]["name"], "PipeGuard");

        let results = runs[0]["results"].as_array().unwrap();
        assert_eq!(results.len(), result.findings.len());
        assert_eq!(results[0]["ruleId"], "DANGEROUS_COMMAND");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["logicalLocations"][0]["fullyQualifiedName"],
            "deploy/Install"
        );
        assert_eq!(results[1]["level"], "warning");
        assert_eq!(results[2]["level"], "note");
        assert!(results[2]["locations"][0]["logicalLocations"].is_null());

        assert_eq!(runs[0]["tool"]["driver"]["rules"].as_array().unwrap().len(), 2);
    }
}
