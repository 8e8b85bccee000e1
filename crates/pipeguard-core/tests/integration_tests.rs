use pipeguard_core::analyzer::{self, markdown, sarif};
use pipeguard_core::config::{generate_default_config, LinterConfig};
use pipeguard_core::{
    AnalysisResult, LoadError, PipelineDefinition, RiskLevel, RuleId, Severity, WorkflowParser,
};
use std::path::{Path, PathBuf};

/// Get the workspace fixtures directory (two levels up from CARGO_MANIFEST_DIR of pipeguard-core).
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .parent()
        .unwrap() // crates/
        .parent()
        .unwrap() // workspace root
        .join("tests/fixtures")
}

fn analyze_fixture(name: &str) -> AnalysisResult {
    let pipeline = WorkflowParser::parse_file(&fixtures_dir().join(name)).unwrap();
    analyzer::analyze(&pipeline)
}

fn finding_ids(result: &AnalysisResult) -> Vec<&str> {
    result.findings.iter().map(|f| f.id.as_str()).collect()
}

#[test]
fn test_risky_release_workflow() {
    let result = analyze_fixture("risky-release.yml");

    assert_eq!(
        finding_ids(&result),
        vec![
            "build_2_secret_exposure",
            "deploy-prod_0_secret_exposure",
            "build_dangerous_command_1",
            "pipeline_missing_test_before_deploy",
            "pipeline_missing_quality_checks",
        ]
    );
    assert_eq!(result.high_count(), 3);
    assert_eq!(result.score, 100, "110 raw points must clamp to 100");
    assert_eq!(result.risk_level, RiskLevel::High);

    let deploy = &result.findings[3];
    assert_eq!(deploy.job_id.as_deref(), Some("deploy-prod"));
    assert_eq!(deploy.severity, Severity::Medium);

    let secret = &result.findings[0];
    assert_eq!(secret.step_name.as_deref(), Some("Build"));
}

#[test]
fn test_hardened_workflow_is_clean() {
    let result = analyze_fixture("hardened.yml");
    assert!(result.findings.is_empty(), "unexpected: {:?}", finding_ids(&result));
    assert_eq!(result.score, 0);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_malformed_workflow_is_analyzed_partially() {
    let pipeline = WorkflowParser::parse_file(&fixtures_dir().join("malformed.yml")).unwrap();
    assert_eq!(pipeline.name.as_deref(), Some("Half broken"));
    assert_eq!(pipeline.job_ids(), vec!["deploy", "notes"]);
    assert_eq!(pipeline.step_count(), 1);

    let result = analyzer::analyze(&pipeline);
    assert_eq!(
        finding_ids(&result),
        vec![
            "deploy_dangerous_command_0",
            "pipeline_missing_test_before_deploy",
            "pipeline_missing_quality_checks",
        ]
    );
    assert_eq!(result.score, 50);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn test_empty_workflow_file() {
    let pipeline = WorkflowParser::parse_file(&fixtures_dir().join("empty.yml")).unwrap();
    assert_eq!(pipeline, PipelineDefinition::default());

    let result = analyzer::analyze(&pipeline);
    assert!(result.findings.is_empty());
    assert_eq!(result.score, 0);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_json_pipeline() {
    let result = analyze_fixture("pipeline.json");
    assert_eq!(finding_ids(&result), vec!["build_1_secret_exposure"]);
    assert_eq!(result.findings[0].rule_id, RuleId::SecretExposure);
    assert_eq!(result.score, 30);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_missing_file_is_load_error() {
    let err = WorkflowParser::parse_file(&fixtures_dir().join("does-not-exist.yml")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[test]
fn test_full_pipeline_is_idempotent() {
    for name in ["risky-release.yml", "hardened.yml", "malformed.yml", "pipeline.json"] {
        let first = analyze_fixture(name);
        let second = analyze_fixture(name);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "{name}"
        );
        assert_eq!(
            markdown::render(&first, Some(name)),
            markdown::render(&second, Some(name))
        );
    }
}

#[test]
fn test_reports_for_risky_release() {
    let result = analyze_fixture("risky-release.yml");

    let md = markdown::render(&result, Some("risky-release.yml"));
    assert!(md.contains("- Score: 100/100"));
    assert!(md.contains("- Risk level: HIGH 🔴"));
    assert!(md.contains("- Total findings: 5"));

    let log = sarif::to_sarif(&result, "risky-release.yml");
    let results = log["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(log["runs"][0]["properties"]["riskLevel"], "HIGH");
}

#[test]
fn test_configured_scorer_changes_verdict() {
    let config = LinterConfig::from_toml(
        "[scoring.weights]\nhigh = 10\nmedium = 5\nlow = 1\n",
        Path::new("inline.toml"),
    )
    .unwrap();
    let pipeline = WorkflowParser::parse_file(&fixtures_dir().join("risky-release.yml")).unwrap();
    let result = analyzer::analyze_with(&pipeline, &config.scorer());
    assert_eq!(result.score, 36);
    assert_eq!(result.risk_level, RiskLevel::Medium);

    let default = LinterConfig::from_toml(&generate_default_config(), Path::new("d.toml")).unwrap();
    assert_eq!(
        analyzer::analyze_with(&pipeline, &default.scorer()),
        analyzer::analyze(&pipeline)
    );
}
