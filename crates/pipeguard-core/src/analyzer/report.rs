use crate::risk_score::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for analysis findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    SecretExposure,
    DangerousCommand,
    WeakPipelineDesign,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SecretExposure => "SECRET_EXPOSURE",
            RuleId::DangerousCommand => "DANGEROUS_COMMAND",
            RuleId::WeakPipelineDesign => "WEAK_PIPELINE_DESIGN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RuleId::SecretExposure => "Secret Exposure",
            RuleId::DangerousCommand => "Dangerous Command",
            RuleId::WeakPipelineDesign => "Weak Pipeline Design",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RuleId::SecretExposure => {
                "Use GitHub Secrets (e.g., `${{ secrets.MY_SECRET }}`) instead of hard-coding sensitive values."
            }
            RuleId::DangerousCommand => {
                "Avoid piping remote scripts directly to shells; commit scripts to the repo and verify checksums before execution."
            }
            RuleId::WeakPipelineDesign => {
                "Add explicit test, lint, or security audit jobs before deployment to reduce release risk."
            }
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected weakness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub severity: Severity,
    pub rule_id: RuleId,
    pub title: String,
    pub description: String,
    pub job_id: Option<String>,
    pub step_name: Option<String>,
}

/// The outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub score: u8,
    pub risk_level: RiskLevel,
}

impl AnalysisResult {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    pub fn high_count(&self) -> usize {
        self.count(Severity::High)
    }

    pub fn medium_count(&self) -> usize {
        self.count(Severity::Medium)
    }

    pub fn low_count(&self) -> usize {
        self.count(Severity::Low)
    }

    /// Whether the risk level is at or above `threshold`.
    pub fn reaches(&self, threshold: RiskLevel) -> bool {
        self.risk_level >= threshold
    }

    /// Distinct rules in first-seen order.
    pub fn rules(&self) -> Vec<RuleId> {
        let mut seen = Vec::new();
        for finding in &self.findings {
            if !seen.contains(&finding.rule_id) {
                seen.push(finding.rule_id);
            }
        }
        seen
    }
}
