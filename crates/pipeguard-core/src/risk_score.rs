use crate::analyzer::report::{AnalysisResult, Finding, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the aggregate score.
pub const MAX_SCORE: u8 = 100;

/// Neutral marker for a level that is not recognized.
pub const NEUTRAL_MARKER: &str = "⚪";

/// Discrete risk classification derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn traffic_light(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🔴",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{}'", other)),
        }
    }
}

/// Traffic light for a textual risk level, neutral when it is not recognized.
pub fn traffic_light_for(level: &str) -> &'static str {
    level
        .parse::<RiskLevel>()
        .map(|l| l.traffic_light())
        .unwrap_or(NEUTRAL_MARKER)
}

/// Points each finding adds to the score, by severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            high: 30,
            medium: 15,
            low: 5,
        }
    }
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Inclusive upper bounds of the LOW and MEDIUM brackets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low_max: u8,
    pub medium_max: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_max: 30,
            medium_max: 70,
        }
    }
}

impl RiskThresholds {
    /// Thresholds must be ordered and within the score range.
    pub fn validate(&self) -> Result<(), String> {
        if self.low_max > self.medium_max {
            return Err(format!(
                "low_max ({}) must not exceed medium_max ({})",
                self.low_max, self.medium_max
            ));
        }
        if self.medium_max > MAX_SCORE {
            return Err(format!(
                "medium_max ({}) must not exceed {}",
                self.medium_max, MAX_SCORE
            ));
        }
        Ok(())
    }
}

/// Aggregates findings into a score and a risk level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scorer {
    weights: SeverityWeights,
    thresholds: RiskThresholds,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(weights: SeverityWeights, thresholds: RiskThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> &SeverityWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Sum of severity weights, clamped to [`MAX_SCORE`].
    pub fn compute_score(&self, findings: &[Finding]) -> u8 {
        let total = findings
            .iter()
            .map(|f| self.weights.weight(f.severity))
            .fold(0u32, u32::saturating_add);
        total.min(u32::from(MAX_SCORE)) as u8
    }

    pub fn classify_risk(&self, score: u8) -> RiskLevel {
        if score <= self.thresholds.low_max {
            RiskLevel::Low
        } else if score <= self.thresholds.medium_max {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    /// Build the final result for an ordered list of findings.
    pub fn score(&self, findings: Vec<Finding>) -> AnalysisResult {
        let score = self.compute_score(&findings);
        let risk_level = self.classify_risk(score);
        AnalysisResult {
            findings,
            score,
            risk_level,
        }
    }
}
