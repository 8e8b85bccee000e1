pub mod analyzer;
pub mod config;
pub mod error;
pub mod parser;
pub mod risk_score;
pub mod security;

pub use analyzer::report::{AnalysisResult, Finding, RuleId, Severity};
pub use config::LinterConfig;
pub use error::{ConfigError, LoadError};
pub use parser::model::{Job, PipelineDefinition, Step};
pub use parser::WorkflowParser;
pub use risk_score::{RiskLevel, Scorer};
