use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a single step within a CI job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: Option<String>,
    pub run: Option<String>,
    pub env: BTreeMap<String, String>,
}

impl Step {
    /// Run command, or an empty string when the step has none.
    pub fn run_text(&self) -> &str {
        self.run.as_deref().unwrap_or("")
    }

    /// Step name, or an empty string when the step has none.
    pub fn name_text(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A job: a keyed, named sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub steps: Vec<Step>,
}

impl Job {
    /// Create a job whose display name defaults to its identifier.
    pub fn new(id: String) -> Self {
        Self {
            name: id.clone(),
            id,
            steps: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Case-insensitive substring match against the job id or display name.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.id.to_lowercase().contains(keyword) || self.name.to_lowercase().contains(keyword)
    }
}

/// The normalized pipeline definition every rule operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    pub name: Option<String>,
    pub jobs: Vec<Job>,
}

impl PipelineDefinition {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            jobs: Vec::new(),
        }
    }

    pub fn add_job(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Get total step count across all jobs.
    pub fn step_count(&self) -> usize {
        self.jobs.iter().map(|j| j.steps.len()).sum()
    }

    /// Get a job by its ID (first match in declaration order).
    pub fn get_job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn job_ids(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.id.clone()).collect()
    }
}
