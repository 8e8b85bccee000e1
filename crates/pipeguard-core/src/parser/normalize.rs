use crate::parser::model::{Job, PipelineDefinition, Step};
use log::debug;
use once_cell::sync::Lazy;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

static NULL: Value = Value::Null;
static EMPTY_MAPPING: Lazy<Mapping> = Lazy::new(Mapping::new);

/// Validated-or-default views over a loosely typed document node.
///
/// Every accessor checks the node against the shape the caller expects and
/// substitutes an explicit empty value on mismatch, so normalization never
/// has to inspect variants at the call site.
pub trait ValueExt {
    /// Child node under `key`, or null when this is not a mapping or the key is absent.
    fn field(&self, key: &str) -> &Value;
    fn mapping_or_empty(&self) -> &Mapping;
    fn sequence_or_empty(&self) -> &[Value];
    /// Text of a string, number or boolean node.
    fn scalar_text(&self) -> Option<String>;
}

impl ValueExt for Value {
    fn field(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }

    fn mapping_or_empty(&self) -> &Mapping {
        self.as_mapping().unwrap_or(&*EMPTY_MAPPING)
    }

    fn sequence_or_empty(&self) -> &[Value] {
        self.as_sequence().map(Vec::as_slice).unwrap_or(&[])
    }

    fn scalar_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Convert an arbitrary structured document into a [`PipelineDefinition`].
///
/// Never fails: fragments with the wrong shape are skipped or defaulted so
/// the rules can still inspect whatever is well-formed.
pub fn normalize(document: &Value) -> PipelineDefinition {
    if !document.is_mapping() {
        debug!("Workflow root is not a mapping; analyzing an empty pipeline");
        return PipelineDefinition::default();
    }

    let mut pipeline = PipelineDefinition::new(document.field("name").scalar_text());

    let jobs = document.field("jobs");
    if !jobs.is_null() && !jobs.is_mapping() {
        debug!("'jobs' is not a mapping; ignoring it");
    }

    for (key, body) in jobs.mapping_or_empty() {
        let Some(job_id) = key.scalar_text() else {
            debug!("Skipping job with a non-scalar key");
            continue;
        };
        match normalize_job(&job_id, body) {
            Some(job) => pipeline.add_job(job),
            None => debug!("Skipping job '{}': body is not a mapping", job_id),
        }
    }

    pipeline
}

fn normalize_job(job_id: &str, body: &Value) -> Option<Job> {
    if !body.is_mapping() {
        return None;
    }

    let mut job = Job::new(job_id.to_string());
    if let Some(name) = body.field("name").scalar_text() {
        job = job.with_name(name);
    }

    for (index, entry) in body.field("steps").sequence_or_empty().iter().enumerate() {
        match normalize_step(entry) {
            Some(step) => job.steps.push(step),
            None => debug!(
                "Skipping step #{} of job '{}': not a mapping",
                index, job_id
            ),
        }
    }

    Some(job)
}

fn normalize_step(entry: &Value) -> Option<Step> {
    if !entry.is_mapping() {
        return None;
    }

    Some(Step {
        name: entry.field("name").scalar_text(),
        run: entry.field("run").scalar_text(),
        env: normalize_env(entry.field("env")),
    })
}

/// Only string values are kept; other values can never be hard-coded secrets.
fn normalize_env(env: &Value) -> BTreeMap<String, String> {
    env.mapping_or_empty()
        .iter()
        .filter_map(|(k, v)| Some((k.scalar_text()?, v.as_str()?.to_string())))
        .collect()
}
