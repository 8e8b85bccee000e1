mod document;
pub mod model;
pub mod normalize;

use crate::error::LoadError;
use model::PipelineDefinition;
use std::path::Path;

/// Loader for workflow files (GitHub Actions style YAML, or JSON).
pub struct WorkflowParser;

impl WorkflowParser {
    /// Read and normalize a workflow file.
    pub fn parse_file(path: &Path) -> Result<PipelineDefinition, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Deserialize workflow content and normalize it into a pipeline definition.
    ///
    /// Only a document that is not valid YAML is an error; any well-formed
    /// document, including an empty one, yields a (possibly empty) pipeline.
    /// Merge keys are expanded and a repeated key keeps its last value.
    pub fn parse(content: &str) -> Result<PipelineDefinition, LoadError> {
        let document = document::load_document(content)?;
        Ok(normalize::normalize(&document))
    }
}
