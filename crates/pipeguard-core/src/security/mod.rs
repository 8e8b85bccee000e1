pub mod commands;
pub mod design;
pub mod secrets;

use crate::analyzer::report::Finding;
use crate::parser::model::PipelineDefinition;
use log::debug;

/// Run all security rules on a pipeline, in fixed order.
pub fn scan(pipeline: &PipelineDefinition) -> Vec<Finding> {
    let mut findings = Vec::new();

    let secrets = secrets::detect_secret_exposure(pipeline);
    debug!("secret exposure: {} finding(s)", secrets.len());
    findings.extend(secrets);

    let commands = commands::detect_dangerous_commands(pipeline);
    debug!("dangerous commands: {} finding(s)", commands.len());
    findings.extend(commands);

    let design = design::detect_weak_pipeline_design(pipeline);
    debug!("weak pipeline design: {} finding(s)", design.len());
    findings.extend(design);

    findings
}
