use colored::*;
use pipeguard_core::{AnalysisResult, Finding, RiskLevel, Severity};

/// Print a full analysis result to the terminal.
pub fn print_analysis_result(source_file: &str, result: &AnalysisResult) {
    println!();
    println!(
        "{}",
        format!(
            " PipeGuard v{} — Analyzing {}",
            env!("CARGO_PKG_VERSION"),
            source_file
        )
        .bold()
    );
    println!();

    if result.findings.is_empty() {
        println!(
            " {} No issues detected. Your pipeline looks good!",
            "OK".green().bold()
        );
    } else {
        for finding in &result.findings {
            print_finding(finding);
            println!();
        }
    }

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    println!(" {}", "Summary".bold().underline());
    println!(
        " {} Score: {}/100",
        "|-".dimmed(),
        result.score.to_string().bold()
    );
    println!(
        " {} Risk level: {} {}",
        "|-".dimmed(),
        risk_label(result.risk_level),
        result.risk_level.traffic_light()
    );

    let high = result.high_count();
    println!(
        " {} Findings: {} high, {} medium, {} low",
        "|-".dimmed(),
        if high > 0 {
            high.to_string().red().bold().to_string()
        } else {
            "0".to_string()
        },
        result.medium_count(),
        result.low_count(),
    );

    if !result.findings.is_empty() {
        println!();
        println!(" {}", "Recommendations".bold().underline());
        for rule in result.rules() {
            println!(" {} {}", "|-".dimmed(), rule.recommendation().dimmed());
        }
    }
    println!();
}

fn risk_label(level: RiskLevel) -> String {
    match level {
        RiskLevel::High => level.label().red().bold().to_string(),
        RiskLevel::Medium => level.label().yellow().bold().to_string(),
        RiskLevel::Low => level.label().green().bold().to_string(),
    }
}

fn print_finding(finding: &Finding) {
    let severity_tag = match finding.severity {
        Severity::High => format!(" {} ", finding.severity.symbol())
            .on_red()
            .white()
            .bold()
            .to_string(),
        Severity::Medium => format!(" {} ", finding.severity.symbol())
            .on_yellow()
            .black()
            .bold()
            .to_string(),
        Severity::Low => format!(" {} ", finding.severity.symbol())
            .dimmed()
            .to_string(),
    };

    println!(" {} {}", severity_tag, finding.title.bold());
    println!("   {} {}", "|".dimmed(), finding.description);

    let location = match (&finding.job_id, &finding.step_name) {
        (Some(job), Some(step)) => Some(format!("job '{}', step '{}'", job, step)),
        (Some(job), None) => Some(format!("job '{}'", job)),
        _ => None,
    };
    if let Some(location) = location {
        println!("   {} Location: {}", "|".dimmed(), location.cyan());
    }

    println!(
        "   {} {} [{}]",
        "|".dimmed(),
        finding.rule_id.label().dimmed(),
        finding.id.dimmed()
    );
}
