//! Terminal-friendly report rendering.
//!
//! Plain line-oriented output with severity labels colored for quick
//! scanning. The structured serializations live on the report itself; this
//! module only decides what a human at a terminal sees.

use colored::Colorize;

use crate::analyzer::Severity;
use crate::report::Report;

/// Render a report for terminal output.
pub fn render_report_text(report: &Report, verbose: bool) -> String {
    let snapshot = report.snapshot();
    let info = report.config_info();
    let mut out = Vec::new();

    out.push(format!(
        "analyze host={} domain={} version={}",
        value_or_dash(&info.hostname),
        value_or_dash(&info.domain),
        value_or_dash(&info.version)
    ));
    out.push(format!(
        "generated {}",
        report.generated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if let Some(stats) = &snapshot.statistics {
        out.push(format!(
            "stats interfaces={} rules={} users={} groups={} services={}",
            stats.interface_count,
            stats.rule_count,
            stats.user_count,
            stats.group_count,
            stats.service_count
        ));
        out.push(format!(
            "scores security={} complexity={} security_features={}",
            stats.summary.security_score,
            stats.summary.complexity_score,
            stats.summary.has_security_features
        ));
    }

    out.push(format!("result {}", report.summary()).cyan().to_string());

    out.push("findings".to_string());
    if snapshot.total_findings == 0 {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for severity in Severity::ALL {
        for finding in snapshot.findings.bucket(severity) {
            out.push(format!(
                "- [{}] {}: {}",
                severity_label(severity),
                finding.title,
                finding.description
            ));
            if verbose {
                out.push(format!(
                    "  type={} component={} recommendation={}",
                    finding.kind, finding.component, finding.recommendation
                ));
            }
        }
    }
    out.join("\n")
}

fn severity_label(severity: Severity) -> String {
    let label = severity.label();
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.blue().to_string(),
        Severity::Info => label.normal().to_string(),
    }
}

fn value_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::render_report_text;
    use crate::analyzer::{Finding, Severity};
    use crate::processor::ProcessorConfig;
    use crate::report::{ConfigInfo, Report};

    fn report() -> Report {
        Report::new(
            ConfigInfo {
                hostname: "fw01".to_string(),
                domain: "example.net".to_string(),
                version: "24.7".to_string(),
                theme: "opnsense".to_string(),
            },
            ProcessorConfig::default(),
            None,
        )
    }

    #[test]
    fn empty_report_renders_none_marker() {
        let text = render_report_text(&report(), false);
        assert!(text.contains("analyze host=fw01 domain=example.net"));
        assert!(text.contains("- none"));
    }

    #[test]
    fn verbose_rendering_includes_recommendation() {
        let r = report();
        r.add_finding(
            Severity::Medium,
            Finding::new("consistency", "Title", "Description.", "Do the thing.", "users"),
        );
        let text = render_report_text(&r, true);
        assert!(text.contains("Title: Description."));
        assert!(text.contains("recommendation=Do the thing."));
    }
}
