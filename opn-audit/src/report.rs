//! The analysis report: a concurrency-safe accumulator of findings plus the
//! computed statistics.
//!
//! Findings live in five severity buckets behind a single exclusive lock.
//! The lock guards bucket access only — serialization and rendering work on
//! a cloned snapshot, so a slow consumer never blocks writers. A report is
//! created once per process invocation and may be read and further mutated
//! concurrently for its remaining lifetime; the engine makes no calls into
//! it after returning it.

use chrono::{DateTime, Utc};
use config_model::ConfigDocument;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Finding, Severity};
use crate::processor::ProcessorConfig;
use crate::stats::Statistics;

/// Identity snapshot of the analyzed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub hostname: String,
    pub domain: String,
    pub version: String,
    pub theme: String,
}

impl ConfigInfo {
    pub fn from_document(doc: &ConfigDocument) -> Self {
        Self {
            hostname: doc.system.hostname.clone(),
            domain: doc.system.domain.clone(),
            version: doc.system.version.clone(),
            theme: doc.system.theme.clone(),
        }
    }
}

/// Findings grouped by severity, most severe first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingBuckets {
    pub critical: Vec<Finding>,
    pub high: Vec<Finding>,
    pub medium: Vec<Finding>,
    pub low: Vec<Finding>,
    pub info: Vec<Finding>,
}

impl FindingBuckets {
    pub fn bucket(&self, severity: Severity) -> &[Finding] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
            Severity::Info => &self.info,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Finding> {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Info => &mut self.info,
        }
    }

    pub fn total(&self) -> usize {
        Severity::ALL.iter().map(|s| self.bucket(*s).len()).sum()
    }

    /// Per-severity lengths, most severe first.
    pub fn counts(&self) -> [(Severity, usize); 5] {
        Severity::ALL.map(|s| (s, self.bucket(s).len()))
    }
}

/// Full serializable view of a report at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub config_info: ConfigInfo,
    pub generated_at: DateTime<Utc>,
    pub processor_config: ProcessorConfig,
    pub statistics: Option<Statistics>,
    pub total_findings: usize,
    pub findings: FindingBuckets,
}

/// Accumulated result of one analysis run.
#[derive(Debug)]
pub struct Report {
    config_info: ConfigInfo,
    generated_at: DateTime<Utc>,
    processor_config: ProcessorConfig,
    statistics: Option<Statistics>,
    buckets: Mutex<FindingBuckets>,
}

impl Report {
    pub fn new(
        config_info: ConfigInfo,
        processor_config: ProcessorConfig,
        statistics: Option<Statistics>,
    ) -> Self {
        Self {
            config_info,
            generated_at: Utc::now(),
            processor_config,
            statistics,
            buckets: Mutex::new(FindingBuckets::default()),
        }
    }

    pub fn config_info(&self) -> &ConfigInfo {
        &self.config_info
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// Append a finding to its severity bucket. Safe to call from many
    /// threads at once; no finding is lost.
    pub fn add_finding(&self, severity: Severity, finding: Finding) {
        self.buckets.lock().bucket_mut(severity).push(finding);
    }

    /// Total across all severity buckets, observed atomically.
    pub fn total_findings(&self) -> usize {
        self.buckets.lock().total()
    }

    pub fn has_critical_findings(&self) -> bool {
        !self.buckets.lock().critical.is_empty()
    }

    /// Per-severity counts, observed atomically.
    pub fn severity_counts(&self) -> [(Severity, usize); 5] {
        self.buckets.lock().counts()
    }

    /// Clone the current bucket contents together with the fixed report
    /// metadata. The lock is held for the clone only.
    pub fn snapshot(&self) -> ReportSnapshot {
        let findings = self.buckets.lock().clone();
        ReportSnapshot {
            config_info: self.config_info.clone(),
            generated_at: self.generated_at,
            processor_config: self.processor_config,
            statistics: self.statistics.clone(),
            total_findings: findings.total(),
            findings,
        }
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        summary_line(&self.severity_counts(), &self.config_info)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.snapshot())
    }

    /// Render the report as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let snapshot = self.snapshot();
        let mut out = Vec::new();

        let host = host_label(&self.config_info);
        if host.is_empty() {
            out.push("# Configuration Analysis Report".to_string());
        } else {
            out.push(format!("# {host} Configuration Analysis Report"));
        }
        out.push(String::new());
        out.push(format!(
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push(String::new());

        out.push("## Summary".to_string());
        out.push(String::new());
        out.push(summary_line(&snapshot.findings.counts(), &self.config_info));
        out.push(String::new());

        if let Some(stats) = &snapshot.statistics {
            out.push("## Statistics".to_string());
            out.push(String::new());
            out.push(format!("- Interfaces: {}", stats.interface_count));
            out.push(format!("- Firewall rules: {}", stats.rule_count));
            out.push(format!("- Users: {}", stats.user_count));
            out.push(format!("- Groups: {}", stats.group_count));
            out.push(format!("- Services: {}", stats.service_count));
            out.push(format!("- Security score: {}/100", stats.summary.security_score));
            out.push(format!(
                "- Complexity score: {}/100",
                stats.summary.complexity_score
            ));
            out.push(String::new());
        }

        out.push("## Findings by Severity".to_string());
        out.push(String::new());
        for (severity, count) in snapshot.findings.counts() {
            out.push(format!("- {} ({count})", severity.label()));
        }
        out.push(String::new());

        if snapshot.total_findings == 0 {
            out.push("No issues found.".to_string());
        } else {
            out.push("## Findings".to_string());
            for severity in Severity::ALL {
                let bucket = snapshot.findings.bucket(severity);
                if bucket.is_empty() {
                    continue;
                }
                out.push(String::new());
                out.push(format!("### {} ({})", severity.label(), bucket.len()));
                out.push(String::new());
                for finding in bucket {
                    out.push(format!(
                        "- **{}** ({}, {}): {} Recommendation: {}",
                        finding.title,
                        finding.kind,
                        finding.component,
                        finding.description,
                        finding.recommendation
                    ));
                }
            }
        }

        out.join("\n")
    }
}

fn host_label(info: &ConfigInfo) -> String {
    if info.domain.is_empty() {
        info.hostname.clone()
    } else if info.hostname.is_empty() {
        info.domain.clone()
    } else {
        format!("{}.{}", info.hostname, info.domain)
    }
}

fn summary_line(counts: &[(Severity, usize); 5], info: &ConfigInfo) -> String {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        let host = host_label(info);
        if host.is_empty() {
            return "No issues found.".to_string();
        }
        return format!("No issues found in {host}.");
    }
    let breakdown = counts
        .iter()
        .map(|(severity, count)| format!("{count} {}", severity.label().to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{total} findings: {breakdown}")
}
