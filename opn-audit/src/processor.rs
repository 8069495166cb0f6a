//! Orchestration: input validation, normalization, analyzer dispatch, and
//! report transformation.
//!
//! The processor holds only its immutable configuration — no caches, no
//! shared mutable state — so concurrent `process` calls from many threads
//! are safe without coordination. All work happens synchronously on the
//! calling thread.

use config_model::ConfigDocument;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyzer::registered_analyzers;
use crate::cancel::CancelToken;
use crate::normalize::normalize;
use crate::report::{ConfigInfo, Report};
use crate::stats;

/// Toggles selecting which analyses run. Defaults to statistics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    pub stats: bool,
    pub dead_rule_check: bool,
    pub security_analysis: bool,
    pub performance_analysis: bool,
    pub compliance_check: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            stats: true,
            dead_rule_check: false,
            security_analysis: false,
            performance_analysis: false,
            compliance_check: false,
        }
    }
}

impl ProcessorConfig {
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder {
            config: Self::default(),
        }
    }

    /// Statistics plus every analyzer.
    pub fn everything() -> Self {
        Self {
            stats: true,
            dead_rule_check: true,
            security_analysis: true,
            performance_analysis: true,
            compliance_check: true,
        }
    }
}

/// Builder applied once before the engine runs; the resulting configuration
/// is immutable for the lifetime of the processor.
#[derive(Debug, Clone)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    pub fn stats(mut self, enabled: bool) -> Self {
        self.config.stats = enabled;
        self
    }

    pub fn dead_rule_check(mut self, enabled: bool) -> Self {
        self.config.dead_rule_check = enabled;
        self
    }

    pub fn security_analysis(mut self, enabled: bool) -> Self {
        self.config.security_analysis = enabled;
        self
    }

    pub fn performance_analysis(mut self, enabled: bool) -> Self {
        self.config.performance_analysis = enabled;
        self
    }

    pub fn compliance_check(mut self, enabled: bool) -> Self {
        self.config.compliance_check = enabled;
        self
    }

    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

/// Errors surfaced by [`Processor::process`] and [`Processor::transform`].
/// All are returned immediately; nothing is retried.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cannot process a nil configuration document")]
    NilInput,
    #[error("context canceled")]
    Canceled,
    #[error("unsupported output format '{0}'")]
    UnsupportedFormat(String),
    #[error("invalid processor option: {0}")]
    InvalidOption(String),
    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Drives one analysis run end to end.
pub struct Processor {
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    /// Validate, normalize, analyze, and assemble a report.
    ///
    /// Fails fast on an absent document or an already-canceled token.
    /// Cancellation is re-checked before analyzer dispatch; a malformed
    /// document never errors — it simply yields fewer or different findings.
    pub fn process(
        &self,
        cancel: &CancelToken,
        doc: Option<&ConfigDocument>,
    ) -> Result<Report, ProcessError> {
        let Some(doc) = doc else {
            return Err(ProcessError::NilInput);
        };
        if cancel.is_canceled() {
            return Err(ProcessError::Canceled);
        }

        let normalized = normalize(doc);
        tracing::debug!(
            hostname = %normalized.system.hostname,
            rules = normalized.rules.len(),
            "normalized configuration document"
        );

        let statistics = self.config.stats.then(|| stats::calculate(&normalized));
        let report = Report::new(
            ConfigInfo::from_document(&normalized),
            self.config,
            statistics,
        );

        if cancel.is_canceled() {
            return Err(ProcessError::Canceled);
        }
        for entry in registered_analyzers() {
            if !(entry.enabled)(&self.config) {
                continue;
            }
            let findings = (entry.run)(&normalized);
            tracing::debug!(
                analyzer = entry.id,
                findings = findings.len(),
                "analyzer pass complete"
            );
            for (severity, finding) in findings {
                report.add_finding(severity, finding);
            }
        }

        tracing::info!(
            hostname = %report.config_info().hostname,
            total = report.total_findings(),
            "analysis complete"
        );
        Ok(report)
    }

    /// Serialize a report in the named format.
    ///
    /// Format names are case-insensitive: "json", "yaml", or "markdown".
    /// Any other value, including the empty string, is an error.
    pub fn transform(
        &self,
        cancel: &CancelToken,
        report: &Report,
        format: &str,
    ) -> Result<String, ProcessError> {
        if cancel.is_canceled() {
            return Err(ProcessError::Canceled);
        }
        match format.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(report.to_json()?),
            "yaml" => Ok(report.to_yaml()?),
            "markdown" => Ok(report.to_markdown()),
            _ => Err(ProcessError::UnsupportedFormat(format.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use config_model::ConfigDocument;

    use super::{ProcessError, Processor, ProcessorConfig};
    use crate::cancel::CancelToken;

    fn doc() -> ConfigDocument {
        let mut doc = ConfigDocument::default();
        doc.system.hostname = "fw01".to_string();
        doc.system.domain = "example.net".to_string();
        doc
    }

    #[test]
    fn default_config_enables_statistics_only() {
        let config = ProcessorConfig::default();
        assert!(config.stats);
        assert!(!config.dead_rule_check);
        assert!(!config.security_analysis);
        assert!(!config.performance_analysis);
        assert!(!config.compliance_check);
    }

    #[test]
    fn builder_composes_toggles() {
        let config = ProcessorConfig::builder()
            .stats(false)
            .security_analysis(true)
            .build();
        assert!(!config.stats);
        assert!(config.security_analysis);
        assert!(!config.dead_rule_check);
    }

    #[test]
    fn rejects_absent_document() {
        let processor = Processor::new(ProcessorConfig::default());
        let err = processor
            .process(&CancelToken::new(), None)
            .expect_err("nil input should fail");
        assert!(matches!(err, ProcessError::NilInput));
    }

    #[test]
    fn rejects_canceled_token_with_context_message() {
        let processor = Processor::new(ProcessorConfig::default());
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = processor
            .process(&cancel, Some(&doc()))
            .expect_err("canceled token should fail");
        assert!(matches!(err, ProcessError::Canceled));
        assert!(err.to_string().contains("context canceled"));
    }

    #[test]
    fn disabled_stats_leave_report_without_statistics() {
        let processor = Processor::new(ProcessorConfig::builder().stats(false).build());
        let report = processor
            .process(&CancelToken::new(), Some(&doc()))
            .expect("process");
        assert!(report.statistics().is_none());
    }

    #[test]
    fn transform_rejects_unknown_and_empty_formats() {
        let processor = Processor::new(ProcessorConfig::default());
        let cancel = CancelToken::new();
        let report = processor.process(&cancel, Some(&doc())).expect("process");

        for format in ["xml", ""] {
            let err = processor
                .transform(&cancel, &report, format)
                .expect_err("unsupported format should fail");
            assert!(matches!(err, ProcessError::UnsupportedFormat(_)));
        }
    }

    #[test]
    fn transform_is_case_insensitive() {
        let processor = Processor::new(ProcessorConfig::default());
        let cancel = CancelToken::new();
        let report = processor.process(&cancel, Some(&doc())).expect("process");

        let json = processor
            .transform(&cancel, &report, "JSON")
            .expect("JSON should serialize");
        assert!(json.contains("fw01"));
        let md = processor
            .transform(&cancel, &report, "Markdown")
            .expect("Markdown should render");
        assert!(md.starts_with("# fw01.example.net"));
    }
}
