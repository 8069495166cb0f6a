//! Analysis settings loaded from a TOML file.
//!
//! The file carries one `[analysis]` table mirroring the processor toggles;
//! absent keys fall back to the same defaults as [`ProcessorConfig`]:
//!
//! ```toml
//! [analysis]
//! stats = true
//! dead_rules = true
//! security = true
//! performance = false
//! compliance = false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::processor::ProcessorConfig;

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    analysis: AnalysisSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AnalysisSettings {
    stats: bool,
    dead_rules: bool,
    security: bool,
    performance: bool,
    compliance: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let config = ProcessorConfig::default();
        Self {
            stats: config.stats,
            dead_rules: config.dead_rule_check,
            security: config.security_analysis,
            performance: config.performance_analysis,
            compliance: config.compliance_check,
        }
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a processor configuration from a TOML settings file.
pub fn load_processor_config(path: &Path) -> Result<ProcessorConfig, SettingsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path.display().to_string())
}

fn parse_settings(raw: &str, path: String) -> Result<ProcessorConfig, SettingsLoadError> {
    let parsed: SettingsFile =
        toml::from_str(raw).map_err(|source| SettingsLoadError::Parse { path, source })?;
    let analysis = parsed.analysis;
    Ok(ProcessorConfig {
        stats: analysis.stats,
        dead_rule_check: analysis.dead_rules,
        security_analysis: analysis.security,
        performance_analysis: analysis.performance,
        compliance_check: analysis.compliance,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load_processor_config, parse_settings, SettingsLoadError};
    use crate::processor::ProcessorConfig;

    #[test]
    fn loads_full_settings_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audit.toml");
        fs::write(
            &path,
            r#"
[analysis]
stats = false
dead_rules = true
security = true
performance = true
compliance = true
"#,
        )
        .expect("write settings");

        let config = load_processor_config(&path).expect("settings should parse");
        assert!(!config.stats);
        assert!(config.dead_rule_check);
        assert!(config.compliance_check);
    }

    #[test]
    fn absent_keys_fall_back_to_defaults() {
        let config =
            parse_settings("[analysis]\nsecurity = true\n", "inline".to_string()).expect("parse");
        assert!(config.stats);
        assert!(config.security_analysis);
        assert!(!config.dead_rule_check);
    }

    #[test]
    fn empty_file_yields_default_config() {
        let config = parse_settings("", "inline".to_string()).expect("parse");
        assert_eq!(config, ProcessorConfig::default());
    }

    #[test]
    fn returns_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").expect("write broken file");

        let err = load_processor_config(&path).expect_err("should fail parse");
        match err {
            SettingsLoadError::Parse { .. } => {}
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
