//! Finding and severity types, and the analyzer registry.
//!
//! Analyzers are pure functions over a normalized document. Each one
//! registers itself with [`inventory`] at compile time, carrying an id, a
//! toggle predicate over the processor configuration, and the run function.
//! The registry sorts entries by id so dispatch order is deterministic
//! regardless of link order.

use config_model::ConfigDocument;
use serde::{Deserialize, Serialize};

use crate::processor::ProcessorConfig;

/// Severity of a finding, ordered from most to least severe.
///
/// The order exists for bucketing and display only; severities are never
/// compared numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Info => "Info",
        }
    }
}

/// A single reported issue. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Category tag: "security", "dead-rule", "duplicate-rule",
    /// "performance", or "consistency".
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    /// Configuration area the finding concerns ("firewall", "webgui", ...).
    pub component: String,
}

impl Finding {
    pub fn new(
        kind: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
            description: description.into(),
            recommendation: recommendation.into(),
            component: component.into(),
        }
    }
}

/// A registered analyzer pass.
///
/// `enabled` decides from the processor configuration whether the pass runs;
/// `run` scans a normalized document and emits findings paired with the
/// severity bucket each belongs in. Analyzer outputs are only ever merged,
/// never cross-referenced, so passes stay order-independent.
pub struct AnalyzerEntry {
    pub id: &'static str,
    pub enabled: fn(&ProcessorConfig) -> bool,
    pub run: fn(&ConfigDocument) -> Vec<(Severity, Finding)>,
}

inventory::collect!(AnalyzerEntry);

/// All registered analyzers, sorted by id.
pub fn registered_analyzers() -> Vec<&'static AnalyzerEntry> {
    let mut entries: Vec<&'static AnalyzerEntry> =
        inventory::iter::<AnalyzerEntry>.into_iter().collect();
    entries.sort_by_key(|entry| entry.id);
    entries
}

#[cfg(test)]
mod tests {
    use super::{registered_analyzers, Severity};

    #[test]
    fn registry_contains_every_analyzer_once() {
        let ids: Vec<&str> = registered_analyzers().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["consistency", "performance", "rules", "security"]);
    }

    #[test]
    fn severity_labels_cover_all_variants() {
        let labels: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Critical", "High", "Medium", "Low", "Info"]);
    }
}
