//! Performance checks: hardware offloading and ruleset size.

use config_model::ConfigDocument;

use crate::analyzer::{AnalyzerEntry, Finding, Severity};
use crate::processor::ProcessorConfig;

/// Rulesets beyond this size get a finding; every packet walks the list
/// until a rule matches.
pub const RULE_COUNT_THRESHOLD: usize = 100;

inventory::submit! {
    AnalyzerEntry {
        id: "performance",
        enabled: is_enabled,
        run: performance_findings,
    }
}

fn is_enabled(config: &ProcessorConfig) -> bool {
    config.performance_analysis
}

pub fn performance_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut out = Vec::new();

    if doc.system.offloading.checksum_disabled {
        out.push((
            Severity::Low,
            offload_finding("checksum", "Checksum offloading is disabled"),
        ));
    }
    if doc.system.offloading.segmentation_disabled {
        out.push((
            Severity::Low,
            offload_finding("segmentation", "Segmentation offloading is disabled"),
        ));
    }

    let rule_count = doc.rules.len();
    if rule_count > RULE_COUNT_THRESHOLD {
        out.push((
            Severity::Medium,
            Finding::new(
                "performance",
                "Large firewall ruleset",
                format!(
                    "The configuration contains {rule_count} firewall rules (threshold {RULE_COUNT_THRESHOLD}); rule evaluation cost grows with ruleset size."
                ),
                "Consolidate rules with aliases or remove stale entries.",
                "firewall",
            ),
        ));
    }

    out
}

fn offload_finding(which: &str, title: &str) -> Finding {
    Finding::new(
        "performance",
        title,
        format!("Hardware {which} offloading is turned off, moving per-packet work onto the CPU."),
        format!("Re-enable {which} offloading unless the NIC driver is known to misbehave with it."),
        "system",
    )
}
