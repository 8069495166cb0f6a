//! Security checks over system-level settings.
//!
//! Runs against the normalized document, so a document that never stored a
//! web GUI protocol has already been defaulted to "https" and is not
//! flagged.

use config_model::ConfigDocument;

use crate::analyzer::{AnalyzerEntry, Finding, Severity};
use crate::processor::ProcessorConfig;

inventory::submit! {
    AnalyzerEntry {
        id: "security",
        enabled: is_enabled,
        run: security_findings,
    }
}

fn is_enabled(config: &ProcessorConfig) -> bool {
    config.security_analysis
}

pub fn security_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut out = Vec::new();

    let protocol = doc.system.web_gui.protocol.trim();
    if !protocol.eq_ignore_ascii_case("https") {
        out.push((
            Severity::Critical,
            Finding::new(
                "security",
                "Insecure web administration protocol",
                format!(
                    "The web GUI is served over '{protocol}'; administration credentials and session cookies cross the network unencrypted."
                ),
                "Switch the web GUI to HTTPS with a trusted certificate.",
                "webgui",
            ),
        ));
    }

    if let Some(snmp) = &doc.snmp {
        if is_well_known_community(&snmp.read_only_community) {
            out.push((
                Severity::High,
                Finding::new(
                    "security",
                    "Default SNMP community string",
                    format!(
                        "The SNMP read-only community is set to the well-known value '{}'; anyone on the network can read device state.",
                        snmp.read_only_community.trim()
                    ),
                    "Set a unique SNMP community string, or disable the SNMP service.",
                    "snmp",
                ),
            ));
        }
    }

    out
}

fn is_well_known_community(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "public" | "private"
    )
}
