//! Dead and duplicate firewall rule detection.
//!
//! Rules are evaluated per interface in document order, first-match-wins.
//! Two defects are reported:
//!
//! - **duplicate-rule** (Low) — a rule whose match fingerprint (action,
//!   protocol, source, destination) is identical to a strictly earlier
//!   enabled rule on the same interface.
//! - **dead-rule** (Medium) — a rule preceded by an enabled terminal rule
//!   (pass or block) on the same interface whose source, destination, and
//!   protocol cover it; the later rule can never match.
//!
//! Duplicate takes precedence over dead for the same rule, so an exact copy
//! of a catch-all rule is reported once, as a duplicate. Disabled rules
//! neither shadow later rules nor get flagged themselves.

use std::collections::BTreeMap;

use config_model::{ConfigDocument, FirewallRule, RuleEndpoint};

use crate::analyzer::{AnalyzerEntry, Finding, Severity};
use crate::processor::ProcessorConfig;

inventory::submit! {
    AnalyzerEntry {
        id: "rules",
        enabled: is_enabled,
        run: rule_findings,
    }
}

fn is_enabled(config: &ProcessorConfig) -> bool {
    config.dead_rule_check
}

/// Scan every interface's rule list for duplicates and shadowed rules.
pub fn rule_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut by_interface: BTreeMap<&str, Vec<(usize, &FirewallRule)>> = BTreeMap::new();
    for (idx, rule) in doc.rules.iter().enumerate() {
        if rule.is_enabled() {
            by_interface
                .entry(rule.interface.as_str())
                .or_default()
                .push((idx, rule));
        }
    }

    let mut out = Vec::new();
    for (interface, rules) in &by_interface {
        for (pos, (idx, rule)) in rules.iter().enumerate() {
            let earlier = &rules[..pos];
            if let Some((dup_idx, dup)) = earlier
                .iter()
                .find(|(_, e)| fingerprint(e) == fingerprint(rule))
            {
                out.push((
                    Severity::Low,
                    duplicate_finding(interface, rule_label(rule, *idx), rule_label(dup, *dup_idx)),
                ));
                continue;
            }
            if let Some((shadow_idx, shadow)) = earlier.iter().find(|(_, e)| shadows(e, rule)) {
                out.push((
                    Severity::Medium,
                    dead_finding(
                        interface,
                        rule_label(rule, *idx),
                        rule_label(shadow, *shadow_idx),
                    ),
                ));
            }
        }
    }
    out
}

/// Rule fingerprint for duplicate detection. Rules with identical
/// fingerprints on the same interface match the same traffic with the same
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RuleFingerprint {
    action: String,
    protocol: String,
    source: String,
    source_port: String,
    destination: String,
    destination_port: String,
}

fn fingerprint(rule: &FirewallRule) -> RuleFingerprint {
    RuleFingerprint {
        action: rule.action.trim().to_ascii_lowercase(),
        protocol: protocol_key(rule),
        source: endpoint_addr(&rule.source),
        source_port: endpoint_port(&rule.source),
        destination: endpoint_addr(&rule.destination),
        destination_port: endpoint_port(&rule.destination),
    }
}

/// Whether `earlier` already decides the fate of every packet `later` could
/// match. Both pass and block terminate evaluation, so the action of the
/// earlier rule does not matter — only its coverage does.
fn shadows(earlier: &FirewallRule, later: &FirewallRule) -> bool {
    covers_protocol(earlier, later)
        && covers(&earlier.source, &later.source)
        && covers(&earlier.destination, &later.destination)
}

fn covers(outer: &RuleEndpoint, inner: &RuleEndpoint) -> bool {
    let addr_covered = outer.is_any() || (!inner.is_any() && endpoint_addr(outer) == endpoint_addr(inner));
    let port_covered = match endpoint_port(outer).as_str() {
        "" => true,
        port => port == endpoint_port(inner),
    };
    addr_covered && port_covered
}

fn covers_protocol(earlier: &FirewallRule, later: &FirewallRule) -> bool {
    match protocol_key(earlier).as_str() {
        "any" => true,
        proto => proto == protocol_key(later),
    }
}

fn protocol_key(rule: &FirewallRule) -> String {
    rule.protocol
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("any")
        .to_ascii_lowercase()
}

fn endpoint_addr(endpoint: &RuleEndpoint) -> String {
    if endpoint.is_any() {
        return "any".to_string();
    }
    endpoint
        .address
        .as_deref()
        .unwrap_or("any")
        .trim()
        .to_ascii_lowercase()
}

fn endpoint_port(endpoint: &RuleEndpoint) -> String {
    endpoint
        .port
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .to_string()
}

fn rule_label(rule: &FirewallRule, idx: usize) -> String {
    if rule.descr.trim().is_empty() {
        format!("rule #{}", idx + 1)
    } else {
        rule.descr.trim().to_string()
    }
}

fn duplicate_finding(interface: &str, label: String, earlier: String) -> Finding {
    Finding::new(
        "duplicate-rule",
        "Duplicate firewall rule",
        format!(
            "Rule '{label}' on interface '{interface}' has the same action and match criteria as earlier rule '{earlier}'."
        ),
        "Remove the duplicate rule to keep the ruleset maintainable.",
        "firewall",
    )
}

fn dead_finding(interface: &str, label: String, earlier: String) -> Finding {
    Finding::new(
        "dead-rule",
        "Unreachable firewall rule",
        format!(
            "Rule '{label}' on interface '{interface}' can never match: earlier rule '{earlier}' already decides all traffic it would apply to."
        ),
        "Remove the rule, or move it above the rule that shadows it.",
        "firewall",
    )
}
