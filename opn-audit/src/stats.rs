//! Statistics aggregation over a normalized document.
//!
//! Counts are exact (total users is the length of the user list regardless
//! of scope). Grouping maps use the natural key — user scope, rule action,
//! interface name — and omit absent keys rather than storing zeros.
//!
//! ## Summary scores
//!
//! The summary carries two bounded [0, 100] heuristics:
//!
//! - **security score** — starts at 100 and subtracts fixed penalties:
//!   40 for a non-HTTPS web GUI, 25 for a well-known SNMP community,
//!   15 when DNSSEC is off, 10 when the ruleset is empty.
//! - **complexity score** — `rules/2 + interfaces*5 + tunables + users`,
//!   clamped.
//!
//! The exact weights are a documented implementation choice; boundedness is
//! the contract.

use std::collections::BTreeMap;

use config_model::ConfigDocument;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub interface_count: usize,
    pub rule_count: usize,
    pub user_count: usize,
    pub group_count: usize,
    pub service_count: usize,
    pub rules_by_action: BTreeMap<String, usize>,
    pub rules_by_interface: BTreeMap<String, usize>,
    pub users_by_scope: BTreeMap<String, usize>,
    pub summary: StatsSummary,
}

/// Derived totals and bounded scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_items: usize,
    /// Always in [0, 100].
    pub security_score: u8,
    /// Always in [0, 100].
    pub complexity_score: u8,
    pub has_security_features: bool,
}

/// Compute statistics for a normalized document.
pub fn calculate(doc: &ConfigDocument) -> Statistics {
    let mut rules_by_action: BTreeMap<String, usize> = BTreeMap::new();
    let mut rules_by_interface: BTreeMap<String, usize> = BTreeMap::new();
    for rule in &doc.rules {
        if !rule.action.is_empty() {
            *rules_by_action.entry(rule.action.clone()).or_default() += 1;
        }
        if !rule.interface.is_empty() {
            *rules_by_interface.entry(rule.interface.clone()).or_default() += 1;
        }
    }

    let mut users_by_scope: BTreeMap<String, usize> = BTreeMap::new();
    for user in &doc.users {
        if !user.scope.is_empty() {
            *users_by_scope.entry(user.scope.clone()).or_default() += 1;
        }
    }

    let interface_count = doc.interfaces.len();
    let rule_count = doc.rules.len();
    let user_count = doc.users.len();
    let group_count = doc.groups.len();
    let service_count = count_services(doc);
    let total_items = interface_count
        + rule_count
        + user_count
        + group_count
        + doc.dhcp_scopes.len()
        + doc.tunables.len();

    Statistics {
        interface_count,
        rule_count,
        user_count,
        group_count,
        service_count,
        rules_by_action,
        rules_by_interface,
        users_by_scope,
        summary: StatsSummary {
            total_items,
            security_score: security_score(doc),
            complexity_score: complexity_score(doc),
            has_security_features: has_security_features(doc),
        },
    }
}

/// Configured services: enabled DHCP scopes, the SNMP agent, the DNS
/// resolver, and active outbound NAT each count as one.
fn count_services(doc: &ConfigDocument) -> usize {
    let mut count = doc.dhcp_scopes.iter().filter(|s| s.enabled).count();
    if doc.snmp.is_some() {
        count += 1;
    }
    if doc.dns.enabled {
        count += 1;
    }
    let nat_mode = doc.nat.outbound_mode.trim();
    if !nat_mode.is_empty() && !nat_mode.eq_ignore_ascii_case("disabled") {
        count += 1;
    }
    count
}

fn security_score(doc: &ConfigDocument) -> u8 {
    let mut score: i32 = 100;
    if !doc.system.web_gui.protocol.eq_ignore_ascii_case("https") {
        score -= 40;
    }
    if doc
        .snmp
        .as_ref()
        .map(|s| {
            matches!(
                s.read_only_community.trim().to_ascii_lowercase().as_str(),
                "public" | "private"
            )
        })
        .unwrap_or(false)
    {
        score -= 25;
    }
    if !doc.dns.dnssec {
        score -= 15;
    }
    if doc.rules.is_empty() {
        score -= 10;
    }
    clamp_score(score)
}

fn complexity_score(doc: &ConfigDocument) -> u8 {
    let raw = doc.rules.len() / 2
        + doc.interfaces.len() * 5
        + doc.tunables.len()
        + doc.users.len();
    clamp_score(raw as i32)
}

fn clamp_score(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

fn has_security_features(doc: &ConfigDocument) -> bool {
    doc.system.web_gui.protocol.eq_ignore_ascii_case("https")
        || doc.dns.dnssec
        || doc.rules.iter().any(|r| {
            r.is_enabled()
                && matches!(
                    r.action.trim().to_ascii_lowercase().as_str(),
                    "block" | "reject"
                )
        })
}
