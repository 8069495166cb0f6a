//! Cross-reference consistency checks.
//!
//! Configuration sections reference each other by name: users name a group,
//! DHCP scopes name an interface. A reference that does not resolve means a
//! section was removed or renamed without updating its dependents.

use config_model::ConfigDocument;

use crate::analyzer::{AnalyzerEntry, Finding, Severity};
use crate::processor::ProcessorConfig;

inventory::submit! {
    AnalyzerEntry {
        id: "consistency",
        enabled: is_enabled,
        run: consistency_findings,
    }
}

fn is_enabled(config: &ProcessorConfig) -> bool {
    config.compliance_check
}

pub fn consistency_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut out = Vec::new();
    out.extend(group_reference_findings(doc));
    out.extend(dhcp_scope_findings(doc));
    out
}

fn group_reference_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut out = Vec::new();
    for user in &doc.users {
        if user.group.is_empty() {
            continue;
        }
        if doc.find_group(&user.group).is_none() {
            out.push((
                Severity::Medium,
                Finding::new(
                    "consistency",
                    "Unresolved group reference",
                    format!(
                        "User '{}' references group '{}', which is not defined.",
                        user.name, user.group
                    ),
                    "Create the group or clear the user's group membership.",
                    "users",
                ),
            ));
        }
    }
    out
}

fn dhcp_scope_findings(doc: &ConfigDocument) -> Vec<(Severity, Finding)> {
    let mut out = Vec::new();
    for scope in &doc.dhcp_scopes {
        if !scope.enabled {
            continue;
        }
        let addressed = doc
            .find_interface(&scope.interface)
            .map(|iface| iface.has_address())
            .unwrap_or(false);
        if !addressed {
            out.push((
                Severity::High,
                Finding::new(
                    "consistency",
                    "DHCP scope on unaddressed interface",
                    format!(
                        "A DHCP scope is enabled on interface '{}', which has no configured address; the DHCP service cannot serve that segment.",
                        scope.interface
                    ),
                    "Assign an address to the interface or disable the scope.",
                    "dhcp",
                ),
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use config_model::{ConfigDocument, DhcpScope, Group, Interface, User};

    use super::consistency_findings;
    use crate::analyzer::Severity;

    #[test]
    fn flags_user_with_unknown_group() {
        let mut doc = ConfigDocument::default();
        doc.users.push(User {
            name: "amy".to_string(),
            group: "operators".to_string(),
            ..User::default()
        });

        let findings = consistency_findings(&doc);
        let (severity, finding) = &findings[0];
        assert_eq!(*severity, Severity::Medium);
        assert_eq!(finding.kind, "consistency");
        assert!(finding.description.contains("operators"));
    }

    #[test]
    fn resolved_group_reference_is_fine() {
        let mut doc = ConfigDocument::default();
        doc.groups.push(Group {
            name: "operators".to_string(),
            ..Group::default()
        });
        doc.users.push(User {
            name: "amy".to_string(),
            group: "operators".to_string(),
            ..User::default()
        });

        assert!(consistency_findings(&doc).is_empty());
    }

    #[test]
    fn user_without_group_is_fine() {
        let mut doc = ConfigDocument::default();
        doc.users.push(User {
            name: "amy".to_string(),
            ..User::default()
        });
        assert!(consistency_findings(&doc).is_empty());
    }

    #[test]
    fn flags_enabled_scope_on_unaddressed_interface() {
        let mut doc = ConfigDocument::default();
        doc.interfaces
            .insert("opt1".to_string(), Interface::default());
        doc.dhcp_scopes.push(DhcpScope {
            interface: "opt1".to_string(),
            enabled: true,
            ..DhcpScope::default()
        });

        let findings = consistency_findings(&doc);
        let (severity, finding) = &findings[0];
        assert_eq!(*severity, Severity::High);
        assert_eq!(finding.component, "dhcp");
    }

    #[test]
    fn flags_enabled_scope_on_missing_interface() {
        let mut doc = ConfigDocument::default();
        doc.dhcp_scopes.push(DhcpScope {
            interface: "opt9".to_string(),
            enabled: true,
            ..DhcpScope::default()
        });
        assert_eq!(consistency_findings(&doc).len(), 1);
    }

    #[test]
    fn disabled_scope_is_ignored() {
        let mut doc = ConfigDocument::default();
        doc.dhcp_scopes.push(DhcpScope {
            interface: "opt9".to_string(),
            enabled: false,
            ..DhcpScope::default()
        });
        assert!(consistency_findings(&doc).is_empty());
    }
}
