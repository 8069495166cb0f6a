use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed appliance configuration document.
///
/// Interfaces are keyed by their logical name ("lan", "wan", "opt1"). Firewall
/// rules are an ordered sequence — evaluation is first-match-wins, so rule
/// order is semantically meaningful and must never be reordered.
///
/// Unset scalar fields are empty strings; consumers that need canonical
/// defaults fill them during normalization rather than at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    pub system: SystemSettings,
    pub interfaces: BTreeMap<String, Interface>,
    pub rules: Vec<FirewallRule>,
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub dhcp_scopes: Vec<DhcpScope>,
    pub snmp: Option<SnmpSettings>,
    pub nat: NatSettings,
    pub dns: DnsSettings,
    pub tunables: Vec<Tunable>,
}

impl ConfigDocument {
    /// Look up a group definition by name (case-sensitive, as stored).
    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Look up an interface by its logical name.
    pub fn find_interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }
}

/// Global system settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    pub hostname: String,
    pub domain: String,
    /// Firmware/config version string as reported by the appliance.
    pub version: String,
    /// Firewall state-table optimization profile.
    pub optimization: String,
    pub timezone: String,
    /// Web GUI theme name.
    pub theme: String,
    pub web_gui: WebGuiSettings,
    /// Bogon network list refresh interval.
    pub bogons_interval: String,
    pub offloading: OffloadingSettings,
}

/// Web administration interface settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebGuiSettings {
    /// "http" or "https"; empty when the appliance never stored one.
    pub protocol: String,
    pub port: Option<u16>,
}

/// Hardware offloading toggles. The appliance stores these inverted
/// ("disable..." flags), so `true` means the feature is turned off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffloadingSettings {
    pub checksum_disabled: bool,
    pub segmentation_disabled: bool,
}

/// A logical network interface assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub enabled: bool,
    pub descr: String,
    /// Physical device name ("em0", "igb1").
    pub device: String,
    pub ip_address: Option<String>,
    pub subnet: Option<String>,
}

impl Interface {
    /// Whether the interface has a concrete address configured ("dhcp" and
    /// static addresses both count; an empty string does not).
    pub fn has_address(&self) -> bool {
        self.ip_address
            .as_deref()
            .map(|a| !a.trim().is_empty())
            .unwrap_or(false)
    }
}

/// A single firewall filter rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallRule {
    /// Logical interface the rule is bound to.
    pub interface: String,
    /// "pass", "block", or "reject".
    pub action: String,
    /// Transport protocol; `None` matches any protocol.
    pub protocol: Option<String>,
    pub source: RuleEndpoint,
    pub destination: RuleEndpoint,
    pub descr: String,
    pub disabled: bool,
    pub quick: bool,
}

impl FirewallRule {
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// One side (source or destination) of a rule match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleEndpoint {
    /// Address or network ("10.0.0.0/8", "lan"); `None` matches any.
    pub address: Option<String>,
    pub port: Option<String>,
}

impl RuleEndpoint {
    /// Whether this endpoint matches any address.
    pub fn is_any(&self) -> bool {
        self.address
            .as_deref()
            .map(|a| a.trim().is_empty() || a.eq_ignore_ascii_case("any"))
            .unwrap_or(true)
    }
}

/// A local user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub uid: Option<u32>,
    /// "system" or "user".
    pub scope: String,
    /// Name of the group this user belongs to; empty when unassigned.
    pub group: String,
    pub disabled: bool,
}

/// A local group definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    pub gid: Option<u32>,
    pub description: String,
    pub members: Vec<String>,
}

/// A DHCP scope bound to one interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DhcpScope {
    pub interface: String,
    pub enabled: bool,
    pub range_from: String,
    pub range_to: String,
}

/// SNMP agent settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpSettings {
    pub read_only_community: String,
    pub contact: String,
    pub location: String,
}

/// Outbound NAT settings and port forwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatSettings {
    /// "automatic", "hybrid", "manual", or "disabled".
    pub outbound_mode: String,
    pub forwards: Vec<PortForward>,
}

/// A single port-forward entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortForward {
    pub interface: String,
    pub protocol: String,
    pub target: String,
}

/// DNS resolver settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsSettings {
    pub enabled: bool,
    pub dnssec: bool,
}

/// A sysctl-style tunable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunable {
    pub key: String,
    pub value: String,
    pub descr: String,
}

#[cfg(test)]
mod tests {
    use super::{ConfigDocument, Group, Interface, RuleEndpoint};

    #[test]
    fn endpoint_any_matches_empty_and_keyword() {
        assert!(RuleEndpoint::default().is_any());
        assert!(RuleEndpoint {
            address: Some("any".to_string()),
            port: None,
        }
        .is_any());
        assert!(!RuleEndpoint {
            address: Some("10.0.0.0/8".to_string()),
            port: None,
        }
        .is_any());
    }

    #[test]
    fn interface_address_presence() {
        let mut iface = Interface::default();
        assert!(!iface.has_address());
        iface.ip_address = Some(" ".to_string());
        assert!(!iface.has_address());
        iface.ip_address = Some("192.168.1.1".to_string());
        assert!(iface.has_address());
    }

    #[test]
    fn find_group_is_exact_match() {
        let mut doc = ConfigDocument::default();
        doc.groups.push(Group {
            name: "admins".to_string(),
            ..Group::default()
        });
        assert!(doc.find_group("admins").is_some());
        assert!(doc.find_group("Admins").is_none());
    }
}
