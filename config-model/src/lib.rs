//! Typed model for firewall appliance configuration documents.
//!
//! This crate defines the in-memory shape of a parsed appliance configuration:
//! system settings, interfaces, firewall rules, users and groups, DHCP scopes,
//! SNMP/NAT/DNS settings, and tunables. It carries no analysis logic — it is
//! the data layer consumed by higher-level tools.
//!
//! Documents are plain serde value types. A document can be loaded from its
//! JSON serialization with [`load`]/[`load_file`]; producing a document from
//! raw appliance configuration text is the job of an external parser.

pub mod document;
pub mod loader;

pub use document::{
    ConfigDocument, DhcpScope, DnsSettings, FirewallRule, Group, Interface, NatSettings,
    OffloadingSettings, PortForward, RuleEndpoint, SnmpSettings, SystemSettings, Tunable, User,
    WebGuiSettings,
};
pub use loader::{load, load_file, LoadError};
