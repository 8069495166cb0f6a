//! Document normalization.
//!
//! Produces a canonical copy of a configuration document: unset scalar
//! fields get their appliance defaults, and users, groups, and tunables are
//! ordered deterministically. Firewall rule order is preserved verbatim —
//! evaluation is first-match-wins, so reordering rules would change meaning.
//!
//! Normalization is idempotent: applying it to an already-normalized
//! document returns an equal document. The sorts are stable, so collections
//! already in canonical order are not disturbed.

use config_model::{ConfigDocument, SystemSettings};

pub const DEFAULT_OPTIMIZATION: &str = "normal";
pub const DEFAULT_WEB_GUI_PROTOCOL: &str = "https";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_BOGONS_INTERVAL: &str = "monthly";
pub const DEFAULT_THEME: &str = "opnsense";

/// Return a canonical copy of the document. Never fails; accepts any
/// document, including one with no interfaces, users, or rules.
pub fn normalize(doc: &ConfigDocument) -> ConfigDocument {
    let mut out = doc.clone();
    fill_system_defaults(&mut out.system);
    out.users.sort_by(|a, b| a.name.cmp(&b.name));
    out.groups.sort_by(|a, b| a.name.cmp(&b.name));
    out.tunables.sort_by(|a, b| a.key.cmp(&b.key));
    out
}

fn fill_system_defaults(system: &mut SystemSettings) {
    fill(&mut system.optimization, DEFAULT_OPTIMIZATION);
    fill(&mut system.web_gui.protocol, DEFAULT_WEB_GUI_PROTOCOL);
    fill(&mut system.timezone, DEFAULT_TIMEZONE);
    fill(&mut system.bogons_interval, DEFAULT_BOGONS_INTERVAL);
    fill(&mut system.theme, DEFAULT_THEME);
}

fn fill(field: &mut String, default: &str) {
    if field.trim().is_empty() {
        *field = default.to_string();
    }
}

#[cfg(test)]
mod tests {
    use config_model::{ConfigDocument, Group, Tunable, User};
    use pretty_assertions::assert_eq;

    use super::normalize;

    fn user(name: &str, uid: u32) -> User {
        User {
            name: name.to_string(),
            uid: Some(uid),
            ..User::default()
        }
    }

    #[test]
    fn fills_defaults_for_unset_scalars() {
        let normalized = normalize(&ConfigDocument::default());
        assert_eq!(normalized.system.optimization, "normal");
        assert_eq!(normalized.system.web_gui.protocol, "https");
        assert_eq!(normalized.system.timezone, "UTC");
        assert_eq!(normalized.system.bogons_interval, "monthly");
        assert_eq!(normalized.system.theme, "opnsense");
    }

    #[test]
    fn keeps_explicit_values() {
        let mut doc = ConfigDocument::default();
        doc.system.web_gui.protocol = "http".to_string();
        doc.system.timezone = "Europe/Dublin".to_string();

        let normalized = normalize(&doc);
        assert_eq!(normalized.system.web_gui.protocol, "http");
        assert_eq!(normalized.system.timezone, "Europe/Dublin");
    }

    #[test]
    fn sorts_users_groups_and_tunables() {
        let mut doc = ConfigDocument::default();
        doc.users = vec![user("zoe", 3), user("amy", 1), user("mike", 2)];
        doc.groups = vec![
            Group {
                name: "wheel".to_string(),
                ..Group::default()
            },
            Group {
                name: "admins".to_string(),
                ..Group::default()
            },
        ];
        doc.tunables = vec![
            Tunable {
                key: "net.inet.tcp.mssdflt".to_string(),
                ..Tunable::default()
            },
            Tunable {
                key: "kern.ipc.maxsockbuf".to_string(),
                ..Tunable::default()
            },
        ];

        let normalized = normalize(&doc);
        let names: Vec<&str> = normalized.users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["amy", "mike", "zoe"]);
        assert_eq!(normalized.groups[0].name, "admins");
        assert_eq!(normalized.tunables[0].key, "kern.ipc.maxsockbuf");
    }

    #[test]
    fn preserves_rule_order_verbatim() {
        let mut doc = ConfigDocument::default();
        for descr in ["third", "first", "second"] {
            doc.rules.push(config_model::FirewallRule {
                interface: "lan".to_string(),
                action: "pass".to_string(),
                descr: descr.to_string(),
                ..config_model::FirewallRule::default()
            });
        }

        let normalized = normalize(&doc);
        let order: Vec<&str> = normalized.rules.iter().map(|r| r.descr.as_str()).collect();
        assert_eq!(order, vec!["third", "first", "second"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let mut doc = ConfigDocument::default();
        doc.system.hostname = "fw01".to_string();
        doc.users = vec![user("zoe", 3), user("amy", 1)];
        doc.tunables = vec![Tunable {
            key: "b".to_string(),
            ..Tunable::default()
        }];

        let mut current = normalize(&doc);
        for _ in 0..3 {
            let again = normalize(&current);
            assert_eq!(again, current);
            current = again;
        }
    }

    #[test]
    fn idempotent_for_whitespace_only_fields() {
        let mut doc = ConfigDocument::default();
        doc.system.theme = "  ".to_string();

        let once = normalize(&doc);
        assert_eq!(once.system.theme, "opnsense");
        assert_eq!(normalize(&once), once);
    }
}
