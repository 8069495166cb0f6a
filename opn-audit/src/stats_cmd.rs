use anyhow::{bail, Context, Result};
use config_model::load_file;
use opn_audit::normalize::normalize;
use opn_audit::stats::{calculate, Statistics};

use crate::cli::{OutputFormat, StatsArgs};

pub fn run_stats(args: StatsArgs) -> Result<()> {
    let doc = load_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let stats = calculate(&normalize(&doc));

    match args.format {
        OutputFormat::Text => println!("{}", render_stats_text(&stats)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&stats)?),
        OutputFormat::Markdown => bail!("stats has no markdown rendering; use analyze --format markdown"),
    }
    Ok(())
}

fn render_stats_text(stats: &Statistics) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "stats interfaces={} rules={} users={} groups={} services={}",
        stats.interface_count,
        stats.rule_count,
        stats.user_count,
        stats.group_count,
        stats.service_count
    ));
    out.push(format!(
        "summary total_items={} security_score={} complexity_score={} security_features={}",
        stats.summary.total_items,
        stats.summary.security_score,
        stats.summary.complexity_score,
        stats.summary.has_security_features
    ));
    out.push("rules_by_action".to_string());
    append_counts(&mut out, &stats.rules_by_action);
    out.push("rules_by_interface".to_string());
    append_counts(&mut out, &stats.rules_by_interface);
    out.push("users_by_scope".to_string());
    append_counts(&mut out, &stats.users_by_scope);
    out.join("\n")
}

fn append_counts(out: &mut Vec<String>, counts: &std::collections::BTreeMap<String, usize>) {
    if counts.is_empty() {
        out.push("- none".to_string());
        return;
    }
    for (key, count) in counts {
        out.push(format!("- {key}: {count}"));
    }
}
