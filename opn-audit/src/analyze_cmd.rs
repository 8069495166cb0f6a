use anyhow::{bail, Context, Result};
use config_model::load_file;
use opn_audit::cancel::CancelToken;
use opn_audit::processor::{Processor, ProcessorConfig};
use opn_audit::render::render_report_text;
use opn_audit::settings::load_processor_config;

use crate::cli::{AnalyzeArgs, OutputFormat};

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let doc = load_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let config = resolve_config(&args)?;
    let processor = Processor::new(config);
    let cancel = CancelToken::new();
    let report = processor.process(&cancel, Some(&doc))?;

    match args.format {
        OutputFormat::Text => println!("{}", render_report_text(&report, args.verbose)),
        OutputFormat::Json => println!("{}", processor.transform(&cancel, &report, "json")?),
        OutputFormat::Yaml => println!("{}", processor.transform(&cancel, &report, "yaml")?),
        OutputFormat::Markdown => {
            println!("{}", processor.transform(&cancel, &report, "markdown")?);
        }
    }

    if args.strict && report.has_critical_findings() {
        bail!("strict mode failed: critical findings present");
    }
    Ok(())
}

/// Settings file first, then flag overrides on top.
fn resolve_config(args: &AnalyzeArgs) -> Result<ProcessorConfig> {
    let mut config = match &args.settings {
        Some(path) => load_processor_config(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => ProcessorConfig::default(),
    };
    if args.all {
        config = ProcessorConfig::everything();
    }
    if args.dead_rules {
        config.dead_rule_check = true;
    }
    if args.security {
        config.security_analysis = true;
    }
    if args.performance {
        config.performance_analysis = true;
    }
    if args.compliance {
        config.compliance_check = true;
    }
    if args.no_stats {
        config.stats = false;
    }
    Ok(config)
}
