//! Firewall configuration analysis engine.
//!
//! This library consumes a parsed configuration document (see `config-model`)
//! and produces a normalized, analyzed, serialized report. It does not parse
//! raw appliance configuration text, probe the network, or persist anything —
//! exporting a string is the extent of its output responsibility.
//!
//! # Architecture
//!
//! ## Normalization
//!
//! - [`normalize`] — Canonicalize a document: fill defaults, order
//!   collections deterministically. Idempotent for arbitrary input.
//!
//! ## Analysis
//!
//! - [`analyzer`] — Finding/severity types and the analyzer registry
//! - [`analyze_rules`] — Dead and duplicate firewall rule detection
//! - [`analyze_security`] — Insecure web GUI and SNMP community checks
//! - [`analyze_performance`] — Offloading and ruleset size checks
//! - [`analyze_consistency`] — Cross-reference checks (groups, DHCP scopes)
//! - [`stats`] — Counts, groupings, and bounded summary scores
//!
//! ## Reporting
//!
//! - [`report`] — Concurrency-safe accumulator of findings and statistics,
//!   serializable as JSON, YAML, or Markdown
//! - [`render`] — Terminal-friendly colored report output
//!
//! ## Orchestration
//!
//! - [`processor`] — Validates input, drives normalization, dispatches the
//!   enabled analyzers, assembles the report, and transforms it into an
//!   output format
//! - [`cancel`] — Cooperative cancellation token checked at phase boundaries
//! - [`settings`] — Analysis toggles loaded from a TOML settings file
//!
//! # Workflow
//!
//! ```ignore
//! use config_model::load_file;
//! use opn_audit::cancel::CancelToken;
//! use opn_audit::processor::{Processor, ProcessorConfig};
//!
//! let doc = load_file("fw01.json".as_ref())?;
//! let processor = Processor::new(ProcessorConfig::everything());
//! let cancel = CancelToken::new();
//! let report = processor.process(&cancel, Some(&doc))?;
//! println!("{}", report.summary());
//! println!("{}", processor.transform(&cancel, &report, "markdown")?);
//! ```
//!
//! The engine runs synchronously on the calling thread. The returned
//! [`report::Report`] tolerates concurrent finding additions and reads for
//! its remaining lifetime; the processor itself makes no further calls into
//! it after returning.

pub mod analyze_consistency;
pub mod analyze_performance;
pub mod analyze_rules;
pub mod analyze_security;
pub mod analyzer;
pub mod cancel;
pub mod normalize;
pub mod processor;
pub mod render;
pub mod report;
pub mod settings;
pub mod stats;
