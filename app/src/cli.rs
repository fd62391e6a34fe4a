use std::path::PathBuf;

use aoa_core::config::AuditConfig;
use clap::Parser;

/// Audit search-engine AI Overviews across queries, locales and languages.
#[derive(Parser, Debug)]
#[command(name = "aoa-audit")]
#[command(version)]
pub struct Args {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(short, long, env = "AOA_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that receives the date-stamped results folder
    #[arg(short, long)]
    pub out_root: Option<PathBuf>,

    /// Query to audit (repeatable); replaces the configured query list
    #[arg(short, long = "query")]
    pub queries: Vec<String>,

    /// Language code (repeatable); replaces the configured languages
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Ask the search API to bypass its cache
    #[arg(long)]
    pub no_cache: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: AuditConfig) -> AuditConfig {
        if let Some(out_root) = &self.out_root {
            config.out_root = out_root.clone();
        }
        if !self.queries.is_empty() {
            config.queries = self.queries.clone();
        }
        if !self.languages.is_empty() {
            config.languages = self.languages.clone();
        }
        if self.no_cache {
            config.no_cache = true;
        }
        config
    }
}
