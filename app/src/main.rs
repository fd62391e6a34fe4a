//! `aoa-audit`: run the AI Overview audit and write the summary CSV plus per-unit archives.

use std::time::Duration;

use anyhow::Result;
use aoa_core::config::{resolve_api_key, AuditConfig, API_KEY_ENV};
use aoa_core::export::{date_stamp, write_audit_outputs};
use aoa_serp::audit::{run_audit, RunOptions};
use aoa_serp::retry::{RetryPolicy, RetryingSearch};
use aoa_serp::search::serpapi::{SerpApiClient, DEFAULT_BASE_URL};
use clap::Parser;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

fn now_rfc3339_utc() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aoa_audit=info,aoa_serp=info,aoa_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let args = cli::Args::parse();
    let config = match &args.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };
    let config = args.apply(config);
    let api_key = resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

    let client = SerpApiClient::new(
        DEFAULT_BASE_URL,
        &api_key,
        Duration::from_secs(config.timeout_seconds),
    )?;
    let api = RetryingSearch::new(
        client,
        RetryPolicy {
            retries: config.retries,
            pause: Duration::from_secs(1),
        },
    );

    let units = config.units();
    info!(
        units = units.len(),
        queries = config.queries.len(),
        locales = config.locales.len(),
        languages = config.languages.len(),
        "starting AI overview audit"
    );

    let options = RunOptions {
        country: config.gl.clone(),
        no_cache: config.no_cache,
        pause: Duration::from_secs(config.sleep_seconds),
    };
    let run = run_audit(&api, &units, &options, &now_rfc3339_utc);

    let finished = OffsetDateTime::now_utc();
    let result = write_audit_outputs(
        &config.out_root,
        &date_stamp(finished),
        &now_rfc3339_utc(),
        env!("CARGO_PKG_VERSION"),
        &run.rows,
        &run.archives,
    )?;

    info!(
        rows = result.row_count,
        archives = result.archive_count,
        failures = run.failures.len(),
        csv = %result.csv_path,
        dir = %result.export_dir,
        "audit finished"
    );
    Ok(())
}
