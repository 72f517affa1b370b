mod args;
mod metrics;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use static_deploy_core::{
    create_deployer, load_config, load_config_or_default, prepare_deployment, validate_config,
    DeployInvocation, DeployOrchestrator, DeploymentReport, FileCatalog, LocaleCodeValidator,
    ReportCallback,
};

use args::{Cli, LogFormat};

/// Config file read when neither `--config` nor `STATIC_DEPLOY_CONFIG` is set.
const DEFAULT_CONFIG_PATH: &str = "static-deploy.toml";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let (text, json) = match format {
        LogFormat::Text => (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let mut config = match cli.config {
        Some(ref path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            debug!("Loading configuration from {:?} if present", path);
            load_config_or_default(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
    };

    cli.apply(&mut config);
    validate_config(&config).context("Invalid configuration")?;
    info!("Application mode: {}", config.app.mode);

    let invocation = DeployInvocation::from_config(&config);
    let validator = LocaleCodeValidator::new().with_known(config.locales.known.clone());
    let catalog = FileCatalog::new(config.catalog.path.clone());
    let (plan, concurrency) = prepare_deployment(&invocation, &catalog, &validator)?;

    let deployer = create_deployer(&config.executor, config.deploy.dry_run)?;

    let print_report: ReportCallback = Arc::new(|report: &DeploymentReport| {
        for line in report.lines() {
            println!("{}", line);
        }
    });

    let orchestrator = DeployOrchestrator::new(deployer, Arc::new(validator))
        .with_report_callback(print_report);
    let outcome = orchestrator.execute(&invocation, plan, concurrency).await;
    let summary = &outcome.summary;
    info!(
        "Deployed {} units ({} failed) in {}ms, peak {} workers, status {}",
        summary.units_total,
        summary.units_failed,
        summary.duration_ms(),
        summary.peak_active,
        summary.status.value()
    );

    if let Some(ref path) = cli.metrics_file {
        std::fs::write(path, metrics::encode_metrics())
            .with_context(|| format!("Failed to write metrics to {:?}", path))?;
    }

    Ok(outcome.exit_code())
}
