//! Application status poller.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────┐
//!   │                     RetryDriver                            │
//!   │   Attempting ──▶ Succeeded | Failed | RetryPending ──┐     │
//!   │        ▲                                             │     │
//!   │        └────────────── fixed delay ◀─────────────────┘     │
//!   │                          │                                 │
//!   │               ┌──────────▼───────────┐                     │
//!   │               │ DualProbeCoordinator │                     │
//!   │               └────┬────────────┬────┘                     │
//!   │                    │ concurrent │                          │
//!   │            ┌───────▼──┐      ┌──▼───────┐                  │
//!   │            │ probe #1 │      │ probe #2 │                  │
//!   │            └───────┬──┘      └──┬───────┘                  │
//!   └────────────────────┼────────────┼──────────────────────────┘
//!                        ▼            ▼
//!          GET <service1>/status/<id>  GET <service2>/status/<id>
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use app_status_poller::config::{load_config, AppConfig, ConfigOverrides};
use app_status_poller::health::DualProbeCoordinator;
use app_status_poller::lifecycle::{signals, Shutdown};
use app_status_poller::observability::{logging, metrics};
use app_status_poller::RetryDriver;

#[derive(Parser)]
#[command(name = "app-status-poller")]
#[command(about = "Poll two status services for an application and combine the result", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Application identifier to check.
    #[arg(short, long)]
    application_id: Option<String>,

    /// Base URL of the first status service.
    #[arg(long)]
    service1_url: Option<String>,

    /// Base URL of the second status service.
    #[arg(long)]
    service2_url: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

const EXIT_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Warning: logging not initialized: {}", e);
    }
    metrics::set_enabled(config.observability.metrics_enabled);

    match run(config, cli.json).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Status check could not run");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let overrides = ConfigOverrides {
        application_id: cli.application_id.clone(),
        service_urls: [cli.service1_url.clone(), cli.service2_url.clone()],
    };
    Ok(overrides.apply(config)?)
}

async fn run(config: AppConfig, json: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing::info!(
        application_id = %config.application_id,
        service1 = %config.services[0].base_url,
        service2 = %config.services[1].base_url,
        timeout_secs = config.probe.timeout_secs,
        max_retries = config.retries.max_retries,
        delay_ms = config.retries.delay_ms,
        "Configuration loaded"
    );

    let client = reqwest::Client::builder()
        .user_agent(config.probe.user_agent.clone())
        .build()?;
    let coordinator = DualProbeCoordinator::from_config(&config, client)?;
    let driver = RetryDriver::new(coordinator, &config.retries);

    let shutdown = Arc::new(Shutdown::new());
    let signal_task = signals::spawn_ctrl_c_handler(shutdown.clone());

    let outcome = driver.run(&config.application_id, &shutdown.token()).await;
    signal_task.abort();

    let result = match outcome {
        Ok(result) => result,
        Err(cancelled) => {
            eprintln!("{}", cancelled);
            return Ok(ExitCode::from(EXIT_CANCELLED));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILED)
    })
}
