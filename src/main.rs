//! AWS ELB WatchDog
//!
//! Two independent long-running commands in one binary:
//!
//! - `watch`: poll the configured candidate load balancers, detect when the
//!   balancer serving this host belongs to the wrong deployment environment,
//!   and restart the local worker group when it does.
//! - `health`: a bare TCP listener external health checks connect to, proving
//!   the process is alive. Shares nothing with `watch`.
//!
//! Both run until killed; normal operation never exits.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use driftwatch::config::load_or_default;
use driftwatch::inspector::AwsCliInspector;
use driftwatch::lifecycle::{wait_for_termination, Shutdown};
use driftwatch::observability::init_logging;
use driftwatch::probe::ProbeServer;
use driftwatch::reconcile::Reconciler;
use driftwatch::remediation::SupervisorRemediator;
use driftwatch::resolver::SystemResolver;

#[derive(Parser)]
#[command(name = "driftwatch")]
#[command(about = "AWS ELB watchdog daemon", long_about = None)]
struct Cli {
    /// Path to log file (default: stdout)
    #[arg(short = 'l', long, global = true)]
    log_file: Option<PathBuf>,

    /// Path to TOML config file (default: built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check for ELB changes and restart workers on environment drift
    Watch {
        /// Expected deployment environment (e.g. stage, prod)
        expected_env: String,

        /// Public FQDN of the current endpoint
        current_fqdn: String,

        /// Candidate load balancer names, in priority order
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// Serve the TCP liveness probe
    Health {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0")]
        ip_addr: IpAddr,

        /// Port to listen on
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;
    let config = load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Watch {
            expected_env,
            current_fqdn,
            candidates,
        } => {
            tracing::debug!("Initializing AWS ELB check");

            let inspector = Arc::new(AwsCliInspector::new(&config.aws));
            let resolver = Arc::new(SystemResolver::from_system_conf()?);
            let remediator = Arc::new(SupervisorRemediator::new(&config.remediation));

            let reconciler = Reconciler::new(
                candidates,
                expected_env,
                current_fqdn,
                config.timing,
                inspector,
                resolver,
                remediator,
            );

            let shutdown = Shutdown::new();
            let handle = tokio::spawn(reconciler.run(shutdown.subscribe()));

            wait_for_termination().await;
            shutdown.trigger();
            handle.await?;
        }
        Commands::Health { ip_addr, port } => {
            tracing::debug!("Initializing AWS WatchDog health check");

            let server = ProbeServer::bind(ip_addr, port).await?;

            let shutdown = Shutdown::new();
            let handle = tokio::spawn(server.run(shutdown.subscribe()));

            wait_for_termination().await;
            shutdown.trigger();
            handle.await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
