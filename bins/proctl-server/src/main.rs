use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use proctl_listener::config::validation::validate_log_level;
use proctl_listener::{ListenerConfig, ListenerServer, SystemProcessHost};

/// proctl - remote process-control listener
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Process name to kill on every `kill` command (repeatable, adds to config)
    #[arg(long = "always-kill", value_name = "NAME")]
    always_kill: Vec<String>,

    /// Reply to each command with a one-line OK/ERR acknowledgement
    #[arg(long)]
    reply: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    initialize_logging(&config.listener.log_level, args.debug)?;

    info!("Starting proctl listener {}", proctl_listener::VERSION);
    if let Some(ref path) = args.config {
        info!("Config file: {}", path);
    }

    let server = match ListenerServer::bind(&config, SystemProcessHost::new()).await {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            return Err(anyhow::anyhow!("Listener failed to start: {}", e));
        }
    };

    server.run_until(shutdown_signal()).await;
    info!("proctl listener shut down");
    Ok(())
}

fn load_config(args: &Args) -> Result<ListenerConfig> {
    let mut config = match args.config {
        Some(ref path) => ListenerConfig::load_from_file(path)?,
        None => ListenerConfig::default(),
    };

    if let Some(port) = args.port {
        config.listener.port = port;
    }
    for name in &args.always_kill {
        if !config.always_kill.contains(name) {
            config.always_kill.push(name.clone());
        }
    }
    if args.reply {
        config.listener.reply = true;
    }

    config.validate()?;
    Ok(config)
}

fn initialize_logging(level: &str, debug: bool) -> Result<()> {
    validate_log_level(level)?;
    let level = if debug { "debug".to_string() } else { level.to_lowercase() };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_target(false)
        .init();

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    {
        let (mut sigterm, mut sigint) = match (
            signal::unix::signal(signal::unix::SignalKind::terminate()),
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
        ) {
            (Ok(term), Ok(int)) => (term, int),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM signal");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT signal");
            }
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return std::future::pending().await;
        }
        info!("Received Ctrl+C signal");
    }
}
