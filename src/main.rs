use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use nfvctl::command::{self, Outcome};
use nfvctl::config::Config;
use nfvctl::nfvo::NfvoClient;

/// Generic failure: bad command, bad parameters, failed invocation.
const EXIT_FAILURE: u8 = 1;
/// Setup failure before any command could run.
const EXIT_SETUP: u8 = 2;

/// Command line client for the NFV Orchestrator
#[derive(Parser, Debug)]
#[command(name = "nfvctl", version, about, long_about = None)]
struct Args {
    /// Orchestrator host (overrides NFVO_IP)
    #[arg(long)]
    host: Option<String>,

    /// Orchestrator port (overrides NFVO_PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Use https towards the orchestrator (overrides NFVO_SSL_ENABLED)
    #[arg(long)]
    ssl: Option<bool>,

    /// Account username (overrides NFVO_USERNAME)
    #[arg(short, long)]
    username: Option<String>,

    /// Account password (overrides NFVO_PASSWORD)
    #[arg(short, long)]
    password: Option<String>,

    /// Project the requests are scoped to (overrides NFVO_PROJECT_ID)
    #[arg(long)]
    project: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Command followed by its positional parameters, e.g.
    /// `VimInstance-findById abc-123`
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn resolve_config(args: &Args) -> Config {
    let mut config = Config::from_env();
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ssl) = args.ssl {
        config.ssl_enabled = ssl;
    }
    if let Some(username) = &args.username {
        config.username = username.clone();
    }
    if let Some(password) = &args.password {
        config.password = password.clone();
    }
    if let Some(project) = &args.project {
        config.project_id = project.clone();
    }
    config
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.log_level);

    let config = resolve_config(&args);
    tracing::debug!("using orchestrator at {}", config.endpoint());

    let client = match NfvoClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_SETUP);
        }
    };

    let registry = command::build_registry();

    match command::dispatch(&registry, client, &args.command).await {
        Ok(Outcome::Help(text)) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Unknown(text)) => {
            println!("{text}");
            ExitCode::from(EXIT_FAILURE)
        }
        Ok(Outcome::Call(result)) => {
            if let Some(text) = command::output::render(&result) {
                println!("{text}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!("command failed: {err:?}");
            eprintln!("Error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
