use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use stockpredictor_client::config::{ClientConfig, ConfigError};
use stockpredictor_client::guard::{self, GuardDecision};
use stockpredictor_client::net::api::ServiceClient;
use stockpredictor_client::net::bearer;
use stockpredictor_client::net::types::ApiError;
use stockpredictor_client::routes::Route;
use stockpredictor_client::session::{SessionError, SessionManager};
use stockpredictor_client::state::auth::SessionState;
use stockpredictor_client::store::FileStore;
use stockpredictor_client::ui::{Toast, UiBridge};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("not signed in; run `stockpredictor login` first")]
    NotSignedIn,
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stockpredictor", about = "StockPredictor session client")]
struct Cli {
    /// Service base URL (overrides PREDICTOR_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,

    /// Token file (overrides PREDICTOR_TOKEN_FILE).
    #[arg(long)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the stored session and print the signed-in user.
    Whoami,
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "PREDICTOR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "PREDICTOR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show what the route guard decides for a view path.
    Open { path: String },
    /// Fetch a service path with the stored session attached.
    Get { path: String },
}

/// Prints notifications and navigation targets to stderr.
struct TerminalUi;

impl UiBridge for TerminalUi {
    fn navigate(&self, route: Route) {
        eprintln!("-> {route}");
    }

    fn notify(&self, toast: Toast) {
        match toast {
            Toast::Success(message) => eprintln!("ok: {message}"),
            Toast::Error(message) => eprintln!("error: {message}"),
        }
    }
}

type CliSession = SessionManager<ServiceClient, FileStore, TerminalUi>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(&base_url)?;
    }
    if let Some(token_file) = cli.token_file {
        config.token_file = token_file;
    }

    let (installer, auth) = bearer::pair();
    let client = ServiceClient::new(&config.base_url, config.timeouts, auth)?;
    let session = SessionManager::new(client, FileStore::new(&config.token_file), TerminalUi, installer);
    tracing::debug!(base_url = %config.base_url, token_file = %config.token_file.display(), "client configured");

    match cli.command {
        Command::Whoami => run_whoami(&session).await,
        Command::Login { username, password } => {
            session.login(&username, &password).await?;
            Ok(())
        }
        Command::Register { email, username, password } => {
            session.register(&email, &username, &password).await?;
            Ok(())
        }
        Command::Logout => {
            session.logout();
            Ok(())
        }
        Command::Open { path } => run_open(&session, &path).await,
        Command::Get { path } => run_get(&session, &path).await,
    }
}

async fn run_whoami(session: &CliSession) -> Result<(), CliError> {
    match session.startup().await {
        SessionState::Authenticated(active) => print_json(&serde_json::to_value(&active.user)?),
        _ => {
            println!("not signed in");
            Ok(())
        }
    }
}

async fn run_open(session: &CliSession, path: &str) -> Result<(), CliError> {
    let route = Route::parse(path).ok_or_else(|| CliError::UnknownRoute(path.to_owned()))?;
    let state = session.startup().await;
    match guard::evaluate(&state, route) {
        GuardDecision::Render => println!("render {route}"),
        GuardDecision::Loading => println!("loading"),
        GuardDecision::Redirect { to, discarded } => println!("redirect {to} (dropped {discarded})"),
    }
    Ok(())
}

async fn run_get(session: &CliSession, path: &str) -> Result<(), CliError> {
    if !session.startup().await.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }
    let json = session.api().get_json(path).await?;
    print_json(&json)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
