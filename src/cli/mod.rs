pub mod commands;
pub mod config;
pub mod utils;

use std::future::Future;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::models::Session;
use crate::routes::{Navigation, Route, ViewScope};
use crate::FinanceContext;

#[derive(Parser)]
#[command(name = "fin")]
#[command(about = "Finance CLI - manage accounts and categories on the finance API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Remote API server registry")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
    },

    #[command(about = "Login, logout and session status")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Register or delete your user")]
    User {
        #[command(subcommand)]
        cmd: commands::user::UserCommands,
    },

    #[command(about = "Monetary accounts")]
    Account {
        #[command(subcommand)]
        cmd: commands::account::AccountCommands,
    },

    #[command(about = "Expense and income categories")]
    Category {
        #[command(subcommand)]
        cmd: commands::category::CategoryCommands,
    },

    #[command(about = "Aggregate balance across all accounts")]
    Dashboard,

    #[command(about = "Navigate to a page path and report where it lands")]
    Open {
        #[arg(help = "Page path, e.g. / or /contas")]
        route: Route,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Per-invocation state handed to every command
pub struct CliContext {
    pub finance: FinanceContext,
    pub output: OutputFormat,
    pub server_url: String,
}

impl CliContext {
    /// Enter a route the way a browser would: protected routes go through the
    /// guard, and a redirect means the view is never built.
    pub async fn enter(&self, route: Route) -> anyhow::Result<(Option<Session>, ViewScope)> {
        match self.finance.navigator.navigate(route).await {
            Navigation::Render { session, scope, .. } => Ok((session, scope)),
            Navigation::Redirect { from, to } => {
                tracing::debug!("{} redirected to {}", from, to);
                anyhow::bail!("Sessão inválida ou expirada. Faça login com `fin auth login` ({})", to)
            }
        }
    }

    /// Run one request inside a view scope
    pub async fn within<F, T, E>(&self, scope: &ViewScope, fut: F) -> anyhow::Result<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        match scope.run(fut).await {
            Some(result) => result.map_err(Into::into),
            None => anyhow::bail!("Request cancelled by a newer navigation"),
        }
    }
}

pub async fn run(cli: Cli, config: ClientConfig) -> anyhow::Result<()> {
    let output = OutputFormat::from_cli(&cli);

    let server_url = config::resolve_server_url(&config.api.base_url)?;
    let mut api_config = config.api.clone();
    api_config.base_url = server_url;

    let api = ApiClient::new(&api_config)?;
    let server_url = api.base_url().to_string();

    let env_config = config::load_environment_config()?;
    let saved_sid = env_config.session_for(&server_url);
    let api = api.with_session(saved_sid.clone());

    let ctx = CliContext {
        finance: FinanceContext::from_client(api),
        output,
        server_url,
    };

    let result = match cli.command {
        Commands::Server { cmd } => commands::server::handle(cmd, &ctx).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &ctx).await,
        Commands::User { cmd } => commands::user::handle(cmd, &ctx).await,
        Commands::Account { cmd } => commands::account::handle(cmd, &ctx).await,
        Commands::Category { cmd } => commands::category::handle(cmd, &ctx).await,
        Commands::Dashboard => commands::dashboard::handle(&ctx).await,
        Commands::Open { route } => commands::open::handle(route, &ctx).await,
    };

    // The API slides or clears the cookie on every call; persist what it left us with
    let current_sid = ctx.finance.api.session_id();
    if current_sid != saved_sid {
        if let Err(e) = persist_session(&ctx.server_url, current_sid) {
            tracing::warn!("Failed to save session for {}: {}", ctx.server_url, e);
        }
    }

    result
}

fn persist_session(server_url: &str, sid: Option<String>) -> anyhow::Result<()> {
    let mut latest = config::load_environment_config()?;
    latest.store_session(server_url, sid);
    config::save_environment_config(&latest)
}
