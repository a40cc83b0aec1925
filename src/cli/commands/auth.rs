use clap::Subcommand;
use serde_json::json;

use crate::auth::ProbeOutcome;
use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::Credentials;
use crate::routes::Route;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login to the current server")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and drop the stored session")]
    Logout,

    #[command(about = "Show current authentication status")]
    Whoami,
}

pub async fn handle(cmd: AuthCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let output_format = &ctx.output;

    match cmd {
        AuthCommands::Login { email, password } => {
            let (_, scope) = ctx.enter(Route::Login).await?;
            let credentials = Credentials {
                email,
                password: read_password(password)?,
            };

            let ack = ctx.within(&scope, ctx.finance.auth.login(&credentials)).await?;
            let message = ack.message.unwrap_or_else(|| "Login realizado com sucesso".to_string());

            output_success(output_format, &message, Some(json!({ "email": credentials.email })))
        }
        AuthCommands::Logout => {
            let (_, scope) = ctx.enter(Route::Dashboard).await?;
            ctx.within(&scope, ctx.finance.auth.logout()).await?;

            output_success(output_format, "Logout realizado com sucesso", None)
        }
        AuthCommands::Whoami => match ctx.finance.prober.check().await {
            ProbeOutcome::Authenticated(session) => match output_format {
                OutputFormat::Json => output_json("session", session.identity()),
                OutputFormat::Text => {
                    match session.user_id() {
                        Some(id) => println!("Authenticated as user {}", id),
                        None => println!("Authenticated: {}", session.identity()),
                    }
                    Ok(())
                }
            },
            ProbeOutcome::NoSession => {
                ctx.finance.api.set_session_id(None);
                anyhow::bail!("Not authenticated")
            }
            ProbeOutcome::Unreachable(reason) => {
                anyhow::bail!("Could not check the session against {}: {}", ctx.server_url, reason)
            }
        },
    }
}
