use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::CliContext;
use crate::models::UserCreate;
use crate::routes::Route;

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a new user")]
    Register {
        #[arg(help = "Display name")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Delete a user (defaults to the logged-in user)")]
    Delete {
        #[arg(help = "User ID")]
        id: Option<i64>,
    },
}

pub async fn handle(cmd: UserCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let output_format = &ctx.output;

    match cmd {
        UserCommands::Register { name, email, password } => {
            let (_, scope) = ctx.enter(Route::Register).await?;
            let user = UserCreate {
                name,
                email,
                password: read_password(password)?,
            };

            ctx.within(&scope, ctx.finance.users.create(&user)).await?;

            output_success(
                output_format,
                "Cadastro realizado com sucesso! Faça seu login.",
                Some(json!({ "email": user.email })),
            )
        }
        UserCommands::Delete { id } => {
            let (session, scope) = ctx.enter(Route::Dashboard).await?;
            let own_id = session.as_ref().and_then(|s| s.user_id());
            let id = id
                .or(own_id)
                .ok_or_else(|| anyhow::anyhow!("No user ID given and the session does not carry one"))?;

            ctx.within(&scope, ctx.finance.users.delete(id)).await?;
            if own_id == Some(id) {
                ctx.finance.api.set_session_id(None);
            }

            output_success(output_format, "Conta excluída com sucesso", Some(json!({ "id": id })))
        }
    }
}
