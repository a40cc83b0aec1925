use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::{Account, AccountCreate, AccountUpdate, Page};
use crate::routes::Route;

#[derive(Subcommand)]
pub enum AccountCommands {
    #[command(about = "List accounts")]
    List {
        #[arg(long, default_value_t = Page::DEFAULT_OFFSET, help = "Records to skip")]
        offset: u32,
        #[arg(long, default_value_t = Page::DEFAULT_LIMIT, help = "Maximum records to return")]
        limit: u32,
    },

    #[command(about = "Show one account")]
    Get {
        #[arg(help = "Account ID")]
        id: i64,
    },

    #[command(about = "Create an account")]
    Create {
        #[arg(help = "Account name")]
        name: String,
        #[arg(help = "Opening balance, e.g. 150.00")]
        balance: String,
        #[arg(help = "Hex color, e.g. #22c55e")]
        color: String,
    },

    #[command(about = "Change name, balance or color of an account")]
    Update {
        #[arg(help = "Account ID")]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        balance: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    #[command(about = "Delete an account")]
    Delete {
        #[arg(help = "Account ID")]
        id: i64,
    },
}

pub async fn handle(cmd: AccountCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let (_, scope) = ctx.enter(Route::Accounts).await?;
    let accounts = &ctx.finance.accounts;
    let output_format = &ctx.output;

    match cmd {
        AccountCommands::List { offset, limit } => {
            let page = Page::new(offset, limit);
            let list = ctx.within(&scope, accounts.list(Some(page))).await?;

            if list.is_empty() {
                return output_empty_collection(output_format, "accounts", "No accounts found");
            }
            match output_format {
                OutputFormat::Json => output_json("accounts", &list),
                OutputFormat::Text => {
                    println!("{:<6} {:<25} {:>14} {}", "ID", "NAME", "BALANCE", "COLOR");
                    println!("{}", "-".repeat(56));
                    for account in &list {
                        print_account(account);
                    }
                    Ok(())
                }
            }
        }
        AccountCommands::Get { id } => {
            let account = ctx.within(&scope, accounts.get(id)).await?;
            match output_format {
                OutputFormat::Json => output_json("account", &account),
                OutputFormat::Text => {
                    print_account(&account);
                    Ok(())
                }
            }
        }
        AccountCommands::Create { name, balance, color } => {
            let data = AccountCreate::new(name, balance, color);
            data.validate().map_err(anyhow::Error::msg)?;

            let account = ctx.within(&scope, accounts.create(&data)).await?;
            output_success(
                output_format,
                "Conta criada com sucesso!",
                Some(json!({ "account": account })),
            )
        }
        AccountCommands::Update { id, name, balance, color } => {
            let data = AccountUpdate { name, balance, color };
            data.validate().map_err(anyhow::Error::msg)?;

            let account = ctx.within(&scope, accounts.update(id, &data)).await?;
            output_success(
                output_format,
                "Conta atualizada com sucesso!",
                Some(json!({ "account": account })),
            )
        }
        AccountCommands::Delete { id } => {
            ctx.within(&scope, accounts.delete(id)).await?;
            output_success(output_format, "Conta deletada com sucesso!", Some(json!({ "id": id })))
        }
    }
}

fn print_account(account: &Account) {
    println!("{:<6} {:<25} {:>14} {}", account.id, account.name, account.balance, account.color);
}
