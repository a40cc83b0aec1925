use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::routes::Route;

pub async fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    let (_, scope) = ctx.enter(Route::Dashboard).await?;
    let summary = ctx.within(&scope, ctx.finance.dashboard.summary()).await?;

    match ctx.output {
        OutputFormat::Json => output_json("dashboard", &summary),
        OutputFormat::Text => {
            println!("Saldo total: {}", summary.total_balance);
            println!(
                "{} contas, {} categorias de despesa, {} de receita",
                summary.account_count, summary.expense_categories, summary.income_categories
            );
            if !summary.accounts.is_empty() {
                println!();
                for account in &summary.accounts {
                    println!("  {:<25} {:>14}", account.name, account.balance);
                }
            }
            Ok(())
        }
    }
}
