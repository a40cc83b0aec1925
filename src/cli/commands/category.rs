use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::models::{Category, CategoryCreate, CategoryQuery, CategoryType, CategoryUpdate, Page};
use crate::routes::Route;

#[derive(Subcommand)]
pub enum CategoryCommands {
    #[command(about = "List categories")]
    List {
        #[arg(long, help = "Only EXPENSES or INCOME")]
        kind: Option<CategoryType>,
        #[arg(long, default_value_t = Page::DEFAULT_OFFSET)]
        offset: u32,
        #[arg(long, default_value_t = Page::DEFAULT_LIMIT)]
        limit: u32,
    },

    #[command(about = "Show one category")]
    Get {
        #[arg(help = "Category ID")]
        id: i64,
    },

    #[command(about = "Create a category")]
    Create {
        #[arg(help = "Category name")]
        name: String,
        #[arg(help = "EXPENSES or INCOME")]
        kind: CategoryType,
        #[arg(help = "Hex color, e.g. #ef4444")]
        color: String,
    },

    #[command(about = "Rename or recolor a category (the kind cannot change)")]
    Update {
        #[arg(help = "Category ID")]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },

    #[command(about = "Delete a category")]
    Delete {
        #[arg(help = "Category ID")]
        id: i64,
    },
}

pub async fn handle(cmd: CategoryCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let (_, scope) = ctx.enter(Route::Categories).await?;
    let categories = &ctx.finance.categories;
    let output_format = &ctx.output;

    match cmd {
        CategoryCommands::List { kind, offset, limit } => {
            let query = CategoryQuery {
                page: Page::new(offset, limit),
                category_type: kind,
            };
            let list = ctx.within(&scope, categories.list(Some(query))).await?;

            if list.is_empty() {
                return output_empty_collection(output_format, "categories", "No categories found");
            }
            match output_format {
                OutputFormat::Json => output_json("categories", &list),
                OutputFormat::Text => {
                    println!("{:<6} {:<25} {:<9} {}", "ID", "NAME", "KIND", "COLOR");
                    println!("{}", "-".repeat(50));
                    for category in &list {
                        print_category(category);
                    }
                    Ok(())
                }
            }
        }
        CategoryCommands::Get { id } => {
            let category = ctx.within(&scope, categories.get(id)).await?;
            match output_format {
                OutputFormat::Json => output_json("category", &category),
                OutputFormat::Text => {
                    print_category(&category);
                    Ok(())
                }
            }
        }
        CategoryCommands::Create { name, kind, color } => {
            let data = CategoryCreate {
                name,
                category_type: kind,
                color,
            };
            data.validate().map_err(anyhow::Error::msg)?;

            let category = ctx.within(&scope, categories.create(&data)).await?;
            output_success(
                output_format,
                "Categoria criada com sucesso!",
                Some(json!({ "category": category })),
            )
        }
        CategoryCommands::Update { id, name, color } => {
            let data = CategoryUpdate { name, color };
            data.validate().map_err(anyhow::Error::msg)?;

            let category = ctx.within(&scope, categories.update(id, &data)).await?;
            output_success(
                output_format,
                "Categoria atualizada com sucesso!",
                Some(json!({ "category": category })),
            )
        }
        CategoryCommands::Delete { id } => {
            ctx.within(&scope, categories.delete(id)).await?;
            output_success(output_format, "Categoria deletada com sucesso!", Some(json!({ "id": id })))
        }
    }
}

fn print_category(category: &Category) {
    println!(
        "{:<6} {:<25} {:<9} {}",
        category.id,
        category.name,
        category.category_type.as_str(),
        category.color
    );
}
