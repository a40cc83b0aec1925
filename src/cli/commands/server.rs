use clap::Subcommand;
use serde_json::json;

use crate::api::ApiClient;
use crate::cli::config::*;
use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::config::ApiConfig;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Register remote API server")]
    Add {
        #[arg(help = "Server name")]
        name: String,
        #[arg(help = "Server base URL, e.g. http://localhost:8000")]
        url: String,
        #[arg(long, default_value = "", help = "Free-form description")]
        description: String,
    },

    #[command(about = "List registered servers")]
    List,

    #[command(about = "Switch to server (persistent selection)")]
    Use {
        #[arg(help = "Server name to switch to")]
        name: String,
    },

    #[command(about = "Remove server from registry")]
    Delete {
        #[arg(help = "Server name to delete")]
        name: String,
    },

    #[command(about = "Check whether a server answers (defaults to current server)")]
    Ping {
        #[arg(help = "Server name to ping")]
        name: Option<String>,
    },
}

pub async fn handle(cmd: ServerCommands, ctx: &CliContext) -> anyhow::Result<()> {
    let output_format = &ctx.output;

    match cmd {
        ServerCommands::Add { name, url, description } => {
            url::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid server URL '{}': {}", url, e))?;

            let mut config = load_server_config()?;
            if config.servers.contains_key(&name) {
                anyhow::bail!("Server '{}' already exists", name);
            }
            config.servers.insert(name.clone(), ServerInfo::new(url.clone(), description));
            save_server_config(&config)?;

            let mut env_config = load_environment_config()?;
            if env_config.current_server.is_none() {
                env_config.current_server = Some(name.clone());
                save_environment_config(&env_config)?;
            }

            output_success(
                output_format,
                &format!("Server '{}' added ({})", name, url),
                Some(json!({ "server": { "name": name, "url": url } })),
            )
        }
        ServerCommands::List => {
            let config = load_server_config()?;
            let env_config = load_environment_config()?;

            if config.servers.is_empty() {
                return output_empty_collection(output_format, "servers", "No servers configured");
            }

            let mut names: Vec<_> = config.servers.keys().cloned().collect();
            names.sort();

            match output_format {
                OutputFormat::Json => {
                    let servers: Vec<_> = names
                        .iter()
                        .map(|name| {
                            let info = &config.servers[name];
                            json!({
                                "name": name,
                                "url": info.url,
                                "description": info.description,
                                "added_at": info.added_at,
                                "last_ping": info.last_ping,
                                "status": info.status,
                                "current": env_config.current_server.as_ref() == Some(name)
                            })
                        })
                        .collect();
                    output_json("servers", servers)?;
                }
                OutputFormat::Text => {
                    println!("{:<15} {:<35} {:<8} {:<17} {}", "NAME", "URL", "STATUS", "ADDED", "DESCRIPTION");
                    println!("{}", "-".repeat(90));

                    for name in &names {
                        let info = &config.servers[name];
                        let current_marker = if env_config.current_server.as_ref() == Some(name) { "*" } else { " " };
                        let status = serde_json::to_value(info.status)?;
                        println!(
                            "{}{:<14} {:<35} {:<8} {:<17} {}",
                            current_marker,
                            name,
                            info.url,
                            status.as_str().unwrap_or("unknown"),
                            info.added_at.format("%Y-%m-%d %H:%M"),
                            info.description
                        );
                    }
                }
            }
            Ok(())
        }
        ServerCommands::Use { name } => {
            let config = load_server_config()?;
            if !config.servers.contains_key(&name) {
                anyhow::bail!("Server '{}' not found", name);
            }

            let mut env_config = load_environment_config()?;
            env_config.current_server = Some(name.clone());
            save_environment_config(&env_config)?;

            output_success(
                output_format,
                &format!("Switched to server '{}'", name),
                Some(json!({ "current_server": name })),
            )
        }
        ServerCommands::Delete { name } => {
            let mut config = load_server_config()?;
            if config.servers.remove(&name).is_none() {
                anyhow::bail!("Server '{}' not found", name);
            }
            save_server_config(&config)?;

            let mut env_config = load_environment_config()?;
            if env_config.current_server.as_deref() == Some(name.as_str()) {
                env_config.current_server = None;
                save_environment_config(&env_config)?;
            }

            output_success(output_format, &format!("Server '{}' deleted successfully", name), None)
        }
        ServerCommands::Ping { name } => {
            let Some(name) = name else {
                let status = ping_server(ctx.finance.api.clone()).await;
                return report_ping(output_format, &ctx.server_url, status);
            };

            let mut config = load_server_config()?;
            let info = config
                .servers
                .get_mut(&name)
                .ok_or_else(|| anyhow::anyhow!("Server '{}' not found", name))?;

            let api = ApiClient::new(&ApiConfig {
                base_url: info.url.clone(),
                request_timeout_secs: 5,
                connect_timeout_secs: 5,
            })?;
            let status = ping_server(api).await;
            info.update_ping(status);
            let url = info.url.clone();
            save_server_config(&config)?;

            report_ping(output_format, &url, status)
        }
    }
}

fn report_ping(output_format: &OutputFormat, url: &str, status: ServerStatus) -> anyhow::Result<()> {
    match status {
        ServerStatus::Up => output_success(
            output_format,
            &format!("{} is up", url),
            Some(json!({ "url": url, "status": status })),
        ),
        ServerStatus::Down | ServerStatus::Unknown => anyhow::bail!("{} is not responding", url),
    }
}
