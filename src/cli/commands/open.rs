use serde_json::json;

use crate::cli::utils::*;
use crate::cli::{CliContext, OutputFormat};
use crate::routes::{Navigation, Route};

/// Navigate to `route` and report the page that actually renders
pub async fn handle(route: Route, ctx: &CliContext) -> anyhow::Result<()> {
    let navigation = ctx.finance.navigator.navigate(route).await;
    let redirected = navigation.is_redirect();

    let (landed, identity) = match navigation {
        Navigation::Render { route, session, .. } => (route, session.map(|s| s.into_identity())),
        Navigation::Redirect { to, .. } => (to, None),
    };

    match ctx.output {
        OutputFormat::Json => output_json(
            "navigation",
            json!({
                "requested": route.path(),
                "landed": landed.path(),
                "redirected": redirected,
                "session": identity,
            }),
        ),
        OutputFormat::Text => {
            if redirected {
                println!("{} -> {} (sessão ausente ou expirada)", route, landed);
            } else {
                println!("{}", landed);
                if let Some(identity) = identity {
                    println!("Sessão: {}", identity);
                }
            }
            Ok(())
        }
    }
}
