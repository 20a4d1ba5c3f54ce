use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freshet::app::AppContext;
use freshet::cli::{commands, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.clone())?;

    match cli.command {
        Commands::Fetch {
            source,
            params,
            item_location,
            raw,
            json,
        } => {
            commands::fetch(&ctx, &source, &params, item_location.as_deref(), raw, json).await?;
        }
        Commands::Render {
            source,
            params,
            item_location,
            template,
            chasing,
            start,
            count,
            output,
        } => {
            commands::render(
                &ctx,
                &source,
                &params,
                item_location.as_deref(),
                template.as_deref(),
                chasing.as_deref(),
                start,
                count,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Feeds => {
            commands::list_feeds(&ctx)?;
        }
    }

    Ok(())
}
