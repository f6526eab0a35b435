use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weibo_harvest::app::AppContext;
use weibo_harvest::cli::{commands, Cli, Commands};
use weibo_harvest::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the harvested JSON lines, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Services = cli.command {
        commands::list_services();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;
    let sweeper = ctx.spawn_cache_sweeper();

    match cli.command {
        Commands::User { uid, limit } => {
            commands::harvest_user(&ctx, &uid, limit).await?;
        }
        Commands::Timeline { sub, limit } => {
            commands::harvest_timeline(&ctx, &sub, limit).await?;
        }
        Commands::Container { uid } => {
            commands::show_container(&ctx, &uid).await?;
        }
        Commands::Services => unreachable!("handled before loading config"),
    }

    sweeper.abort();
    Ok(())
}
