use std::io::Write;

use crate::app::{AppContext, HarvestError, Result};
use crate::harvest::ArchiveReader;
use crate::provision;

/// Drain `reader` into `out` as JSON lines. Returns the number written.
pub async fn harvest<R, W>(mut reader: R, limit: Option<usize>, out: &mut W) -> Result<usize>
where
    R: ArchiveReader,
    W: Write,
{
    reader.initialize()?;

    let mut written = 0;
    while limit.map_or(true, |max| written < max) {
        let Some(article) = reader.next().await? else {
            break;
        };
        let line = serde_json::to_string(&article)
            .map_err(|e| HarvestError::Other(format!("Failed to encode article: {}", e)))?;
        writeln!(out, "{}", line)?;
        written += 1;
    }

    out.flush()?;
    tracing::info!("Harvested {} articles", written);
    Ok(written)
}

pub async fn harvest_user(ctx: &AppContext, uid: &str, limit: Option<usize>) -> Result<usize> {
    let stdout = std::io::stdout();
    harvest(ctx.user_reader(uid), limit, &mut stdout.lock()).await
}

pub async fn harvest_timeline(ctx: &AppContext, sub: &str, limit: Option<usize>) -> Result<usize> {
    let stdout = std::io::stdout();
    harvest(ctx.timeline_reader(sub), limit, &mut stdout.lock()).await
}

pub async fn show_container(ctx: &AppContext, uid: &str) -> Result<()> {
    let container_id = ctx.resolver.resolve(uid).await?;
    println!("{}", container_id);
    Ok(())
}

pub fn list_services() {
    for service in provision::services() {
        println!("{} - {}", service.name, service.description);
        for option in service.options {
            let required = if option.optional { "optional" } else { "required" };
            println!("    {} ({}): {}", option.name, required, option.description);
        }
    }
}
