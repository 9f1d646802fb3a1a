use crate::context::AppContext;
use crate::error::Result;
use crate::services::ArtifactFetch;
use crate::term;
use tracing::info;

pub async fn execute<F: ArtifactFetch>(ctx: &AppContext<F>) -> Result<()> {
    let version = ctx.resolver.resolve_latest().await?;
    info!(%version, artifact = %ctx.config.artifact, "Latest version resolved");
    term::output(&version);
    Ok(())
}
