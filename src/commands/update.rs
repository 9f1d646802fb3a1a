use crate::cli::UpdateArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::services::ArtifactFetch;
use crate::term;
use tracing::info;

pub async fn execute<F: ArtifactFetch>(args: UpdateArgs, ctx: &AppContext<F>) -> Result<()> {
    let (version, is_latest) = match args.version {
        Some(version) => (version, false),
        None => (ctx.resolver.resolve_latest().await?, true),
    };

    info!(
        path = %args.path.display(),
        %version,
        is_latest,
        "Starting update"
    );

    let jar = ctx.updater.update(&args.path, &version, is_latest).await?;

    term::success(format!("{} {} is ready", ctx.config.artifact, version));
    term::output(jar.display());
    Ok(())
}
