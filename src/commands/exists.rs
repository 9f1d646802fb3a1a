use crate::cli::ExistsArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::services::ArtifactFetch;
use crate::term;

pub fn execute<F: ArtifactFetch>(args: ExistsArgs, ctx: &AppContext<F>) -> Result<()> {
    let jar = ctx.updater.exists(&args.path, &args.version)?;
    term::output(jar.display());
    Ok(())
}
