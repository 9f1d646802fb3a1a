use clap::Parser;
use qsuits_updater::cli::{Cli, Commands};
use qsuits_updater::commands;
use qsuits_updater::config::UpdaterConfig;
use qsuits_updater::context::AppContext;
use qsuits_updater::error::Error;
use qsuits_updater::term;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    term::init(cli.quiet, cli.color);
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        term::error(&e);
        if let Some(hint) = commands::hint_for(&e) {
            term::hint(hint);
        }
        return e.exit_code().into();
    }

    std::process::ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), Error> {
    if let Commands::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let config = UpdaterConfig::load_or_default(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Latest => commands::latest::execute(&ctx).await,
        Commands::Update(args) => commands::update::execute(args, &ctx).await,
        Commands::Exists(args) => commands::exists::execute(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "qsuits_updater=warn",
        1 => "qsuits_updater=info",
        2 => "qsuits_updater=debug",
        _ => "qsuits_updater=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
