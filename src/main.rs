use anyhow::{Context, Result};
use sink::cli::output::{banner, style, CHECK};
use sink::cli::{output::SpinnerReporter, Cli};
use sink::{migration_steps, MigrationConfig, MigrationContext, PipelineRunner};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = match &cli.config {
        Some(path) => MigrationConfig::from_file(path)?,
        None => MigrationConfig::default(),
    };
    debug!("Effective configuration: {:?}", config);

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let ctx = Arc::new(MigrationContext::from_args(cli.paths.clone(), config));

    println!("{}", banner(env!("CARGO_PKG_VERSION")));
    println!();

    let steps = migration_steps(ctx.clone())?;
    let runner = PipelineRunner::new(steps).with_reporter(Arc::new(SpinnerReporter::new()));

    match runner.run().await {
        Ok(state) => {
            println!(
                "\n{} {} migrated {}",
                CHECK,
                style(ctx.target.display()).bold(),
                style("successfully").green()
            );
            debug!("Run {} finished {} steps", state.run_id, state.succeeded_steps());
            Ok(())
        }
        Err(failure) => {
            // The spinner reporter has already shown the failing step and its error
            debug!(
                "Run {} aborted at step {} [{}]",
                failure.state.run_id,
                failure.index + 1,
                failure.error.kind()
            );
            std::process::exit(1);
        }
    }
}
