use clap::Parser;
use tracing_subscriber::EnvFilter;
use treesync::config::Cli;
use treesync::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Capture arguments once; everything downstream reads Config
    let config = Config::try_from(cli)?;

    treesync::commands::sync::run(&config).await?;

    Ok(())
}
