use clap::{Parser, Subcommand};

mod input;
mod migrate;
mod side_logs;

#[derive(Debug, Parser)]
#[command(name = "woomig")]
#[command(about = "WooCommerce to Shopify catalog migration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Migrate a WooCommerce product export into the Shopify store.
    Migrate(migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = woomig_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Migrate(args) => migrate::run_migrate(&config, &args).await?,
    }

    Ok(())
}
