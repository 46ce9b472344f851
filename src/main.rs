use board_updater::cli::{run_updates, Cli, Commands, UpdateTarget};
use board_updater::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    board_updater::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Price => run_updates(&config, &[UpdateTarget::Price]).await?,
        Commands::Feed => run_updates(&config, &[UpdateTarget::Feed]).await?,
        Commands::All => run_updates(&config, &[UpdateTarget::Price, UpdateTarget::Feed]).await?,
        Commands::Status(args) => args.execute(&config)?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Price: {} [{}]",
                config.price.exchange_rate_url, config.price.quote_field
            );
            println!(
                "  Market: {} [{}]",
                config.price.market_data_url, config.price.market_pair
            );
            println!("  Feed: {} as {}", config.feed.url, config.feed.source);
            println!("  Database: {}", config.database.path.display());
            match config.http.timeout_secs {
                Some(secs) => println!("  HTTP timeout: {}s", secs),
                None => println!("  HTTP timeout: none"),
            }
        }
    }

    Ok(())
}
