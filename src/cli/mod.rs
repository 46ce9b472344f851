//! CLI interface for board-updater
//!
//! Provides subcommands for:
//! - `price`: Store a new price snapshot
//! - `feed`: Store new feed posts
//! - `all`: Run both updaters
//! - `status`: Show the latest stored data
//! - `config`: Show configuration

mod status;
mod update;

pub use status::StatusArgs;
pub use update::{run_updates, UpdateTarget};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "board-updater")]
#[command(about = "Price and feed updaters for the BTB community board")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch quotes and store a price snapshot
    Price,
    /// Fetch the feed and store unseen posts
    Feed,
    /// Run the price and feed updaters one after the other
    All,
    /// Show the latest stored price and posts
    Status(StatusArgs),
    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_commands() {
        let cli = Cli::try_parse_from(["board-updater", "price"]).unwrap();
        assert!(matches!(cli.command, Commands::Price));
        assert_eq!(cli.config, "config.toml");

        let cli = Cli::try_parse_from(["board-updater", "feed"]).unwrap();
        assert!(matches!(cli.command, Commands::Feed));

        let cli = Cli::try_parse_from(["board-updater", "--config", "/etc/board.toml", "all"]).unwrap();
        assert!(matches!(cli.command, Commands::All));
        assert_eq!(cli.config, "/etc/board.toml");
    }

    #[test]
    fn test_parse_status_limit() {
        let cli = Cli::try_parse_from(["board-updater", "status", "--limit", "3"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert_eq!(args.limit, 3),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["board-updater", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status(StatusArgs { limit: 5 })));
        assert!(matches!(
            Cli::try_parse_from(["board-updater", "config"]).unwrap().command,
            Commands::Config
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["board-updater"]).is_err());
    }
}
