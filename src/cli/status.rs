//! Status command implementation

use crate::config::Config;
use crate::store::{SqliteStore, Store};
use clap::Args;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Number of recent posts to show
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

impl StatusArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        println!("board-updater status");

        let path = &config.database.path;
        if !path.exists() {
            println!("  Database: none at {}", path.display());
            return Ok(());
        }

        let store = SqliteStore::open_read_only(path)?;
        let conn = store.connect()?;
        println!("  Database: {}", store.path().display());

        match conn.latest_price()? {
            Some(price) => {
                println!("  Price at {}:", price.generated_at.format("%Y-%m-%d %H:%M UTC"));
                println!("    USD/BTC: {:.2}", price.usd_per_btc);
                println!(
                    "    {}: {:.8} BTC / {:.6} USD",
                    config.price.market_pair, price.secondary.btc, price.secondary.usd
                );
                match price.percent_change {
                    Some(change) => println!("    Change: {:+.2}%", change),
                    None => println!("    Change: n/a"),
                }
            }
            None => println!("  Price: none stored"),
        }

        let posts = conn.recent_posts(self.limit)?;
        println!("  Recent posts: {}", posts.len());
        for post in posts {
            println!(
                "    [{}] {} ({})",
                post.published_at.format("%Y-%m-%d %H:%M"),
                post.title,
                post.source
            );
        }

        Ok(())
    }
}
