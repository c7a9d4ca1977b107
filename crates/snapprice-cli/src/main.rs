mod crawl;
mod persist;
#[cfg(test)]
mod test_support;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "snapprice-cli")]
#[command(about = "Storefront catalog crawler with price history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the unattended crawl loop
    Crawl {
        /// Crawl a single named brand for one cycle, then exit
        #[arg(long)]
        brand: Option<String>,
    },
    /// Apply pending database migrations and exit
    Migrate,
    /// Print the distinct brand set known to the store
    Brands,
    /// Print item and price-point counts
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = snapprice_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = snapprice_db::PoolConfig::from_app_config(&config);
    let pool = snapprice_db::connect_pool(&config.database_url, pool_config).await?;
    snapprice_db::ping(&pool).await?;

    match cli.command {
        Commands::Crawl { brand } => {
            snapprice_db::run_migrations(&pool).await?;

            let client = snapprice_scraper::SearchClient::new(
                &config.base_url,
                config.scraper_request_timeout_secs,
                &config.scraper_user_agent,
                config.scraper_max_retries,
                config.scraper_retry_backoff_base_secs,
            )?;
            let crawler = crawl::Crawler::new(snapprice_db::PgCatalog::new(pool), client, &config);

            match brand {
                Some(brand) => {
                    let end = crawler.crawl_brand(&brand, 1).await?;
                    println!("crawl of '{brand}' finished: {end:?}");
                }
                None => {
                    tracing::info!(
                        env = %config.env,
                        base_url = %config.base_url,
                        "starting unattended crawl loop"
                    );
                    crawler.run().await;
                }
            }
        }

        Commands::Migrate => {
            snapprice_db::run_migrations(&pool).await?;
            println!("migrations applied");
        }

        Commands::Brands => {
            let brands = snapprice_db::distinct_brands(&pool).await?;
            if brands.is_empty() {
                println!("no brands yet; seed at least one item row to start crawling");
            } else {
                println!("{} brands:", brands.len());
                for brand in &brands {
                    println!("  {brand}");
                }
            }
        }

        Commands::Stats => {
            let items = snapprice_db::item_count(&pool).await?;
            let prices = snapprice_db::price_point_count(&pool).await?;
            println!("items        : {items}");
            println!("price points : {prices}");
        }
    }

    Ok(())
}
