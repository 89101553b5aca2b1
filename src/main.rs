use anyhow::Result;
use std::sync::Arc;

use coindata::config::CONFIGS;
use coindata::errors::CoindataError;
use coindata::fetcher::CoinMarketCapSource;
use coindata::logger::{ self, log, LogTag };
use coindata::server::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    logger::header("cached CoinMarketCap listings service");

    let api_key = CONFIGS.api_key.clone().ok_or(CoindataError::MissingApiKey)?;

    log(
        LogTag::Config,
        "INFO",
        &format!(
            "Port {} | cache capacity {} | upstream {}",
            CONFIGS.port,
            CONFIGS.cache_max_size,
            CONFIGS.api_url
        )
    );

    let source = Arc::new(
        CoinMarketCapSource::new(&CONFIGS.api_url, &api_key, CONFIGS.cache_max_size)?
    );

    let server = tokio::spawn(start_web_server(source.clone(), CONFIGS.port));

    tokio::select! {
        result = server => {
            result??;
        }
        _ = tokio::signal::ctrl_c() => {
            log(
                LogTag::Server,
                "INFO",
                &format!("Shutting down, {} entries cached", source.cached_entries())
            );
        }
    }

    Ok(())
}
