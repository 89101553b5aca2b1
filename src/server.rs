use anyhow::Result;
use axum::{
    extract::{ Path, Query, State },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{ json, Value };
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::fetcher::CoinMarketCapSource;
use crate::logger::{ log, LogTag };
use crate::types::Cryptocurrency;

const DEFAULT_START: u32 = 1;
const DEFAULT_LIMIT: u32 = 14;

#[derive(Debug, Deserialize)]
pub struct ListingParams {
    pub start: Option<u32>,
    pub limit: Option<u32>,
}

impl ListingParams {
    fn resolve(&self) -> (u32, u32) {
        (self.start.unwrap_or(DEFAULT_START), self.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

/// Start the HTTP surface on the given port. Runs until the listener dies.
pub async fn start_web_server(source: Arc<CoinMarketCapSource>, port: u16) -> Result<()> {
    let app = Router::new()
        .route("/api/cryptocurrencies", get(get_all_cryptocurrencies))
        .route("/api/cryptocurrencies/:id", get(get_cryptocurrency))
        .layer(CorsLayer::permissive())
        .with_state(source);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log(LogTag::Server, "INFO", &format!("Listening on http://{}", addr));

    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_all_cryptocurrencies(
    State(source): State<Arc<CoinMarketCapSource>>,
    Query(params): Query<ListingParams>
) -> Result<Json<Vec<Cryptocurrency>>, (StatusCode, Json<Value>)> {
    let (start, limit) = params.resolve();
    match source.get_all_cryptocurrencies(start, limit).await {
        Ok(cryptos) => Ok(Json(cryptos)),
        Err(e) => Err(upstream_error(e)),
    }
}

async fn get_cryptocurrency(
    State(source): State<Arc<CoinMarketCapSource>>,
    Path(id): Path<i64>
) -> Result<Json<Cryptocurrency>, (StatusCode, Json<Value>)> {
    match source.get_cryptocurrency(id).await {
        Ok(Some(crypto)) => Ok(Json(crypto)),
        Ok(None) =>
            Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("No cryptocurrency with id {}", id) })),
            )),
        Err(e) => Err(upstream_error(e)),
    }
}

fn upstream_error(e: crate::errors::CoindataError) -> (StatusCode, Json<Value>) {
    log(LogTag::Server, "ERROR", &format!("Upstream fetch failed: {}", e));
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": "Failed to fetch data from CoinMarketCap API" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_params_default_like_the_resolver() {
        let params = ListingParams { start: None, limit: None };
        assert_eq!(params.resolve(), (1, 14));
    }

    #[test]
    fn listing_params_pass_through_explicit_values() {
        let params = ListingParams { start: Some(30), limit: Some(5) };
        assert_eq!(params.resolve(), (30, 5));
    }
}
