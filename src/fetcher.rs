use parking_lot::Mutex;
use reqwest::Client;
use std::time::Duration;

use crate::cache::LfuCache;
use crate::errors::CoindataError;
use crate::logger::{ log, LogTag };
use crate::types::{ Cryptocurrency, ListingResponse };

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fetch layer over the CoinMarketCap listings endpoint.
///
/// Repeated requests with the same parameters are served from an LFU cache
/// instead of hitting the upstream API again. The cache lives behind a mutex;
/// the lock is never held across a network await.
pub struct CoinMarketCapSource {
    client: Client,
    api_url: String,
    api_key: String,
    cache: Mutex<LfuCache<ListingResponse>>,
}

impl CoinMarketCapSource {
    pub fn new(api_url: &str, api_key: &str, cache_max_size: usize) -> Result<Self, CoindataError> {
        let cache = LfuCache::new(cache_max_size)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            cache: Mutex::new(cache),
        })
    }

    /// Build a canonical cache key from the endpoint and query parameters.
    ///
    /// Parameter names are sorted so that semantically identical requests map
    /// to the same key no matter how the caller ordered them.
    fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
        let mut pairs: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        pairs.sort();
        format!("{}?{}", endpoint, pairs.join("&"))
    }

    /// Fetch a listings page, consulting the cache first.
    ///
    /// A failed fetch never touches the cache, so upstream errors cannot
    /// corrupt cached state.
    pub async fn fetch_listings(
        &self,
        params: &[(&str, String)]
    ) -> Result<ListingResponse, CoindataError> {
        let cache_key = Self::cache_key(&self.api_url, params);

        if let Some(cached) = self.cache.lock().get(&cache_key) {
            log(LogTag::Fetch, "DEBUG", &format!("Cache hit for key: {}", cache_key));
            return Ok(cached);
        }

        let response = self.client
            .get(&self.api_url)
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .header("Accept", "application/json")
            .query(params)
            .send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log(
                LogTag::Fetch,
                "ERROR",
                &format!("Upstream returned {} for key: {}", status, cache_key)
            );
            return Err(CoindataError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let listing = response.json::<ListingResponse>().await?;
        self.cache.lock().set(&cache_key, listing.clone());
        log(LogTag::Fetch, "DEBUG", &format!("Fetched and cached data for key: {}", cache_key));
        Ok(listing)
    }

    /// Get a single cryptocurrency by CMC id.
    pub async fn get_cryptocurrency(
        &self,
        id: i64
    ) -> Result<Option<Cryptocurrency>, CoindataError> {
        let params = [("id", id.to_string())];
        let listing = self.fetch_listings(&params).await?;
        Ok(listing.data.into_iter().find(|crypto| crypto.id == id))
    }

    /// Get a page of cryptocurrencies, 1-based start rank.
    pub async fn get_all_cryptocurrencies(
        &self,
        start: u32,
        limit: u32
    ) -> Result<Vec<Cryptocurrency>, CoindataError> {
        let params = [("limit", limit.to_string()), ("start", start.to_string())];
        let listing = self.fetch_listings(&params).await?;
        Ok(listing.data)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_order_insensitive() {
        let forward = [("start", "1".to_string()), ("limit", "14".to_string())];
        let reversed = [("limit", "14".to_string()), ("start", "1".to_string())];

        let a = CoinMarketCapSource::cache_key("https://api.example.com/listings", &forward);
        let b = CoinMarketCapSource::cache_key("https://api.example.com/listings", &reversed);

        assert_eq!(a, b);
        assert_eq!(a, "https://api.example.com/listings?limit=14&start=1");
    }

    #[test]
    fn cache_key_distinguishes_different_params() {
        let page_one = [("start", "1".to_string()), ("limit", "14".to_string())];
        let page_two = [("start", "15".to_string()), ("limit", "14".to_string())];

        assert_ne!(
            CoinMarketCapSource::cache_key("endpoint", &page_one),
            CoinMarketCapSource::cache_key("endpoint", &page_two)
        );
    }

    #[test]
    fn zero_cache_size_fails_construction() {
        assert!(CoinMarketCapSource::new("https://api.example.com", "key", 0).is_err());
    }
}
