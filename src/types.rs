use serde::{ Deserialize, Serialize };

/// Price and movement figures for one quote currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub price: Option<f64>,
    pub volume_24h: Option<f64>,
    pub volume_change_24h: Option<f64>,
    pub percent_change_1h: Option<f64>,
    pub percent_change_24h: Option<f64>,
    pub percent_change_7d: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_dominance: Option<f64>,
    pub fully_diluted_market_cap: Option<f64>,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCurrency {
    #[serde(rename = "USD")]
    pub usd: Option<Quote>,
    #[serde(rename = "BTC")]
    pub btc: Option<Quote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cryptocurrency {
    pub id: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    pub cmc_rank: Option<i64>,
    pub num_market_pairs: Option<i64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    pub infinite_supply: Option<bool>,
    pub last_updated: Option<String>,
    pub date_added: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub platform: Option<serde_json::Value>,
    pub self_reported_circulating_supply: Option<f64>,
    pub self_reported_market_cap: Option<f64>,
    pub quote: Option<QuoteCurrency>,
}

/// Request accounting block CMC attaches to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub timestamp: String,
    pub error_code: i64,
    pub error_message: Option<String>,
    pub elapsed: Option<i64>,
    pub credit_count: Option<i64>,
}

/// Full payload of /v1/cryptocurrency/listings/latest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Vec<Cryptocurrency>,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "status": {
            "timestamp": "2024-03-01T12:00:00.000Z",
            "error_code": 0,
            "error_message": null,
            "elapsed": 14,
            "credit_count": 1
        },
        "data": [
            {
                "id": 1,
                "name": "Bitcoin",
                "symbol": "BTC",
                "slug": "bitcoin",
                "cmc_rank": 1,
                "num_market_pairs": 11341,
                "circulating_supply": 19640000.0,
                "total_supply": 19640000.0,
                "max_supply": 21000000.0,
                "infinite_supply": false,
                "last_updated": "2024-03-01T11:58:00.000Z",
                "date_added": "2010-07-13T00:00:00.000Z",
                "tags": ["mineable", "pow"],
                "platform": null,
                "self_reported_circulating_supply": null,
                "self_reported_market_cap": null,
                "quote": {
                    "USD": {
                        "price": 62000.5,
                        "volume_24h": 35000000000.0,
                        "volume_change_24h": 2.1,
                        "percent_change_1h": 0.2,
                        "percent_change_24h": 1.5,
                        "percent_change_7d": 8.3,
                        "market_cap": 1210000000000.0,
                        "market_cap_dominance": 52.4,
                        "fully_diluted_market_cap": 1302000000000.0,
                        "last_updated": "2024-03-01T11:58:00.000Z"
                    }
                }
            }
        ]
    }"#;

    #[test]
    fn deserializes_listing_payload() {
        let response: ListingResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.status.error_code, 0);
        assert_eq!(response.data.len(), 1);

        let bitcoin = &response.data[0];
        assert_eq!(bitcoin.id, 1);
        assert_eq!(bitcoin.symbol, "BTC");
        assert_eq!(bitcoin.max_supply, Some(21000000.0));

        let usd = bitcoin.quote.as_ref().unwrap().usd.as_ref().unwrap();
        assert_eq!(usd.price, Some(62000.5));
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let minimal = r#"{
            "status": { "timestamp": "2024-03-01T12:00:00.000Z", "error_code": 0 },
            "data": [
                { "id": 74, "name": "Dogecoin", "symbol": "DOGE", "slug": "dogecoin" }
            ]
        }"#;
        let response: ListingResponse = serde_json::from_str(minimal).unwrap();
        assert_eq!(response.data[0].symbol, "DOGE");
        assert!(response.data[0].quote.is_none());
    }
}
