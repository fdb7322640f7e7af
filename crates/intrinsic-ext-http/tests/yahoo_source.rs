//! Yahoo price source over a canned transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use intrinsic_ext_http::{HttpClient, HttpResponse, YahooPriceSource};
use intrinsic_traits::{PriceSource, SourceType, Ticker, TraitError};

/// Replies with a fixed response and records requested URLs.
struct CannedClient {
    response: Result<HttpResponse, String>,
    urls: Mutex<Vec<String>>,
}

impl CannedClient {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(HttpResponse::new(status, body)),
            urls: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            urls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpClient for CannedClient {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse, TraitError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.response
            .clone()
            .map_err(TraitError::SourceNotAvailable)
    }
}

const META_CHART: &str = r#"{"chart":{"result":[{
    "meta":{"symbol":"META","regularMarketPrice":353.96,"regularMarketTime":1703883600},
    "timestamp":[1703883600],
    "indicators":{"quote":[{"open":[358.99],"close":[353.96]}]}
}],"error":null}}"#;

#[tokio::test]
async fn fetches_latest_close() {
    let client = CannedClient::new(200, META_CHART);
    let source = YahooPriceSource::with_client(client.clone()).with_base_url("http://quotes.test");

    assert_eq!(source.source_type(), SourceType::Snapshot);

    let quote = source.latest_price(&Ticker::new("meta")).await.unwrap().unwrap();
    assert_eq!(quote.price, 353.96);
    assert_eq!(quote.ticker, Ticker::new("META"));
    assert_eq!(quote.as_of.timestamp(), 1_703_883_600);

    let urls = client.urls.lock().unwrap();
    assert_eq!(
        urls.as_slice(),
        ["http://quotes.test/v8/finance/chart/META?range=1d&interval=1d"]
    );
}

#[tokio::test]
async fn missing_symbol_has_no_price() {
    let client = CannedClient::new(
        404,
        r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#,
    );
    let source = YahooPriceSource::with_client(client);
    assert!(source.latest_price(&Ticker::new("ZZZZ")).await.unwrap().is_none());
}

#[tokio::test]
async fn transport_failure_is_unavailable() {
    let source = YahooPriceSource::with_client(CannedClient::failing("connection refused"));
    let err = source.latest_price(&Ticker::new("META")).await.unwrap_err();
    assert!(matches!(err, TraitError::SourceNotAvailable(msg) if msg.contains("refused")));
}
