use crate::{
    model::{Error, RateSnapshot, Result},
    provider::Provider,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct QuotesApi {
    url: String,
    client: Client,
}

impl QuotesApi {
    pub fn new(url: &str, timeout: Duration) -> Result<QuotesApi> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(QuotesApi {
            url: url.to_string(),
            client,
        })
    }
}

#[rocket::async_trait]
impl Provider for QuotesApi {
    fn name(&self) -> String {
        "quotes_api".into()
    }

    #[instrument(skip(self), fields(provider = %self.name()))]
    async fn fetch(&self) -> Result<RateSnapshot> {
        let res = self.client.get(&self.url).send().await?.error_for_status()?;
        let snapshot = res.json::<RateSnapshot>().await?;
        if !snapshot.success {
            return Err(Error::UpstreamFetchFailed(
                "provider reported success = false".into(),
            ));
        }
        debug!(
            quotes = snapshot.quotes.len(),
            timestamp = snapshot.timestamp,
            "Fetched snapshot"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod test {
    use super::QuotesApi;
    use crate::{model::Error, provider::Provider};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider(status: u16, body: &str) -> (MockServer, QuotesApi) {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        let url = format!("{}/live", mock_server.uri());
        let provider = QuotesApi::new(&url, Duration::from_secs(5)).unwrap();
        (mock_server, provider)
    }

    #[tokio::test]
    async fn fetch() {
        let body = r#"{"success": true, "timestamp": 1700000000, "source": "USD", "quotes": {"USDEUR": 0.9, "USDJPY": 150.0}}"#;
        let (_server, provider) = provider(200, body).await;
        let snapshot = provider.fetch().await.unwrap();
        assert_eq!(1700000000, snapshot.timestamp);
        assert_eq!(2, snapshot.quotes.len());
        assert_eq!(Some(&0.9), snapshot.quotes.get("USDEUR"));
    }

    #[tokio::test]
    async fn fetch_unsuccessful() {
        let body = r#"{"success": false, "error": {"code": 101}}"#;
        let (_server, provider) = provider(200, body).await;
        let res = provider.fetch().await;
        assert!(matches!(res, Err(Error::UpstreamFetchFailed(_))));
    }

    #[tokio::test]
    async fn fetch_server_error() {
        let (_server, provider) = provider(500, "").await;
        let res = provider.fetch().await;
        assert!(matches!(res, Err(Error::UpstreamFetchFailed(_))));
    }

    #[tokio::test]
    async fn fetch_malformed_body() {
        let (_server, provider) = provider(200, "<html>maintenance</html>").await;
        let res = provider.fetch().await;
        assert!(matches!(res, Err(Error::UpstreamFetchFailed(_))));
    }
}
