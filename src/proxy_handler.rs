use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Proxy, StatusCode};
use std::time::Duration;

/// Result of probing one candidate. A failed probe keeps no detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Validated(String),
    Discarded,
}

#[async_trait]
pub trait ProxyProber: Send + Sync {
    async fn probe(&self, candidate: &str) -> ProbeOutcome;
}

pub fn normalize_proxy(candidate: &str) -> String {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_string()
    } else {
        format!("http://{}", candidate)
    }
}

// Checks a proxy by fetching a fixed endpoint through it
pub struct HttpProber {
    check_url: String,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(check_url: String, timeout: Duration) -> Self {
        HttpProber { check_url, timeout }
    }

    async fn request_through(&self, proxy: &str) -> Result<StatusCode, reqwest::Error> {
        let client = Client::builder()
            .proxy(Proxy::http(proxy)?)
            .proxy(Proxy::https(proxy)?)
            .timeout(self.timeout)
            .build()?;
        let response = client.get(&self.check_url).send().await?;
        Ok(response.status())
    }
}

#[async_trait]
impl ProxyProber for HttpProber {
    async fn probe(&self, candidate: &str) -> ProbeOutcome {
        let proxy = normalize_proxy(candidate);
        match self.request_through(&proxy).await {
            Ok(status) if status == StatusCode::OK => ProbeOutcome::Validated(proxy),
            Ok(status) => {
                debug!("Invalid Proxy: {} (status {})", proxy, status);
                ProbeOutcome::Discarded
            }
            Err(e) => {
                debug!("Invalid Proxy: {} ({})", proxy, e);
                ProbeOutcome::Discarded
            }
        }
    }
}
