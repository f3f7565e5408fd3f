use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use crate::utils::http;

use super::RuntimeError;

/// Periodically requests the bot's public URL so the host does not idle it out.
pub struct KeepAlive {
    client: Client,
    url: Url,
    interval: Duration,
}

impl KeepAlive {
    pub fn new(url: Url, interval: Duration) -> Result<Self, RuntimeError> {
        Ok(Self {
            client: http::create_keep_alive_client()?,
            url,
            interval,
        })
    }

    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.get(self.url.clone()).send().await?;
        Ok(response.status())
    }

    pub fn spawn(self) -> JoinHandle<()> {
        info!("Keep-alive pinging {} every {:?}", self.url, self.interval);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                interval.tick().await;
                match self.ping().await {
                    Ok(status) => info!("Keep-alive ping sent, status: {}", status),
                    Err(e) => warn!("Keep-alive ping failed: {}", e),
                }
            }
        })
    }
}
