use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::DnssecApi;
use crate::error::{EngineError, Result};

#[derive(Clone)]
pub struct PowerDnsClient {
    http: Client,
    base_url: String, // e.g. "http://127.0.0.1:8081/api/v1"
    api_key: String,
    server_id: String, // usually "localhost"
}

impl PowerDnsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        server_id: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            server_id: server_id.into(),
        }
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-API-Key", &self.api_key)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/servers/{}/{}",
            self.base_url,
            self.server_id,
            path.trim_start_matches('/')
        )
    }

    async fn put_rectify(&self, zone_name: &str) -> anyhow::Result<String> {
        #[derive(Deserialize)]
        struct RectifyResponse {
            result: String,
        }

        let url = self.url(&format!("zones/{}/rectify", zone_name));
        let res = self.auth_header(self.http.put(url)).send().await?;
        if !res.status().is_success() {
            anyhow::bail!("PowerDNS rectify_zone failed with {}", res.status());
        }

        Ok(res.json::<RectifyResponse>().await?.result)
    }
}

#[async_trait]
impl DnssecApi for PowerDnsClient {
    async fn rectify_zone(&self, zone_name: &str) -> Result<()> {
        let result = self
            .put_rectify(zone_name)
            .await
            .map_err(EngineError::powerdns)?;
        tracing::debug!(zone = zone_name, result = %result, "zone rectified");
        Ok(())
    }
}
