use crate::config::ServerConfig;
use crate::{Error, GraphApi, Result};
use async_trait::async_trait;
use rat_types::{
    CreateNodeRequest, ErrorBody, MoveNodeRequest, Node, SearchRequest, SearchResponse,
    path_segments,
};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// [`GraphApi`] over the server's `/graph` HTTP routes.
#[derive(Debug, Clone)]
pub struct HttpGraphApi {
    client: Client,
    base_url: Url,
}

impl HttpGraphApi {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(config.url.trim())
            .map_err(|e| Error::Config(format!("invalid server url '{}': {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "server url '{}' cannot carry a path",
                config.url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Config(format!("invalid server token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/graph/{route}/{node path segments}`, each segment
    /// percent-encoded on its own so slashes stay separators.
    pub fn endpoint(&self, route: &str, path: &str, trailing_slash: bool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("graph").push(route);
            segments.extend(path_segments(path));
            if trailing_slash {
                segments.push("");
            }
        }
        url
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let resp = Self::check(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Map a non-2xx response to [`Error::Status`], preferring the server's
    /// `{"error": ...}` body as the message.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(Error::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl GraphApi for HttpGraphApi {
    async fn read(&self, path: &str) -> Result<Node> {
        let url = self.endpoint("node", path, false);
        tracing::debug!(%url, "read node");
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }

    async fn create(&self, parent_path: &str, name: &str) -> Result<Node> {
        let url = self.endpoint("node", parent_path, false);
        tracing::debug!(%url, name, "create node");
        let body = CreateNodeRequest {
            name: name.to_string(),
        };
        let resp = self.client.post(url).json(&body).send().await?;
        Self::decode(resp).await
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let url = self.endpoint("node", path, false);
        tracing::debug!(%url, "delete node");
        let resp = self.client.delete(url).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn move_node(&self, id: &str, new_path: &str) -> Result<()> {
        let url = self.endpoint("move", id, false);
        tracing::debug!(%url, new_path, "move node");
        let body = MoveNodeRequest {
            new_path: new_path.to_string(),
        };
        let resp = self.client.post(url).json(&body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let url = self.endpoint("search", "", false);
        let body = SearchRequest {
            query: query.to_string(),
        };
        let resp = self.client.post(url).json(&body).send().await?;
        let found: SearchResponse = Self::decode(resp).await?;
        Ok(found.results)
    }

    async fn index(&self) -> Result<Vec<String>> {
        let url = self.endpoint("index", "", true);
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }
}
