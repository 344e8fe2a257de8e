// src/transport.rs

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{UploadError, UploadResult};

/// Status and body of a server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    pub body: String,
}

impl ServerResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network side of the uploader.
///
/// Paths are absolute paths on the gallery server, e.g. `/gif`.
pub trait Transport: Send + Sync {
    /// POSTs `body` as the whole request body. No content type is set.
    fn post_text<'a>(
        &'a self,
        path: &'a str,
        body: String,
    ) -> BoxFuture<'a, UploadResult<ServerResponse>>;

    /// GETs a page, used to reload the gallery.
    fn get_page<'a>(&'a self, path: &'a str) -> BoxFuture<'a, UploadResult<ServerResponse>>;
}

/// `Transport` over HTTP with a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// A `timeout_secs` of 0 disables the request timeout.
    pub fn new(config: &Config) -> UploadResult<Self> {
        let base_url = parse_server_url(&config.server_url)?;
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| UploadError::Http {
                url: base_url.to_string(),
                source: e,
            })?;
        Ok(HttpTransport { client, base_url })
    }

    fn url_for(&self, path: &str) -> UploadResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| UploadError::InvalidServerUrl {
                url: format!("{}{}", self.base_url, path),
            })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> UploadResult<ServerResponse> {
        let http_err = |source| UploadError::Http {
            url: url.to_string(),
            source,
        };
        let resp = request.send().await.map_err(http_err)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(http_err)?;
        debug!("{url} answered {status} ({} bytes)", body.len());
        Ok(ServerResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn post_text<'a>(
        &'a self,
        path: &'a str,
        body: String,
    ) -> BoxFuture<'a, UploadResult<ServerResponse>> {
        async move {
            let url = self.url_for(path)?;
            debug!("POST {url} with {} byte body", body.len());
            self.send(self.client.post(url.clone()).body(body), &url).await
        }
        .boxed()
    }

    fn get_page<'a>(&'a self, path: &'a str) -> BoxFuture<'a, UploadResult<ServerResponse>> {
        async move {
            let url = self.url_for(path)?;
            debug!("GET {url}");
            self.send(self.client.get(url.clone()), &url).await
        }
        .boxed()
    }
}

/// Parses the configured server URL, accepting only http and https.
pub fn parse_server_url(server_url: &str) -> UploadResult<Url> {
    let invalid = || UploadError::InvalidServerUrl {
        url: server_url.to_string(),
    };
    let url = Url::parse(server_url).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(invalid()),
    }
}
