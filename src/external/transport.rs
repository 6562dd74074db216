//! Form POST transport.
//!
//! `Transport` is the seam between `PushClient` and the network. The reqwest
//! backed `HttpTransport` is what production code uses.

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

use super::form::{FormParams, encode_form, join_response_lines};
use crate::config::settings::ApiConfig;
use crate::error::{PushError, PushResult};
use crate::external::client::build_http_client;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Posts form parameters to a URL and hands back the raw response text
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `params` as a form body to `url`.
    ///
    /// # Returns
    /// The whole response body, every line terminated by `\r`
    async fn post_form(&self, url: &str, params: &FormParams) -> PushResult<String>;
}

/// reqwest implementation of [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a transport with its own client configured from `config`
    pub fn from_config(config: &ApiConfig) -> PushResult<Self> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, params: &FormParams) -> PushResult<String> {
        let body = encode_form(params);
        tracing::debug!(url = %url, content_length = body.len(), "Posting form");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| PushError::transport(url, e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| PushError::transport(url, e))?;

        tracing::debug!(url = %url, status, bytes = text.len(), "Received response");

        Ok(join_response_lines(&text))
    }
}
