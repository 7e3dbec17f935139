use anyhow::Context;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::load_config;
use crate::error::{ResponseError, Result, ValidationError};
use crate::options::{ClientConfig, ValidatedConfig, validate};
use crate::request::GetOptions;
use crate::util::{API_TOKEN_HEADER, decode_body, resource_url, user_agent};

/// Async client for a Rooftop site.
///
/// Cloning is cheap: clones share the validated config and the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ValidatedConfig>,
    http: HttpClient,
}

impl Client {
    /// Validates `config` and builds the HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = validate(&config)?;
        let headers = default_headers(&config)?;

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;
        debug!(base_url = %config.base_url, "rooftop client ready");

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Creates a client from `ROOFTOP_URL` / `ROOFTOP_API_TOKEN` and/or a `.rooftoprc`.
    ///
    /// This is equivalent to `Client::from_parts(None, None)`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_parts(None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit `url`/`api_token` arguments
    /// - environment variables `ROOFTOP_URL` / `ROOFTOP_API_TOKEN`
    /// - config file from `ROOFTOP_RC` or `.rooftoprc`
    pub fn from_parts(url: Option<String>, api_token: Option<String>) -> anyhow::Result<Self> {
        let loaded = load_config(url, api_token)?;
        let sources = loaded.describe_sources();
        Self::new(loaded.config).context(sources)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the accessor for a collection, e.g. `posts`, `pages` or a custom post type.
    ///
    /// Names are not checked; an unknown one fails at request time with a 404.
    pub fn resource(&self, name: impl Into<String>) -> Resource<'_> {
        Resource {
            client: self,
            name: name.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        options: &GetOptions,
    ) -> Result<T, ResponseError> {
        let url = resource_url(&self.config.base_url, resource, options)?;
        let url_text = url.to_string();
        debug!(method = "GET", url = %url_text, "sending request");

        let resp = match self.http.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ResponseError::transport(&e, &url);
                warn!(url = %url_text, error = %err.error, "request failed");
                return Err(err);
            }
        };

        let status = resp.status();
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                let err = ResponseError::transport(&e, &url);
                warn!(url = %url_text, %status, error = %err.error, "failed to read response body");
                return Err(err);
            }
        };
        debug!(url = %url_text, %status, bytes = text.len(), "received response");

        decode_body(status, &url_text, &text).inspect_err(|err| {
            warn!(url = %url_text, %status, error = %err.error, "API request failed");
        })
    }
}

/// Accessor for one collection endpoint.
#[derive(Debug, Clone)]
pub struct Resource<'c> {
    client: &'c Client,
    name: String,
}

impl Resource<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `GET /wp-json/wp/v2/<name>` and return the parsed JSON body.
    pub async fn get(&self, options: &GetOptions) -> Result<Value, ResponseError> {
        self.client.get_json(&self.name, options).await
    }

    /// Like [`Resource::get`], deserializing the body into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, options: &GetOptions) -> Result<T, ResponseError> {
        self.client.get_json(&self.name, options).await
    }
}

pub(crate) fn default_headers(config: &ValidatedConfig) -> Result<HeaderMap, ValidationError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&user_agent()).unwrap_or(HeaderValue::from_static("rooftop-rs")),
    );

    let mut token = HeaderValue::from_str(&config.api_token)
        .map_err(|_| ValidationError::InvalidApiToken)?;
    token.set_sensitive(true);
    headers.insert(API_TOKEN_HEADER, token);

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn construction_fails_without_url() {
        let err = Client::new(ClientConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "url is required");
    }

    #[test]
    fn construction_fails_without_token() {
        let cfg = ClientConfig {
            url: Some("foo".into()),
            ..ClientConfig::default()
        };
        let err = Client::new(cfg).unwrap_err();
        assert_eq!(err.to_string(), "apiToken is required");
    }

    #[test]
    fn any_resource_name_resolves() {
        let client = Client::new(ClientConfig::new("foo", "bar")).unwrap();
        assert_eq!(client.base_url(), "https://foo");
        assert_eq!(client.resource("posts").name(), "posts");
        assert_eq!(client.resource("fooBars").name(), "fooBars");
    }

    #[test]
    fn token_header_is_sensitive() {
        let cfg = validate(&ClientConfig::new("foo", "secret")).unwrap();
        let headers = default_headers(&cfg).unwrap();
        let token = headers.get(API_TOKEN_HEADER).unwrap();
        assert_eq!(token, "secret");
        assert!(token.is_sensitive());
        assert!(headers.get(USER_AGENT).unwrap().to_str().unwrap().starts_with("rooftop-rs/"));
    }
}
