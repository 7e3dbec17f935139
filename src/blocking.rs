//! A blocking counterpart of [`crate::Client`].
//!
//! Same contract, no async runtime required. Like `reqwest::blocking`, do not
//! build or use this client from inside an async context.
//!
//! ```no_run
//! use rooftop::GetOptions;
//! use rooftop::blocking::Client;
//!
//! fn main() -> anyhow::Result<()> {
//!     let client = Client::from_env()?;
//!     let posts = client
//!         .resource("posts")
//!         .get(&GetOptions::new().param("per_page", 2))?;
//!     println!("{}", posts);
//!     Ok(())
//! }
//! ```

use anyhow::Context;
use reqwest::blocking::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::default_headers;
use crate::config::load_config;
use crate::error::{ResponseError, Result};
use crate::options::{ClientConfig, ValidatedConfig, validate};
use crate::request::GetOptions;
use crate::util::{decode_body, resource_url};

#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ValidatedConfig>,
    http: HttpClient,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = validate(&config)?;
        let headers = default_headers(&config)?;

        let mut builder = HttpClient::builder().default_headers(headers);
        // reqwest's blocking client defaults to a 30s timeout; keep it unless overridden.
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_parts(None, None)
    }

    pub fn from_parts(url: Option<String>, api_token: Option<String>) -> anyhow::Result<Self> {
        let loaded = load_config(url, api_token)?;
        let sources = loaded.describe_sources();
        Self::new(loaded.config).context(sources)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn resource(&self, name: impl Into<String>) -> Resource<'_> {
        Resource {
            client: self,
            name: name.into(),
        }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        options: &GetOptions,
    ) -> Result<T, ResponseError> {
        let url = resource_url(&self.config.base_url, resource, options)?;
        let url_text = url.to_string();
        debug!(method = "GET", url = %url_text, "sending request");

        let resp = self.http.get(url.clone()).send().map_err(|e| {
            let err = ResponseError::transport(&e, &url);
            warn!(url = %url_text, error = %err.error, "request failed");
            err
        })?;

        let status = resp.status();
        let text = resp.text().map_err(|e| {
            let err = ResponseError::transport(&e, &url);
            warn!(url = %url_text, %status, error = %err.error, "failed to read response body");
            err
        })?;
        debug!(url = %url_text, %status, bytes = text.len(), "received response");

        decode_body(status, &url_text, &text).inspect_err(|err| {
            warn!(url = %url_text, %status, error = %err.error, "API request failed");
        })
    }
}

#[derive(Debug, Clone)]
pub struct Resource<'c> {
    client: &'c Client,
    name: String,
}

impl Resource<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, options: &GetOptions) -> Result<Value, ResponseError> {
        self.client.get_json(&self.name, options)
    }

    pub fn get_as<T: DeserializeOwned>(&self, options: &GetOptions) -> Result<T, ResponseError> {
        self.client.get_json(&self.name, options)
    }
}
