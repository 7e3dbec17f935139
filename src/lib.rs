//! A small Rust client for the Rooftop CMS content API (WordPress REST, `wp/v2`).
//!
//! The flow is: validate connection options once, pick a resource
//! (`posts`, `pages`, a custom post type, ...), then `get` it with optional
//! query parameters.
//!
//! ## Quick start
//! - Pass a [`ClientConfig`] with the site URL and API token, or configure them
//!   via environment variables (`ROOFTOP_URL`, `ROOFTOP_API_TOKEN`) or a
//!   `.rooftoprc` file (current directory or home directory) and call
//!   [`Client::from_env`].
//! - Call [`Resource::get`] on `client.resource("posts")`.
//!
//! ```no_run
//! use rooftop::{Client, ClientConfig, GetOptions};
//!
//! #[tokio::main]
//! async fn main() -> rooftop::Result<()> {
//!     let client = Client::new(ClientConfig::new("//my-site.rooftopcms.io", "token"))?;
//!     let posts = client
//!         .resource("posts")
//!         .get(&GetOptions::new().param("per_page", 2).param("orderby", "id"))
//!         .await?;
//!     println!("{}", posts);
//!     Ok(())
//! }
//! ```
//!
//! Failed requests return a [`ResponseError`] carrying the HTTP status code
//! (absent for transport failures), a message and the request URL.

#![forbid(unsafe_code)]

#[cfg(feature = "blocking")]
pub mod blocking;
mod client;
mod config;
mod error;
mod options;
mod request;
mod util;

pub use client::{Client, Resource};
pub use error::{Error, ResponseError, Result, Status, ValidationError};
pub use options::{ClientConfig, ValidatedConfig, normalize_url, validate};
pub use request::{GetOptions, ParamValue};
