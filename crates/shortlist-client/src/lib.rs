//! HTTP client for the remote shortening service.
//!
//! [`HttpLinkService`] implements [`shortlist_core::LinkService`] on top of
//! `reqwest`. Every create response is checked against a fixed schema
//! before a [`MintedLink`](shortlist_core::MintedLink) is built from it.

pub mod config;
pub mod http;
pub mod schema;

pub use config::ClientConfig;
pub use http::HttpLinkService;
pub use reqwest::Url;
