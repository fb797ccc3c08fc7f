//! # nextcar-api: Backend Client
//!
//! The [`RemoteApi`] trait is the seam the screens talk to; [`HttpApi`] is
//! the real implementation over `reqwest`.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /auth/login      {login, password}         → {token, role}        │
//! │  POST /auth/register   {login, password, role}   → 2xx                  │
//! │  POST /carros          Bearer <token> + payload  → 2xx                  │
//! │  GET  /carros                                    → [ListingRecord]      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A request is sent once. There is no retry and no client-side timeout;
//! the caller waits until the transport gives up.
//!
//! ## Usage
//! ```rust,ignore
//! use nextcar_api::{ClientConfig, HttpApi, RemoteApi};
//!
//! let config = ClientConfig::load(None)?;
//! let api = HttpApi::new(config.base_url())?;
//! let listings = api.list_listings().await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod remote;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpApi;
pub use remote::RemoteApi;
