//! # HTTP Backend Client
//!
//! [`RemoteApi`] over `reqwest` with JSON bodies.
//!
//! ## Request Outcome Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  send() fails              ──►  ClientError::Transport                  │
//! │  status not 2xx            ──►  ClientError::Rejected { status }        │
//! │  2xx, body unreadable      ──►  ClientError::Decode                     │
//! │  2xx, body ok              ──►  Ok(T)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tokens and passwords never reach the logs.

use async_trait::async_trait;
use nextcar_core::{ListingPayload, ListingRecord, LoginRequest, LoginResponse, RegisterRequest};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::remote::RemoteApi;

const LOGIN_PATH: &str = "auth/login";
const REGISTER_PATH: &str = "auth/register";
const LISTINGS_PATH: &str = "carros";

/// Backend client bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Creates a client for `base_url` (e.g. `http://192.168.0.2:8080`).
    ///
    /// A path on the base URL is kept: `http://host/api` serves
    /// `http://host/api/carros`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        info!(base_url = %base_url, "Backend client ready");
        Ok(HttpApi { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Sends once and keeps only 2xx responses.
    async fn send(&self, request: RequestBuilder, route: &'static str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(route, error = %e, "Backend unreachable");
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(route, status = status.as_u16(), "Backend rejected request");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!(route, status = status.as_u16(), "Backend request succeeded");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, route: &'static str) -> ClientResult<T> {
        response.json::<T>().await.map_err(|e| {
            warn!(route, error = %e, "Backend sent an unreadable body");
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        debug!(login = %request.login, "Signing in");
        let url = self.endpoint(LOGIN_PATH)?;
        let response = self
            .send(self.client.post(url).json(request), LOGIN_PATH)
            .await?;
        Self::decode(response, LOGIN_PATH).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        debug!(login = %request.login, role = %request.role, "Creating account");
        let url = self.endpoint(REGISTER_PATH)?;
        self.send(self.client.post(url).json(request), REGISTER_PATH)
            .await?;
        Ok(())
    }

    async fn create_listing(&self, token: &str, payload: &ListingPayload) -> ClientResult<()> {
        debug!(
            marca = %payload.marca,
            modelo = %payload.modelo,
            photos = payload.fotos.len(),
            "Publishing listing"
        );
        let url = self.endpoint(LISTINGS_PATH)?;
        self.send(
            self.client.post(url).bearer_auth(token).json(payload),
            LISTINGS_PATH,
        )
        .await?;
        Ok(())
    }

    async fn list_listings(&self) -> ClientResult<Vec<ListingRecord>> {
        let url = self.endpoint(LISTINGS_PATH)?;
        let response = self.send(self.client.get(url), LISTINGS_PATH).await?;
        let records: Vec<ListingRecord> = Self::decode(response, LISTINGS_PATH).await?;
        debug!(count = records.len(), "Fetched listings");
        Ok(records)
    }
}
