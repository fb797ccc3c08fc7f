//! The backend as the screens see it.

use async_trait::async_trait;
use nextcar_core::{ListingPayload, ListingRecord, LoginRequest, LoginResponse, RegisterRequest};

use crate::error::ClientResult;

/// NextCar backend operations.
///
/// Every method issues exactly one request. A non-2xx status comes back as
/// [`ClientError::Rejected`](crate::ClientError::Rejected).
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;

    /// `POST /auth/register`. The response body is ignored.
    async fn register(&self, request: &RegisterRequest) -> ClientResult<()>;

    /// `POST /carros` with `Authorization: Bearer <token>`.
    async fn create_listing(&self, token: &str, payload: &ListingPayload) -> ClientResult<()>;

    /// `GET /carros`.
    async fn list_listings(&self) -> ClientResult<Vec<ListingRecord>>;
}
