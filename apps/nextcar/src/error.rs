//! # App Error Type
//!
//! Unified error type for screen actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in NextCar                                │
//! │                                                                         │
//! │  Screen                      Controller                                 │
//! │  ──────                      ──────────                                 │
//! │                                                                         │
//! │  press "ENTRAR"                                                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  submit() -> Result<T, AppError>                                 │  │
//! │  │         │                                                        │  │
//! │  │  ValidationError ──► VALIDATION_ERROR + "Preencha ..."           │  │
//! │  │  out of range    ──► VALIDATION_ERROR + "Verifique os dados."    │  │
//! │  │  ClientError     ──► REJECTED / TRANSPORT_ERROR + screen text    │  │
//! │  │  StoreError      ──► STORAGE_ERROR (cause logged)                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Alert.alert(error.notice.title, error.notice.message)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The underlying cause is logged where the error is built; the notice
//! only ever carries the generic screen text.

use serde::Serialize;
use ts_rs::TS;

use nextcar_api::ClientError;
use nextcar_core::{CoreError, ValidationError};
use nextcar_store::StoreError;

use crate::notice::{self, Notice};

/// Error returned from screen actions.
///
/// ## Serialization
/// ```json
/// {
///   "code": "REJECTED",
///   "notice": { "title": "Erro", "message": "Login ou senha inválidos!" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// What the screen shows
    pub notice: Notice,
}

/// Error codes for screen actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input failed a local check; nothing was sent
    ValidationError,

    /// No stored token
    Unauthorized,

    /// No usable answer from the backend
    TransportError,

    /// Backend answered with a non-2xx status
    Rejected,

    /// Session store failure
    StorageError,

    /// A request from this screen is still running
    Busy,

    /// The draft already holds the maximum number of photos
    PhotoLimit,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, notice: Notice) -> Self {
        AppError { code, notice }
    }

    pub fn validation(notice: Notice) -> Self {
        AppError::new(ErrorCode::ValidationError, notice)
    }

    pub fn unauthorized(notice: Notice) -> Self {
        AppError::new(ErrorCode::Unauthorized, notice)
    }

    pub fn busy() -> Self {
        AppError::new(
            ErrorCode::Busy,
            Notice::new(notice::TITLE_ATTENTION, notice::REQUEST_IN_PROGRESS),
        )
    }

    pub fn internal(notice: Notice) -> Self {
        AppError::new(ErrorCode::Internal, notice)
    }

    /// Maps a backend failure to the screen's own texts.
    pub fn from_client(err: ClientError, rejected: &str, unreachable: &str) -> Self {
        if err.is_rejection() {
            tracing::warn!(error = %err, "Backend rejected request");
            AppError::new(ErrorCode::Rejected, Notice::error(rejected))
        } else {
            tracing::error!(error = %err, "Backend request failed");
            AppError::new(ErrorCode::TransportError, Notice::error(unreachable))
        }
    }

    /// Maps a session store failure, showing `message` to the user.
    pub fn storage(err: StoreError, message: &str) -> Self {
        tracing::error!(error = %err, "Session store failed");
        AppError::new(ErrorCode::StorageError, Notice::error(message))
    }
}

/// Converts store errors raised outside a screen (startup).
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::storage(err, notice::LOCAL_DATA_FAILED)
    }
}

/// Converts backend errors raised outside a screen (startup, configuration).
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        if err.is_config_error() {
            tracing::error!(error = %err, "Invalid client configuration");
            return AppError::internal(Notice::error(err.to_string()));
        }
        AppError::from_client(err, notice::UNEXPECTED, notice::LOGIN_UNREACHABLE)
    }
}

/// Converts draft rule violations.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PhotoLimitReached { .. } => AppError::new(
                ErrorCode::PhotoLimit,
                Notice::new(notice::TITLE_LIMIT, notice::PHOTO_LIMIT),
            ),
            CoreError::EmptyPhoto => {
                tracing::warn!("Picker returned an empty image");
                AppError::internal(Notice::error(notice::PICKER_UNAVAILABLE))
            }
            CoreError::Validation(e @ ValidationError::OutOfRange { .. }) => {
                tracing::warn!(error = %e, "Draft value out of range");
                AppError::validation(Notice::error(notice::LISTING_REJECTED))
            }
            CoreError::Validation(e) => {
                tracing::warn!(error = %e, "Draft failed validation");
                AppError::validation(Notice::new(
                    notice::TITLE_ATTENTION,
                    notice::FILL_REQUIRED_FIELDS,
                ))
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.notice)
    }
}

impl std::error::Error for AppError {}

/// Result type for screen actions.
pub type AppResult<T> = Result<T, AppError>;
