//! # nextcar-core: Pure Client Logic for NextCar
//!
//! This crate holds everything the NextCar screens compute without touching
//! the outside world: formatting, validation, drafts and the inventory filter.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        NextCar Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Screens (visual layer)                       │   │
//! │  │    Home ──► Anuncie ──► Estoque        Login ──► Cadastro       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Controllers (apps/nextcar)                   │   │
//! │  │    LoginController, ListingController, TabShell, ...            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nextcar-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  listing  │  │  search   │  │   │
//! │  │   │  Session  │  │   Money   │  │   Draft   │  │  filter   │  │   │
//! │  │   │ AuthState │  │  format   │  │   Card    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Session, auth state and wire DTOs
//! - [`money`] - Integer-cents `Money` with BRL display
//! - [`format`] - Keystroke formatters for price and distance fields
//! - [`listing`] - Listing draft and inventory card models
//! - [`photos`] - Bounded photo sequence and data-URI handling
//! - [`search`] - Inventory search filter
//! - [`validation`] - Required-field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nextcar_core::format::{format_currency, strip_formatting};
//!
//! let shown = format_currency("123456");
//! assert_eq!(shown, "R$ 1.234,56");
//! assert_eq!(strip_formatting(&shown), "123456");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod listing;
pub mod money;
pub mod photos;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use listing::{DraftField, ListingCard, ListingDraft, Thumbnail};
pub use money::Money;
pub use photos::PhotoSet;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum photos attached to a single listing.
pub const MAX_PHOTOS: usize = 5;

/// Prefix every captured photo carries on the wire.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
