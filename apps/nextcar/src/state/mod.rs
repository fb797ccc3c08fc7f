//! # Application State
//!
//! State shared between screens.
//!
//! - [`SessionContext`] - Persisted session over the key-value store
//! - [`Navigator`] - Route stack

mod navigation;
mod session;

pub use navigation::{Navigator, Route, Tab};
pub use session::SessionContext;
