//! # Screen Controllers
//!
//! One controller per screen. Each owns its form state and loading flag and
//! talks to the backend and session through shared handles.
//!
//! ## Controller Categories
//! - **Auth**: [`LoginController`], [`RegisterController`]
//! - **Listings**: [`ListingController`] (Anuncie), [`InventoryController`] (Estoque)
//! - **Shell**: [`TabShell`] (header action, guarded tab, logout)
//!
//! Every action returns `AppResult<T>`; the screen shows `AppError::notice`
//! on failure.

use std::sync::{Mutex, MutexGuard, PoisonError};

mod inventory;
mod listing;
mod loading;
mod login;
mod register;
mod tabs;

pub use inventory::InventoryController;
pub use listing::ListingController;
pub use loading::{LoadingFlag, LoadingGuard};
pub use login::{LoginController, LoginForm};
pub use register::{RegisterController, RegisterForm};
pub use tabs::{HeaderAction, TabPress, TabShell};

/// Form state holds only owned values, so a poisoned lock is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
