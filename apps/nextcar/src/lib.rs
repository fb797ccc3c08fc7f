//! # NextCar App Library
//!
//! Screen controllers for the NextCar client and the wiring that builds
//! them.
//!
//! ## Module Organization
//! ```text
//! nextcar_app_lib/
//! ├── lib.rs          ◄─── You are here (App wiring, tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── SessionContext over the key-value store
//! │   └── navigation.rs ◄─ Route stack
//! ├── controllers/
//! │   ├── login.rs    ◄─── Login screen
//! │   ├── register.rs ◄─── Cadastro screen
//! │   ├── listing.rs  ◄─── Anuncie form
//! │   ├── inventory.rs ◄── Estoque list
//! │   └── tabs.rs     ◄─── Header action, guarded tab, logout
//! ├── picker.rs       ◄─── Image picker seam
//! ├── notice.rs       ◄─── User-facing texts
//! └── error.rs        ◄─── AppError for screen actions
//! ```
//!
//! ## State Management (Multiple State Types)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │ SessionContext   │ │    Navigator     │ │    ClientConfig      │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • token         │ │  • route stack   │ │  • API base URL      │   │
//! │  │  • user_role     │ │  • current tab   │ │  • store path        │   │
//! │  │  • user_login    │ │                  │ │  • picker options    │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each controller receives only the handles it uses.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod controllers;
pub mod error;
pub mod notice;
pub mod picker;
pub mod state;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use nextcar_api::{ClientConfig, HttpApi, RemoteApi};
use nextcar_store::{Database, DbConfig, KeyValueStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use controllers::{
    InventoryController, ListingController, LoginController, RegisterController, TabShell,
};
use error::{AppError, AppResult};
use notice::Notice;
use picker::{ImagePicker, PickerOptions};
use state::{Navigator, SessionContext};

/// Shared handles every screen is built from.
pub struct App {
    config: ClientConfig,
    session: SessionContext,
    navigator: Navigator,
    api: Arc<dyn RemoteApi>,
    db: Option<Database>,
}

impl App {
    /// Opens the on-disk session store and the backend client.
    ///
    /// ## Startup Sequence
    /// 1. Validate configuration
    /// 2. Create the data directory if needed
    /// 3. Connect to the session store & run migrations
    /// 4. Build the backend client
    pub async fn open(config: ClientConfig) -> AppResult<Self> {
        config.validate()?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                error!(path = %parent.display(), error = %e, "Failed to create data directory");
                AppError::internal(Notice::error(notice::LOCAL_DATA_FAILED))
            })?;
        }
        info!(?db_path, "Session store path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Self::assemble(config, db)
    }

    /// Same as [`open`](App::open) with a store that lives only in memory.
    pub async fn ephemeral(config: ClientConfig) -> AppResult<Self> {
        config.validate()?;
        let db = Database::new(DbConfig::in_memory()).await?;
        Self::assemble(config, db)
    }

    fn assemble(config: ClientConfig, db: Database) -> AppResult<Self> {
        let api = HttpApi::new(config.base_url())?;
        let mut app = Self::with_parts(config, Arc::new(db.key_values()), Arc::new(api));
        app.db = Some(db);
        info!("App ready");
        Ok(app)
    }

    /// Builds an app over arbitrary store and backend implementations.
    pub fn with_parts(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn RemoteApi>,
    ) -> Self {
        App {
            config,
            session: SessionContext::new(store),
            navigator: Navigator::new(),
            api,
            db: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    // =========================================================================
    // Controllers
    // =========================================================================

    pub fn login_controller(&self) -> LoginController {
        LoginController::new(self.api.clone(), self.session.clone(), self.navigator.clone())
    }

    pub fn register_controller(&self) -> RegisterController {
        RegisterController::new(self.api.clone(), self.navigator.clone())
    }

    pub fn listing_controller(&self, picker: Arc<dyn ImagePicker>) -> ListingController {
        ListingController::new(
            self.api.clone(),
            self.session.clone(),
            picker,
            PickerOptions::from_settings(&self.config.picker),
        )
    }

    pub fn inventory_controller(&self) -> InventoryController {
        InventoryController::new(self.api.clone())
    }

    pub fn tab_shell(&self) -> TabShell {
        TabShell::new(self.session.clone(), self.navigator.clone())
    }

    /// Closes the session store, if this app opened one.
    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=nextcar=trace` - Trace level for NextCar crates only
/// - Default: `info,nextcar=debug,sqlx=warn`
///
/// Logs go to stderr so command output stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nextcar=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::HeaderAction;
    use crate::state::{Route, Tab};
    use crate::testing::FakeApi;
    use nextcar_core::AuthState;
    use nextcar_store::MemoryKeyValueStore;

    fn app() -> App {
        App::with_parts(
            ClientConfig::default(),
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(FakeApi::new().with_login_response("tok-1", "USER")),
        )
    }

    #[tokio::test]
    async fn test_login_then_logout_through_shell() {
        let app = app();
        let shell = app.tab_shell();
        shell.on_focus().await;
        assert_eq!(shell.header_action(), HeaderAction::Login);

        shell.press_header_action().await.unwrap();
        assert_eq!(app.navigator().current(), Route::Login);

        let login = app.login_controller();
        login.set_email("ana@nextcar.com");
        login.set_password("secret");
        login.submit().await.unwrap();
        assert_eq!(app.navigator().current(), Route::Tabs(Tab::Home));

        shell.on_focus().await;
        assert_eq!(shell.header_action(), HeaderAction::Logout);

        shell.press_header_action().await.unwrap();
        assert_eq!(app.session().evaluate().await, AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_listing_controller_uses_picker_settings() {
        let mut config = ClientConfig::default();
        config.picker.quality = 0.9;
        let app = App::with_parts(
            config,
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(FakeApi::new()),
        );
        let picker = Arc::new(crate::testing::FakePicker::new([Some("QUJD")]));

        let listing = app.listing_controller(picker.clone());
        assert!(listing.add_photo().await.unwrap());
        assert_eq!(picker.calls(), 1);
    }

    #[tokio::test]
    async fn test_ephemeral_app() {
        let app = App::ephemeral(ClientConfig::default()).await.unwrap();
        app.session().set_session("tok", "USER", "a@b.c").await.unwrap();
        assert!(app.session().evaluate().await.is_authenticated());
        app.close().await;
    }

    #[tokio::test]
    async fn test_open_persists_session_across_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::default();
        config.storage.database_path = Some(dir.path().join("data").join("nextcar.db"));

        let app = App::open(config.clone()).await.unwrap();
        app.session()
            .set_session("tok-7", "ADMIN", "ana@nextcar.com")
            .await
            .unwrap();
        app.close().await;

        let app = App::open(config).await.unwrap();
        assert_eq!(app.session().token().await.unwrap().as_deref(), Some("tok-7"));
        app.close().await;
    }

    #[tokio::test]
    async fn test_open_rejects_bad_url() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://example.com".into();

        let err = App::ephemeral(config).await.err().unwrap();
        assert_eq!(err.code, crate::error::ErrorCode::Internal);
    }
}
