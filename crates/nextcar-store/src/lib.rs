//! # nextcar-store: On-Device Session Store
//!
//! Persists the three session keys between runs. SQLite through sqlx on
//! disk, with an in-memory stand-in for tests and ephemeral runs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        NextCar Session Flow                             │
//! │                                                                         │
//! │  SessionContext (apps/nextcar)                                         │
//! │       │  get_session / set_session / clear_session                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  nextcar-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  KeyValueStore  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  SqliteKvStore  │   │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  MemoryKvStore  │   │ 001_kv.sql   │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ~/.local/share/nextcar/nextcar.db                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nextcar_store::{Database, DbConfig, KeyValueStore, keys};
//!
//! let db = Database::new(DbConfig::new("nextcar.db")).await?;
//! let store = db.key_values();
//! store.set_many(&[(keys::TOKEN, "abc")]).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::{keys, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
