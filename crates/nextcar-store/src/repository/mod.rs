//! # Repository Module
//!
//! ## Available Repositories
//!
//! - [`kv::KeyValueStore`] - String key-value persistence, with SQLite and
//!   in-memory implementations

pub mod kv;
