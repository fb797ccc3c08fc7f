//! # Domain Types
//!
//! Core types shared by the store, the API client and the screens.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Session      │   │   AuthState     │   │      Role       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  token?         │──►│  Unchecked      │   │  USER           │       │
//! │  │  role?          │   │  Unauthenticated│   │  ADMIN          │       │
//! │  │  login?         │   │  Authenticated  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ LoginRequest    │   │ ListingPayload  │   │ ListingRecord   │       │
//! │  │ RegisterRequest │   │ (POST /carros)  │   │ (GET /carros)   │       │
//! │  │ LoginResponse   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names on the wire follow the backend (`marca`, `fotoBase64`, ...).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Role
// =============================================================================

/// Account role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Every selectable role, in display order.
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Wire form (`USER` / `ADMIN`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Label shown next to the radio option.
    pub const fn label(&self) -> &'static str {
        match self {
            Role::User => "Usuario",
            Role::Admin => "Administrador",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// What the session store holds for the current device.
///
/// Only `token` decides whether the user is signed in. `role` and `login`
/// are advisory and may be missing even when a token exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
    pub login: Option<String>,
}

impl Session {
    /// True when a non-empty token is stored.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Stored role, if it is one this client knows.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

// =============================================================================
// Auth State
// =============================================================================

/// Outcome of the session gate.
///
/// `Unchecked` holds until the first lookup completes, so the header can
/// stay empty instead of flashing the wrong action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AuthState {
    #[default]
    Unchecked,
    Unauthenticated,
    Authenticated {
        role: Option<Role>,
        login: Option<String>,
    },
}

impl AuthState {
    /// Derives the gate state from a stored session.
    pub fn from_session(session: &Session) -> Self {
        if session.has_token() {
            AuthState::Authenticated {
                role: session.role(),
                login: session.login.clone(),
            }
        } else {
            AuthState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

// =============================================================================
// Auth DTOs
// =============================================================================

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Successful `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterRequest {
    pub login: String,
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Listings
// =============================================================================

/// Body of `POST /carros`: a submitted draft with formatting removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    pub marca: String,
    pub modelo: String,
    pub versao: String,
    pub ano: i64,
    pub km: i64,
    pub preco: f64,
    pub nome_vendedor: String,
    pub telefone_contato: String,
    pub email_contato: String,
    #[serde(rename = "fotoBase64")]
    pub fotos: Vec<String>,
}

/// Listing identifier as the backend sends it (string or number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum ListingId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingId::Number(n) => write!(f, "{}", n),
            ListingId::Text(s) => f.write_str(s),
        }
    }
}

/// A vehicle for sale, as returned by `GET /carros`.
///
/// Owned by the backend; the client only reads and renders it. Missing or
/// `null` scalar fields read as their zero value, so one sparse record never
/// drops the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListingRecord {
    #[serde(default)]
    pub id: Option<ListingId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub marca: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modelo: String,
    #[serde(default)]
    pub versao: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ano: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub km: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preco: f64,
    #[serde(rename = "fotoBase64", default)]
    pub fotos: Option<Vec<String>>,
}

impl ListingRecord {
    /// Attached photos; a missing or null list reads as empty.
    pub fn photos(&self) -> &[String] {
        self.fotos.as_deref().unwrap_or(&[])
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_form() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_auth_state_from_session() {
        let session = Session {
            token: Some("abc".into()),
            role: Some("ADMIN".into()),
            login: Some("ana@nextcar.com".into()),
        };
        assert_eq!(
            AuthState::from_session(&session),
            AuthState::Authenticated {
                role: Some(Role::Admin),
                login: Some("ana@nextcar.com".into()),
            }
        );

        assert_eq!(
            AuthState::from_session(&Session::default()),
            AuthState::Unauthenticated
        );
    }

    #[test]
    fn test_token_alone_authenticates() {
        let session = Session {
            token: Some("abc".into()),
            ..Session::default()
        };
        assert!(AuthState::from_session(&session).is_authenticated());

        let empty = Session {
            token: Some(String::new()),
            role: Some("USER".into()),
            login: Some("ana@nextcar.com".into()),
        };
        assert!(!AuthState::from_session(&empty).is_authenticated());
    }

    #[test]
    fn test_listing_payload_wire_names() {
        let payload = ListingPayload {
            marca: "Fiat".into(),
            modelo: "Uno".into(),
            versao: "Way".into(),
            ano: 2015,
            km: 80000,
            preco: 1234.56,
            nome_vendedor: "Ana".into(),
            telefone_contato: "11999990000".into(),
            email_contato: "ana@nextcar.com".into(),
            fotos: vec!["data:image/jpeg;base64,AAAA".into()],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["nomeVendedor"], "Ana");
        assert_eq!(json["telefoneContato"], "11999990000");
        assert_eq!(json["emailContato"], "ana@nextcar.com");
        assert_eq!(json["fotoBase64"][0], "data:image/jpeg;base64,AAAA");
        assert_eq!(json["preco"], 1234.56);
    }

    #[test]
    fn test_listing_record_tolerates_sparse_json() {
        let json = r#"[
            {"id": 7, "marca": "Fiat", "modelo": "Uno", "ano": 2015, "km": 80000,
             "preco": 25000.5, "fotoBase64": null},
            {"id": "b2", "marca": "VW", "modelo": "Gol"}
        ]"#;
        let records: Vec<ListingRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].id.as_ref().unwrap().to_string(), "7");
        assert!(records[0].photos().is_empty());
        assert_eq!(records[1].id, Some(ListingId::Text("b2".into())));
        assert_eq!(records[1].km, 0);
        assert!(records[1].versao.is_none());
    }

    #[test]
    fn test_listing_record_null_scalars_read_as_zero() {
        let json = r#"[
            {"id": 1, "marca": "Fiat", "modelo": "Uno", "ano": 2015, "km": 80000, "preco": null},
            {"id": 2, "marca": null, "modelo": "Gol", "ano": null, "km": null, "preco": 18000.5}
        ]"#;
        let records: Vec<ListingRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].preco, 0.0);
        assert_eq!(records[0].km, 80000);
        assert_eq!(records[1].marca, "");
        assert_eq!(records[1].ano, 0);
        assert_eq!(records[1].preco, 18000.5);
    }
}
