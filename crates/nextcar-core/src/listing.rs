//! # Listing Models
//!
//! The editable draft behind the "Anuncie" form and the read-only card
//! rendered for each record on the "Estoque" screen.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   mount ──► empty draft ──► prefill email ──► set(field, text) ...     │
//! │                                                  │                      │
//! │                              km / preco are re-formatted on every set   │
//! │                                                  │                      │
//! │                              validate() ──► to_payload() ──► POST      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::format::{
    format_currency, format_distance, format_km_label, format_price_label, parse_leading_int,
    strip_formatting,
};
use crate::money::Money;
use crate::photos::{normalize_image_uri, PhotoSet};
use crate::types::{ListingPayload, ListingRecord};
use crate::validation::validate_listing_required;

// =============================================================================
// Draft
// =============================================================================

/// Fields the user can type into.
///
/// The contact email is not listed: it is filled from the session and the
/// form shows it read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Marca,
    Modelo,
    Versao,
    Ano,
    Km,
    Preco,
    NomeVendedor,
    TelefoneProprietario,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Marca,
        DraftField::Modelo,
        DraftField::Versao,
        DraftField::Ano,
        DraftField::Km,
        DraftField::Preco,
        DraftField::NomeVendedor,
        DraftField::TelefoneProprietario,
    ];

    /// Placeholder text of the form input.
    pub const fn placeholder(&self) -> &'static str {
        match self {
            DraftField::Marca => "Marca",
            DraftField::Modelo => "Modelo",
            DraftField::Versao => "Versão",
            DraftField::Ano => "Ano",
            DraftField::Km => "KM",
            DraftField::Preco => "Valor (R$)",
            DraftField::NomeVendedor => "Nome",
            DraftField::TelefoneProprietario => "Telefone / WhatsApp",
        }
    }
}

/// Client-side state of a listing being written.
///
/// Text fields hold exactly what the form displays; `km` and `preco` hold
/// their formatted forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub marca: String,
    pub modelo: String,
    pub versao: String,
    pub ano: String,
    pub km: String,
    pub preco: String,
    pub nome_vendedor: String,
    pub telefone_proprietario: String,
    pub email_proprietario: String,
    pub fotos: PhotoSet,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a keystroke result, formatting price and distance on the way in.
    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Marca => self.marca = value.to_string(),
            DraftField::Modelo => self.modelo = value.to_string(),
            DraftField::Versao => self.versao = value.to_string(),
            DraftField::Ano => self.ano = value.to_string(),
            DraftField::Km => self.km = format_distance(value),
            DraftField::Preco => self.preco = format_currency(value),
            DraftField::NomeVendedor => self.nome_vendedor = value.to_string(),
            DraftField::TelefoneProprietario => self.telefone_proprietario = value.to_string(),
        }
    }

    /// Current displayed text of a field.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Marca => &self.marca,
            DraftField::Modelo => &self.modelo,
            DraftField::Versao => &self.versao,
            DraftField::Ano => &self.ano,
            DraftField::Km => &self.km,
            DraftField::Preco => &self.preco,
            DraftField::NomeVendedor => &self.nome_vendedor,
            DraftField::TelefoneProprietario => &self.telefone_proprietario,
        }
    }

    /// Fills the read-only contact email from the stored login.
    pub fn prefill_contact_email(&mut self, login: &str) {
        self.email_proprietario = login.to_string();
    }

    /// Brand, model and price must be filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_listing_required(&self.marca, &self.modelo, &self.preco)
    }

    /// Reverses the display formatting into the wire payload.
    ///
    /// `ano` reads its leading integer, `km` reads its digits, and `preco`
    /// reads its digits as centavos. Anything unreadable becomes zero.
    pub fn to_payload(&self) -> CoreResult<ListingPayload> {
        let ano = parse_leading_int("ano", &self.ano)?;
        let km = parse_leading_int("km", &strip_formatting(&self.km))?;
        let preco = Money::from_digits(&self.preco)?;

        Ok(ListingPayload {
            marca: self.marca.clone(),
            modelo: self.modelo.clone(),
            versao: self.versao.clone(),
            ano,
            km,
            preco: preco.to_decimal(),
            nome_vendedor: self.nome_vendedor.clone(),
            telefone_contato: self.telefone_proprietario.clone(),
            email_contato: self.email_proprietario.clone(),
            fotos: self.fotos.as_slice().to_vec(),
        })
    }
}

// =============================================================================
// Card
// =============================================================================

/// Card image: the first photo, or a placeholder caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Thumbnail {
    Photo(String),
    Placeholder(String),
}

/// Caption shown where a listing has no photo.
pub const NO_PHOTO_CAPTION: &str = "Sem Foto";

/// Display model of one inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListingCard {
    /// Stable list key: the record id, or its position when the id is absent.
    pub key: String,
    pub title: String,
    pub versao: String,
    pub ano: i64,
    pub km_label: String,
    pub price_label: String,
    pub thumbnail: Thumbnail,
}

impl ListingCard {
    pub fn from_record(record: &ListingRecord, position: usize) -> Self {
        let key = record
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| position.to_string());

        let thumbnail = match record.photos().first() {
            Some(photo) => Thumbnail::Photo(normalize_image_uri(photo)),
            None => Thumbnail::Placeholder(NO_PHOTO_CAPTION.to_string()),
        };

        Self {
            key,
            title: format!("{} {}", record.marca, record.modelo),
            versao: record.versao.clone().unwrap_or_default(),
            ano: record.ano,
            km_label: format_km_label(record.km),
            price_label: format_price_label(record.preco),
            thumbnail,
        }
    }
}
