//! # Listing Controller
//!
//! Drives the "Anuncie" form: field edits, photos, and the submit.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    ├── marca / modelo / preco empty ──► "Preencha os campos ..."       │
//! │    ├── already loading ──────────────► Busy                             │
//! │    ├── no stored token ──────────────► "Sessão expirada. ..."          │
//! │    ▼                                                                    │
//! │  draft.to_payload()  (formatting reversed, photos in order)             │
//! │    ├── number too large ─────────────► "Erro ao salvar. ..."           │
//! │    ▼                                                                    │
//! │  POST /carros  Authorization: Bearer <token>                            │
//! │    ├── non-2xx ──────────────────────► "Erro ao salvar. ..."           │
//! │    ├── no answer ────────────────────► "Erro de conexão."              │
//! │    ▼                                                                    │
//! │  "Anúncio cadastrado com sucesso!"                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use nextcar_api::RemoteApi;
use nextcar_core::{DraftField, ListingDraft, MAX_PHOTOS};
use tracing::{debug, error, info, warn};

use super::{lock, LoadingFlag};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::notice::{self, Notice};
use crate::picker::{ImagePicker, PickerOptions};
use crate::state::SessionContext;

pub struct ListingController {
    api: Arc<dyn RemoteApi>,
    session: SessionContext,
    picker: Arc<dyn ImagePicker>,
    options: PickerOptions,
    draft: Mutex<ListingDraft>,
    loading: LoadingFlag,
}

impl ListingController {
    pub fn new(
        api: Arc<dyn RemoteApi>,
        session: SessionContext,
        picker: Arc<dyn ImagePicker>,
        options: PickerOptions,
    ) -> Self {
        ListingController {
            api,
            session,
            picker,
            options,
            draft: Mutex::new(ListingDraft::new()),
            loading: LoadingFlag::default(),
        }
    }

    /// Fills the contact email from the stored login.
    pub async fn mount(&self) {
        match self.session.login_identifier().await {
            Ok(Some(login)) => lock(&self.draft).prefill_contact_email(&login),
            Ok(None) => debug!("No stored login to prefill"),
            Err(e) => error!(error = %e, "Failed to read stored login"),
        }
    }

    /// Applies a keystroke and returns what the input should now show.
    pub fn set_field(&self, field: DraftField, value: &str) -> String {
        let mut draft = lock(&self.draft);
        draft.set(field, value);
        draft.get(field).to_string()
    }

    pub fn draft(&self) -> ListingDraft {
        lock(&self.draft).clone()
    }

    pub fn photo_counter(&self) -> String {
        lock(&self.draft).fotos.counter_label()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Opens the picker and appends the chosen image.
    ///
    /// Returns `Ok(false)` when the user cancelled. At capacity the picker
    /// is not opened.
    pub async fn add_photo(&self) -> AppResult<bool> {
        let full = lock(&self.draft).fotos.is_full();
        if full {
            warn!(max = MAX_PHOTOS, "Photo limit reached");
            return Err(AppError::new(
                ErrorCode::PhotoLimit,
                Notice::new(notice::TITLE_LIMIT, notice::PHOTO_LIMIT),
            ));
        }

        let picked = self.picker.pick(&self.options).await.map_err(|e| {
            error!(error = %e, "Image picker failed");
            AppError::internal(Notice::error(notice::PICKER_UNAVAILABLE))
        })?;

        let Some(base64) = picked else {
            debug!("Photo pick cancelled");
            return Ok(false);
        };

        lock(&self.draft).fotos.push_base64(&base64)?;
        debug!(bytes = base64.len(), "Photo attached");
        Ok(true)
    }

    /// Drops the photo at `index`. Out of range does nothing.
    pub fn remove_photo(&self, index: usize) -> bool {
        lock(&self.draft).fotos.remove(index).is_some()
    }

    /// Publishes the draft.
    pub async fn submit(&self) -> AppResult<Notice> {
        let draft = self.draft();
        draft.validate().map_err(|_| {
            AppError::validation(Notice::new(
                notice::TITLE_ATTENTION,
                notice::FILL_REQUIRED_FIELDS,
            ))
        })?;

        let _guard = self.loading.try_begin().ok_or_else(AppError::busy)?;

        let token = self
            .session
            .token()
            .await
            .map_err(|e| AppError::storage(e, notice::LISTING_UNREACHABLE))?
            .ok_or_else(|| AppError::unauthorized(Notice::error(notice::SESSION_EXPIRED)))?;

        let payload = draft.to_payload()?;
        self.api
            .create_listing(&token, &payload)
            .await
            .map_err(|e| {
                AppError::from_client(e, notice::LISTING_REJECTED, notice::LISTING_UNREACHABLE)
            })?;

        info!(
            marca = %payload.marca,
            modelo = %payload.modelo,
            photos = payload.fotos.len(),
            "Listing published"
        );
        Ok(Notice::success(notice::LISTING_CREATED))
    }
}
