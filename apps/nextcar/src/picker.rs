//! # Image Picker
//!
//! Source of photos for the listing form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ListingController::add_photo                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ImagePicker::pick(options) ──► Some(base64) ──► PhotoSet::push_base64  │
//! │                             └─► None          ──► user cancelled        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mobile gallery is one implementation; the command line uses
//! [`FilePicker`], which reads queued image files from disk.

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use nextcar_api::config::PickerSettings;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// What the form asks the picker for.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    /// Offer a crop step after picking.
    pub allows_editing: bool,
    /// Crop aspect, width by height.
    pub aspect: (u32, u32),
    /// JPEG quality in `(0, 1]`.
    pub quality: f32,
    /// Return the image as base64.
    pub base64: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        PickerOptions {
            allows_editing: true,
            aspect: (4, 3),
            quality: 0.5,
            base64: true,
        }
    }
}

impl PickerOptions {
    pub fn from_settings(settings: &PickerSettings) -> Self {
        PickerOptions {
            allows_editing: settings.allows_editing,
            quality: settings.quality,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image picker unavailable: {0}")]
    Unavailable(String),

    #[error("Not a JPEG image: {}", .0.display())]
    NotJpeg(PathBuf),
}

/// Platform image picker.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Base64 image data, or `None` when the user cancelled.
    async fn pick(&self, options: &PickerOptions) -> Result<Option<String>, PickerError>;
}

/// JPEG start-of-image marker.
const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Picks queued files in order. An empty queue reads as a cancel.
///
/// Files must already be JPEG, since photos are stored as
/// `data:image/jpeg` URIs. Bytes are sent as read: `quality` and
/// `allows_editing` only apply to the interactive gallery.
#[derive(Debug, Default)]
pub struct FilePicker {
    queue: Mutex<VecDeque<PathBuf>>,
}

impl FilePicker {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        FilePicker {
            queue: Mutex::new(paths.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ImagePicker for FilePicker {
    async fn pick(&self, _options: &PickerOptions) -> Result<Option<String>, PickerError> {
        let Some(path) = self.queue.lock().await.pop_front() else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(&path).await?;
        if !bytes.starts_with(&JPEG_MAGIC) {
            return Err(PickerError::NotJpeg(path));
        }
        debug!(path = %path.display(), bytes = bytes.len(), "Picked image file");
        Ok(Some(STANDARD.encode(bytes)))
    }
}
