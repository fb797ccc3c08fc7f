//! # Photo Set
//!
//! The ordered, bounded list of photos attached to a listing draft.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  picker ──base64──► push_base64 ──► [ uri0, uri1, ... uri4 ] │
//! │                          │                                   │
//! │                          └── len == MAX_PHOTOS ──► rejected  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::{JPEG_DATA_URI_PREFIX, MAX_PHOTOS};

/// Wraps raw base64 image data in the JPEG data-URI form.
pub fn to_data_uri(base64: &str) -> String {
    format!("{}{}", JPEG_DATA_URI_PREFIX, base64)
}

/// Makes a stored photo displayable.
///
/// Strings that are already image data URIs pass through; anything else is
/// taken as bare base64 JPEG data.
pub fn normalize_image_uri(photo: &str) -> String {
    if photo.starts_with("data:image") {
        photo.to_string()
    } else {
        to_data_uri(photo)
    }
}

/// Photos attached to a draft, capped at [`MAX_PHOTOS`].
///
/// Deserializing goes through the same cap, so a restored draft cannot hold
/// more photos than the form allows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PhotoSet {
    photos: Vec<String>,
}

impl<'de> Deserialize<'de> for PhotoSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            photos: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.photos.len() > MAX_PHOTOS {
            return Err(de::Error::custom(CoreError::PhotoLimitReached { max: MAX_PHOTOS }));
        }
        if raw.photos.iter().any(String::is_empty) {
            return Err(de::Error::custom(CoreError::EmptyPhoto));
        }
        Ok(PhotoSet { photos: raw.photos })
    }
}

impl PhotoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a picked image given as bare base64.
    ///
    /// Fails without touching the set when it is already full or the data
    /// is empty.
    pub fn push_base64(&mut self, base64: &str) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::PhotoLimitReached { max: MAX_PHOTOS });
        }
        if base64.is_empty() {
            return Err(CoreError::EmptyPhoto);
        }

        self.photos.push(to_data_uri(base64));
        Ok(())
    }

    /// Removes the photo at `index`, returning it.
    ///
    /// An index past the end is ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.photos.len() {
            Some(self.photos.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.photos.len() >= MAX_PHOTOS
    }

    pub fn as_slice(&self) -> &[String] {
        &self.photos
    }

    /// Section heading shown above the thumbnails: `Fotos (2/5)`.
    pub fn counter_label(&self) -> String {
        format!("Fotos ({}/{})", self.photos.len(), MAX_PHOTOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_adds_prefix() {
        let mut set = PhotoSet::new();
        set.push_base64("QUJD").unwrap();
        assert_eq!(set.as_slice(), ["data:image/jpeg;base64,QUJD"]);
        assert_eq!(set.counter_label(), "Fotos (1/5)");
    }

    #[test]
    fn test_sixth_photo_rejected_without_mutation() {
        let mut set = PhotoSet::new();
        for i in 0..MAX_PHOTOS {
            set.push_base64(&format!("img{i}")).unwrap();
        }
        assert!(set.is_full());

        let before = set.clone();
        let err = set.push_base64("extra").unwrap_err();
        assert!(matches!(err, CoreError::PhotoLimitReached { max: 5 }));
        assert_eq!(set, before);
    }

    #[test]
    fn test_empty_data_rejected() {
        let mut set = PhotoSet::new();
        assert!(matches!(set.push_base64(""), Err(CoreError::EmptyPhoto)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_by_position() {
        let mut set = PhotoSet::new();
        for name in ["a", "b", "c"] {
            set.push_base64(name).unwrap();
        }

        assert_eq!(set.remove(1).as_deref(), Some("data:image/jpeg;base64,b"));
        assert_eq!(
            set.as_slice(),
            ["data:image/jpeg;base64,a", "data:image/jpeg;base64,c"]
        );

        assert!(set.remove(7).is_none());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_normalize_image_uri() {
        assert_eq!(normalize_image_uri("QUJD"), "data:image/jpeg;base64,QUJD");
        assert_eq!(
            normalize_image_uri("data:image/png;base64,QUJD"),
            "data:image/png;base64,QUJD"
        );
    }

    #[test]
    fn test_deserialize_enforces_cap() {
        let ok: PhotoSet =
            serde_json::from_str(r#"{"photos": ["data:image/jpeg;base64,QUJD"]}"#).unwrap();
        assert_eq!(ok.len(), 1);

        let photos = vec!["data:image/jpeg;base64,QUJD"; 6];
        let six = serde_json::json!({ "photos": photos });
        let err = serde_json::from_value::<PhotoSet>(six).unwrap_err();
        assert!(err.to_string().contains("more than 5 photos"));

        assert!(serde_json::from_str::<PhotoSet>(r#"{"photos": [""]}"#).is_err());
    }
}
