//! Participant photos.
//!
//! Photos only decorate the results screen; nothing in the session depends
//! on whether a participant has one.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Errors that can occur when accepting a photo
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),

    #[error("Photo is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Photo is empty")]
    Empty,

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
}

const ACCEPTED_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Opaque reference to a participant photo (a `data:` URL)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Encode raw image bytes as a data URL
    pub fn from_bytes(mime: &str, bytes: &[u8], limit: usize) -> Result<Self, PhotoError> {
        let mime = mime.trim().to_ascii_lowercase();
        if !ACCEPTED_TYPES.contains(&mime.as_str()) {
            return Err(PhotoError::UnsupportedType(mime));
        }
        if bytes.is_empty() {
            return Err(PhotoError::Empty);
        }
        if bytes.len() > limit {
            return Err(PhotoError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Ok(Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))))
    }

    /// Accept a data URL as produced by a browser canvas (`toDataURL`)
    pub fn parse_data_url(url: &str, limit: usize) -> Result<Self, PhotoError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| PhotoError::InvalidDataUrl("missing data: prefix".to_string()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| PhotoError::InvalidDataUrl("expected base64 payload".to_string()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| PhotoError::InvalidDataUrl(e.to_string()))?;
        Self::from_bytes(mime, &bytes, limit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where participant photos live, keyed by participant name
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn get(&self, participant: &str) -> Option<PhotoRef>;

    async fn put(&self, participant: &str, photo: PhotoRef);

    async fn remove(&self, participant: &str);

    async fn clear(&self);
}

/// Photos held in memory for the lifetime of the process
#[derive(Default)]
pub struct InMemoryPhotoStore {
    photos: RwLock<HashMap<String, PhotoRef>>,
}

impl InMemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoStore for InMemoryPhotoStore {
    async fn get(&self, participant: &str) -> Option<PhotoRef> {
        self.photos.read().await.get(participant).cloned()
    }

    async fn put(&self, participant: &str, photo: PhotoRef) {
        self.photos
            .write()
            .await
            .insert(participant.to_string(), photo);
    }

    async fn remove(&self, participant: &str) {
        self.photos.write().await.remove(participant);
    }

    async fn clear(&self) {
        self.photos.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_from_bytes_builds_data_url() {
        let photo = PhotoRef::from_bytes("image/jpeg", JPEG_HEADER, 1024).unwrap();
        assert_eq!(photo.as_str(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn test_from_bytes_rejects_other_types() {
        let err = PhotoRef::from_bytes("text/plain", b"hi", 1024).unwrap_err();
        assert!(matches!(err, PhotoError::UnsupportedType(t) if t == "text/plain"));
    }

    #[test]
    fn test_from_bytes_enforces_limit() {
        let err = PhotoRef::from_bytes("image/png", &[0u8; 16], 8).unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { size: 16, limit: 8 }));

        let err = PhotoRef::from_bytes("image/png", &[], 8).unwrap_err();
        assert!(matches!(err, PhotoError::Empty));
    }

    #[test]
    fn test_parse_data_url() {
        let photo = PhotoRef::parse_data_url("data:image/jpeg;base64,/9j/4A==", 1024).unwrap();
        assert_eq!(photo.as_str(), "data:image/jpeg;base64,/9j/4A==");

        assert!(PhotoRef::parse_data_url("http://example.com/a.jpg", 1024).is_err());
        assert!(PhotoRef::parse_data_url("data:image/jpeg;base64,@@@", 1024).is_err());
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryPhotoStore::new();
        assert!(store.get("Ana").await.is_none());

        let photo = PhotoRef::from_bytes("image/jpeg", JPEG_HEADER, 1024).unwrap();
        store.put("Ana", photo.clone()).await;
        assert_eq!(store.get("Ana").await, Some(photo));

        store.remove("Ana").await;
        assert!(store.get("Ana").await.is_none());

        store
            .put("Leo", PhotoRef::from_bytes("image/png", b"png", 1024).unwrap())
            .await;
        store.clear().await;
        assert!(store.get("Leo").await.is_none());
    }
}
