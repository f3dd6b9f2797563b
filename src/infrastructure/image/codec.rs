//! Image decoding and lossy re-encoding for stored blobs.

use std::io::Cursor;
use std::sync::Arc;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::domain::errors::{CacheError, CacheResult};

/// JPEG quality used for stored blobs (0.7 on a 0–1 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Decodes fetched bytes and encodes images for the blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCodec {
    quality: u8,
}

impl ImageCodec {
    /// Creates a codec with the given JPEG quality, clamped to 1..=100.
    #[must_use]
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Returns the JPEG quality.
    #[must_use]
    pub const fn quality(&self) -> u8 {
        self.quality
    }

    /// Decodes bytes in any supported format.
    ///
    /// # Errors
    /// Returns `DecodeFailed` if the bytes are not a supported image.
    pub fn decode(bytes: &[u8]) -> CacheResult<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| CacheError::DecodeFailed(e.to_string()))
    }

    /// Encodes an image as JPEG. Alpha is dropped.
    ///
    /// # Errors
    /// Returns `EncodeFailed` if the encoder rejects the image.
    pub fn encode(&self, image: &DynamicImage) -> CacheResult<Vec<u8>> {
        let rgb = image.to_rgb8();
        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode_image(&rgb)
            .map_err(|e| CacheError::EncodeFailed(e.to_string()))?;
        Ok(out.into_inner())
    }

    /// Decodes on the blocking pool.
    ///
    /// # Errors
    /// Returns `DecodeFailed` if decoding fails or the task panics.
    pub async fn decode_blocking(bytes: Vec<u8>) -> CacheResult<DynamicImage> {
        tokio::task::spawn_blocking(move || Self::decode(&bytes))
            .await
            .map_err(|e| CacheError::DecodeFailed(format!("Decode task panicked: {e}")))?
    }

    /// Encodes on the blocking pool.
    ///
    /// # Errors
    /// Returns `EncodeFailed` if encoding fails or the task panics.
    pub async fn encode_blocking(&self, image: Arc<DynamicImage>) -> CacheResult<Vec<u8>> {
        let codec = *self;
        tokio::task::spawn_blocking(move || codec.encode(&image))
            .await
            .map_err(|e| CacheError::EncodeFailed(format!("Encode task panicked: {e}")))?
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}
