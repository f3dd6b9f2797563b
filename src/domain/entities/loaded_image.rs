//! Domain types for decoded images handed back to callers.

use std::sync::Arc;

use super::CacheRecord;

/// An image served from the disk cache together with its metadata.
#[derive(Debug, Clone)]
pub struct CachedImage {
    /// Ledger record the image was read through.
    pub record: CacheRecord,
    /// The decoded image.
    pub image: Arc<image::DynamicImage>,
}

/// Where an image was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Loaded from the disk cache.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Result of loading an image through the cache.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// The URL that was requested.
    pub url: String,
    /// The decoded image.
    pub image: Arc<image::DynamicImage>,
    /// Where the image came from.
    pub source: ImageSource,
}

impl LoadedImage {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_source_display() {
        assert_eq!(ImageSource::DiskCache.to_string(), "disk");
        assert_eq!(ImageSource::Network.to_string(), "network");
    }

    #[test]
    fn test_loaded_image_dimensions() {
        let loaded = LoadedImage {
            url: "https://x/a.png".to_string(),
            image: Arc::new(image::DynamicImage::new_rgb8(12, 7)),
            source: ImageSource::Network,
        };
        assert_eq!((loaded.width(), loaded.height()), (12, 7));
    }
}
