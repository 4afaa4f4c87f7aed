//! Drawable resource handles
//!
//! The simulation never touches image data. It refers to loaded images by
//! [`ImageHandle`], resolved from urls through an [`AssetTable`] that the
//! platform's resource loader hands back once everything is ready.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::settings::Settings;

/// Opaque reference to a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageHandle(pub u32);

/// Every url a session needs, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    urls: Vec<String>,
}

impl AssetManifest {
    /// Sprite first, then each layer frame, without duplicates
    pub fn from_settings(settings: &Settings) -> Self {
        let mut manifest = Self::default();
        manifest.push(&settings.sprite.url);
        for layer in &settings.layers {
            for frame in &layer.frames {
                manifest.push(frame);
            }
        }
        manifest
    }

    pub fn push(&mut self, url: &str) {
        if !self.urls.iter().any(|u| u == url) {
            self.urls.push(url.to_string());
        }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// Url to handle mapping produced by a loader
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    handles: HashMap<String, ImageHandle>,
}

impl AssetTable {
    /// Handles are assigned in url order
    pub fn from_urls(urls: &[String]) -> Self {
        let handles = urls
            .iter()
            .enumerate()
            .map(|(i, url)| (url.clone(), ImageHandle(i as u32)))
            .collect();
        Self { handles }
    }

    pub fn resolve(&self, url: &str) -> Result<ImageHandle, ConfigError> {
        self.handles
            .get(url)
            .copied()
            .ok_or_else(|| ConfigError::MissingAsset(url.to_string()))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
