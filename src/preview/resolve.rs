//! Image resolution for the preview.
//!
//! `ImageLoader` isolates all image-fetching concerns from the layout
//! algorithm, so the renderer stays a pure function of its inputs plus the
//! loader's answers. The crate ships a filesystem-backed loader; hosts with
//! their own asset pipeline implement the trait instead.

use std::path::Path;

use crate::error::TicketeraError;

/// Dimensions of a successfully resolved image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
}

/// Resolves an image source for preview.
///
/// A `Err` return marks the source as broken for the rest of the preview
/// session; the renderer will not ask about it again.
pub trait ImageLoader {
    fn load(&self, src: &str) -> Result<LoadedImage, TicketeraError>;
}

/// Loads image metadata from the local filesystem.
///
/// Reads only the header, not the pixel data — the preview needs
/// dimensions, not pixels.
#[derive(Debug, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, src: &str) -> Result<LoadedImage, TicketeraError> {
        let (width, height) = image::image_dimensions(Path::new(src))
            .map_err(|e| TicketeraError::Image(e.to_string()))?;
        Ok(LoadedImage { width, height })
    }
}

/// A loader for hosts that do not resolve images at all: every source is
/// unavailable, so every image block previews as a placeholder.
#[derive(Debug, Default)]
pub struct OfflineLoader;

impl ImageLoader for OfflineLoader {
    fn load(&self, src: &str) -> Result<LoadedImage, TicketeraError> {
        Err(TicketeraError::Image(format!("offline: {src}")))
    }
}
