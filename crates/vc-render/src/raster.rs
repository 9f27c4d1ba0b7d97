//! Decoded raster images and their placement on the surface.

use crate::error::DecodeError;
use crate::surface::MAX_DIMENSION;
use std::fmt;
use std::sync::Arc;
use tiny_skia::{ColorU8, IntSize, Pixmap};
use vc_core::{Bounds, LayerId, Position, Size};

/// A decoded, premultiplied image. Immutable once decoded.
#[derive(Clone)]
pub struct RasterImage {
    pixmap: Pixmap,
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 rows.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Option<Self> {
        let size = IntSize::from_wh(width, height)?;
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let mut pixmap = Pixmap::new(size.width(), size.height())?;
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Some(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Natural size, one logical unit per source pixel.
    pub fn size(&self) -> Size {
        Size::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RasterImage({}x{})", self.width(), self.height())
    }
}

/// Decode user-supplied bytes (PNG, JPEG, GIF, WebP, BMP).
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(DecodeError::TooLarge { width, height });
    }
    RasterImage::from_rgba(width, height, rgba.as_raw()).ok_or(DecodeError::TooLarge { width, height })
}

/// An image positioned on the background layer.
#[derive(Clone)]
pub struct PlacedImage {
    /// Layer entry controlling this image's visibility.
    pub id: LayerId,
    pub source: Arc<RasterImage>,
    pub position: Position,
    /// Displayed size in logical units (after fit scaling).
    pub size: Size,
}

impl PlacedImage {
    pub fn new(id: LayerId, source: Arc<RasterImage>, bounds: Bounds) -> Self {
        Self {
            id,
            source,
            position: bounds.origin(),
            size: bounds.size(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.position, self.size)
    }
}

impl PartialEq for PlacedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && Arc::ptr_eq(&self.source, &other.source)
            && self.position == other.position
            && self.size == other.size
    }
}

impl fmt::Debug for PlacedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlacedImage")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("position", &self.position)
            .field("size", &self.size)
            .finish()
    }
}
