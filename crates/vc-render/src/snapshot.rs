//! Full-surface snapshots for undo/redo.
//!
//! A snapshot is an opaque, immutable copy of everything a gesture can
//! change: the premultiplied ink raster at physical resolution plus the
//! list of placed images. Ink bytes are shared behind an `Arc`, so cloning
//! a snapshot is cheap and restoring it is lossless.

use crate::error::SnapshotError;
use crate::raster::PlacedImage;
use crate::surface::Surface;
use std::fmt;
use std::sync::Arc;
use tiny_skia::{FilterQuality, IntSize, Pixmap, PixmapPaint, Transform};

#[derive(Clone)]
pub struct Snapshot {
    width: u32,
    height: u32,
    ink: Arc<[u8]>,
    images: Vec<PlacedImage>,
}

impl Snapshot {
    /// Capture the surface's current content. `None` when the ink buffer
    /// cannot be read back, in which case callers skip the push.
    pub fn capture(surface: &Surface, images: &[PlacedImage]) -> Option<Self> {
        let ink = surface.ink();
        let data = ink.data();
        if data.is_empty() {
            log::warn!("snapshot capture skipped: empty ink buffer");
            return None;
        }
        Some(Self {
            width: ink.width(),
            height: ink.height(),
            ink: Arc::from(data),
            images: images.to_vec(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    /// Raw premultiplied RGBA bytes of the ink layer.
    pub fn ink_bytes(&self) -> &[u8] {
        &self.ink
    }

    /// True when both snapshots hold identical ink pixels.
    pub fn same_pixels(&self, other: &Snapshot) -> bool {
        self.width == other.width && self.height == other.height && self.ink == other.ink
    }

    fn to_pixmap(&self) -> Result<Pixmap, SnapshotError> {
        let corrupt = SnapshotError::Corrupt {
            width: self.width,
            height: self.height,
        };
        let size = IntSize::from_wh(self.width, self.height).ok_or(corrupt.clone())?;
        Pixmap::from_vec(self.ink.to_vec(), size).ok_or(corrupt)
    }

    /// Write the ink back into `surface` and return the image list to
    /// reinstate. A snapshot taken at another size is stretched to the
    /// current physical rectangle.
    pub fn restore_into(&self, surface: &mut Surface) -> Result<Vec<PlacedImage>, SnapshotError> {
        let pixmap = self.to_pixmap()?;
        let (width, height) = surface.physical_size();
        if (self.width, self.height) == (width, height) {
            surface.replace_ink(pixmap);
        } else {
            log::debug!(
                "restoring {}x{} snapshot into {width}x{height} surface",
                self.width,
                self.height
            );
            let sx = width as f32 / self.width as f32;
            let sy = height as f32 / self.height as f32;
            let paint = PixmapPaint {
                quality: FilterQuality::Bilinear,
                ..PixmapPaint::default()
            };
            surface.clear_ink();
            surface
                .ink_mut()
                .draw_pixmap(0, 0, pixmap.as_ref(), &paint, Transform::from_scale(sx, sy), None);
        }
        Ok(self.images.clone())
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("images", &self.images.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::draw_line;
    use crate::surface::FixedElement;
    use pretty_assertions::assert_eq;
    use vc_core::{Color, Position};

    fn stroke(surface: &mut Surface) {
        draw_line(
            &mut surface.context(),
            Position::new(10.0, 10.0),
            Position::new(10.0, 50.0),
            Color::rgb(255, 0, 0),
            4.0,
        );
    }

    #[test]
    fn restore_is_pixel_exact() {
        let mut surface = Surface::initialize(&FixedElement::new(100.0, 100.0, 1.5)).unwrap();
        stroke(&mut surface);
        let before = Snapshot::capture(&surface, &[]).unwrap();

        surface.clear_ink();
        assert!(!Snapshot::capture(&surface, &[]).unwrap().same_pixels(&before));

        let images = before.restore_into(&mut surface).unwrap();
        assert!(images.is_empty());
        assert!(Snapshot::capture(&surface, &[]).unwrap().same_pixels(&before));
    }

    #[test]
    fn restore_stretches_to_new_size() {
        let mut surface = Surface::initialize(&FixedElement::new(100.0, 100.0, 1.0)).unwrap();
        stroke(&mut surface);
        let snap = Snapshot::capture(&surface, &[]).unwrap();

        surface.resize(&FixedElement::new(200.0, 200.0, 1.0)).unwrap();
        surface.clear_ink();
        snap.restore_into(&mut surface).unwrap();
        // The stroke at logical x = 10 now spans physical x = 16..24.
        assert_eq!(surface.ink().pixel(20, 60).unwrap().alpha(), 255);
        assert_eq!(surface.ink().pixel(60, 60).unwrap().alpha(), 0);
    }
}
