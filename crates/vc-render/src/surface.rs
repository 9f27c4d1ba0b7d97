//! Surface manager: physical backing buffers and device-pixel-ratio scaling.
//!
//! A surface owns two buffers at physical resolution
//! (`floor(logical × ratio)`):
//!
//! - **ink**: the raster stroke layer, written by [`crate::stroke`].
//! - **frame**: the composited output (images beneath ink), rebuilt by
//!   [`crate::composite::compose`] and read by hosts for display/export.
//!
//! All drawing goes through a `scale(ratio)` transform so callers work in
//! logical units only.

use crate::error::SurfaceError;
use tiny_skia::{Color as SkColor, FilterQuality, LineCap, LineJoin, Pixmap, PixmapPaint, Transform};
use vc_core::Size;

/// Largest physical edge we agree to allocate.
pub const MAX_DIMENSION: u32 = 16384;

/// The host element a surface is attached to (an HTML canvas, a window,
/// or a fixed-size test double).
pub trait SurfaceElement {
    /// Size in logical (CSS) pixels.
    fn logical_size(&self) -> Size;
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f32;
}

/// A plain element with a fixed size and ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedElement {
    pub size: Size,
    pub ratio: f32,
}

impl FixedElement {
    pub fn new(width: f32, height: f32, ratio: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ratio,
        }
    }
}

impl SurfaceElement for FixedElement {
    fn logical_size(&self) -> Size {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }
}

/// Drawing state handed to the stroke renderer: target buffer, the
/// logical→physical transform, and the line style every stroke shares.
pub struct RenderContext<'a> {
    pub(crate) target: &'a mut Pixmap,
    pub(crate) transform: Transform,
    pub(crate) line_cap: LineCap,
    pub(crate) line_join: LineJoin,
}

impl RenderContext<'_> {
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

pub struct Surface {
    logical: Size,
    ratio: f32,
    ink: Pixmap,
    frame: Pixmap,
}

impl Surface {
    /// Read the element's logical size and ratio and allocate buffers.
    pub fn initialize(element: &dyn SurfaceElement) -> Result<Self, SurfaceError> {
        let ratio = sanitize_ratio(element.device_pixel_ratio());
        let logical = element.logical_size();
        let (width, height) = physical_dimensions(logical, ratio);
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let ink = Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        let frame = ink.clone();

        log::debug!(
            "surface initialized: logical {}x{} @{ratio} -> physical {width}x{height}",
            logical.width,
            logical.height
        );

        Ok(Self {
            logical,
            ratio,
            ink,
            frame,
        })
    }

    /// Reinitialize at the element's new size without losing ink.
    ///
    /// The previous ink buffer serves as the off-screen copy: it is drawn
    /// back at its old logical size, so strokes keep their logical
    /// position. Content outside a shrunken surface is clipped.
    pub fn resize(&mut self, element: &dyn SurfaceElement) -> Result<(), SurfaceError> {
        let mut next = Surface::initialize(element)?;
        let scale = next.ratio / self.ratio;
        let paint = PixmapPaint {
            quality: if scale == 1.0 {
                FilterQuality::Nearest
            } else {
                FilterQuality::Bilinear
            },
            ..PixmapPaint::default()
        };
        next.ink
            .draw_pixmap(0, 0, self.ink.as_ref(), &paint, Transform::from_scale(scale, scale), None);

        log::debug!(
            "surface resized: {}x{} -> {}x{} logical",
            self.logical.width,
            self.logical.height,
            next.logical.width,
            next.logical.height
        );
        *self = next;
        Ok(())
    }

    pub fn logical_size(&self) -> Size {
        self.logical
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }

    pub fn physical_size(&self) -> (u32, u32) {
        (self.ink.width(), self.ink.height())
    }

    /// Logical → physical transform.
    pub fn transform(&self) -> Transform {
        Transform::from_scale(self.ratio, self.ratio)
    }

    /// A stroke context targeting the ink buffer.
    pub fn context(&mut self) -> RenderContext<'_> {
        let transform = self.transform();
        RenderContext {
            target: &mut self.ink,
            transform,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
        }
    }

    pub fn ink(&self) -> &Pixmap {
        &self.ink
    }

    pub fn frame(&self) -> &Pixmap {
        &self.frame
    }

    pub fn clear_ink(&mut self) {
        self.ink.fill(SkColor::TRANSPARENT);
    }

    /// Replace ink content wholesale. `pixmap` must match the physical size.
    pub(crate) fn replace_ink(&mut self, pixmap: Pixmap) {
        debug_assert_eq!((pixmap.width(), pixmap.height()), self.physical_size());
        self.ink = pixmap;
    }

    pub(crate) fn ink_mut(&mut self) -> &mut Pixmap {
        &mut self.ink
    }

    pub(crate) fn split_mut(&mut self) -> (&mut Pixmap, &Pixmap) {
        (&mut self.frame, &self.ink)
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

fn physical_dimensions(logical: Size, ratio: f32) -> (u32, u32) {
    // `as u32` saturates: NaN and negatives become 0, then clamp to 1.
    let w = ((logical.width * ratio).floor() as u32).max(1);
    let h = ((logical.height * ratio).floor() as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn backing_store_is_scaled_by_ratio() {
        let surface = Surface::initialize(&FixedElement::new(400.0, 300.0, 2.0)).unwrap();
        assert_eq!(surface.physical_size(), (800, 600));
        assert_eq!(surface.logical_size(), Size::new(400.0, 300.0));
        assert_eq!(surface.transform(), Transform::from_scale(2.0, 2.0));
    }

    #[test]
    fn fractional_sizes_floor_and_never_hit_zero() {
        let surface = Surface::initialize(&FixedElement::new(100.7, 0.2, 1.5)).unwrap();
        assert_eq!(surface.physical_size(), (151, 1));
    }

    #[test]
    fn bad_ratio_falls_back_to_one() {
        let surface = Surface::initialize(&FixedElement::new(10.0, 10.0, f32::NAN)).unwrap();
        assert_eq!(surface.device_pixel_ratio(), 1.0);
        let surface = Surface::initialize(&FixedElement::new(10.0, 10.0, -2.0)).unwrap();
        assert_eq!(surface.physical_size(), (10, 10));
    }

    #[test]
    fn oversized_surface_is_rejected() {
        let result = Surface::initialize(&FixedElement::new(20000.0, 10.0, 1.0));
        assert!(matches!(result, Err(SurfaceError::InvalidDimensions { .. })));
    }

    #[test]
    fn resize_keeps_ink_pixels() {
        let mut surface = Surface::initialize(&FixedElement::new(50.0, 50.0, 1.0)).unwrap();
        surface
            .ink_mut()
            .fill_rect(
                tiny_skia::Rect::from_xywh(10.0, 10.0, 5.0, 5.0).unwrap(),
                &tiny_skia::Paint::default(),
                Transform::identity(),
                None,
            );
        surface.resize(&FixedElement::new(80.0, 60.0, 1.0)).unwrap();
        assert_eq!(surface.physical_size(), (80, 60));
        let px = surface.ink().pixel(12, 12).unwrap();
        assert_eq!(px.alpha(), 255);
        assert_eq!(surface.ink().pixel(40, 40).unwrap().alpha(), 0);
    }

    #[test]
    fn resize_with_new_ratio_keeps_logical_position() {
        let mut surface = Surface::initialize(&FixedElement::new(50.0, 50.0, 1.0)).unwrap();
        surface
            .ink_mut()
            .fill_rect(
                tiny_skia::Rect::from_xywh(10.0, 10.0, 10.0, 10.0).unwrap(),
                &tiny_skia::Paint::default(),
                Transform::identity(),
                None,
            );
        surface.resize(&FixedElement::new(50.0, 50.0, 2.0)).unwrap();
        assert_eq!(surface.physical_size(), (100, 100));
        // Logical (15, 15) now lives at physical (30, 30).
        assert_eq!(surface.ink().pixel(30, 30).unwrap().alpha(), 255);
        assert_eq!(surface.ink().pixel(15, 15).unwrap().alpha(), 0);
    }
}
