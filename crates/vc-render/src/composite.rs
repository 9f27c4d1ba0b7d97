//! Compositing: images beneath ink, into the surface's frame buffer.

use crate::error::ExportError;
use crate::raster::PlacedImage;
use crate::surface::Surface;
use tiny_skia::{Color as SkColor, FilterQuality, Pixmap, PixmapPaint, Transform};
use vc_core::LayerId;

/// Rebuild the frame: every visible image in stack order, then the ink
/// layer if the drawing layer is visible.
pub fn compose(surface: &mut Surface, images: &[PlacedImage], is_visible: impl Fn(LayerId) -> bool) {
    let base = surface.transform();
    let (frame, ink) = surface.split_mut();
    frame.fill(SkColor::TRANSPARENT);

    let image_paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    for image in images.iter().filter(|image| is_visible(image.id)) {
        let source = image.source.pixmap();
        if image.size.is_empty() {
            continue;
        }
        let sx = image.size.width / source.width() as f32;
        let sy = image.size.height / source.height() as f32;
        let transform = base
            .pre_translate(image.position.x, image.position.y)
            .pre_scale(sx, sy);
        frame.draw_pixmap(0, 0, source.as_ref(), &image_paint, transform, None);
    }

    if is_visible(LayerId::drawing()) {
        frame.draw_pixmap(0, 0, ink.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
    }
    log::trace!("composed {} image(s)", images.len());
}

/// Downsample the composed frame to logical size.
///
/// Exported files match what the user sees in CSS pixels regardless of
/// the device ratio. Call [`compose`] first.
pub fn flatten(surface: &Surface) -> Result<Pixmap, ExportError> {
    let logical = surface.logical_size();
    let width = (logical.width.floor() as u32).max(1);
    let height = (logical.height.floor() as u32).max(1);
    let mut out = Pixmap::new(width, height).ok_or(ExportError::Allocation { width, height })?;

    let ratio = surface.device_pixel_ratio();
    let paint = PixmapPaint {
        quality: if ratio == 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        },
        ..PixmapPaint::default()
    };
    out.draw_pixmap(
        0,
        0,
        surface.frame().as_ref(),
        &paint,
        Transform::from_scale(1.0 / ratio, 1.0 / ratio),
        None,
    );
    Ok(out)
}

/// Flatten and encode as PNG.
pub fn export_png(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    flatten(surface)?
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))
}

/// Straight-alpha RGBA bytes of the frame, row-major, for hosts that blit
/// into a 2D context.
pub fn frame_rgba(surface: &Surface) -> Vec<u8> {
    let frame = surface.frame();
    let mut out = Vec::with_capacity(frame.data().len());
    for px in frame.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
