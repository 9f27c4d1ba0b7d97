//! `<canvas>` adapters for the surface element and pointer-capture seams.

use vc_core::{Position, Size};
use vc_editor::{CaptureError, PointerCapture};
use vc_render::SurfaceElement;
use web_sys::HtmlCanvasElement;

/// Reads size from the canvas's bounding rect and the ratio from `window`.
pub struct CanvasElement {
    canvas: HtmlCanvasElement,
}

impl CanvasElement {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Top-left of the canvas in client coordinates.
    pub fn origin(&self) -> Position {
        let rect = self.canvas.get_bounding_client_rect();
        Position::new(rect.left() as f32, rect.top() as f32)
    }

    /// Size the backing store to match the surface's physical buffers so
    /// frames blit 1:1.
    pub fn set_backing_size(&self, (width, height): (u32, u32)) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }
}

impl SurfaceElement for CanvasElement {
    fn logical_size(&self) -> Size {
        let rect = self.canvas.get_bounding_client_rect();
        Size::new(rect.width() as f32, rect.height() as f32)
    }

    fn device_pixel_ratio(&self) -> f32 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }
}

/// `Element.setPointerCapture` on the canvas.
pub struct CanvasCapture {
    canvas: HtmlCanvasElement,
}

impl CanvasCapture {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl PointerCapture for CanvasCapture {
    fn capture(&mut self, pointer_id: i32) -> Result<(), CaptureError> {
        self.canvas
            .set_pointer_capture(pointer_id)
            .map_err(|e| CaptureError::Unavailable {
                pointer_id,
                reason: format!("{e:?}"),
            })
    }

    fn release(&mut self, pointer_id: i32) -> Result<(), CaptureError> {
        self.canvas
            .release_pointer_capture(pointer_id)
            .map_err(|e| CaptureError::Unavailable {
                pointer_id,
                reason: format!("{e:?}"),
            })
    }
}
