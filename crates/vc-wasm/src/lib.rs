//! WASM bridge for Vibe Canvas: exposes the design surface to the
//! browser's design-generator page.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer,
//! keyboard, resize, and file-picker events here and calls `render` from
//! its animation frame.

mod element;

use element::{CanvasCapture, CanvasElement};
use serde::Serialize;
use vc_core::{Bounds, Position, SurfaceConfig, ToolMode};
use vc_editor::shortcuts::ShortcutAction;
use vc_editor::{DesignSurface, ImportError, InputEvent, Modifiers};
use wasm_bindgen::Clamped;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// The WASM-facing surface controller. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct VibeCanvas {
    element: CanvasElement,
    surface: DesignSurface,
}

#[wasm_bindgen]
impl VibeCanvas {
    /// Attach to `canvas`. `config_json` is the host option object
    /// (`{"brushColor":"#ff0000","brushSize":4,"tool":"draw"}`); an empty
    /// string takes defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<VibeCanvas, JsValue> {
        console_error_panic_hook_setup();

        let config = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        let mut surface = DesignSurface::new(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .with_pointer_capture(CanvasCapture::new(canvas.clone()));
        let element = CanvasElement::new(canvas);
        surface
            .attach(&element)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut this = Self { element, surface };
        this.sync_backing_store();
        Ok(this)
    }

    /// Follow the canvas's current CSS size and device ratio, keeping ink.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.surface
            .resize(&self.element)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.sync_backing_store();
        Ok(())
    }

    fn sync_backing_store(&mut self) {
        if let Some(surface) = self.surface.surface() {
            self.element.set_backing_size(surface.physical_size());
        }
    }

    /// Settle pending restores, composite, and blit to `ctx`.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        if !self.surface.redraw() {
            return Ok(());
        }
        let (Some(rgba), Some(surface)) = (self.surface.frame_rgba(), self.surface.surface()) else {
            return Ok(());
        };
        let (width, height) = surface.physical_size();
        let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), width, height)?;
        ctx.put_image_data(&data, 0.0, 0.0)
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    fn local(&self, client_x: f32, client_y: f32) -> Position {
        Position::from_client(client_x, client_y, self.element.origin())
    }

    /// Returns true if surface content changed.
    pub fn pointer_down(&mut self, client_x: f32, client_y: f32, pointer_id: i32) -> bool {
        let p = self.local(client_x, client_y);
        self.surface
            .handle_event(&InputEvent::pointer_down(p.x, p.y, pointer_id))
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, pointer_id: i32) -> bool {
        let p = self.local(client_x, client_y);
        self.surface
            .handle_event(&InputEvent::pointer_move(p.x, p.y, pointer_id))
    }

    pub fn pointer_up(&mut self, client_x: f32, client_y: f32, pointer_id: i32) -> bool {
        let p = self.local(client_x, client_y);
        self.surface
            .handle_event(&InputEvent::pointer_up(p.x, p.y, pointer_id))
    }

    /// `idle`, `drawing`, or `draggingImage`.
    pub fn interaction_state(&self) -> String {
        self.surface.interaction_state().as_str().to_string()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"handled":bool,"action":"<action_name>","tool":"<tool_name>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let action = self.surface.handle_key(key, modifiers);
        key_response(action, self.surface.tool())
    }

    // ─── Tool & brush ────────────────────────────────────────────────────

    /// Set the tool by name. Returns false for unknown names.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match name.parse::<ToolMode>() {
            Ok(mode) => {
                self.surface.set_tool(mode);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn get_tool_name(&self) -> String {
        self.surface.tool().as_str().to_string()
    }

    pub fn set_brush_color(&mut self, css: &str) -> bool {
        self.surface.set_brush_color(css).is_ok()
    }

    pub fn set_brush_size(&mut self, size: f32) -> bool {
        self.surface.set_brush_size(size).is_ok()
    }

    /// Pick a palette swatch; switches to the draw tool.
    pub fn select_palette_color(&mut self, css: &str) -> bool {
        self.surface.select_palette_color(css).is_ok()
    }

    // ─── History & actions ───────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.surface.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.surface.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.surface.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.surface.can_redo()
    }

    pub fn clear(&mut self) -> bool {
        self.surface.clear()
    }

    /// Import picked file bytes. Returns JSON:
    /// `{"ok":true,"bounds":{...}}` or `{"ok":false,"error":"..."}`.
    pub fn import_image(&mut self, bytes: &[u8]) -> String {
        import_response(self.surface.import_image(bytes))
    }

    // ─── Layers & export ─────────────────────────────────────────────────

    /// The layer list as JSON: `[{"id","name","visible","type"}]`.
    pub fn layers_json(&self) -> String {
        serde_json::to_string(self.surface.layers()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn toggle_layer(&mut self, id: &str) -> bool {
        self.surface.toggle_layer(id).is_some()
    }

    /// The flattened surface as PNG bytes at logical size.
    pub fn export_png(&mut self) -> Result<Vec<u8>, JsValue> {
        self.surface
            .export_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `design-<now>.png`.
    pub fn export_file_name(&self) -> String {
        DesignSurface::export_file_name(js_sys::Date::now() as u64)
    }
}

fn parse_config(json: &str) -> Result<SurfaceConfig, String> {
    if json.trim().is_empty() {
        return Ok(SurfaceConfig::default());
    }
    SurfaceConfig::from_json(json).map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct KeyResponse<'a> {
    handled: bool,
    action: &'a str,
    tool: &'a str,
}

fn key_response(action: Option<ShortcutAction>, tool: ToolMode) -> String {
    let response = KeyResponse {
        handled: action.is_some(),
        action: action.map_or("none", |a| a.as_str()),
        tool: tool.as_str(),
    };
    serde_json::to_string(&response).unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn import_response(result: Result<Bounds, ImportError>) -> String {
    let response = match result {
        Ok(bounds) => ImportResponse {
            ok: true,
            bounds: Some(bounds),
            error: None,
        },
        Err(e) => ImportResponse {
            ok: false,
            bounds: None,
            error: Some(e.to_string()),
        },
    };
    serde_json::to_string(&response).unwrap_or_default()
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Vibe Canvas WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
