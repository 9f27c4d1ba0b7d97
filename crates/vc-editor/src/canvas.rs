//! The design surface controller.
//!
//! `DesignSurface` ties the pieces together: pointer input goes to the
//! active tool, tool actions hit the surface, history, and image stack,
//! and undo/redo hand their snapshots to the restore queue. Every
//! operation is a no-op until a surface is attached.

use crate::effects::{EffectEmitter, EffectKind};
use crate::error::ImportError;
use crate::history::SnapshotHistory;
use crate::import::{ImageStack, fit_and_center};
use crate::input::{InputEvent, Modifiers, NoCapture, PointerCapture};
use crate::layers::LayerRegistry;
use crate::restore::RestoreQueue;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{Actions, DrawTool, ImageHit, InteractionState, MoveTool, SurfaceAction, Tool};
use std::sync::Arc;
use vc_core::config::validate_brush_size;
use vc_core::id::IMAGE_LAYER;
use vc_core::{
    Bounds, Brush, Color, ColorError, ConfigError, Layer, LayerId, LayerKind, Position, SurfaceConfig, ToolMode,
};
use vc_render::{
    ExportError, PlacedImage, Snapshot, Surface, SurfaceElement, SurfaceError, compose, decode_image, draw_line,
    frame_rgba, hit_test,
};

const DRAWING_LAYER_NAME: &str = "Drawing";
const IMAGE_LAYER_NAME: &str = "Imported Image";

pub struct DesignSurface {
    config: SurfaceConfig,
    surface: Option<Surface>,
    brush: Brush,
    tool: ToolMode,
    draw_tool: DrawTool,
    move_tool: MoveTool,
    history: SnapshotHistory<Snapshot>,
    restores: RestoreQueue<Snapshot>,
    images: ImageStack,
    /// Number for the next stacked image id.
    next_image: u64,
    layers: LayerRegistry,
    capture: Box<dyn PointerCapture>,
    effects: Option<Box<dyn EffectEmitter>>,
}

impl DesignSurface {
    pub fn new(config: SurfaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            brush: config.brush()?,
            tool: config.tool,
            draw_tool: DrawTool::new(),
            move_tool: MoveTool::new(),
            history: SnapshotHistory::new(config.history_limit),
            restores: RestoreQueue::new(),
            images: ImageStack::new(config.max_images),
            next_image: 0,
            layers: LayerRegistry::new(),
            capture: Box::new(NoCapture),
            effects: None,
            surface: None,
            config,
        })
    }

    pub fn with_pointer_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    pub fn with_effects(mut self, effects: impl EffectEmitter + 'static) -> Self {
        self.effects = Some(Box::new(effects));
        self
    }

    // ─── Surface lifecycle ───────────────────────────────────────────────

    /// Bind to a fresh element. Any previous surface is discarded along
    /// with its images and history.
    pub fn attach(&mut self, element: &dyn SurfaceElement) -> Result<(), SurfaceError> {
        let surface = Surface::initialize(element)?;
        self.reset();
        self.surface = Some(surface);
        Ok(())
    }

    fn reset(&mut self) {
        self.draw_tool = DrawTool::new();
        self.move_tool = MoveTool::new();
        self.history.clear();
        self.restores = RestoreQueue::new();
        self.images.clear();
        self.next_image = 0;
        self.layers = LayerRegistry::new();
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Follow the element's new size, keeping ink. Without a surface this
    /// is a plain [`Self::attach`].
    pub fn resize(&mut self, element: &dyn SurfaceElement) -> Result<(), SurfaceError> {
        self.settle_restores();
        match self.surface.as_mut() {
            Some(surface) => surface.resize(element),
            None => self.attach(element),
        }
    }

    // ─── Tool & brush ────────────────────────────────────────────────────

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Switch tool mode. A gesture in progress is finished first.
    pub fn set_tool(&mut self, mode: ToolMode) {
        if mode == self.tool {
            return;
        }
        self.finish_gesture();
        log::debug!("tool: {} -> {mode}", self.tool);
        self.tool = mode;
    }

    pub fn toggle_last_tool(&mut self) -> ToolMode {
        let next = match self.tool {
            ToolMode::Draw => ToolMode::Move,
            ToolMode::Move => ToolMode::Draw,
        };
        self.set_tool(next);
        next
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn set_brush_color(&mut self, css: &str) -> Result<(), ColorError> {
        self.brush.color = Color::parse(css)?;
        Ok(())
    }

    pub fn set_brush_size(&mut self, size: f32) -> Result<(), ConfigError> {
        validate_brush_size(size)?;
        self.brush.size = size;
        Ok(())
    }

    /// Pick a palette swatch: sets the brush color and switches to draw.
    pub fn select_palette_color(&mut self, css: &str) -> Result<(), ColorError> {
        self.set_brush_color(css)?;
        self.set_tool(ToolMode::Draw);
        Ok(())
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one event. Returns true if surface content changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Key { key, modifiers } = event {
            return self.handle_key(key, *modifiers).is_some();
        }
        if self.surface.is_none() {
            return false;
        }

        let hit = match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.settle_restores();
                match self.tool {
                    ToolMode::Move => self.hit_image(Position::new(x, y)),
                    ToolMode::Draw => None,
                }
            }
            _ => None,
        };
        let actions = match self.tool {
            ToolMode::Draw => self.draw_tool.handle(event, hit),
            ToolMode::Move => self.move_tool.handle(event, hit),
        };
        self.apply_actions(actions)
    }

    /// Resolve and perform a keyboard shortcut. `Export` is returned for
    /// the host to carry out.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(key, modifiers.ctrl, modifiers.shift, modifiers.alt, modifiers.meta)?;
        match action {
            ShortcutAction::ToolDraw => self.set_tool(ToolMode::Draw),
            ShortcutAction::ToolMove => self.set_tool(ToolMode::Move),
            ShortcutAction::ToggleLastTool => {
                self.toggle_last_tool();
            }
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Clear => {
                self.clear();
            }
            ShortcutAction::Export => {}
        }
        Some(action)
    }

    /// The topmost visible image at `p`.
    pub fn hit_image(&self, p: Position) -> Option<ImageHit> {
        let layers = &self.layers;
        let index = hit_test(self.images.as_slice(), p, |id| layers.is_visible(id))?;
        Some(ImageHit {
            index,
            position: self.images.position_of(index)?,
        })
    }

    pub fn interaction_state(&self) -> InteractionState {
        match self.tool {
            ToolMode::Draw => self.draw_tool.state(),
            ToolMode::Move => self.move_tool.state(),
        }
    }

    fn finish_gesture(&mut self) -> bool {
        let actions = match self.tool {
            ToolMode::Draw => self.draw_tool.finish(),
            ToolMode::Move => self.move_tool.finish(),
        };
        self.apply_actions(actions)
    }

    fn apply_actions(&mut self, actions: Actions) -> bool {
        let mut changed = false;
        for action in actions {
            changed |= self.apply_action(action);
        }
        changed
    }

    fn apply_action(&mut self, action: SurfaceAction) -> bool {
        match action {
            SurfaceAction::CapturePointer(pointer_id) => {
                if let Err(e) = self.capture.capture(pointer_id) {
                    log::debug!("{e}");
                }
                false
            }
            SurfaceAction::ReleasePointer(pointer_id) => {
                if let Err(e) = self.capture.release(pointer_id) {
                    log::debug!("{e}");
                }
                false
            }
            SurfaceAction::BeginStroke { .. } => {
                self.save_snapshot();
                false
            }
            SurfaceAction::StrokeSegment { from, to } => {
                let Some(surface) = self.surface.as_mut() else {
                    return false;
                };
                draw_line(&mut surface.context(), from, to, self.brush.color, self.brush.size);
                self.layers
                    .ensure(LayerId::drawing(), DRAWING_LAYER_NAME, LayerKind::Drawing);
                true
            }
            SurfaceAction::EndStroke { at, drew } => {
                if drew {
                    self.emit(EffectKind::StrokeCommitted, at);
                }
                false
            }
            SurfaceAction::BeginDrag { .. } => {
                if let Some(snapshot) = self.capture_snapshot() {
                    self.history.begin_gesture(snapshot);
                }
                false
            }
            SurfaceAction::MoveImage { index, position } => self.images.set_position(index, position),
            SurfaceAction::EndDrag { index, moved } => {
                self.history.end_gesture(moved);
                if moved {
                    if let Some(image) = self.images.get(index) {
                        self.emit(EffectKind::ImageMoved, image.bounds().center());
                    }
                }
                false
            }
        }
    }

    fn emit(&self, kind: EffectKind, at: Position) {
        if let Some(effects) = &self.effects {
            effects.emit(kind, at);
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Snapshot of the live surface and image placements.
    pub fn capture_snapshot(&self) -> Option<Snapshot> {
        Snapshot::capture(self.surface.as_ref()?, self.images.as_slice())
    }

    /// The state undo/redo treat as current: the newest pending restore if
    /// one is in flight, otherwise the live surface.
    fn current_state(&self) -> Option<Snapshot> {
        match self.restores.latest_pending() {
            Some(pending) => Some(pending.clone()),
            None => self.capture_snapshot(),
        }
    }

    /// Push the current state onto the undo stack, clearing redo.
    /// Returns false if there is no surface or the capture failed.
    pub fn save_snapshot(&mut self) -> bool {
        if self.surface.is_none() {
            return false;
        }
        self.settle_restores();
        match self.capture_snapshot() {
            Some(snapshot) => {
                self.history.save(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step back one action. Returns the id of the issued restore request.
    pub fn undo(&mut self) -> Option<u64> {
        self.surface.as_ref()?;
        self.finish_gesture();
        if !self.history.can_undo() {
            return None;
        }
        let current = self.current_state();
        let target = self.history.undo(|| current)?;
        let id = self.restores.issue(target);
        log::debug!("undo: restore #{id} ({} left)", self.history.undo_len());
        Some(id)
    }

    /// Step forward one undone action. Returns the restore request id.
    pub fn redo(&mut self) -> Option<u64> {
        self.surface.as_ref()?;
        self.finish_gesture();
        if !self.history.can_redo() {
            return None;
        }
        let current = self.current_state();
        let target = self.history.redo(|| current)?;
        let id = self.restores.issue(target);
        log::debug!("redo: restore #{id} ({} left)", self.history.redo_len());
        Some(id)
    }

    /// Complete all pending restores; the newest wins.
    pub fn settle_restores(&mut self) -> bool {
        match self.restores.settle() {
            Some(snapshot) => self.apply_restore(&snapshot),
            None => false,
        }
    }

    /// Complete restore `id`. Stale requests are discarded without
    /// touching the surface.
    pub fn complete_restore(&mut self, id: u64) -> bool {
        match self.restores.complete(id) {
            Some(snapshot) => self.apply_restore(&snapshot),
            None => false,
        }
    }

    pub fn pending_restores(&self) -> usize {
        self.restores.pending_len()
    }

    fn apply_restore(&mut self, snapshot: &Snapshot) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        match snapshot.restore_into(surface) {
            Ok(images) => {
                self.images.replace_all(images);
                self.sync_image_layers();
                true
            }
            Err(e) => {
                log::warn!("restore failed: {e}");
                false
            }
        }
    }

    /// Image layer entries mirror the image stack, in stack order.
    fn sync_image_layers(&mut self) {
        let entries = self.images.as_slice().iter().map(|image| (image.id, image_layer_name(image.id)));
        self.layers.sync_images(entries);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    // ─── Mutating actions ────────────────────────────────────────────────

    /// Erase ink and remove placed images, as one undoable action.
    pub fn clear(&mut self) -> bool {
        if self.surface.is_none() {
            return false;
        }
        self.finish_gesture();
        self.save_snapshot();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.clear_ink();
        let center = Bounds::from_origin_size(Position::default(), surface.logical_size()).center();
        self.images.clear();
        self.sync_image_layers();
        self.emit(EffectKind::Cleared, center);
        true
    }

    /// Decode `bytes` and place the image fit-and-centered.
    ///
    /// The pre-import snapshot is pushed before decoding, so a decode
    /// failure still leaves it on the undo stack.
    pub fn import_image(&mut self, bytes: &[u8]) -> Result<Bounds, ImportError> {
        if self.surface.is_none() {
            return Err(ImportError::NoSurface);
        }
        self.finish_gesture();
        self.save_snapshot();

        let raster = decode_image(bytes).inspect_err(|e| log::warn!("image import failed: {e}"))?;
        let logical = self
            .surface
            .as_ref()
            .map(Surface::logical_size)
            .ok_or(ImportError::NoSurface)?;
        let bounds = fit_and_center(logical, raster.size(), self.config.fit_fraction);

        let id = if self.images.is_stacked() {
            let n = self.next_image;
            self.next_image += 1;
            LayerId::numbered(IMAGE_LAYER, n)
        } else {
            LayerId::image()
        };
        let evicted = self.images.place(PlacedImage::new(id, Arc::new(raster), bounds));
        if !evicted.is_empty() {
            log::debug!("evicted {} image(s) past capacity", evicted.len());
        }
        self.sync_image_layers();
        self.layers
            .ensure(LayerId::drawing(), DRAWING_LAYER_NAME, LayerKind::Drawing);

        log::info!(
            "image placed at ({}, {}) {}x{}",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        );
        self.redraw();
        self.emit(EffectKind::ImagePlaced, bounds.center());
        Ok(bounds)
    }

    // ─── Layers & output ─────────────────────────────────────────────────

    /// Flip a layer's visibility and redraw. `None` for unknown ids.
    pub fn toggle_layer(&mut self, id: &str) -> Option<bool> {
        let visible = self.layers.toggle(LayerId::lookup(id)?)?;
        self.redraw();
        Some(visible)
    }

    pub fn layers(&self) -> &[Layer] {
        self.layers.layers()
    }

    pub fn images(&self) -> &[PlacedImage] {
        self.images.as_slice()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Settle restores and recomposite the frame.
    pub fn redraw(&mut self) -> bool {
        self.settle_restores();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let layers = &self.layers;
        compose(surface, self.images.as_slice(), |id| layers.is_visible(id));
        true
    }

    /// Straight-alpha RGBA of the last composed frame.
    pub fn frame_rgba(&self) -> Option<Vec<u8>> {
        self.surface.as_ref().map(frame_rgba)
    }

    /// Redraw, then flatten to a logical-size PNG.
    pub fn export_png(&mut self) -> Result<Vec<u8>, ExportError> {
        self.redraw();
        let surface = self.surface.as_ref().ok_or(ExportError::NoSurface)?;
        vc_render::export_png(surface)
    }

    /// Download name for an export taken at `timestamp_ms`.
    pub fn export_file_name(timestamp_ms: u64) -> String {
        format!("design-{timestamp_ms}.png")
    }
}

fn image_layer_name(id: LayerId) -> String {
    match id.number(IMAGE_LAYER) {
        Some(n) => format!("Image {}", n + 1),
        None => IMAGE_LAYER_NAME.to_string(),
    }
}
