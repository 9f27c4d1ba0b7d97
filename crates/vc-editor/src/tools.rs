//! Tool system for surface interactions.
//!
//! Each tool translates pointer events into `SurfaceAction`s that the
//! controller applies against the surface, history, and image stack. The
//! active `ToolMode` picks which tool sees an event; the tool's own state
//! is the interaction state (`Idle`, `Drawing`, `DraggingImage`).

use crate::input::InputEvent;
use smallvec::{SmallVec, smallvec};
use vc_core::Position;

/// Where the surface currently is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Drawing,
    DraggingImage,
}

impl InteractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Drawing => "drawing",
            InteractionState::DraggingImage => "draggingImage",
        }
    }
}

/// The placed image under the pointer at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHit {
    /// Index into the image stack.
    pub index: usize,
    /// The image's position when it was hit.
    pub position: Position,
}

/// A surface-level effect requested by a tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceAction {
    CapturePointer(i32),
    ReleasePointer(i32),
    /// Snapshot the pre-stroke state.
    BeginStroke { at: Position },
    StrokeSegment { from: Position, to: Position },
    /// `drew` is false for a press-and-release without movement.
    EndStroke { at: Position, drew: bool },
    /// Hold the pre-drag state; it becomes the undo entry at `EndDrag`
    /// only if the image moved, rather than snapshotting after the drop.
    BeginDrag { index: usize },
    MoveImage { index: usize, position: Position },
    EndDrag { index: usize, moved: bool },
}

pub type Actions = SmallVec<[SurfaceAction; 2]>;

/// Trait for tools that handle input and produce surface actions.
pub trait Tool {
    /// Handle a pointer event. `hit` is only computed for pointer-down.
    fn handle(&mut self, event: &InputEvent, hit: Option<ImageHit>) -> Actions;

    fn state(&self) -> InteractionState;

    /// End any gesture in progress as if the pointer were released.
    fn finish(&mut self) -> Actions;
}

// ─── Draw Tool ───────────────────────────────────────────────────────────

struct Stroke {
    pointer_id: i32,
    last: Position,
    drew: bool,
}

/// Freehand ink: streams consecutive pointer positions into line segments.
#[derive(Default)]
pub struct DrawTool {
    stroke: Option<Stroke>,
}

impl DrawTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for DrawTool {
    fn handle(&mut self, event: &InputEvent, _hit: Option<ImageHit>) -> Actions {
        match *event {
            InputEvent::PointerDown { x, y, pointer_id, .. } => {
                let mut actions = self.finish();
                let at = Position::new(x, y);
                self.stroke = Some(Stroke {
                    pointer_id,
                    last: at,
                    drew: false,
                });
                actions.push(SurfaceAction::CapturePointer(pointer_id));
                actions.push(SurfaceAction::BeginStroke { at });
                actions
            }
            InputEvent::PointerMove { x, y, pointer_id, .. } => match &mut self.stroke {
                Some(stroke) if stroke.pointer_id == pointer_id => {
                    let to = Position::new(x, y);
                    if to == stroke.last {
                        return smallvec![];
                    }
                    let from = std::mem::replace(&mut stroke.last, to);
                    stroke.drew = true;
                    smallvec![SurfaceAction::StrokeSegment { from, to }]
                }
                _ => smallvec![],
            },
            InputEvent::PointerUp { pointer_id, .. } => {
                if self.stroke.as_ref().is_some_and(|s| s.pointer_id == pointer_id) {
                    self.finish()
                } else {
                    smallvec![]
                }
            }
            InputEvent::Key { .. } => smallvec![],
        }
    }

    fn state(&self) -> InteractionState {
        if self.stroke.is_some() {
            InteractionState::Drawing
        } else {
            InteractionState::Idle
        }
    }

    fn finish(&mut self) -> Actions {
        match self.stroke.take() {
            Some(stroke) => smallvec![
                SurfaceAction::EndStroke {
                    at: stroke.last,
                    drew: stroke.drew,
                },
                SurfaceAction::ReleasePointer(stroke.pointer_id),
            ],
            None => smallvec![],
        }
    }
}

// ─── Move Tool ───────────────────────────────────────────────────────────

struct Drag {
    pointer_id: i32,
    index: usize,
    /// Pointer position minus image position, captured at drag start.
    offset: Position,
    start: Position,
    current: Position,
}

/// Repositions the placed image under the pointer. Presses that miss every
/// image do nothing.
#[derive(Default)]
pub struct MoveTool {
    drag: Option<Drag>,
}

impl MoveTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for MoveTool {
    fn handle(&mut self, event: &InputEvent, hit: Option<ImageHit>) -> Actions {
        match *event {
            InputEvent::PointerDown { x, y, pointer_id, .. } => {
                let mut actions = self.finish();
                let Some(hit) = hit else {
                    return actions;
                };
                let pointer = Position::new(x, y);
                self.drag = Some(Drag {
                    pointer_id,
                    index: hit.index,
                    offset: pointer.offset_from(hit.position),
                    start: hit.position,
                    current: hit.position,
                });
                actions.push(SurfaceAction::CapturePointer(pointer_id));
                actions.push(SurfaceAction::BeginDrag { index: hit.index });
                actions
            }
            InputEvent::PointerMove { x, y, pointer_id, .. } => match &mut self.drag {
                Some(drag) if drag.pointer_id == pointer_id => {
                    let position = Position::new(x, y).offset_from(drag.offset);
                    if position == drag.current {
                        return smallvec![];
                    }
                    drag.current = position;
                    smallvec![SurfaceAction::MoveImage {
                        index: drag.index,
                        position,
                    }]
                }
                _ => smallvec![],
            },
            InputEvent::PointerUp { pointer_id, .. } => {
                if self.drag.as_ref().is_some_and(|d| d.pointer_id == pointer_id) {
                    self.finish()
                } else {
                    smallvec![]
                }
            }
            InputEvent::Key { .. } => smallvec![],
        }
    }

    fn state(&self) -> InteractionState {
        if self.drag.is_some() {
            InteractionState::DraggingImage
        } else {
            InteractionState::Idle
        }
    }

    fn finish(&mut self) -> Actions {
        match self.drag.take() {
            Some(drag) => smallvec![
                SurfaceAction::EndDrag {
                    index: drag.index,
                    moved: drag.current != drag.start,
                },
                SurfaceAction::ReleasePointer(drag.pointer_id),
            ],
            None => smallvec![],
        }
    }
}
