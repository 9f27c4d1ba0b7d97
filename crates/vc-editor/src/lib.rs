//! Interaction layer for the design surface: input, tools, snapshot
//! history, image import, layers, and the `DesignSurface` controller.

pub mod canvas;
pub mod effects;
pub mod error;
pub mod history;
pub mod import;
pub mod input;
pub mod layers;
pub mod restore;
pub mod shortcuts;
pub mod tools;

pub use canvas::DesignSurface;
pub use effects::{EffectEmitter, EffectKind};
pub use error::{CaptureError, ImportError};
pub use input::{InputEvent, Modifiers, NoCapture, PointerCapture};
pub use tools::InteractionState;
