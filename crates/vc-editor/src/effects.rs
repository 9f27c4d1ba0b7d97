//! Optional visual flourishes (sparkles and the like).
//!
//! The surface notifies an injected emitter at gesture boundaries; it never
//! reaches for global state and works the same with no emitter at all.

use vc_core::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    StrokeCommitted,
    ImagePlaced,
    ImageMoved,
    Cleared,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::StrokeCommitted => "strokeCommitted",
            EffectKind::ImagePlaced => "imagePlaced",
            EffectKind::ImageMoved => "imageMoved",
            EffectKind::Cleared => "cleared",
        }
    }
}

pub trait EffectEmitter {
    /// `at` is in surface-local logical coordinates.
    fn emit(&self, kind: EffectKind, at: Position);
}
