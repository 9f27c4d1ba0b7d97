use thiserror::Error;
use vc_render::DecodeError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no rendering surface attached")]
    NoSurface,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("pointer {pointer_id} cannot be captured: {reason}")]
    Unavailable { pointer_id: i32, reason: String },
}
