use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidDimensions { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot buffer does not describe a {width}x{height} raster")]
    Corrupt { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("no image data")]
    Empty,
    #[error("unsupported or corrupt image: {0}")]
    Format(#[from] image::ImageError),
    #[error("image is too large ({width}x{height})")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("no rendering surface attached")]
    NoSurface,
    #[error("cannot allocate a {width}x{height} export buffer")]
    Allocation { width: u32, height: u32 },
    #[error("png encoding failed: {0}")]
    Encode(String),
}
