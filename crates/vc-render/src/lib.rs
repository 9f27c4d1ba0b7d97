//! Raster engine for the design surface.
//!
//! Everything pixel-shaped lives here: the DPR-scaled backing buffers,
//! the stroke primitive, decoded images, snapshots, and compositing.

pub mod composite;
pub mod error;
pub mod hit;
pub mod raster;
pub mod snapshot;
pub mod stroke;
pub mod surface;

pub use composite::{compose, export_png, flatten, frame_rgba};
pub use error::{DecodeError, ExportError, SnapshotError, SurfaceError};
pub use hit::hit_test;
pub use raster::{PlacedImage, RasterImage, decode_image};
pub use snapshot::Snapshot;
pub use stroke::draw_line;
pub use surface::{FixedElement, RenderContext, Surface, SurfaceElement};
