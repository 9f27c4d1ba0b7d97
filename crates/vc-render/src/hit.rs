//! Hit testing for placed images.

use crate::raster::PlacedImage;
use vc_core::{LayerId, Position};

/// Index of the topmost visible image whose bounds contain `p`.
///
/// Images are stored bottom-to-top, so the walk runs in reverse. Hidden
/// layers are skipped.
pub fn hit_test(images: &[PlacedImage], p: Position, is_visible: impl Fn(LayerId) -> bool) -> Option<usize> {
    images
        .iter()
        .enumerate()
        .rev()
        .find(|(_, image)| is_visible(image.id) && image.bounds().contains(p))
        .map(|(index, _)| index)
}
