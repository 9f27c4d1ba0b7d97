//! Image placement: fit-and-center and the background image stack.

use kurbo::{Rect, Size as KurboSize};
use vc_core::{Bounds, LayerId, Position, Size};
use vc_render::PlacedImage;

/// Scale that shrinks `image` to fit within `fraction` of each surface
/// dimension. Never enlarges.
pub fn fit_scale(surface: Size, image: Size, fraction: f32) -> f32 {
    if image.is_empty() {
        return 1.0;
    }
    (fraction * surface.width / image.width)
        .min(fraction * surface.height / image.height)
        .min(1.0)
}

/// Where an imported image lands: scaled by [`fit_scale`] and centered on
/// the surface.
pub fn fit_and_center(surface: Size, image: Size, fraction: f32) -> Bounds {
    let scale = fit_scale(surface, image, fraction) as f64;
    let scaled = KurboSize::new(image.width as f64 * scale, image.height as f64 * scale);
    let area = Rect::new(0.0, 0.0, surface.width as f64, surface.height as f64);
    Bounds::from_rect(Rect::from_center_size(area.center(), scaled))
}

/// The placed images, bottom to top.
///
/// With a capacity of 1 a new placement replaces the previous image; with
/// more, images stack and the oldest is evicted past capacity.
#[derive(Debug, Clone)]
pub struct ImageStack {
    images: Vec<PlacedImage>,
    capacity: usize,
}

impl ImageStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            images: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Whether each placement gets its own layer entry.
    pub fn is_stacked(&self) -> bool {
        self.capacity > 1
    }

    /// Add `image` on top. Returns whatever was pushed out.
    pub fn place(&mut self, image: PlacedImage) -> Vec<PlacedImage> {
        self.images.push(image);
        let excess = self.images.len().saturating_sub(self.capacity);
        self.images.drain(..excess).collect()
    }

    pub fn get(&self, index: usize) -> Option<&PlacedImage> {
        self.images.get(index)
    }

    pub fn position_of(&self, index: usize) -> Option<Position> {
        self.images.get(index).map(|image| image.position)
    }

    /// Move image `index`. Returns false if there is no such image.
    pub fn set_position(&mut self, index: usize, position: Position) -> bool {
        match self.images.get_mut(index) {
            Some(image) => {
                image.position = position;
                true
            }
            None => false,
        }
    }

    /// Replace the whole stack, as when a snapshot is restored.
    pub fn replace_all(&mut self, images: Vec<PlacedImage>) {
        self.images = images;
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    pub fn as_slice(&self) -> &[PlacedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
