//! Layer registry: named, independently visible views over surface content.
//!
//! Entries hold no pixels. Toggling visibility only changes what the next
//! composite draws; the image stack and ink buffer are untouched.

use smallvec::SmallVec;
use vc_core::{Layer, LayerId, LayerKind};

#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: SmallVec<[Layer; 4]>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` if absent. Image layers are inserted ahead of every
    /// drawing layer. Returns true if a new entry was added.
    pub fn ensure(&mut self, id: LayerId, name: &str, kind: LayerKind) -> bool {
        if self.get(id).is_some() {
            return false;
        }
        let layer = Layer::new(id, name, kind);
        match kind {
            LayerKind::Image => {
                let at = self
                    .layers
                    .iter()
                    .position(|l| l.kind == LayerKind::Drawing)
                    .unwrap_or(self.layers.len());
                self.layers.insert(at, layer);
            }
            LayerKind::Drawing => self.layers.push(layer),
        }
        log::debug!("layer registered: {id}");
        true
    }

    pub fn remove(&mut self, id: LayerId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|l| l.id != id);
        self.layers.len() != before
    }

    /// Flip visibility. Returns the new flag, or `None` for unknown ids.
    pub fn toggle(&mut self, id: LayerId) -> Option<bool> {
        let layer = self.layers.iter_mut().find(|l| l.id == id)?;
        layer.visible = !layer.visible;
        Some(layer.visible)
    }

    /// Unregistered content is visible.
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.get(id).is_none_or(|l| l.visible)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Entries in registration order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Make the image entries exactly `images`, bottom to top. Entries that
    /// survive keep their name and visibility; the rest are dropped.
    pub fn sync_images<I>(&mut self, images: I)
    where
        I: IntoIterator<Item = (LayerId, String)>,
    {
        let mut synced: SmallVec<[Layer; 4]> = images
            .into_iter()
            .map(|(id, name)| match self.get(id) {
                Some(existing) => existing.clone(),
                None => Layer::new(id, name, LayerKind::Image),
            })
            .collect();
        synced.extend(self.layers.iter().filter(|l| l.kind != LayerKind::Image).cloned());
        self.layers = synced;
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
