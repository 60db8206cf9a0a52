//! Layer Stack
//!
//! Append-only ordered layers plus the active selection. The stack never
//! drops below one layer and the active index always points into it.

use crate::{Layer, LayerError, LayerId};

/// Ordered collection of layers, back to front
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: usize,
    next_id: u64,
    width: u32,
    height: u32,
}

impl LayerStack {
    /// Stack with a single empty "Layer 1"
    pub fn new(width: u32, height: u32) -> Self {
        let mut stack = Self {
            layers: Vec::new(),
            active: 0,
            next_id: 1,
            width,
            height,
        };
        stack.add_layer();
        stack
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Append a new frontmost layer and make it active
    pub fn add_layer(&mut self) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;

        let name = format!("Layer {}", self.layers.len() + 1);
        tracing::debug!("Adding {} ({})", name, id);

        self.layers.push(Layer::new(id, name, self.width, self.height));
        self.active = self.layers.len() - 1;
        id
    }

    /// Remove a layer.
    ///
    /// Refused with `LastLayer` when only one layer remains. Deleting the
    /// active layer moves the selection to the back-most remaining layer.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<(), LayerError> {
        if self.layers.len() <= 1 {
            return Err(LayerError::LastLayer);
        }
        let index = self.index_of(id).ok_or(LayerError::NotFound(id))?;

        self.layers.remove(index);
        if index == self.active {
            self.active = 0;
        } else if index < self.active {
            self.active -= 1;
        }

        tracing::debug!("Deleted {}, active is now {}", id, self.active_id());
        Ok(())
    }

    /// Flip visibility, returning the new state
    pub fn toggle_visibility(&mut self, id: LayerId) -> Result<bool, LayerError> {
        let layer = self.get_mut(id).ok_or(LayerError::NotFound(id))?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Make `id` the active layer
    pub fn select(&mut self, id: LayerId) -> Result<(), LayerError> {
        self.active = self.index_of(id).ok_or(LayerError::NotFound(id))?;
        Ok(())
    }

    /// Resize every layer's surface, keeping content at the origin
    pub fn resize_all(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        for layer in &mut self.layers {
            layer.surface_mut().resize(width, height);
        }
    }

    /// Clear the pixels of every layer
    pub fn clear_all(&mut self) {
        for layer in &mut self.layers {
            layer.surface_mut().clear();
        }
    }

    pub fn active_id(&self) -> LayerId {
        self.layers[self.active].id()
    }

    pub fn active(&self) -> &Layer {
        &self.layers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.active]
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Layers in paint order
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Never true for a constructed stack
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }
}
