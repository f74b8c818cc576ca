//! Layer stack.
//!
//! Layers are kept bottom-to-top. Exactly one layer is active at a time and
//! receives strokes.

use crate::engine::RasterSurface;
use crate::error::{PaletteaError, Result};

/// Stable layer identifier (never reused within a stack).
pub type LayerId = u32;

/// A paintable layer.
#[derive(Debug, Clone)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    pub surface: RasterSurface,
}

/// Ordered collection of layers with an active selection.
#[derive(Debug, Clone)]
pub struct LayerStack {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active: LayerId,
    next_id: LayerId,
}

impl LayerStack {
    /// Create a stack holding a single empty `Layer 1`.
    pub fn new(width: u32, height: u32) -> Self {
        let mut stack = Self {
            width,
            height,
            layers: Vec::new(),
            active: 0,
            next_id: 1,
        };
        stack.add(None);
        stack
    }

    /// Append a layer on top and make it active. Unnamed layers are called
    /// `Layer N` where N is the new layer count.
    pub fn add(&mut self, name: Option<&str>) -> LayerId {
        let id = self.next_id;
        self.next_id += 1;
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("Layer {}", self.layers.len() + 1),
        };
        self.layers.push(Layer {
            id,
            name,
            visible: true,
            locked: false,
            surface: RasterSurface::new(self.width, self.height),
        });
        self.active = id;
        id
    }

    /// Remove a layer. The last remaining layer cannot be deleted.
    pub fn delete(&mut self, id: LayerId) -> Result<()> {
        if self.layers.len() <= 1 {
            return Err(PaletteaError::Layer {
                message: "cannot delete the only layer".to_string(),
                help: Some("Add another layer first".to_string()),
            });
        }
        let index = self.index_of(id)?;
        self.layers.remove(index);
        if self.active == id {
            if let Some(top) = self.layers.last() {
                self.active = top.id;
            }
        }
        Ok(())
    }

    /// Move a layer to a new bottom-to-top position (clamped to the stack).
    pub fn move_to(&mut self, id: LayerId, position: usize) -> Result<()> {
        let index = self.index_of(id)?;
        let layer = self.layers.remove(index);
        let position = position.min(self.layers.len());
        self.layers.insert(position, layer);
        Ok(())
    }

    pub fn set_active(&mut self, id: LayerId) -> Result<()> {
        self.index_of(id)?;
        self.active = id;
        Ok(())
    }

    pub fn active_id(&self) -> LayerId {
        self.active
    }

    pub fn active(&self) -> Option<&Layer> {
        self.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut Layer> {
        let id = self.active;
        self.get_mut(id)
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> Result<()> {
        self.require_mut(id)?.visible = visible;
        Ok(())
    }

    pub fn set_locked(&mut self, id: LayerId, locked: bool) -> Result<()> {
        self.require_mut(id)?.locked = locked;
        Ok(())
    }

    pub fn rename(&mut self, id: LayerId, name: &str) -> Result<()> {
        self.require_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Find a layer by name (first match from the bottom).
    pub fn find(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Layers bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    fn index_of(&self, id: LayerId) -> Result<usize> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| missing_layer(id))
    }

    fn require_mut(&mut self, id: LayerId) -> Result<&mut Layer> {
        self.get_mut(id).ok_or_else(|| missing_layer(id))
    }
}

fn missing_layer(id: LayerId) -> PaletteaError {
    PaletteaError::Layer {
        message: format!("no layer with id {}", id),
        help: None,
    }
}
