//! Undo/redo history of layer pixels.
//!
//! A snapshot of every layer's pixels is taken before each stroke. Undo
//! swaps the current pixels with the newest snapshot; redo swaps them back.

use std::collections::VecDeque;

use image::RgbaImage;

use super::layers::{LayerId, LayerStack};

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 60;

/// Pixels of every layer at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    layers: Vec<(LayerId, RgbaImage)>,
}

impl Snapshot {
    pub fn capture(stack: &LayerStack) -> Self {
        Self {
            layers: stack
                .iter()
                .map(|l| (l.id, l.surface.image().clone()))
                .collect(),
        }
    }

    /// Write the captured pixels back. Layers deleted since the capture are
    /// skipped; layers added since keep their current pixels.
    pub fn apply(self, stack: &mut LayerStack) {
        for (id, pixels) in self.layers {
            if let Some(layer) = stack.get_mut(id) {
                layer.surface.replace_pixels(pixels);
            }
        }
    }
}

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state before a new edit. Clears the redo stack and drops
    /// the oldest snapshot once the limit is exceeded.
    pub fn record(&mut self, stack: &LayerStack) {
        self.undo.push_back(Snapshot::capture(stack));
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Restore the previous state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, stack: &mut LayerStack) -> bool {
        let Some(snapshot) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(Snapshot::capture(stack));
        snapshot.apply(stack);
        true
    }

    /// Reapply an undone state. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, stack: &mut LayerStack) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(Snapshot::capture(stack));
        snapshot.apply(stack);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
