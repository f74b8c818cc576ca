//! Paint script model.
//!
//! A paint script describes a canvas, a set of named brushes, the initial
//! layers and an ordered list of actions to replay against the canvas.

use std::collections::BTreeMap;

use crate::types::{BrushDescriptor, Colour, InputSample};

/// Canvas dimensions and background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub background: Colour,
}

/// Initial layer definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSpec {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
}

impl LayerSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            locked: false,
        }
    }
}

/// One step of a paint script.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Paint samples with a named brush, optionally selecting a layer first.
    Stroke {
        brush: String,
        layer: Option<String>,
        samples: Vec<InputSample>,
    },
    Undo,
    Redo,
    /// Drop every layer and all history.
    Clear,
    AddLayer(String),
    Select(String),
    Show(String),
    Hide(String),
    Lock(String),
    Unlock(String),
    Delete(String),
    /// Move a layer to a bottom-to-top index.
    Move { layer: String, to: usize },
}

impl Action {
    /// Short keyword used in scripts and diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::Stroke { .. } => "stroke",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::Clear => "clear",
            Action::AddLayer(_) => "add_layer",
            Action::Select(_) => "select",
            Action::Show(_) => "show",
            Action::Hide(_) => "hide",
            Action::Lock(_) => "lock",
            Action::Unlock(_) => "unlock",
            Action::Delete(_) => "delete",
            Action::Move { .. } => "move",
        }
    }
}

/// A parsed paint script.
#[derive(Debug, Clone)]
pub struct PaintScript {
    /// Script name (file stem when loaded from disk).
    pub name: String,
    pub canvas: CanvasSpec,
    pub brushes: BTreeMap<String, BrushDescriptor>,
    /// Initial layers bottom-to-top. Empty means the default `Layer 1`.
    pub layers: Vec<LayerSpec>,
    pub actions: Vec<Action>,
}

impl PaintScript {
    /// Number of stroke actions.
    pub fn stroke_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Stroke { .. }))
            .count()
    }

    /// Total samples across every stroke.
    pub fn sample_count(&self) -> usize {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Stroke { samples, .. } => samples.len(),
                _ => 0,
            })
            .sum()
    }
}
