//! Paint script parser.
//!
//! Parses `.paint.yaml` files into `PaintScript` instances. The top level is
//! plain serde; actions are read as YAML values so each one can be reported
//! by position when it is malformed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{PaletteaError, Result};
use crate::types::{Action, CanvasSpec, Colour, InputSample, LayerSpec, PaintScript};

use super::brush::{build_brush, BrushContext, RawBrush};

/// File suffix for paint scripts.
pub const SCRIPT_SUFFIX: &str = ".paint.yaml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    #[serde(default)]
    name: Option<String>,
    canvas: RawCanvas,
    #[serde(default)]
    brushes: BTreeMap<String, RawBrush>,
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    actions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCanvas {
    width: u32,
    height: u32,
    #[serde(default)]
    background: Option<Colour>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLayer {
    Name(String),
    Full {
        name: String,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default)]
        locked: bool,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStroke {
    brush: String,
    #[serde(default)]
    layer: Option<String>,
    points: Vec<InputSample>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMove {
    layer: String,
    to: usize,
}

/// Read and parse a paint script from disk.
///
/// Tip paths resolve against the script's directory; the script name
/// defaults to the file stem.
pub fn load_script(path: &Path, tip_size: u32) -> Result<PaintScript> {
    let source = fs::read_to_string(path).map_err(|e| PaletteaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let ctx = BrushContext {
        base_dir: path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ".".into()),
        tip_size,
    };

    let mut script = parse_script(&source, &ctx)?;
    if script.name.is_empty() {
        script.name = script_stem(path);
    }
    Ok(script)
}

/// Parse a paint script from YAML source.
pub fn parse_script(source: &str, ctx: &BrushContext) -> Result<PaintScript> {
    let raw: RawScript = serde_yaml::from_str(source).map_err(|e| PaletteaError::Parse {
        message: format!("Invalid paint script: {}", e),
        help: Some("A script needs at least `canvas: { width, height }`".to_string()),
    })?;

    if raw.canvas.width == 0 || raw.canvas.height == 0 {
        return Err(PaletteaError::Parse {
            message: format!(
                "Canvas must not be empty ({}x{})",
                raw.canvas.width, raw.canvas.height
            ),
            help: None,
        });
    }

    let mut brushes = BTreeMap::new();
    for (name, raw_brush) in raw.brushes {
        let brush = build_brush(&name, raw_brush, ctx)?;
        brushes.insert(name, brush);
    }

    let layers = raw
        .layers
        .into_iter()
        .map(|l| match l {
            RawLayer::Name(name) => LayerSpec::named(name),
            RawLayer::Full {
                name,
                visible,
                locked,
            } => LayerSpec {
                name,
                visible,
                locked,
            },
        })
        .collect();

    let actions = raw
        .actions
        .into_iter()
        .enumerate()
        .map(|(i, value)| parse_action(i + 1, value))
        .collect::<Result<Vec<_>>>()?;

    Ok(PaintScript {
        name: raw.name.unwrap_or_default(),
        canvas: CanvasSpec {
            width: raw.canvas.width,
            height: raw.canvas.height,
            background: raw.canvas.background.unwrap_or(Colour::WHITE),
        },
        brushes,
        layers,
        actions,
    })
}

/// Parse one action. `index` is 1-based, for messages.
fn parse_action(index: usize, value: Value) -> Result<Action> {
    match value {
        Value::String(keyword) => match keyword.as_str() {
            "undo" => Ok(Action::Undo),
            "redo" => Ok(Action::Redo),
            "clear" => Ok(Action::Clear),
            other => Err(action_error(index, format!("unknown action '{}'", other))),
        },
        Value::Mapping(map) if map.len() == 1 => {
            let Some((key, body)) = map.into_iter().next() else {
                return Err(action_error(index, "empty action".to_string()));
            };
            let keyword = key
                .as_str()
                .ok_or_else(|| action_error(index, "action name must be a string".to_string()))?
                .to_string();
            parse_keyed_action(index, &keyword, body)
        }
        _ => Err(action_error(
            index,
            "expected a keyword (undo) or a single-key mapping (stroke: ...)".to_string(),
        )),
    }
}

fn parse_keyed_action(index: usize, keyword: &str, body: Value) -> Result<Action> {
    match keyword {
        "stroke" => {
            let stroke: RawStroke = from_value(index, keyword, body)?;
            Ok(Action::Stroke {
                brush: stroke.brush,
                layer: stroke.layer,
                samples: stroke.points,
            })
        }
        "move" => {
            let mv: RawMove = from_value(index, keyword, body)?;
            Ok(Action::Move {
                layer: mv.layer,
                to: mv.to,
            })
        }
        "add_layer" | "select" | "show" | "hide" | "lock" | "unlock" | "delete" => {
            let name: String = from_value(index, keyword, body)?;
            Ok(match keyword {
                "add_layer" => Action::AddLayer(name),
                "select" => Action::Select(name),
                "show" => Action::Show(name),
                "hide" => Action::Hide(name),
                "lock" => Action::Lock(name),
                "unlock" => Action::Unlock(name),
                _ => Action::Delete(name),
            })
        }
        other => Err(action_error(index, format!("unknown action '{}'", other))),
    }
}

fn from_value<T: serde::de::DeserializeOwned>(index: usize, keyword: &str, body: Value) -> Result<T> {
    serde_yaml::from_value(body)
        .map_err(|e| action_error(index, format!("invalid '{}' action: {}", keyword, e)))
}

fn action_error(index: usize, message: String) -> PaletteaError {
    PaletteaError::Parse {
        message: format!("Action #{}: {}", index, message),
        help: Some(
            "Actions: stroke, undo, redo, clear, add_layer, select, show, hide, lock, unlock, delete, move"
                .to_string(),
        ),
    }
}

/// Script name derived from a path: `sketch.paint.yaml` -> `sketch`.
pub fn script_stem(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("untitled");
    file_name
        .strip_suffix(SCRIPT_SUFFIX)
        .or_else(|| file_name.strip_suffix(".yaml"))
        .or_else(|| file_name.strip_suffix(".yml"))
        .unwrap_or(file_name)
        .to_string()
}
