use miette::Diagnostic;
use thiserror::Error;

/// Main error type for palettea operations
#[derive(Error, Diagnostic, Debug)]
pub enum PaletteaError {
    #[error("IO error: {0}")]
    #[diagnostic(code(palettea::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(palettea::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(palettea::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(palettea::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A draw call against a surface failed (e.g. an empty tip image).
    #[error("Render error: {message}")]
    #[diagnostic(code(palettea::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Layer error: {message}")]
    #[diagnostic(code(palettea::layer))]
    Layer {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(palettea::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PaletteaError>;
