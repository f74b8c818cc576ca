pub mod completions;
pub mod init;
pub mod list;
pub mod paint;
pub mod tip;
pub mod validate;

use clap::{Parser, Subcommand};

/// palettea - Brush stroke renderer for paint scripts
#[derive(Parser, Debug)]
#[command(name = "palettea")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play paint scripts and write PNG images
    Paint(paint::PaintArgs),

    /// Validate paint scripts without rendering
    Validate(validate::ValidateArgs),

    /// Render a brush tip preview
    Tip(tip::TipArgs),

    /// List blend modes, tip shapes and discovered scripts
    List(list::ListArgs),

    /// Initialize a palettea project (generates palettea.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
