use clap::Parser;
use miette::Result;
use palettea::cli::{Cli, Commands};
use palettea::output::Printer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Paint(args) => palettea::cli::paint::run(args, &printer)?,
        Commands::Validate(args) => palettea::cli::validate::run(args, &printer)?,
        Commands::Tip(args) => palettea::cli::tip::run(args, &printer)?,
        Commands::List(args) => palettea::cli::list::run(args, &printer)?,
        Commands::Init(args) => palettea::cli::init::run(args, &printer)?,
        Commands::Completions(args) => palettea::cli::completions::run(args)?,
    }

    Ok(())
}
