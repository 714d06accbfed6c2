use clap::Parser;
use clonetree::cli::{verbosity::Verbosity, Cli, Command};
use clonetree::run;
use color_eyre::eyre::{Report, Result};
use std::env;

fn setup(verbosity: &Verbosity) -> Result<(), Report> {
    color_eyre::install()?;

    // Set default logging level if RUST_LOG is not set.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", verbosity.to_string())
    }

    env_logger::init();

    Ok(())
}

fn main() -> Result<(), Report> {
    // Parse CLI parameters
    let args = Cli::parse();

    // Misc setup actions like logging
    setup(&args.verbosity)?;

    match args.command {
        // Reconstruct and export a clone tree
        Command::Build(args) => {
            run::build(&args)?;
        }
        // Show or export the color palette
        Command::Palette(args) => {
            run::palette(&args)?;
        }
    }

    Ok(())
}
