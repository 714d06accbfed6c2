pub mod build;
pub mod palette;
pub mod verbosity;

use crate::cli::verbosity::Verbosity;
use clap::{Parser, Subcommand};

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// clonetree reconstructs clonal evolution trees from ancestor/descendant edges.
#[derive(Debug, Parser)]
#[clap(author, version)]
#[clap(verbatim_doc_comment)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    /// Control output verbosity level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    pub verbosity: Verbosity,
}

/// clonetree CLI commands (build, palette).
#[derive(Subcommand, Debug)]
#[clap(verbatim_doc_comment)]
pub enum Command {
    /// Build a clone tree and export it.
    Build(build::Args),

    /// Show or export the clone color palette.
    Palette(palette::Args),
}
