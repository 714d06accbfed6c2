use crate::palette::DEFAULT_COLOR;
use crate::phylogeny::ExportFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build a clone tree from ancestor/descendant edges and export it.
#[derive(Clone, Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Clone edges (json, tsv or csv).
    ///
    /// Tables need 'ancestorClone' and 'descendantClone' columns.
    #[clap(short = 'e', long, required = true)]
    pub edges: PathBuf,

    /// Output directory.
    ///
    /// If the directory does not exist, it will be created.
    #[clap(short = 'o', long, required = true)]
    pub output_dir: PathBuf,

    /// Clone color palette (json, tsv or csv).
    ///
    /// Tables need 'clone' and 'color' columns. Otherwise the built-in palette is used.
    #[clap(short = 'p', long)]
    pub palette: Option<PathBuf>,

    /// Color for clones missing from the palette.
    #[clap(long, default_value_t = Args::default().default_color)]
    pub default_color: String,

    /// Export formats.
    #[clap(short = 'f', long, value_enum, value_delimiter = ',')]
    #[clap(default_values_t = Args::default().formats)]
    pub formats: Vec<ExportFormat>,

    /// Output file prefix.
    #[clap(long, default_value_t = Args::default().prefix)]
    pub prefix: String,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            edges: PathBuf::new(),
            output_dir: PathBuf::new(),
            palette: None,
            default_color: DEFAULT_COLOR.to_string(),
            formats: vec![ExportFormat::Json, ExportFormat::Newick],
            prefix: String::from("tree"),
        }
    }
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }
}
