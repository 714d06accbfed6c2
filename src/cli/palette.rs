use crate::palette::DEFAULT_COLOR;
use clap::Parser;
use std::path::PathBuf;

/// Show or export the clone color palette.
#[derive(Clone, Debug, Parser)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Clone color palette (json, tsv or csv).
    ///
    /// Otherwise the built-in palette is shown.
    #[clap(short = 'p', long)]
    pub palette: Option<PathBuf>,

    /// Color for clones missing from the palette.
    #[clap(long, default_value_t = Args::default().default_color)]
    pub default_color: String,

    /// Write the palette to a table (tsv or csv) instead of printing markdown.
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            palette: None,
            default_color: DEFAULT_COLOR.to_string(),
            output: None,
        }
    }
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli() {
        let args = Args::parse_from(["palette"]);
        assert_eq!(args.default_color, Args::default().default_color);
        assert_eq!(args.default_color, DEFAULT_COLOR);
        assert_eq!(args.palette, None);
    }
}
