use crate::cli;
use crate::input;
use crate::palette::Palette;
use crate::phylogeny::{ExportFormat, Phylogeny};
use crate::utils;

use chrono::prelude::*;
use color_eyre::eyre::{Report, Result, WrapErr};
use color_eyre::Help;
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::create_dir_all;
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Build Summary

/// What a build produced, written to `summary.json` in the output directory.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Summary {
    pub root: Option<String>,
    pub clones: usize,
    pub edges: usize,
    pub formats: Vec<ExportFormat>,
    pub outputs: Vec<PathBuf>,
    pub cli_version: String,
    pub date_created: DateTime<Utc>,
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

impl Summary {
    pub fn new() -> Self {
        Summary {
            root: None,
            clones: 0,
            edges: 0,
            formats: Vec::new(),
            outputs: Vec::new(),
            cli_version: env!("CARGO_PKG_VERSION").to_string(),
            date_created: Utc::now(),
        }
    }
}

// ----------------------------------------------------------------------------
// Build

/// Reconstruct the clone tree from the edges file and export every format.
pub fn build(args: &cli::build::Args) -> Result<Summary, Report> {
    // Warn if the directory already exists
    if !args.output_dir.exists() {
        info!("Creating output directory: {:?}", &args.output_dir);
        create_dir_all(&args.output_dir)?;
    } else {
        warn!("Output directory already exists: {:?}", args.output_dir);
    }

    // ------------------------------------------------------------------------
    // Export CLI args

    let path = args.output_dir.join("build_args.json");
    info!("Exporting CLI Build Args: {path:?}");
    utils::write_json(args, &path)?;

    // ------------------------------------------------------------------------
    // Inputs

    let edges = input::read_edges(&args.edges)?;
    let palette = match &args.palette {
        Some(path) => Palette::read(path, &args.default_color)?,
        None => Palette {
            default_color: args.default_color.clone(),
            ..Default::default()
        },
    };

    // ------------------------------------------------------------------------
    // Phylogeny

    let phylogeny = Phylogeny::reconstruct(&edges)
        .wrap_err_with(|| format!("Failed to build a clone tree from: {:?}", args.edges))
        .suggestion("Every clone except the root needs exactly one ancestor clone.")?;

    match phylogeny.root() {
        Some(root) => info!("Clone tree has {} clones, root: {root}", phylogeny.len()),
        None => warn!("Clone tree is empty."),
    }

    // ------------------------------------------------------------------------
    // Export

    let formats = args.formats.iter().copied().unique().collect_vec();
    let mut summary = Summary {
        root: phylogeny.root().map(String::from),
        clones: phylogeny.len(),
        edges: edges.len(),
        formats: formats.clone(),
        ..Default::default()
    };

    for format in formats {
        let output = phylogeny.export(&args.output_dir, &args.prefix, format, &palette)?;
        summary.outputs.push(output);
    }

    let path = args.output_dir.join("summary.json");
    info!("Exporting build summary: {path:?}");
    utils::write_json(&summary, &path)?;

    Ok(summary)
}

// ----------------------------------------------------------------------------
// Palette

/// Print the palette as markdown, or write it to a table.
pub fn palette(args: &cli::palette::Args) -> Result<Palette, Report> {
    let palette = match &args.palette {
        Some(path) => Palette::read(path, &args.default_color)?,
        None => Palette {
            default_color: args.default_color.clone(),
            ..Default::default()
        },
    };

    let table = palette.to_table();
    match &args.output {
        Some(path) => {
            info!("Exporting palette: {path:?}");
            table.write(path)?;
        }
        None => {
            println!("{}", table.to_markdown()?);
            println!("Default color: {}", palette.default_color);
        }
    }

    Ok(palette)
}
