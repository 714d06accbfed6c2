use crate::utils::{self, table::Table};
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Fill used for clones missing from the palette.
pub const DEFAULT_COLOR: &str = "white";

/// Qualitative colors assigned to clones "1" through "12".
pub const DEFAULT_COLORS: [&str; 12] = [
    "#A6CEE3", "#1F78B4", "#B2DF8A", "#33A02C", "#FB9A99", "#E31A1C", "#FDBF6F",
    "#FF7F00", "#CAB2D6", "#6A3D9A", "#FFFF99", "#B15928",
];

/// Read-only lookup from clone identifier to a CSS color.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Palette {
    pub colors: BTreeMap<String, String>,
    pub default_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = DEFAULT_COLORS
            .iter()
            .enumerate()
            .map(|(i, color)| ((i + 1).to_string(), color.to_string()))
            .collect();

        Palette {
            colors,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl Palette {
    pub fn new(default_color: &str) -> Self {
        Palette {
            colors: BTreeMap::new(),
            default_color: default_color.to_string(),
        }
    }

    /// Color for a clone, or the default color if it has none.
    pub fn color(&self, clone: &str) -> &str {
        self.colors
            .get(clone)
            .map(String::as_str)
            .unwrap_or(self.default_color.as_str())
    }

    pub fn insert(&mut self, clone: &str, color: &str) {
        self.colors.insert(clone.to_string(), color.to_string());
    }

    /// Read a palette from a json object (clone: color) or a table with
    /// `clone` and `color` columns.
    pub fn read(path: &Path, default_color: &str) -> Result<Palette, Report> {
        info!("Loading palette: {path:?}");
        let mut palette = Palette::new(default_color);
        let ext = utils::path_to_ext(path)?;

        if ext == "json" {
            let input = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read file: {path:?}"))?;
            palette.colors = serde_json::from_str(&input)
                .wrap_err_with(|| format!("Failed to parse palette: {path:?}"))
                .suggestion("A json palette is an object of clone to color strings.")?;
        } else {
            let table = Table::read(path)?;
            let clone_i = table.header_position("clone")?;
            let color_i = table.header_position("color")?;
            for row in &table.rows {
                let (clone, color) = match (row.get(clone_i), row.get(color_i)) {
                    (Some(clone), Some(color)) => (clone, color),
                    _ => return Err(eyre!("Incomplete palette row in {path:?}: {row:?}")),
                };
                palette.insert(clone, color);
            }
        }

        debug!("Loaded {} palette colors.", palette.colors.len());
        Ok(palette)
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.headers = vec!["clone".to_string(), "color".to_string()];
        table.rows = self
            .colors
            .iter()
            .map(|(clone, color)| vec![clone.clone(), color.clone()])
            .collect();
        table
    }
}
