use crate::phylogeny::Edge;
use crate::utils;
use color_eyre::eyre::{Report, Result, WrapErr};
use color_eyre::Help;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

// ----------------------------------------------------------------------------
// Tree Data

/// Clone edges as delivered for one patient, any level may be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TreeData {
    pub patient: Option<Patient>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Patient {
    #[serde(default)]
    pub id: String,
    pub data: Option<Vec<Edge>>,
}

impl TreeData {
    /// Edges of the patient, empty if the patient or its data is absent.
    pub fn edges(&self) -> &[Edge] {
        self.patient
            .as_ref()
            .and_then(|patient| patient.data.as_deref())
            .unwrap_or(&[])
    }
}

// ----------------------------------------------------------------------------
// Read

/// Parse clone edges from json text, a bare array or the patient envelope.
///
/// `null` and missing levels of the envelope give no edges.
pub fn parse_json(input: &str) -> Result<Vec<Edge>, Report> {
    let value: Value = serde_json::from_str(input)
        .wrap_err("Failed to parse clone edges from json.")?;

    let edges = match value {
        Value::Null => Vec::new(),
        Value::Array(_) => serde_json::from_value(value)
            .wrap_err("Failed to parse clone edges from json array.")
            .suggestion("Expected records of {ancestorClone, descendantClone}.")?,
        _ => {
            let data: TreeData = serde_json::from_value(value)
                .wrap_err("Failed to parse clone edges from json object.")
                .suggestion("Expected an object of {patient: {id, data}}.")?;
            if let Some(patient) = &data.patient {
                debug!("Reading clone edges for patient: {}", patient.id);
            }
            data.edges().to_vec()
        }
    };

    Ok(edges)
}

/// Read clone edges from a json file, or a tsv/csv table with
/// `ancestorClone` and `descendantClone` columns.
pub fn read_edges(path: &Path) -> Result<Vec<Edge>, Report> {
    info!("Loading clone edges: {path:?}");
    let ext = utils::path_to_ext(path)?;

    let edges = if ext == "json" {
        let input = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read file: {path:?}"))?;
        parse_json(&input).wrap_err_with(|| format!("Failed to parse file: {path:?}"))?
    } else {
        let delim = utils::path_to_delim(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim as u8)
            .trim(csv::Trim::All)
            .from_path(path)
            .wrap_err_with(|| format!("Failed to read file: {path:?}"))?;

        let mut edges = Vec::new();
        for result in reader.deserialize() {
            let edge: Edge =
                result.wrap_err_with(|| format!("Failed to parse file: {path:?}"))?;
            edges.push(edge);
        }
        edges
    };

    if edges.is_empty() {
        warn!("No clone edges were found in: {path:?}");
    }
    debug!("Loaded {} clone edges.", edges.len());

    Ok(edges)
}
