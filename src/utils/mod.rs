pub mod table;

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serialize to pretty json and write to file, newline terminated.
pub fn write_json<T>(value: &T, path: &Path) -> Result<(), Report>
where
    T: Serialize + ?Sized,
{
    // create output file
    let mut file = File::create(path)
        .wrap_err_with(|| format!("Failed to create file: {path:?}"))?;

    // parse to string
    let output = serde_json::to_string_pretty(value)
        .wrap_err_with(|| format!("Failed to serialize json for: {path:?}"))?;

    // write to file
    file.write_all(format!("{output}\n").as_bytes())
        .wrap_err_with(|| format!("Failed to write file: {path:?}"))?;

    Ok(())
}

pub fn ext_to_delim(ext: &str) -> Result<char, Report> {
    let delim = match ext {
        "tsv" => '\t',
        "csv" => ',',
        "txt" => {
            warn!("File extension .txt is assumed to be tab-delimited.");
            '\t'
        }
        _ => {
            return Err(eyre!("Unknown file extension: {ext:?}")
                .suggestion("Options are tsv or csv."))
        }
    };

    Ok(delim)
}

pub fn path_to_delim(path: &Path) -> Result<char, Report> {
    // get the path extension
    let ext = path_to_ext(path)?;

    // convert extension to the expected delimiter
    let delim = ext_to_delim(&ext)?;

    Ok(delim)
}

pub fn path_to_ext(path: &Path) -> Result<String, Report> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| eyre!("Unable to parse extension from file: {path:?}"))?;

    Ok(ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn delimiter_from_extension() -> Result<(), Report> {
        assert_eq!(path_to_delim(&PathBuf::from("edges.tsv"))?, '\t');
        assert_eq!(path_to_delim(&PathBuf::from("edges.CSV"))?, ',');
        assert_eq!(path_to_delim(&PathBuf::from("edges.txt"))?, '\t');
        assert!(path_to_delim(&PathBuf::from("edges.xlsx")).is_err());
        assert!(path_to_ext(&PathBuf::from("edges")).is_err());
        Ok(())
    }
}
