use crate::utils;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub path: PathBuf,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Table {
            path: PathBuf::new(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn read(path: &Path) -> Result<Table, Report> {
        let mut table = Table::new();

        // lookup delimiter from file extension
        let delim = utils::path_to_delim(path)?;

        // attempt to open the file path
        let file =
            File::open(path).wrap_err_with(|| eyre!("Failed to read file: {path:?}"))?;

        for line in BufReader::new(file).lines() {
            let line = line.wrap_err_with(|| eyre!("Failed to parse file: {path:?}"))?;
            // skip blank lines, usually a trailing newline
            if line.trim().is_empty() {
                continue;
            }
            let row = line.split(delim).map(|s| s.trim().to_string()).collect_vec();
            // if headers are empty, this is the first line, write headers
            if table.headers.is_empty() {
                table.headers = row;
            }
            // otherwise regular row
            else {
                table.rows.push(row);
            }
        }

        table.path = path.to_path_buf();

        Ok(table)
    }

    pub fn header_position(&self, header: &str) -> Result<usize, Report> {
        let pos = self
            .headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| {
                eyre!("Column '{header}' was not found in table: {:?}.", self.path)
            })?;

        Ok(pos)
    }

    /// write to file
    pub fn write(&self, path: &Path) -> Result<(), Report> {
        let mut file = File::create(path)
            .wrap_err_with(|| format!("Unable to create file: {path:?}"))?;

        // Parse line delimiter from file extension
        let delim = utils::path_to_delim(path)?.to_string();

        // write headers
        let line = format!("{}\n", self.headers.iter().join(&delim));
        file.write_all(line.as_bytes())
            .wrap_err_with(|| format!("Unable to write table headers: {line}"))?;

        // write regular rows
        for row in &self.rows {
            let line = format!("{}\n", row.iter().join(&delim));
            file.write_all(line.as_bytes())
                .wrap_err_with(|| format!("Unable to write table rows: {line}"))?;
        }

        Ok(())
    }

    /// Convert table to markdown format
    pub fn to_markdown(&self) -> Result<String, Report> {
        // every row needs a cell for each header
        if let Some(row) = self.rows.iter().find(|row| row.len() != self.headers.len()) {
            return Err(eyre!(
                "Row has {} cells but the table has {} headers: {row:?}",
                row.len(),
                self.headers.len()
            ));
        }

        // get the maximum width of each column
        let col_widths = self
            // iterate through columns/headers
            .headers
            .iter()
            .enumerate()
            .map(|(col_i, header)| {
                self
                    // iterate through this column's rows,
                    // get max string width, +2 to add space on either side
                    .rows
                    .iter()
                    .map(|row| row[col_i].len().max(header.len()) + 2)
                    .max()
                    .unwrap_or(header.len() + 2)
            })
            .collect_vec();

        let mut markdown = String::from("|");
        // frame in between headers and rows
        let mut header_frame = String::from("|");

        // Create the header line
        for (header, col_width) in self.headers.iter().zip(col_widths.iter()) {
            let cell = format!("{:^width$}|", header, width = col_width);
            markdown.push_str(&cell);

            let frame = format!("{}|", "-".repeat(*col_width));
            header_frame.push_str(&frame);
        }
        markdown.push('\n');
        markdown.push_str(&header_frame);
        markdown.push('\n');

        // Create the row lines
        for row in &self.rows {
            markdown.push('|');
            for (col_i, col_width) in col_widths.iter().enumerate() {
                let cell = format!("{:^width$}|", row[col_i], width = col_width);
                markdown.push_str(&cell);
            }
            markdown.push('\n');
        }

        Ok(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn read_write_tsv() -> Result<(), Report> {
        let tmp_dir = TempDir::new()?;
        let path = tmp_dir.path().join("palette.tsv");
        std::fs::write(&path, "clone\tcolor\n1\t#A6CEE3\n\n2\tred\n")?;

        let table = Table::read(&path)?;
        assert_eq!(table.headers, vec!["clone", "color"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.header_position("color")?, 1);
        assert!(table.header_position("missing").is_err());

        let output = tmp_dir.path().join("palette.csv");
        table.write(&output)?;
        assert_eq!(std::fs::read_to_string(&output)?, "clone,color\n1,#A6CEE3\n2,red\n");

        Ok(())
    }

    #[test]
    fn markdown() -> Result<(), Report> {
        let mut table = Table::new();
        table.headers = vec!["clone".to_string(), "color".to_string()];
        table.rows.push(vec!["1".to_string(), "white".to_string()]);

        let expected = indoc! {"
            | clone | color |
            |-------|-------|
            |   1   | white |
        "};
        assert_eq!(table.to_markdown()?, expected);

        table.rows.push(vec!["2".to_string()]);
        assert!(table.to_markdown().is_err());
        Ok(())
    }
}
