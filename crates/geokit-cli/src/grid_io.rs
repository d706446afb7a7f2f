//! Reading and writing grid files

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Read a grid from a JSON array of rows or a plain text file.
///
/// Text files hold one row per line with values separated by commas or
/// whitespace. Blank lines and lines starting with `#` are skipped.
pub fn read_grid(path: &Path) -> Result<Array2<f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file {}", path.display()))?;

    let rows = if content.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Vec<f64>>>(&content)
            .with_context(|| format!("Failed to parse {} as a JSON grid", path.display()))?
    } else {
        parse_text_rows(&content)?
    };

    to_array(rows)
}

fn parse_text_rows(content: &str) -> Result<Vec<Vec<f64>>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            line.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.parse::<f64>()
                        .with_context(|| format!("Line {}: '{}' is not a number", i + 1, v))
                })
                .collect()
        })
        .collect()
}

fn to_array(rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let Some(first) = rows.first() else {
        bail!("Grid is empty");
    };
    let cols = first.len();
    if cols == 0 {
        bail!("Grid rows are empty");
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
        bail!("Row {} has {} values, expected {}", i + 1, row.len(), cols);
    }

    let n_rows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((n_rows, cols), flat)?)
}

/// Grid as nested rows, for JSON output
pub fn to_rows(grid: &Array2<f64>) -> Vec<Vec<f64>> {
    grid.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Write a grid as a JSON array of rows
pub fn write_grid(path: &Path, grid: &Array2<f64>) -> Result<()> {
    let json = serde_json::to_string_pretty(&to_rows(grid))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
