//! Chart assembly: manifest parsing, dependency lists, values-file
//! discovery and the merged row table.

use crate::model::{
    ChartDependency, ChartInfo, ChartMeta, ChartRequirements, SortOrder, ValueRow, ValuesFile,
};
use crate::parser;
use crate::sort;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read a chart file as text, normalizing CRLF line endings.
fn read_chart_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map(|s| s.replace("\r\n", "\n"))
}

/// Warn about a required chart file that could not be read, distinguishing
/// a missing file from a read failure.
fn warn_unreadable(path: &Path, err: &io::Error) {
    if err.kind() == io::ErrorKind::NotFound {
        log::warn!(
            "required chart file {} missing, skipping documentation for chart",
            path.display()
        );
    } else {
        log::warn!(
            "error reading chart file {}, skipping documentation for chart: {err}",
            path.display()
        );
    }
}

fn parse_chart_manifest(dir: &Path) -> Result<ChartMeta> {
    let path = dir.join("Chart.yaml");
    let contents = match read_chart_file(&path) {
        Ok(contents) => contents,
        Err(err) => {
            warn_unreadable(&path, &err);
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    serde_yaml::from_str(&contents).with_context(|| format!("malformed {}", path.display()))
}

fn dependency_key(dep: &ChartDependency) -> String {
    format!("{}/{}", dep.repository, dep.name)
}

/// Parse the chart's dependency list. apiVersion v1 charts keep it in a
/// separate requirements.yaml (absent means no dependencies); later
/// apiVersions inline it in Chart.yaml.
fn parse_requirements(dir: &Path, api_version: &str) -> Result<ChartRequirements> {
    let path = if api_version == "v1" {
        let requirements_path = dir.join("requirements.yaml");
        if !requirements_path.exists() {
            return Ok(ChartRequirements::default());
        }
        requirements_path
    } else {
        dir.join("Chart.yaml")
    };

    let contents = match read_chart_file(&path) {
        Ok(contents) => contents,
        Err(err) => {
            warn_unreadable(&path, &err);
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let mut requirements: ChartRequirements =
        serde_yaml::from_str(&contents).with_context(|| format!("malformed {}", path.display()))?;
    requirements
        .dependencies
        .sort_by(|a, b| dependency_key(a).cmp(&dependency_key(b)));
    Ok(requirements)
}

/// The values files of a chart: values.yaml always, plus any of the extra
/// files that actually exist in the chart directory.
fn chart_values_files(dir: &Path, extra_values: &[String]) -> Vec<PathBuf> {
    let mut files = vec![dir.join("values.yaml")];
    for name in extra_values {
        let path = dir.join(name);
        if path.exists() {
            files.push(path);
        } else {
            log::debug!("extra values file {} not present, skipping", path.display());
        }
    }
    files
}

/// Assemble everything known about one chart directory.
///
/// A missing or unreadable required file is logged and surfaces as an
/// error; the caller skips documentation for the chart rather than guess.
pub fn parse_chart(dir: &Path, extra_values: &[String]) -> Result<ChartInfo> {
    let meta = parse_chart_manifest(dir)?;
    let requirements = parse_requirements(dir, &meta.api_version)?;

    let mut values = Vec::new();
    for path in chart_values_files(dir, extra_values) {
        let contents = match read_chart_file(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn_unreadable(&path, &err);
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        let (tree, descriptions) = parser::parse_values(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        values.push(ValuesFile {
            file_name,
            tree,
            descriptions,
        });
    }

    Ok(ChartInfo {
        directory: dir.to_path_buf(),
        meta,
        requirements,
        values,
    })
}

/// Build the final ordered row table for a chart: each values file's block
/// is extracted and sorted on its own and preceded by one separator row,
/// including the first. Empty values files contribute nothing at all.
pub fn chart_value_rows(chart: &ChartInfo, order: SortOrder) -> Result<Vec<ValueRow>> {
    let mut all_rows = Vec::new();

    for file in &chart.values {
        let Some(tree) = &file.tree else {
            continue;
        };

        let rows = parser::rows::extract_rows(tree, &file.descriptions)
            .with_context(|| format!("failed to extract rows from {}", file.file_name))?;
        let rows = sort::sort_rows(rows, order);

        all_rows.push(ValueRow::separator(&file.file_name));
        all_rows.extend(rows);
    }

    Ok(all_rows)
}
