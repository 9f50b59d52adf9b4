//! chartdoc — generate documentation from Helm-style chart values files.
//!
//! Walks a search root for chart directories (anything containing a
//! Chart.yaml), extracts a typed values table from each chart's values
//! files and their inline `# key -- description` comments, and writes the
//! rendered result into the chart directory.

mod chart;
mod model;
mod parser;
mod render;
mod sort;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "chartdoc",
    about = "Generate values-table documentation for Helm-style charts"
)]
struct Cli {
    /// Directory to search for charts (directories containing a Chart.yaml)
    #[arg(default_value = ".")]
    chart_search_root: PathBuf,

    /// Name of the generated file, written into each chart directory
    #[arg(short = 'o', long, default_value = "README.md")]
    output_file: String,

    /// Order of the values table: "file" or "alphanum"
    #[arg(short = 's', long, default_value = "alphanum")]
    sort_values_order: String,

    /// Extra values file (relative to each chart directory) to document
    /// after values.yaml. Can be specified multiple times.
    #[arg(short = 'f', long = "values-file")]
    values_files: Vec<String>,

    /// Output format: markdown (default) or json
    #[arg(long, default_value = "markdown")]
    format: String,

    /// Print generated documentation to stdout instead of writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let renderer = render::create_renderer(&cli.format)?;
    let order = model::SortOrder::parse(&cli.sort_values_order);

    let chart_dirs = find_chart_dirs(&cli.chart_search_root)?;
    if chart_dirs.is_empty() {
        log::warn!("no charts found under {}", cli.chart_search_root.display());
        return Ok(());
    }

    for dir in chart_dirs {
        // parse_chart has already warned about whichever file was the problem
        let Ok(info) = chart::parse_chart(&dir, &cli.values_files) else {
            continue;
        };

        let rows = match chart::chart_value_rows(&info, order) {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!(
                    "skipping documentation for chart {}: {err:#}",
                    dir.display()
                );
                continue;
            }
        };

        let output = renderer.render(&info, &rows)?;

        if cli.dry_run {
            print!("{output}");
        } else {
            let path = dir.join(&cli.output_file);
            fs::write(&path, output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
    }

    Ok(())
}

/// Every directory under the search root (the root included) that holds a
/// Chart.yaml, in stable path order.
fn find_chart_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/Chart.yaml", root.display());
    let mut dirs: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid chart search root: {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|path| path.parent().map(Path::to_path_buf))
        .collect();
    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_nested_charts() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("charts/sub")).unwrap();
        fs::write(root.path().join("Chart.yaml"), "name: top\n").unwrap();
        fs::write(root.path().join("charts/sub/Chart.yaml"), "name: sub\n").unwrap();

        let dirs = find_chart_dirs(root.path()).unwrap();
        assert_eq!(dirs.len(), 2);
        assert_eq!(dirs[0], root.path());
        assert_eq!(dirs[1], root.path().join("charts/sub"));
    }

    #[test]
    fn no_charts_in_empty_root() {
        let root = TempDir::new().unwrap();
        assert!(find_chart_dirs(root.path()).unwrap().is_empty());
    }
}
