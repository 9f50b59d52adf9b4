//! GitHub-flavored markdown renderer — chart README with values table.

use crate::model::{ChartInfo, ValueRow};
use crate::render::Renderer;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, chart: &ChartInfo, rows: &[ValueRow]) -> Result<String> {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", chart.meta.name));

        if chart.meta.deprecated {
            out.push_str("> **DEPRECATED** — this chart is no longer maintained.\n\n");
        }

        if !chart.meta.description.is_empty() {
            out.push_str(&chart.meta.description);
            out.push_str("\n\n");
        }

        out.push_str(&version_line(chart));

        if !chart.meta.home.is_empty() {
            out.push_str(&format!("**Homepage:** <{}>\n\n", chart.meta.home));
        }

        render_maintainers(&mut out, chart);
        render_sources(&mut out, chart);
        render_requirements(&mut out, chart);
        render_values(&mut out, rows);

        Ok(out)
    }
}

fn version_line(chart: &ChartInfo) -> String {
    let mut line = format!("Current chart version is `{}`", chart.meta.version);
    if !chart.meta.app_version.is_empty() {
        line.push_str(&format!(", app version `{}`", chart.meta.app_version));
    }
    line.push_str(".\n\n");
    line
}

fn render_maintainers(out: &mut String, chart: &ChartInfo) {
    if chart.meta.maintainers.is_empty() {
        return;
    }
    out.push_str("## Maintainers\n\n");
    out.push_str("| Name | Email | Url |\n");
    out.push_str("|------|-------|-----|\n");
    for m in &chart.meta.maintainers {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&m.name),
            escape_cell(&m.email),
            escape_cell(&m.url)
        ));
    }
    out.push('\n');
}

fn render_sources(out: &mut String, chart: &ChartInfo) {
    if chart.meta.sources.is_empty() {
        return;
    }
    out.push_str("## Source Code\n\n");
    for source in &chart.meta.sources {
        out.push_str(&format!("* <{}>\n", source));
    }
    out.push('\n');
}

fn render_requirements(out: &mut String, chart: &ChartInfo) {
    let deps = &chart.requirements.dependencies;
    if deps.is_empty() && chart.meta.kube_version.is_empty() {
        return;
    }
    out.push_str("## Requirements\n\n");
    if !chart.meta.kube_version.is_empty() {
        out.push_str(&format!("Kubernetes: `{}`\n\n", chart.meta.kube_version));
    }
    if !deps.is_empty() {
        out.push_str("| Repository | Name | Version |\n");
        out.push_str("|------------|------|---------|\n");
        for dep in deps {
            let name = if dep.alias.is_empty() {
                dep.name.clone()
            } else {
                format!("{} ({})", dep.name, dep.alias)
            };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&dep.repository),
                escape_cell(&name),
                escape_cell(&dep.version)
            ));
        }
        out.push('\n');
    }
}

fn render_values(out: &mut String, rows: &[ValueRow]) {
    if rows.is_empty() {
        return;
    }
    out.push_str("## Values\n\n");

    // One separator precedes each file's block. With a single block the
    // file heading is noise; with several it is the boundary marker.
    let multi_file = rows.iter().filter(|r| r.is_separator()).count() > 1;

    for row in rows {
        if row.is_separator() {
            if multi_file {
                out.push_str(&format!("### {}\n\n", row.description));
            }
            out.push_str("| Key | Type | Default | Description |\n");
            out.push_str("|-----|------|---------|-------------|\n");
            continue;
        }
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&row.key),
            row.kind,
            escape_cell(&default_cell(row)),
            escape_cell(&description_cell(row))
        ));
    }
    out.push('\n');
}

/// Override default wins; the literal-derived default renders as code.
fn default_cell(row: &ValueRow) -> String {
    if !row.default.is_empty() {
        row.default.clone()
    } else {
        format!("`{}`", row.auto_default)
    }
}

fn description_cell(row: &ValueRow) -> String {
    if !row.description.is_empty() {
        row.description.clone()
    } else {
        row.auto_description.clone()
    }
}

/// Keep table cells on one line and pipes literal.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
