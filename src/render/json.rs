//! JSON renderer — structured output for tooling integration.

use crate::model::{ChartInfo, ValueRow};
use crate::render::Renderer;
use anyhow::Result;
use serde_json::json;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, chart: &ChartInfo, rows: &[ValueRow]) -> Result<String> {
        let payload = json!({
            "chart": chart.meta,
            "requirements": chart.requirements,
            "values": rows,
        });
        let mut out = serde_json::to_string_pretty(&payload)?;
        out.push('\n');
        Ok(out)
    }
}
