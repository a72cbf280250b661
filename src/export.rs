use std::path::Path;

use anyhow::{Context, Result};

use crate::chart::svg::to_svg;
use crate::chart::RenderOutput;

/// Write the chart as a standalone SVG file.
pub fn write_svg(path: &Path, scene: &RenderOutput) -> Result<()> {
    std::fs::write(path, to_svg(scene))
        .with_context(|| format!("writing SVG to {}", path.display()))
}

/// Write the chart's per-hospital aggregates as a JSON array.
pub fn write_json(path: &Path, scene: &RenderOutput) -> Result<()> {
    let aggregates: Vec<_> = scene.aggregates().collect();
    let json = serde_json::to_string_pretty(&aggregates).context("serialising aggregates")?;
    std::fs::write(path, json).with_context(|| format!("writing JSON to {}", path.display()))
}
