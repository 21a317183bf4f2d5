//! Typed chart configuration.
//!
//! Every element is optional: a missing axis, grid, legend or tooltip means
//! the feature is not drawn. Field names deserialize in camelCase so admin
//! pages can ship the same JSON they would hand a declarative chart library.

use crate::ChartMargin;
use serde::{Deserialize, Serialize};
use shopcharts_core::Result;

pub const DEFAULT_VALUE_KEY: &str = "value";
pub const DEFAULT_CATEGORY_KEY: &str = "name";
pub const LEGEND_FALLBACK: &str = "Series";

/// Positional colour override for one datum of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellOverride {
    pub fill: String,
}

impl CellOverride {
    pub fn new(fill: impl Into<String>) -> Self {
        Self { fill: fill.into() }
    }
}

/// Series configuration shared by line and bar charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesConfig {
    pub data_key: String,
    pub name: Option<String>,
    /// Line stroke / bar fill
    pub color: Option<String>,
    /// Area fill under a line
    pub area_fill: Option<String>,
    pub stroke_width: f64,
    pub dot_radius: f64,
    pub corner_radius: f64,
    pub cells: Vec<CellOverride>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_VALUE_KEY.to_string(),
            name: None,
            color: None,
            area_fill: None,
            stroke_width: 3.0,
            dot_radius: 4.0,
            corner_radius: 6.0,
            cells: Vec::new(),
        }
    }
}

impl SeriesConfig {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_area_fill(mut self, fill: impl Into<String>) -> Self {
        self.area_fill = Some(fill.into());
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_dot_radius(mut self, radius: f64) -> Self {
        self.dot_radius = radius;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_cells(mut self, cells: impl IntoIterator<Item = CellOverride>) -> Self {
        self.cells.extend(cells);
        self
    }

    /// Series colour or the palette fallback
    pub fn color_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(fallback)
    }

    /// Per-datum colour: cell override at `index`, then series colour, then fallback
    pub fn fill_for<'a>(&'a self, index: usize, fallback: &'a str) -> &'a str {
        self.cells
            .get(index)
            .map(|cell| cell.fill.as_str())
            .unwrap_or_else(|| self.color_or(fallback))
    }

    /// Overrides were given but do not line up one-to-one with `len` data points
    pub fn cells_mismatch(&self, len: usize) -> bool {
        !self.cells.is_empty() && self.cells.len() != len
    }
}

/// Category (X) axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    pub data_key: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_CATEGORY_KEY.to_string(),
        }
    }
}

impl AxisConfig {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
        }
    }
}

/// Value (Y) axis; always reads the series value field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisConfig {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub payload: Vec<LegendEntry>,
}

impl LegendConfig {
    pub fn with_entry(mut self, value: impl Into<String>) -> Self {
        self.payload.push(LegendEntry {
            value: value.into(),
        });
        self
    }
}

/// Partial margin; unset sides keep the chart default
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverride {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginOverride {
    pub fn resolve(&self) -> ChartMargin {
        let base = ChartMargin::default();
        ChartMargin::new(
            self.top.unwrap_or(base.top),
            self.right.unwrap_or(base.right),
            self.bottom.unwrap_or(base.bottom),
            self.left.unwrap_or(base.left),
        )
    }
}

/// Full configuration of a line or bar chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartesianConfig {
    pub series: Option<SeriesConfig>,
    pub x_axis: Option<AxisConfig>,
    pub y_axis: Option<YAxisConfig>,
    pub grid: Option<GridConfig>,
    pub legend: Option<LegendConfig>,
    pub tooltip: Option<TooltipConfig>,
    pub margin: MarginOverride,
}

impl CartesianConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.series = Some(series);
        self
    }

    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = Some(axis);
        self
    }

    pub fn with_y_axis(mut self, axis: YAxisConfig) -> Self {
        self.y_axis = Some(axis);
        self
    }

    pub fn with_grid(mut self) -> Self {
        self.grid = Some(GridConfig::default());
        self
    }

    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = Some(legend);
        self
    }

    pub fn with_tooltip(mut self) -> Self {
        self.tooltip = Some(TooltipConfig::default());
        self
    }

    pub fn with_margin(mut self, margin: MarginOverride) -> Self {
        self.margin = margin;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Field holding the measured value
    pub fn value_key(&self) -> &str {
        self.series
            .as_ref()
            .map(|s| s.data_key.as_str())
            .unwrap_or(DEFAULT_VALUE_KEY)
    }

    /// Field holding the category label
    pub fn category_key(&self) -> &str {
        self.x_axis
            .as_ref()
            .map(|a| a.data_key.as_str())
            .unwrap_or(DEFAULT_CATEGORY_KEY)
    }

    /// Legend text: first payload entry, then series name, then (line charts)
    /// the value axis label, then a fixed fallback
    pub fn legend_label(&self, use_axis_label: bool) -> String {
        let legend = self.legend.as_ref();
        legend
            .and_then(|l| l.payload.first())
            .map(|entry| entry.value.clone())
            .or_else(|| self.series.as_ref().and_then(|s| s.name.clone()))
            .or_else(|| {
                use_axis_label
                    .then(|| self.y_axis.as_ref().and_then(|a| a.label.clone()))
                    .flatten()
            })
            .unwrap_or_else(|| LEGEND_FALLBACK.to_string())
    }
}

/// Pie (or donut) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieConfig {
    pub data_key: String,
    pub name_key: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Degrees of gap after each slice
    pub padding_angle: f64,
    pub cells: Vec<CellOverride>,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            data_key: DEFAULT_VALUE_KEY.to_string(),
            name_key: DEFAULT_CATEGORY_KEY.to_string(),
            inner_radius: 40.0,
            outer_radius: 80.0,
            padding_angle: 0.0,
            cells: Vec::new(),
        }
    }
}

impl PieConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(mut self, data_key: impl Into<String>, name_key: impl Into<String>) -> Self {
        self.data_key = data_key.into();
        self.name_key = name_key.into();
        self
    }

    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }

    pub fn with_padding_angle(mut self, degrees: f64) -> Self {
        self.padding_angle = degrees;
        self
    }

    pub fn with_cells(mut self, cells: impl IntoIterator<Item = CellOverride>) -> Self {
        self.cells.extend(cells);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overrides were given but do not line up one-to-one with `len` slices
    pub fn cells_mismatch(&self, len: usize) -> bool {
        !self.cells.is_empty() && self.cells.len() != len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_precedence() {
        let series = SeriesConfig::new("sales")
            .with_color("blue")
            .with_cells([
                CellOverride::new("green"),
                CellOverride::new("green"),
                CellOverride::new("red"),
            ]);
        assert_eq!(series.fill_for(2, "#6366f1"), "red");
        assert_eq!(series.fill_for(5, "#6366f1"), "blue");

        let plain = SeriesConfig::default();
        assert_eq!(plain.fill_for(0, "#6366f1"), "#6366f1");
    }

    #[test]
    fn test_margin_override_merges() {
        let margin = MarginOverride {
            left: Some(60.0),
            ..Default::default()
        }
        .resolve();
        assert_eq!(margin, ChartMargin::new(16.0, 24.0, 32.0, 60.0));
    }

    #[test]
    fn test_legend_label_fallbacks() {
        let mut config = CartesianConfig::new().with_y_axis(YAxisConfig {
            label: Some("Revenue".into()),
        });
        assert_eq!(config.legend_label(true), "Revenue");
        assert_eq!(config.legend_label(false), "Series");

        config = config.with_series(SeriesConfig::new("sales").with_name("Sales"));
        assert_eq!(config.legend_label(true), "Sales");

        config = config.with_legend(LegendConfig::default().with_entry("Monthly sales"));
        assert_eq!(config.legend_label(true), "Monthly sales");
    }

    #[test]
    fn test_cartesian_from_json() {
        let config = CartesianConfig::from_json(
            r##"{
                "series": { "dataKey": "sales", "color": "#f97316", "cells": [{ "fill": "red" }] },
                "xAxis": { "dataKey": "month" },
                "grid": {},
                "margin": { "top": 24 }
            }"##,
        )
        .unwrap();

        assert_eq!(config.value_key(), "sales");
        assert_eq!(config.category_key(), "month");
        assert!(config.grid.is_some());
        assert!(config.legend.is_none());
        assert!(config.tooltip.is_none());
        assert_eq!(config.margin.resolve().top, 24.0);
        assert_eq!(config.series.unwrap().stroke_width, 3.0);
    }

    #[test]
    fn test_pie_from_json_defaults() {
        let pie = PieConfig::from_json(r#"{ "dataKey": "count", "paddingAngle": 2 }"#).unwrap();
        assert_eq!(pie.data_key, "count");
        assert_eq!(pie.name_key, "name");
        assert_eq!(pie.inner_radius, 40.0);
        assert_eq!(pie.outer_radius, 80.0);
        assert_eq!(pie.padding_angle, 2.0);

        assert!(PieConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_cells_mismatch() {
        let series = SeriesConfig::new("sales");
        assert!(!series.cells_mismatch(3));

        let series = series.with_cells([CellOverride::new("red"), CellOverride::new("blue")]);
        assert!(!series.cells_mismatch(2));
        assert!(series.cells_mismatch(3));
        assert!(series.cells_mismatch(1));

        let pie = PieConfig::new().with_cells([CellOverride::new("red")]);
        assert!(!pie.cells_mismatch(1));
        assert!(pie.cells_mismatch(5));
        assert!(!PieConfig::new().cells_mismatch(5));
    }
}
