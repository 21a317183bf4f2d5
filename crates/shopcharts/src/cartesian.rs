//! Frame pieces shared by the line and bar charts: axes, grid, value labels,
//! legend swatch.

use crate::{
    ChartDimensions,
    chartkit::Tick,
    config::CartesianConfig,
    scene::{GroupShape, LineShape, Primitive, RectShape, TextAnchor, TextShape},
};
use shopcharts_core::{ColorPalette, format_number};

pub(crate) const AXIS_FONT_SIZE: f64 = 11.0;
pub(crate) const LEGEND_FONT_SIZE: f64 = 12.0;
const GRID_DASH: &str = "4 4";

/// Dashed horizontal lines at each tick
pub(crate) fn grid_lines(dims: &ChartDimensions, ticks: &[Tick], palette: &ColorPalette) -> Vec<Primitive> {
    ticks
        .iter()
        .map(|tick| {
            Primitive::Line(LineShape {
                x1: dims.margin.left,
                y1: tick.position,
                x2: dims.plot_right(),
                y2: tick.position,
                stroke: palette.grid.clone(),
                dash: Some(GRID_DASH.to_string()),
            })
        })
        .collect()
}

/// Left value axis and bottom category axis
pub(crate) fn axis_lines(dims: &ChartDimensions, palette: &ColorPalette) -> [Primitive; 2] {
    let left = dims.margin.left;
    let bottom = dims.plot_bottom();
    [
        Primitive::Line(LineShape {
            x1: left,
            y1: dims.margin.top,
            x2: left,
            y2: bottom,
            stroke: palette.axis.clone(),
            dash: None,
        }),
        Primitive::Line(LineShape {
            x1: left,
            y1: bottom,
            x2: dims.plot_right(),
            y2: bottom,
            stroke: palette.axis.clone(),
            dash: None,
        }),
    ]
}

/// Formatted tick values right-aligned against the value axis
pub(crate) fn value_labels(dims: &ChartDimensions, ticks: &[Tick], palette: &ColorPalette) -> Vec<Primitive> {
    ticks
        .iter()
        .map(|tick| {
            Primitive::Text(TextShape {
                x: dims.margin.left - 8.0,
                y: tick.position + 4.0,
                content: format_number(tick.value),
                font_size: AXIS_FONT_SIZE,
                anchor: TextAnchor::End,
                fill: palette.text.clone(),
            })
        })
        .collect()
}

/// Category label centred under `x`
pub(crate) fn category_label(dims: &ChartDimensions, x: f64, label: String, palette: &ColorPalette) -> Primitive {
    Primitive::Text(TextShape {
        x,
        y: dims.plot_bottom() + 20.0,
        content: label,
        font_size: AXIS_FONT_SIZE,
        anchor: TextAnchor::Middle,
        fill: palette.text.clone(),
    })
}

/// Single static swatch and label above the plot's top-left corner
pub(crate) fn legend(dims: &ChartDimensions, swatch: &str, label: String, palette: &ColorPalette) -> Primitive {
    Primitive::Group(GroupShape {
        class: Some("legend"),
        transform: Some(format!(
            "translate({}, {})",
            dims.margin.left,
            dims.margin.top - 8.0
        )),
        children: vec![
            Primitive::Rect(RectShape {
                x: 0.0,
                y: 0.0,
                width: 12.0,
                height: 12.0,
                rx: 2.0,
                fill: swatch.to_string(),
                title: None,
            }),
            Primitive::Text(TextShape {
                x: 18.0,
                y: 10.0,
                content: label,
                font_size: LEGEND_FONT_SIZE,
                anchor: TextAnchor::Start,
                fill: palette.text.clone(),
            }),
        ],
    })
}

/// Hover text for one datum
pub(crate) fn tooltip_text(label: Option<&str>, index: usize, value: f64) -> String {
    match label {
        Some(label) => format!("{}: {}", label, format_number(value)),
        None => format!("{}: {}", index + 1, format_number(value)),
    }
}

/// Report per-point overrides that do not cover the data one-to-one
pub(crate) fn warn_cell_mismatch(config: &CartesianConfig, len: usize, chart: &'static str) {
    if let Some(series) = config.series.as_ref().filter(|s| s.cells_mismatch(len)) {
        tracing::warn!(
            chart,
            cells = series.cells.len(),
            points = len,
            "cell overrides do not match data length; extra points use the series colour"
        );
    }
}
