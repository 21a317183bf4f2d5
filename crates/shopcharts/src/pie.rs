//! Pie / donut chart renderer
//!
//! Slices are laid out clockwise from 12 o'clock, each sweeping its share of
//! 360° followed by a fixed padding gap.

use crate::{
    chartkit::{PathBuilder, polar_point},
    config::PieConfig,
    scene::{GroupShape, PathShape, Primitive, Scene, TextAnchor, TextShape},
};
use shopcharts_core::{ChartDatum, ColorPalette, Size, format_number};

/// Angle of the first slice's leading edge (12 o'clock)
pub const START_ANGLE: f64 = -90.0;
pub const FULL_CIRCLE: f64 = 360.0;
/// Distance from the outer radius to the slice label
pub const LABEL_OFFSET: f64 = 16.0;
const LABEL_FONT_SIZE: f64 = 11.0;
const ANGLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub fill: String,
    /// Degrees, clockwise, 0° pointing right
    pub start_angle: f64,
    pub end_angle: f64,
    pub percent: f64,
    pub path: String,
    pub label_x: f64,
    pub label_y: f64,
    pub anchor: TextAnchor,
}

impl PieSlice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// `"{name} ({percent}%)"` with the percentage rounded to an integer
    pub fn label(&self) -> String {
        format!("{} ({}%)", self.name, self.percent.round())
    }
}

#[derive(Debug, Clone)]
pub struct PieLayout {
    pub cx: f64,
    pub cy: f64,
    /// Sum of slice values, 1 when the sum is zero
    pub total: f64,
    pub slices: Vec<PieSlice>,
}

/// Compute slice angles, arc paths and label anchors
pub fn layout_pie_chart(
    data: &[ChartDatum],
    size: Size,
    config: &PieConfig,
    palette: &ColorPalette,
) -> PieLayout {
    let cx = size.width / 2.0;
    let cy = size.height / 2.0;

    let values: Vec<f64> = data.iter().map(|d| d.number(&config.data_key)).collect();
    let sum: f64 = values.iter().sum();
    let total = if sum == 0.0 { 1.0 } else { sum };

    if values.iter().any(|v| *v < 0.0) {
        tracing::warn!(key = %config.data_key, "pie has negative values; slices will sweep backwards");
    }
    if config.cells_mismatch(data.len()) {
        tracing::warn!(
            cells = config.cells.len(),
            slices = data.len(),
            "pie cell overrides do not match slice count"
        );
    }

    let mut current = START_ANGLE;
    let slices = data
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (datum, &value))| {
            let sweep = value / total * FULL_CIRCLE;
            let start_angle = current;
            let end_angle = current + sweep;
            current = end_angle + config.padding_angle;

            let name = datum
                .label(&config.name_key)
                .unwrap_or_else(|| format!("Slice {}", index + 1));
            let fill = config
                .cells
                .get(index)
                .map(|cell| cell.fill.clone())
                .or_else(|| datum.label("fill"))
                .unwrap_or_else(|| palette.secondary.clone());

            let mid = (start_angle + end_angle) / 2.0;
            let (label_x, label_y) = polar_point(cx, cy, config.outer_radius + LABEL_OFFSET, mid);
            let anchor = if label_x >= cx {
                TextAnchor::Start
            } else {
                TextAnchor::End
            };

            PieSlice {
                name,
                value,
                fill,
                start_angle,
                end_angle,
                percent: value / total * 100.0,
                path: slice_path(cx, cy, config.inner_radius, config.outer_radius, start_angle, end_angle),
                label_x,
                label_y,
                anchor,
            }
        })
        .collect();

    PieLayout {
        cx,
        cy,
        total,
        slices,
    }
}

/// Arc from the current point at `from` to `to` on a circle of `radius`.
/// A full turn is split in two so the arc does not collapse to a point.
fn arc(
    builder: PathBuilder,
    (cx, cy): (f64, f64),
    radius: f64,
    (from, to): (f64, f64),
    large_arc: bool,
    clockwise: bool,
) -> PathBuilder {
    let (end_x, end_y) = polar_point(cx, cy, radius, to);

    if (to - from).abs() >= FULL_CIRCLE - ANGLE_EPSILON {
        let (mid_x, mid_y) = polar_point(cx, cy, radius, (from + to) / 2.0);
        builder
            .arc_to(radius, false, clockwise, mid_x, mid_y)
            .arc_to(radius, false, clockwise, end_x, end_y)
    } else {
        builder.arc_to(radius, large_arc, clockwise, end_x, end_y)
    }
}

/// Annular wedge (`inner > 0`) or solid wedge (`inner == 0`)
pub fn slice_path(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> String {
    let center = (cx, cy);
    let large_arc = end - start > 180.0;
    let (outer_x, outer_y) = polar_point(cx, cy, outer, start);

    if inner <= 0.0 {
        let builder = PathBuilder::new().move_to(cx, cy).line_to(outer_x, outer_y);
        return arc(builder, center, outer, (start, end), large_arc, true)
            .close()
            .build();
    }

    let (inner_start_x, inner_start_y) = polar_point(cx, cy, inner, start);
    let (inner_end_x, inner_end_y) = polar_point(cx, cy, inner, end);

    let builder = PathBuilder::new()
        .move_to(inner_start_x, inner_start_y)
        .line_to(outer_x, outer_y);
    let builder = arc(builder, center, outer, (start, end), large_arc, true)
        .line_to(inner_end_x, inner_end_y);
    arc(builder, center, inner, (end, start), large_arc, false)
        .close()
        .build()
}

/// Render a pie chart scene centred in `size`
pub fn render_pie_chart(
    data: &[ChartDatum],
    size: Size,
    config: &PieConfig,
    palette: &ColorPalette,
) -> Scene {
    tracing::debug!(slices = data.len(), width = size.width, height = size.height, "rendering pie chart");

    let layout = layout_pie_chart(data, size, config, palette);
    let mut scene = Scene::new(size.width, size.height, "Pie chart");

    let slices = layout
        .slices
        .iter()
        .map(|slice| {
            Primitive::Group(GroupShape {
                class: Some("slice"),
                transform: None,
                children: vec![
                    Primitive::Path(PathShape {
                        d: slice.path.clone(),
                        fill: slice.fill.clone(),
                        stroke: Some(palette.slice_stroke.clone()),
                        stroke_width: Some(1.0),
                        title: Some(format!("{}: {}", slice.name, format_number(slice.value))),
                    }),
                    Primitive::Text(TextShape {
                        x: slice.label_x,
                        y: slice.label_y,
                        content: slice.label(),
                        font_size: LABEL_FONT_SIZE,
                        anchor: slice.anchor,
                        fill: palette.text.clone(),
                    }),
                ],
            })
        })
        .collect();

    scene.push(Primitive::Group(GroupShape {
        class: Some("pie"),
        transform: None,
        children: slices,
    }));
    scene
}
