//! Line chart renderer
//!
//! Points are spread evenly across the plot in data order (no sorting by X)
//! and joined into a polyline with an area fill closed on the plot baseline.

use crate::{
    ChartDimensions,
    cartesian::{self, tooltip_text},
    chartkit::{DomainScale, Tick, area_path, compute_scale, distribution_ratio, line_path, value_ticks},
    config::CartesianConfig,
    scene::{CircleShape, PathShape, Primitive, Scene},
};
use shopcharts_core::{ChartDatum, ColorPalette, Size, values_of};

/// One plotted datum
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub label: Option<String>,
    pub color: String,
}

/// Geometry of a line chart before it is turned into primitives
#[derive(Debug, Clone)]
pub struct LineLayout {
    pub dims: ChartDimensions,
    pub scale: DomainScale,
    pub ticks: Vec<Tick>,
    pub points: Vec<LinePoint>,
    pub path: String,
    pub area: String,
}

/// Compute point coordinates, value ticks and paths
pub fn layout_line_chart(
    data: &[ChartDatum],
    size: Size,
    config: &CartesianConfig,
    palette: &ColorPalette,
) -> LineLayout {
    let dims = ChartDimensions::from_size(size).with_margin(config.margin.resolve());
    let value_key = config.value_key();
    let category_key = config.category_key();

    let values = values_of(data, value_key);
    let scale = compute_scale(&values);
    let ticks = value_ticks(&scale, dims.margin.top, dims.inner_height());

    if values.iter().any(|v| *v < 0.0) {
        tracing::warn!(
            key = value_key,
            "line series has negative values; area fill still closes on the plot bottom"
        );
    }

    cartesian::warn_cell_mismatch(config, data.len(), "line");

    let count = data.len();
    let points: Vec<LinePoint> = data
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (datum, &value))| {
            let color = match &config.series {
                Some(series) => series.fill_for(index, &palette.primary).to_string(),
                None => palette.primary.clone(),
            };
            LinePoint {
                x: dims.margin.left + dims.inner_width() * distribution_ratio(index, count),
                y: dims.margin.top + scale.pixel_inverted(value, dims.inner_height()),
                value,
                label: datum.label(category_key),
                color,
            }
        })
        .collect();

    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    let path = line_path(&coords);
    let area = area_path(&coords, dims.plot_bottom());

    LineLayout {
        dims,
        scale,
        ticks,
        points,
        path,
        area,
    }
}

/// Render a line chart scene
pub fn render_line_chart(
    data: &[ChartDatum],
    size: Size,
    config: &CartesianConfig,
    palette: &ColorPalette,
) -> Scene {
    tracing::debug!(points = data.len(), width = size.width, height = size.height, "rendering line chart");

    let layout = layout_line_chart(data, size, config, palette);
    let dims = &layout.dims;
    let mut scene = Scene::new(size.width, size.height, "Line chart");

    if config.grid.is_some() {
        scene.primitives.extend(cartesian::grid_lines(dims, &layout.ticks, palette));
    }
    scene.primitives.extend(cartesian::axis_lines(dims, palette));

    if let Some(series) = &config.series {
        let stroke = series.color_or(&palette.primary);

        scene.push(Primitive::Path(PathShape {
            d: layout.area.clone(),
            fill: series.area_fill.clone().unwrap_or_else(|| palette.area_fill.clone()),
            stroke: None,
            stroke_width: None,
            title: None,
        }));
        scene.push(Primitive::Path(PathShape {
            d: layout.path.clone(),
            fill: "none".to_string(),
            stroke: Some(stroke.to_string()),
            stroke_width: Some(series.stroke_width),
            title: None,
        }));

        for (index, point) in layout.points.iter().enumerate() {
            scene.push(Primitive::Circle(CircleShape {
                cx: point.x,
                cy: point.y,
                r: series.dot_radius,
                fill: point.color.clone(),
                title: config
                    .tooltip
                    .as_ref()
                    .map(|_| tooltip_text(point.label.as_deref(), index, point.value)),
            }));
        }
    }

    scene.primitives.extend(cartesian::value_labels(dims, &layout.ticks, palette));

    for point in &layout.points {
        scene.push(cartesian::category_label(
            dims,
            point.x,
            point.label.clone().unwrap_or_default(),
            palette,
        ));
    }

    if config.legend.is_some() {
        let swatch = config
            .series
            .as_ref()
            .map(|s| s.color_or(&palette.primary))
            .unwrap_or(&palette.primary);
        scene.push(cartesian::legend(dims, swatch, config.legend_label(true), palette));
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AxisConfig, CellOverride, LegendConfig, SeriesConfig};

    fn sales() -> Vec<ChartDatum> {
        vec![
            ChartDatum::new().with("name", "Jan").with("sales", 10),
            ChartDatum::new().with("name", "Feb").with("sales", 20),
            ChartDatum::new().with("name", "Mar").with("sales", 15),
        ]
    }

    fn sales_config() -> CartesianConfig {
        CartesianConfig::new().with_series(SeriesConfig::new("sales"))
    }

    #[test]
    fn test_scenario_monthly_sales() {
        let config = sales_config();
        let palette = ColorPalette::default();
        let layout = layout_line_chart(&sales(), Size::new(300.0, 200.0), &config, &palette);
        let scene = render_line_chart(&sales(), Size::new(300.0, 200.0), &config, &palette);

        assert_eq!(scene.circles().count(), 3);

        let inner = layout.dims.inner_width();
        let left = layout.dims.margin.left;
        let xs: Vec<f64> = layout.points.iter().map(|p| (p.x - left) / inner).collect();
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);

        let ys: Vec<f64> = layout.points.iter().map(|p| p.y).collect();
        assert!(ys[1] < ys[2] && ys[2] < ys[0]);
        // Highest value sits on the top of the plot, lowest on the baseline
        assert_eq!(ys[1], layout.dims.margin.top);
        assert_eq!(ys[0], layout.dims.plot_bottom());
    }

    #[test]
    fn test_path_has_one_command_per_point() {
        let config = sales_config();
        let palette = ColorPalette::default();
        let layout = layout_line_chart(&sales(), Size::new(300.0, 200.0), &config, &palette);

        assert_eq!(layout.path.matches('M').count(), 1);
        assert_eq!(layout.path.matches('L').count(), 2);
        assert!(layout.area.ends_with('Z'));
        assert!(layout.area.starts_with("M40.00,168.00"));
    }

    #[test]
    fn test_empty_data_renders_frame() {
        let config = sales_config().with_grid();
        let scene = render_line_chart(&[], Size::new(300.0, 200.0), &config, &ColorPalette::default());

        assert_eq!(scene.circles().count(), 0);
        assert!(scene.paths().all(|p| p.d.is_empty()));
        // Two axis lines plus five grid lines
        assert_eq!(scene.lines().count(), 7);
        // Five value labels only
        assert_eq!(scene.texts().count(), 5);
    }

    #[test]
    fn test_infinite_text_reads_as_zero() {
        let data = vec![
            ChartDatum::new().with("value", "inf"),
            ChartDatum::new().with("value", 3),
        ];
        let config = CartesianConfig::new().with_series(SeriesConfig::default());
        let layout = layout_line_chart(&data, Size::new(300.0, 200.0), &config, &ColorPalette::default());

        assert_eq!(layout.scale, DomainScale::new(0.0, 3.0));
        assert!(layout.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(!layout.path.contains("NaN"));
    }

    #[test]
    fn test_single_point_is_centred() {
        let data = vec![ChartDatum::new().with("name", "Only").with("value", 7)];
        let config = CartesianConfig::new().with_series(SeriesConfig::default());
        let layout = layout_line_chart(&data, Size::new(300.0, 200.0), &config, &ColorPalette::default());

        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].x, 40.0 + 236.0 * 0.5);
        assert!(layout.path.starts_with('M'));
        assert!(!layout.path.contains('L'));
        assert_eq!(layout.ticks.len(), 5);
    }

    #[test]
    fn test_marker_colour_override() {
        let config = CartesianConfig::new().with_series(
            SeriesConfig::new("sales")
                .with_color("blue")
                .with_cells([CellOverride::new("blue"), CellOverride::new("blue"), CellOverride::new("red")]),
        );
        let mut data = sales();
        data.push(ChartDatum::new().with("name", "Apr").with("sales", 5));

        let scene = render_line_chart(&data, Size::new(300.0, 200.0), &config, &ColorPalette::default());
        let fills: Vec<&str> = scene.circles().map(|c| c.fill.as_str()).collect();
        assert_eq!(fills, vec!["blue", "blue", "red", "blue"]);
    }

    #[test]
    fn test_default_marker_colour() {
        let scene = render_line_chart(&sales(), Size::new(300.0, 200.0), &sales_config(), &ColorPalette::default());
        assert!(scene.circles().all(|c| c.fill == "#6366f1"));
    }

    #[test]
    fn test_tooltip_titles() {
        let data = vec![
            ChartDatum::new().with("month", "Jan").with("value", 1234.56),
            ChartDatum::new().with("value", 3),
        ];
        let config = CartesianConfig::new()
            .with_series(SeriesConfig::default())
            .with_x_axis(AxisConfig::new("month"))
            .with_tooltip();
        let scene = render_line_chart(&data, Size::new(300.0, 200.0), &config, &ColorPalette::default());
        let titles: Vec<Option<&str>> = scene.circles().map(|c| c.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("Jan: 1,234.6"), Some("2: 3")]);

        let no_tooltip = render_line_chart(&data, Size::new(300.0, 200.0), &sales_config(), &ColorPalette::default());
        assert!(no_tooltip.circles().all(|c| c.title.is_none()));
    }

    #[test]
    fn test_legend_label() {
        let config = sales_config().with_legend(LegendConfig::default());
        let scene = render_line_chart(&sales(), Size::new(300.0, 200.0), &config, &ColorPalette::default());
        assert!(scene.texts().any(|t| t.content == "Series"));
        assert!(scene.to_svg().contains(r#"<g class="legend" transform="translate(40, 8)">"#));
    }

    #[test]
    fn test_missing_series_omits_line() {
        let scene = render_line_chart(&sales(), Size::new(300.0, 200.0), &CartesianConfig::new(), &ColorPalette::default());
        assert_eq!(scene.paths().count(), 0);
        assert_eq!(scene.circles().count(), 0);
        // Category labels are still drawn
        assert!(scene.texts().any(|t| t.content == "Feb"));
    }
}
