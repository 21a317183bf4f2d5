//! Bar chart renderer
//!
//! One equal-width slot per category, bars anchored on the plot baseline and
//! scaled against `max(values, 1)`.

use crate::{
    ChartDimensions,
    cartesian::{self, tooltip_text},
    chartkit::{DomainScale, Tick, value_ticks},
    config::CartesianConfig,
    scene::{Primitive, RectShape, Scene},
};
use shopcharts_core::{ChartDatum, ColorPalette, Size, values_of};

/// Horizontal inset on each side of a bar within its slot
pub const BAR_INSET: f64 = 8.0;
/// Narrowest bar drawn, whatever the slot width
pub const MIN_BAR_WIDTH: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub label: Option<String>,
    pub fill: String,
}

#[derive(Debug, Clone)]
pub struct BarLayout {
    pub dims: ChartDimensions,
    pub scale: DomainScale,
    pub ticks: Vec<Tick>,
    pub bars: Vec<BarGeometry>,
}

/// Compute bar rectangles and value ticks
pub fn layout_bar_chart(
    data: &[ChartDatum],
    size: Size,
    config: &CartesianConfig,
    palette: &ColorPalette,
) -> BarLayout {
    let dims = ChartDimensions::from_size(size).with_margin(config.margin.resolve());
    let value_key = config.value_key();
    let category_key = config.category_key();

    let values = values_of(data, value_key);
    let max_value = values.iter().cloned().fold(1.0_f64, f64::max);
    let scale = DomainScale::from_zero(max_value);
    let ticks = value_ticks(&scale, dims.margin.top, dims.inner_height());

    if values.iter().any(|v| *v < 0.0) {
        tracing::warn!(
            key = value_key,
            "bar series has negative values; bars will extend below the baseline"
        );
    }

    cartesian::warn_cell_mismatch(config, data.len(), "bar");

    let slot = dims.inner_width() / data.len().max(1) as f64;
    let bar_width = (slot - 2.0 * BAR_INSET).max(MIN_BAR_WIDTH);

    let bars = data
        .iter()
        .zip(&values)
        .enumerate()
        .map(|(index, (datum, &value))| {
            let height = dims.inner_height() * (value / max_value);
            let fill = match &config.series {
                Some(series) => series.fill_for(index, &palette.primary).to_string(),
                None => palette.primary.clone(),
            };
            BarGeometry {
                x: dims.margin.left + index as f64 * slot + BAR_INSET,
                y: dims.plot_bottom() - height,
                width: bar_width,
                height,
                value,
                label: datum.label(category_key),
                fill,
            }
        })
        .collect();

    BarLayout {
        dims,
        scale,
        ticks,
        bars,
    }
}

/// Render a bar chart scene
pub fn render_bar_chart(
    data: &[ChartDatum],
    size: Size,
    config: &CartesianConfig,
    palette: &ColorPalette,
) -> Scene {
    tracing::debug!(bars = data.len(), width = size.width, height = size.height, "rendering bar chart");

    let layout = layout_bar_chart(data, size, config, palette);
    let dims = &layout.dims;
    let mut scene = Scene::new(size.width, size.height, "Bar chart");

    if config.grid.is_some() {
        scene.primitives.extend(cartesian::grid_lines(dims, &layout.ticks, palette));
    }
    scene.primitives.extend(cartesian::axis_lines(dims, palette));

    for (index, bar) in layout.bars.iter().enumerate() {
        if let Some(series) = &config.series {
            scene.push(Primitive::Rect(RectShape {
                x: bar.x,
                y: bar.y,
                width: bar.width,
                height: bar.height,
                rx: series.corner_radius,
                fill: bar.fill.clone(),
                title: config
                    .tooltip
                    .as_ref()
                    .map(|_| tooltip_text(bar.label.as_deref(), index, bar.value)),
            }));
        }
        scene.push(cartesian::category_label(
            dims,
            bar.x + bar.width / 2.0,
            bar.label.clone().unwrap_or_default(),
            palette,
        ));
    }

    scene.primitives.extend(cartesian::value_labels(dims, &layout.ticks, palette));

    if config.legend.is_some() {
        let swatch = config
            .series
            .as_ref()
            .map(|s| s.color_or(&palette.primary))
            .unwrap_or(&palette.primary);
        scene.push(cartesian::legend(dims, swatch, config.legend_label(false), palette));
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AxisConfig, CellOverride, LegendConfig, SeriesConfig, YAxisConfig};

    fn counts() -> Vec<ChartDatum> {
        vec![
            ChartDatum::new().with("cat", "A").with("count", 0),
            ChartDatum::new().with("cat", "B").with("count", 10),
        ]
    }

    fn count_config() -> CartesianConfig {
        CartesianConfig::new()
            .with_series(SeriesConfig::new("count"))
            .with_x_axis(AxisConfig::new("cat"))
    }

    #[test]
    fn test_scenario_zero_and_full_bars() {
        let config = count_config();
        let scene = render_bar_chart(&counts(), Size::new(400.0, 240.0), &config, &ColorPalette::default());
        let layout = layout_bar_chart(&counts(), Size::new(400.0, 240.0), &config, &ColorPalette::default());

        let rects: Vec<&RectShape> = scene.rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].height, 0.0);
        assert_eq!(rects[0].y, layout.dims.plot_bottom());
        assert_eq!(rects[1].height, layout.dims.inner_height());
        assert_eq!(rects[1].y, layout.dims.margin.top);
    }

    #[test]
    fn test_slot_geometry() {
        let layout = layout_bar_chart(&counts(), Size::new(400.0, 240.0), &count_config(), &ColorPalette::default());
        // inner width 336, two slots of 168
        assert_eq!(layout.bars[0].x, 48.0);
        assert_eq!(layout.bars[1].x, 40.0 + 168.0 + 8.0);
        assert_eq!(layout.bars[0].width, 152.0);
    }

    #[test]
    fn test_min_bar_width() {
        let data: Vec<ChartDatum> = (0..40).map(|i| ChartDatum::new().with("value", i)).collect();
        let config = CartesianConfig::new().with_series(SeriesConfig::default());
        let layout = layout_bar_chart(&data, Size::new(400.0, 240.0), &config, &ColorPalette::default());
        assert!(layout.bars.iter().all(|b| b.width == MIN_BAR_WIDTH));
    }

    #[test]
    fn test_height_monotonic() {
        let data: Vec<ChartDatum> = [3.0, 7.5, 7.5, 12.0, 0.5]
            .into_iter()
            .map(|v| ChartDatum::new().with("value", v))
            .collect();
        let config = CartesianConfig::new().with_series(SeriesConfig::default());
        let layout = layout_bar_chart(&data, Size::new(400.0, 240.0), &config, &ColorPalette::default());

        for a in &layout.bars {
            for b in &layout.bars {
                if a.value < b.value {
                    assert!(a.height <= b.height);
                }
            }
        }
    }

    #[test]
    fn test_small_values_scale_against_one() {
        let data = vec![ChartDatum::new().with("value", 0.5)];
        let config = CartesianConfig::new().with_series(SeriesConfig::default());
        let layout = layout_bar_chart(&data, Size::new(400.0, 240.0), &config, &ColorPalette::default());

        assert_eq!(layout.scale.max, 1.0);
        assert_eq!(layout.bars[0].height, layout.dims.inner_height() * 0.5);
        let tick_values: Vec<f64> = layout.ticks.iter().map(|t| t.value).collect();
        assert_eq!(tick_values, vec![1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_fill_override_precedence() {
        let data: Vec<ChartDatum> = (1..=4).map(|i| ChartDatum::new().with("value", i)).collect();
        let config = CartesianConfig::new().with_series(
            SeriesConfig::default()
                .with_color("blue")
                .with_cells([CellOverride::new("blue"), CellOverride::new("blue"), CellOverride::new("red")]),
        );
        let scene = render_bar_chart(&data, Size::new(400.0, 240.0), &config, &ColorPalette::default());
        let fills: Vec<&str> = scene.rects().map(|r| r.fill.as_str()).collect();
        assert_eq!(fills, vec!["blue", "blue", "red", "blue"]);
    }

    #[test]
    fn test_empty_and_tick_count() {
        let scene = render_bar_chart(&[], Size::new(400.0, 240.0), &count_config(), &ColorPalette::default());
        assert_eq!(scene.rects().count(), 0);
        assert_eq!(scene.texts().count(), 5);
    }

    #[test]
    fn test_legend_ignores_axis_label() {
        let config = count_config()
            .with_y_axis(YAxisConfig {
                label: Some("Units".into()),
            })
            .with_legend(LegendConfig::default());
        let scene = render_bar_chart(&counts(), Size::new(400.0, 240.0), &config, &ColorPalette::default());
        assert!(scene.texts().any(|t| t.content == "Series"));
        assert!(!scene.texts().any(|t| t.content == "Units"));
    }

    #[test]
    fn test_tooltip_and_labels() {
        let config = count_config().with_tooltip();
        let scene = render_bar_chart(&counts(), Size::new(400.0, 240.0), &config, &ColorPalette::default());
        let titles: Vec<Option<&str>> = scene.rects().map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("A: 0"), Some("B: 10")]);
        assert!(scene.texts().any(|t| t.content == "B" && t.x == 40.0 + 168.0 + 8.0 + 76.0));
    }
}
