//! Declarative chart children and role-based introspection.
//!
//! Admin pages may describe a chart as an unordered list of sibling elements
//! (`Line`, `XAxis`, `Grid`, `Legend`, ...) instead of building a
//! [`CartesianConfig`] by hand. Each element carries its role as the enum tag;
//! the helpers here split such a list into role groups and fold it into the
//! typed configuration the renderers consume.

use crate::config::{
    AxisConfig, CartesianConfig, CellOverride, GridConfig, LegendConfig, PieConfig, SeriesConfig,
    TooltipConfig, YAxisConfig,
};
use serde::{Deserialize, Serialize};

/// One declarative chart element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartChild {
    Line {
        #[serde(flatten)]
        series: SeriesConfig,
        #[serde(default)]
        children: Vec<ChartChild>,
    },
    Bar {
        #[serde(flatten)]
        series: SeriesConfig,
        #[serde(default)]
        children: Vec<ChartChild>,
    },
    Pie {
        #[serde(flatten)]
        pie: PieConfig,
        #[serde(default)]
        children: Vec<ChartChild>,
    },
    Cell(CellOverride),
    XAxis(AxisConfig),
    YAxis(YAxisConfig),
    Grid(GridConfig),
    Legend(LegendConfig),
    Tooltip(TooltipConfig),
}

/// Role tag carried by every [`ChartChild`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartRole {
    Line,
    Bar,
    Pie,
    Cell,
    XAxis,
    YAxis,
    Grid,
    Legend,
    Tooltip,
}

/// Which series element a cartesian chart consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
}

impl ChartKind {
    pub fn series_role(&self) -> ChartRole {
        match self {
            Self::Line => ChartRole::Line,
            Self::Bar => ChartRole::Bar,
        }
    }
}

impl ChartChild {
    pub fn role(&self) -> ChartRole {
        match self {
            Self::Line { .. } => ChartRole::Line,
            Self::Bar { .. } => ChartRole::Bar,
            Self::Pie { .. } => ChartRole::Pie,
            Self::Cell(_) => ChartRole::Cell,
            Self::XAxis(_) => ChartRole::XAxis,
            Self::YAxis(_) => ChartRole::YAxis,
            Self::Grid(_) => ChartRole::Grid,
            Self::Legend(_) => ChartRole::Legend,
            Self::Tooltip(_) => ChartRole::Tooltip,
        }
    }

    /// Nested elements of a series (cell overrides)
    pub fn children(&self) -> &[ChartChild] {
        match self {
            Self::Line { children, .. } | Self::Bar { children, .. } | Self::Pie { children, .. } => {
                children
            }
            _ => &[],
        }
    }
}

/// Predicate matching one role
pub fn is_role(role: ChartRole) -> impl Fn(&ChartChild) -> bool {
    move |child| child.role() == role
}

/// Split `children` into one group per predicate, preserving input order
/// within each group. A child may land in several groups.
pub fn partition_children<'a>(
    children: &'a [ChartChild],
    predicates: &[&dyn Fn(&ChartChild) -> bool],
) -> Vec<Vec<&'a ChartChild>> {
    predicates
        .iter()
        .map(|predicate| children.iter().filter(|child| predicate(child)).collect())
        .collect()
}

/// Every cell override among `children`, in order
pub fn resolve_cells(children: &[ChartChild]) -> Vec<CellOverride> {
    children
        .iter()
        .filter_map(|child| match child {
            ChartChild::Cell(cell) => Some(cell.clone()),
            _ => None,
        })
        .collect()
}

impl CartesianConfig {
    /// Fold declarative children into a typed configuration.
    ///
    /// Only the first element of each singular role is used; every cell of
    /// the first series element is appended to that series' overrides.
    pub fn from_children(kind: ChartKind, children: &[ChartChild]) -> Self {
        let series_pred = is_role(kind.series_role());
        let x_pred = is_role(ChartRole::XAxis);
        let y_pred = is_role(ChartRole::YAxis);
        let grid_pred = is_role(ChartRole::Grid);
        let legend_pred = is_role(ChartRole::Legend);
        let tooltip_pred = is_role(ChartRole::Tooltip);

        let groups = partition_children(
            children,
            &[&series_pred, &x_pred, &y_pred, &grid_pred, &legend_pred, &tooltip_pred],
        );
        let first = |i: usize| groups[i].first().copied();

        let series = first(0).and_then(|child| match child {
            ChartChild::Line { series, children } | ChartChild::Bar { series, children } => {
                Some(series.clone().with_cells(resolve_cells(children)))
            }
            _ => None,
        });

        let config = Self {
            series,
            x_axis: first(1).and_then(|child| match child {
                ChartChild::XAxis(axis) => Some(axis.clone()),
                _ => None,
            }),
            y_axis: first(2).and_then(|child| match child {
                ChartChild::YAxis(axis) => Some(axis.clone()),
                _ => None,
            }),
            grid: first(3).map(|_| GridConfig::default()),
            legend: first(4).and_then(|child| match child {
                ChartChild::Legend(legend) => Some(legend.clone()),
                _ => None,
            }),
            tooltip: first(5).map(|_| TooltipConfig::default()),
            ..Default::default()
        };

        tracing::trace!(?kind, children = children.len(), "resolved chart children");
        config
    }
}

impl PieConfig {
    /// First `Pie` element with its nested cells folded in
    pub fn from_children(children: &[ChartChild]) -> Option<Self> {
        children.iter().find_map(|child| match child {
            ChartChild::Pie { pie, children } => {
                Some(pie.clone().with_cells(resolve_cells(children)))
            }
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_children() -> Vec<ChartChild> {
        vec![
            ChartChild::Tooltip(TooltipConfig::default()),
            ChartChild::XAxis(AxisConfig::new("month")),
            ChartChild::Line {
                series: SeriesConfig::new("sales").with_color("blue"),
                children: vec![
                    ChartChild::Cell(CellOverride::new("red")),
                    ChartChild::Cell(CellOverride::new("green")),
                ],
            },
            ChartChild::XAxis(AxisConfig::new("ignored")),
            ChartChild::Grid(GridConfig::default()),
        ]
    }

    #[test]
    fn test_partition_preserves_order() {
        let children = sample_children();
        let x_pred = is_role(ChartRole::XAxis);
        let legend_pred = is_role(ChartRole::Legend);
        let groups = partition_children(&children, &[&x_pred, &legend_pred]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][0], &ChartChild::XAxis(AxisConfig::new("month")));
        assert_eq!(groups[0][1], &ChartChild::XAxis(AxisConfig::new("ignored")));
        assert!(groups[1].is_empty());
    }

    #[test]
    fn test_from_children_first_match_wins() {
        let config = CartesianConfig::from_children(ChartKind::Line, &sample_children());

        assert_eq!(config.category_key(), "month");
        assert_eq!(config.value_key(), "sales");
        assert!(config.grid.is_some());
        assert!(config.tooltip.is_some());
        assert!(config.legend.is_none());
        assert!(config.y_axis.is_none());

        let series = config.series.unwrap();
        assert_eq!(series.cells.len(), 2);
        assert_eq!(series.fill_for(1, "x"), "green");
    }

    #[test]
    fn test_from_children_wrong_series_kind() {
        let config = CartesianConfig::from_children(ChartKind::Bar, &sample_children());
        assert!(config.series.is_none());
        assert_eq!(config.value_key(), "value");
    }

    #[test]
    fn test_from_children_empty() {
        let config = CartesianConfig::from_children(ChartKind::Line, &[]);
        assert_eq!(config, CartesianConfig::default());
    }

    #[test]
    fn test_pie_from_children() {
        let children = vec![
            ChartChild::Legend(LegendConfig::default()),
            ChartChild::Pie {
                pie: PieConfig::new().with_radii(0.0, 90.0),
                children: vec![ChartChild::Cell(CellOverride::new("#f43f5e"))],
            },
        ];
        let pie = PieConfig::from_children(&children).unwrap();
        assert_eq!(pie.inner_radius, 0.0);
        assert_eq!(pie.cells, vec![CellOverride::new("#f43f5e")]);
        assert!(PieConfig::from_children(&[]).is_none());
    }

    #[test]
    fn test_children_from_json() {
        let children: Vec<ChartChild> = serde_json::from_str(
            r#"[
                { "type": "bar", "dataKey": "count", "children": [{ "type": "cell", "fill": "red" }] },
                { "type": "xAxis", "dataKey": "cat" },
                { "type": "legend" }
            ]"#,
        )
        .unwrap();

        assert_eq!(children[0].role(), ChartRole::Bar);
        assert_eq!(children[0].children().len(), 1);
        let config = CartesianConfig::from_children(ChartKind::Bar, &children);
        assert_eq!(config.value_key(), "count");
        assert_eq!(config.category_key(), "cat");
        assert!(config.legend.is_some());
    }
}
