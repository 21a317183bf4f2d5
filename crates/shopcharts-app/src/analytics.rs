//! Analytics page data shaping
//!
//! Turns admin API records (orders, products, reviews) into chart rows and
//! chart configurations for the analytics dashboard.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Deserialize;
use shopcharts::{
    AxisConfig, CartesianConfig, CellOverride, ChartDatum, LegendConfig, PieConfig, SeriesConfig,
    YAxisConfig,
};
use std::collections::BTreeMap;

/// Slice / bar colours cycled by index
pub const PIE_COLORS: [&str; 5] = ["#6366f1", "#14b8a6", "#f97316", "#0ea5e9", "#ec4899"];
pub const MAX_CATEGORIES: usize = 8;
/// Shown in place of the category chart when no product has been counted
pub const NO_CATEGORY_DATA: &str = "Not enough category data yet.";
const RATING_BUCKETS: [u8; 5] = [1, 2, 3, 4, 5];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub created_at: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Review {
    pub rating: Option<f64>,
}

/// Shown while there are no orders yet
pub fn fallback_sales() -> Vec<ChartDatum> {
    [
        ("Jan", 8200),
        ("Feb", 9600),
        ("Mar", 11200),
        ("Apr", 9800),
        ("May", 13500),
        ("Jun", 14200),
    ]
    .into_iter()
    .map(|(month, sales)| ChartDatum::new().with("month", month).with("sales", sales))
    .collect()
}

fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Order totals summed per calendar month, oldest first
pub fn sales_by_month(orders: &[Order]) -> Vec<ChartDatum> {
    if orders.is_empty() {
        return fallback_sales();
    }

    let mut months: BTreeMap<(i32, u32), (String, f64)> = BTreeMap::new();
    for order in orders {
        let Some(date) = order.created_at.as_deref().and_then(parse_order_date) else {
            tracing::debug!(created_at = ?order.created_at, "skipping order without a usable date");
            continue;
        };
        let entry = months
            .entry((date.year(), date.month()))
            .or_insert_with(|| (date.format("%b").to_string(), 0.0));
        entry.1 += order.total.unwrap_or(0.0);
    }

    months
        .into_values()
        .map(|(month, sales)| ChartDatum::new().with("month", month).with("sales", sales))
        .collect()
}

/// Product counts per category, largest first, at most [`MAX_CATEGORIES`]
pub fn products_per_category(products: &[Product]) -> Vec<ChartDatum> {
    let mut totals: Vec<(String, u32)> = Vec::new();
    for product in products {
        let category = product
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("Uncategorised");
        match totals.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => totals.push((category.to_string(), 1)),
        }
    }

    // Stable sort keeps first-seen order among equal counts
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
        .into_iter()
        .take(MAX_CATEGORIES)
        .map(|(category, count)| {
            ChartDatum::new()
                .with("category", category)
                .with("count", f64::from(count))
        })
        .collect()
}

/// Placeholder text for the category panel, if it has nothing to plot
pub fn category_notice(categories: &[ChartDatum]) -> Option<&'static str> {
    categories.is_empty().then_some(NO_CATEGORY_DATA)
}

/// Review counts per rounded star rating, one row per bucket 1..=5
pub fn rating_distribution(reviews: &[Review]) -> Vec<ChartDatum> {
    let mut counts = [0u32; RATING_BUCKETS.len()];
    for review in reviews {
        let rating = review.rating.unwrap_or(0.0).round();
        if (1.0..=5.0).contains(&rating) {
            counts[rating as usize - 1] += 1;
        }
    }

    RATING_BUCKETS
        .iter()
        .zip(counts)
        .map(|(rating, count)| {
            ChartDatum::new()
                .with("name", format!("{}★", rating))
                .with("value", f64::from(count))
        })
        .collect()
}

fn color_cells(len: usize) -> Vec<CellOverride> {
    (0..len)
        .map(|i| CellOverride::new(PIE_COLORS[i % PIE_COLORS.len()]))
        .collect()
}

pub fn sales_chart_config() -> CartesianConfig {
    CartesianConfig::new()
        .with_grid()
        .with_x_axis(AxisConfig::new("month"))
        .with_y_axis(YAxisConfig::default())
        .with_tooltip()
        .with_legend(LegendConfig::default().with_entry("Sales"))
        .with_series(
            SeriesConfig::new("sales")
                .with_stroke_width(3.0)
                .with_dot_radius(4.0)
                .with_area_fill("rgba(99,102,241,0.12)"),
        )
}

pub fn category_chart_config(categories: usize) -> CartesianConfig {
    CartesianConfig::new()
        .with_grid()
        .with_x_axis(AxisConfig::new("category"))
        .with_y_axis(YAxisConfig::default())
        .with_tooltip()
        .with_series(
            SeriesConfig::new("count")
                .with_corner_radius(10.0)
                .with_color("#10b981")
                .with_cells(color_cells(categories)),
        )
}

pub fn rating_pie_config() -> PieConfig {
    PieConfig::new()
        .with_radii(50.0, 80.0)
        .with_padding_angle(4.0)
        .with_cells(color_cells(RATING_BUCKETS.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(created_at: &str, total: f64) -> Order {
        Order {
            created_at: Some(created_at.to_string()),
            total: Some(total),
        }
    }

    #[test]
    fn test_sales_by_month_groups_and_orders() {
        let orders = vec![
            order("2024-03-05T10:00:00Z", 120.0),
            order("2024-01-20T08:30:00+02:00", 80.0),
            order("2024-03-28", 30.5),
            order("not a date", 999.0),
            Order::default(),
        ];
        let rows = sales_by_month(&orders);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label("month").as_deref(), Some("Jan"));
        assert_eq!(rows[0].number("sales"), 80.0);
        assert_eq!(rows[1].label("month").as_deref(), Some("Mar"));
        assert_eq!(rows[1].number("sales"), 150.5);
    }

    #[test]
    fn test_sales_fallback() {
        let rows = sales_by_month(&[]);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].number("sales"), 14200.0);
    }

    #[test]
    fn test_products_per_category() {
        let products: Vec<Product> = ["toys", "books", "toys", "", "books", "toys", "garden"]
            .into_iter()
            .map(|c| Product {
                category: Some(c.to_string()),
            })
            .chain(std::iter::once(Product::default()))
            .collect();
        let rows = products_per_category(&products);

        let names: Vec<String> = rows.iter().filter_map(|r| r.label("category")).collect();
        assert_eq!(names, vec!["toys", "books", "Uncategorised", "garden"]);
        assert_eq!(rows[0].number("count"), 3.0);
        assert_eq!(rows[2].number("count"), 2.0);
    }

    #[test]
    fn test_category_notice_only_when_empty() {
        assert_eq!(category_notice(&products_per_category(&[])), Some(NO_CATEGORY_DATA));

        let rows = products_per_category(&[Product::default()]);
        assert_eq!(category_notice(&rows), None);
    }

    #[test]
    fn test_rating_distribution() {
        let reviews: Vec<Review> = [4.6, 5.0, 1.2, 0.2, 3.5]
            .into_iter()
            .map(|r| Review { rating: Some(r) })
            .collect();
        let rows = rating_distribution(&reviews);

        let counts: Vec<f64> = rows.iter().map(|r| r.number("value")).collect();
        assert_eq!(counts, vec![1.0, 0.0, 0.0, 1.0, 2.0]);
        assert_eq!(rows[4].label("name").as_deref(), Some("5★"));
    }

    #[test]
    fn test_configs_render() {
        use shopcharts::{ColorPalette, Size, render_bar_chart, render_line_chart, render_pie_chart};

        let palette = ColorPalette::default();
        let size = Size::new(480.0, 256.0);

        let line = render_line_chart(&fallback_sales(), size, &sales_chart_config(), &palette);
        assert_eq!(line.circles().count(), 6);
        assert!(line.texts().any(|t| t.content == "Sales"));

        let categories = vec![Product {
            category: Some("toys".into()),
        }];
        let rows = products_per_category(&categories);
        let bars = render_bar_chart(&rows, size, &category_chart_config(rows.len()), &palette);
        assert_eq!(bars.rects().next().map(|r| r.fill.as_str()), Some("#6366f1"));

        let pie = render_pie_chart(&rating_distribution(&[]), size, &rating_pie_config(), &palette);
        assert_eq!(pie.paths().count(), 5);
    }
}
