//! Storefront admin analytics page
//!
//! In the browser this mounts the analytics dashboard. Run natively it
//! renders the same three charts to standalone SVG on stdout.

mod analytics;

use analytics::{Order, Product, Review};
use leptos::prelude::*;
use serde::Deserialize;
use shopcharts::{BarChart, HeightSpec, LineChart, PieChart, ResponsiveContainer, Size};
use shopcharts_core::{ChartDatum, Result};

/// Snapshot used until the admin API is wired in
const SAMPLE_STORE: &str = r#"{
    "orders": [
        { "createdAt": "2024-01-14T09:12:00Z", "total": 4200 },
        { "createdAt": "2024-01-29T17:40:00Z", "total": 3650.5 },
        { "createdAt": "2024-02-08T11:03:00Z", "total": 9100 },
        { "createdAt": "2024-03-02T14:55:00Z", "total": 7420 },
        { "createdAt": "2024-03-21T08:20:00Z", "total": 4890 },
        { "createdAt": "2024-04-11T19:05:00Z", "total": 10230 }
    ],
    "products": [
        { "category": "Apparel" }, { "category": "Apparel" }, { "category": "Apparel" },
        { "category": "Home" }, { "category": "Home" },
        { "category": "Beauty" }, { "category": "Outdoor" }, {}
    ],
    "reviews": [
        { "rating": 5 }, { "rating": 4.6 }, { "rating": 4 }, { "rating": 3 },
        { "rating": 5 }, { "rating": 2 }, { "rating": 4.2 }
    ]
}"#;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoreSnapshot {
    orders: Vec<Order>,
    products: Vec<Product>,
    reviews: Vec<Review>,
}

/// Chart rows for the three analytics panels
#[derive(Debug, Clone, Default)]
struct AnalyticsData {
    sales: Vec<ChartDatum>,
    categories: Vec<ChartDatum>,
    ratings: Vec<ChartDatum>,
}

impl AnalyticsData {
    fn from_json(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        tracing::info!(
            orders = snapshot.orders.len(),
            products = snapshot.products.len(),
            reviews = snapshot.reviews.len(),
            "loaded store snapshot"
        );
        Ok(Self {
            sales: analytics::sales_by_month(&snapshot.orders),
            categories: analytics::products_per_category(&snapshot.products),
            ratings: analytics::rating_distribution(&snapshot.reviews),
        })
    }

    fn load() -> Self {
        Self::from_json(SAMPLE_STORE).unwrap_or_else(|err| {
            tracing::error!("failed to load store snapshot: {}", err);
            Self {
                sales: analytics::fallback_sales(),
                ..Self::default()
            }
        })
    }
}

// ============================================================================
// PAGE
// ============================================================================

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[component]
fn AnalyticsPage() -> impl IntoView {
    let data = AnalyticsData::load();
    let category_count = data.categories.len();

    let sales = RwSignal::new(data.sales);
    let categories = RwSignal::new(data.categories);
    let ratings = RwSignal::new(data.ratings);

    let sales_config = analytics::sales_chart_config();
    let category_config = analytics::category_chart_config(category_count);
    let rating_config = analytics::rating_pie_config();

    view! {
        <div class="analytics">
            <header class="analytics-header">
                <h1>"Analytics"</h1>
            </header>

            <section class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Monthly sales"</span>
                </div>
                <div class="panel-content">
                    <ResponsiveContainer
                        height=HeightSpec::Fixed(256.0)
                        chart=move |size: Size| {
                            view! {
                                <LineChart
                                    data=sales
                                    config=sales_config.clone()
                                    width=size.width
                                    height=size.height
                                />
                            }
                        }
                    />
                </div>
            </section>

            <section class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Products per category"</span>
                </div>
                <div class="panel-content">
                    {move || match categories.with(|rows| analytics::category_notice(rows)) {
                        Some(notice) => view! { <div class="panel-empty">{notice}</div> }.into_any(),
                        None => {
                            let category_config = category_config.clone();
                            view! {
                                <ResponsiveContainer
                                    height=HeightSpec::Fixed(256.0)
                                    chart=move |size: Size| {
                                        view! {
                                            <BarChart
                                                data=categories
                                                config=category_config.clone()
                                                width=size.width
                                                height=size.height
                                            />
                                        }
                                    }
                                />
                            }
                            .into_any()
                        }
                    }}
                </div>
            </section>

            <section class="panel">
                <div class="panel-header">
                    <span class="panel-title">"Rating distribution"</span>
                </div>
                <div class="panel-content">
                    <ResponsiveContainer
                        height=HeightSpec::Fixed(256.0)
                        chart=move |size: Size| {
                            view! {
                                <PieChart
                                    data=ratings
                                    config=rating_config.clone()
                                    width=size.width
                                    height=size.height
                                />
                            }
                        }
                    />
                </div>
            </section>
        </div>
    }
}

// ============================================================================
// ENTRY
// ============================================================================

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    leptos::mount::mount_to_body(AnalyticsPage);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shopcharts::{ColorPalette, render_bar_chart, render_line_chart, render_pie_chart};

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let data = AnalyticsData::load();
    let palette = ColorPalette::default();
    let size = Size::new(480.0, 256.0);

    println!(
        "{}",
        render_line_chart(&data.sales, size, &analytics::sales_chart_config(), &palette).to_svg()
    );
    match analytics::category_notice(&data.categories) {
        Some(notice) => println!("<!-- {} -->", notice),
        None => println!(
            "{}",
            render_bar_chart(
                &data.categories,
                size,
                &analytics::category_chart_config(data.categories.len()),
                &palette,
            )
            .to_svg()
        ),
    }
    println!(
        "{}",
        render_pie_chart(&data.ratings, size, &analytics::rating_pie_config(), &palette).to_svg()
    );
}
