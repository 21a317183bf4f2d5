//! Leptos components
//!
//! Thin reactive wrappers: each chart re-renders its scene from scratch
//! whenever its data signal changes and draws it with [`SceneView`].

use crate::{
    bar::render_bar_chart,
    config::{CartesianConfig, PieConfig},
    line::render_line_chart,
    pie::render_pie_chart,
    responsive::{HeightSpec, ResizeSubscription, ResponsiveState, WidthSpec},
    scene::{Primitive, Scene},
};
use leptos::{html::Div, prelude::*};
use shopcharts_core::{ChartDatum, ColorPalette, Size};

// ============================================================================
// SCENE RENDERING
// ============================================================================

/// Draw a computed scene as inline SVG
#[component]
pub fn SceneView(scene: Scene) -> impl IntoView {
    let viewbox = scene.viewbox();
    let primitives = scene
        .primitives
        .into_iter()
        .map(primitive_view)
        .collect_view();

    view! {
        <svg
            class="shopchart"
            width=scene.width
            height=scene.height
            viewBox=viewbox
            role="img"
            aria-label=scene.label
        >
            <rect width="100%" height="100%" fill="none" />
            {primitives}
        </svg>
    }
}

fn primitive_view(primitive: Primitive) -> AnyView {
    match primitive {
        Primitive::Line(line) => view! {
            <line
                x1=line.x1
                y1=line.y1
                x2=line.x2
                y2=line.y2
                stroke=line.stroke
                stroke-dasharray=line.dash
            />
        }
        .into_any(),
        Primitive::Path(path) => {
            let title = path.title.map(|t| view! { <title>{t}</title> });
            view! {
                <path
                    d=path.d
                    fill=path.fill
                    stroke=path.stroke
                    stroke-width=path.stroke_width
                >
                    {title}
                </path>
            }
            .into_any()
        }
        Primitive::Circle(circle) => {
            let title = circle.title.map(|t| view! { <title>{t}</title> });
            view! {
                <circle cx=circle.cx cy=circle.cy r=circle.r fill=circle.fill>
                    {title}
                </circle>
            }
            .into_any()
        }
        Primitive::Rect(rect) => {
            let title = rect.title.map(|t| view! { <title>{t}</title> });
            view! {
                <rect
                    x=rect.x
                    y=rect.y
                    width=rect.width
                    height=rect.height
                    rx=rect.rx
                    fill=rect.fill
                >
                    {title}
                </rect>
            }
            .into_any()
        }
        Primitive::Text(text) => view! {
            <text
                x=text.x
                y=text.y
                font-size=text.font_size
                text-anchor=text.anchor.as_str()
                fill=text.fill
            >
                {text.content}
            </text>
        }
        .into_any(),
        Primitive::Group(group) => {
            let children = group
                .children
                .into_iter()
                .map(primitive_view)
                .collect_view();
            view! {
                <g class=group.class.unwrap_or_default() transform=group.transform>
                    {children}
                </g>
            }
            .into_any()
        }
    }
}

// ============================================================================
// CHARTS
// ============================================================================

/// Line chart component
#[component]
pub fn LineChart(
    #[prop(into)] data: Signal<Vec<ChartDatum>>,
    #[prop(optional)] config: Option<CartesianConfig>,
    #[prop(optional)] palette: Option<ColorPalette>,
    #[prop(default = 400.0)] width: f64,
    #[prop(default = 240.0)] height: f64,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let palette = palette.unwrap_or_default();

    move || {
        let scene = data.with(|rows| render_line_chart(rows, Size::new(width, height), &config, &palette));
        view! { <SceneView scene=scene /> }
    }
}

/// Bar chart component
#[component]
pub fn BarChart(
    #[prop(into)] data: Signal<Vec<ChartDatum>>,
    #[prop(optional)] config: Option<CartesianConfig>,
    #[prop(optional)] palette: Option<ColorPalette>,
    #[prop(default = 400.0)] width: f64,
    #[prop(default = 240.0)] height: f64,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let palette = palette.unwrap_or_default();

    move || {
        let scene = data.with(|rows| render_bar_chart(rows, Size::new(width, height), &config, &palette));
        view! { <SceneView scene=scene /> }
    }
}

/// Pie / donut chart component
#[component]
pub fn PieChart(
    #[prop(into)] data: Signal<Vec<ChartDatum>>,
    #[prop(optional)] config: Option<PieConfig>,
    #[prop(optional)] palette: Option<ColorPalette>,
    #[prop(default = 400.0)] width: f64,
    #[prop(default = 240.0)] height: f64,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let palette = palette.unwrap_or_default();

    move || {
        let scene = data.with(|rows| render_pie_chart(rows, Size::new(width, height), &config, &palette));
        view! { <SceneView scene=scene /> }
    }
}

// ============================================================================
// RESPONSIVE CONTAINER
// ============================================================================

/// Measures its box and renders `chart` with the resolved size.
///
/// Registers one resize observer on mount and disconnects it on cleanup.
#[component]
pub fn ResponsiveContainer<F, V>(
    #[prop(optional)] width: WidthSpec,
    #[prop(optional)] height: HeightSpec,
    #[prop(optional, into)] class: Option<String>,
    chart: F,
) -> impl IntoView
where
    F: Fn(Size) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let container = NodeRef::<Div>::new();
    let state = RwSignal::new(ResponsiveState::new(width, height));

    Effect::new(move |_| {
        let Some(element) = container.get() else {
            return;
        };

        state.update(|s| s.observe(f64::from(element.client_width()), f64::from(element.client_height())));

        match ResizeSubscription::observe(&element, move |size| {
            state.update(|s| s.observe(size.width, size.height))
        }) {
            Ok(subscription) => {
                let stored = StoredValue::new_local(Some(subscription));
                on_cleanup(move || {
                    stored.update_value(|s| {
                        s.take();
                    });
                });
            }
            Err(err) => tracing::error!("failed to observe chart container: {:?}", err),
        }
    });

    let resolved = move || state.with(ResponsiveState::resolved);
    let style = move || {
        format!(
            "width: {}; height: {}px;",
            state.with(ResponsiveState::css_width),
            resolved().height
        )
    };

    view! {
        <div node_ref=container class=class style=style>
            {move || chart(resolved())}
        </div>
    }
}
