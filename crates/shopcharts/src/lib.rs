//! # shopcharts
//!
//! Self-contained SVG charting for the storefront admin console, built with
//! Leptos. Compiles a chart configuration plus an array of plain records into
//! a vector scene sized to an observed container.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Path generation (line, area)
//! - Number formatting (see `shopcharts-core`)
//!
//! Every render is a pure function of `(data, size, config, palette)`; there
//! is no retained chart state.
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: domain scales, ticks, path builders
//! - `config` - Typed series/axis/legend/pie configuration
//! - `children` - Declarative child elements and role introspection
//! - `scene` - Vector primitives and SVG serialisation
//! - `line` / `bar` / `pie` - Chart renderers
//! - `responsive` - Resize observation and size resolution
//! - `components` - Leptos components drawing scenes into the DOM

pub mod bar;
mod cartesian;
pub mod chartkit;
pub mod children;
pub mod components;
pub mod config;
pub mod line;
pub mod pie;
pub mod responsive;
pub mod scene;

pub use bar::*;
pub use chartkit::*;
pub use children::*;
pub use components::*;
pub use config::*;
pub use line::*;
pub use pie::*;
pub use responsive::*;
pub use scene::*;

// Re-export core types for convenience
pub use shopcharts_core::{ChartDatum, ColorPalette, DatumValue, Size, colors, format_number};

/// Smallest inner plotting extent, in pixels
pub const MIN_INNER_EXTENT: f64 = 10.0;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Standard chart margins, leaving room for axis labels
    pub const fn standard() -> Self {
        Self::new(16.0, 24.0, 32.0, 40.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height)
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins), floored at [`MIN_INNER_EXTENT`]
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(MIN_INNER_EXTENT)
    }

    /// Inner height (excluding margins), floored at [`MIN_INNER_EXTENT`]
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(MIN_INNER_EXTENT)
    }

    /// Absolute x of the plot's right edge
    pub fn plot_right(&self) -> f64 {
        self.margin.left + self.inner_width()
    }

    /// Absolute y of the plot baseline
    pub fn plot_bottom(&self) -> f64 {
        self.margin.top + self.inner_height()
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(400.0, 240.0)
    }
}
