//! Responsive sizing
//!
//! Observes the rendered size of a container box and resolves the pixel size
//! handed to the chart inside it. Width may follow the box; a numeric height
//! always wins over whatever the box reports.

use serde::{Deserialize, Serialize};
use shopcharts_core::Size;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use web_sys::{Element, ResizeObserver, ResizeObserverEntry};

/// Height used when the caller gives none
pub const DEFAULT_HEIGHT: f64 = 240.0;
/// Floor applied to a filled height so a box that is not laid out yet
/// never yields a zero-height chart
pub const MIN_FILL_HEIGHT: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum WidthSpec {
    Fixed(f64),
    #[default]
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeightSpec {
    Fixed(f64),
    Fill,
}

impl Default for HeightSpec {
    fn default() -> Self {
        Self::Fixed(DEFAULT_HEIGHT)
    }
}

/// Last observation plus the caller's sizing policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsiveState {
    width: WidthSpec,
    height: HeightSpec,
    observed: Size,
}

impl ResponsiveState {
    pub fn new(width: WidthSpec, height: HeightSpec) -> Self {
        let initial_height = match height {
            HeightSpec::Fixed(h) => h,
            HeightSpec::Fill => 0.0,
        };
        Self {
            width,
            height,
            observed: Size::new(0.0, initial_height),
        }
    }

    /// Apply one box measurement. A zero observed height keeps the previous one.
    pub fn observe(&mut self, width: f64, height: f64) {
        self.observed.width = width;
        self.observed.height = match self.height {
            HeightSpec::Fixed(h) => h,
            HeightSpec::Fill if height > 0.0 => height,
            HeightSpec::Fill => self.observed.height,
        };
    }

    /// Size handed to the chart
    pub fn resolved(&self) -> Size {
        let width = match self.width {
            WidthSpec::Fixed(w) => w,
            WidthSpec::Fill => self.observed.width,
        };
        let height = match self.height {
            HeightSpec::Fixed(h) => h,
            HeightSpec::Fill => self.observed.height.max(MIN_FILL_HEIGHT),
        };
        Size::new(width, height)
    }

    /// CSS width of the container box
    pub fn css_width(&self) -> String {
        match self.width {
            WidthSpec::Fixed(w) => format!("{}px", w),
            WidthSpec::Fill => "100%".to_string(),
        }
    }
}

/// One-shot resolution from a single observation
pub fn resolve_size(width: WidthSpec, height: HeightSpec, observed: Size) -> Size {
    let mut state = ResponsiveState::new(width, height);
    state.observe(observed.width, observed.height);
    state.resolved()
}

// ============================================================================
// RESIZE OBSERVATION
// ============================================================================

/// A single registered `ResizeObserver`; disconnected when dropped
pub struct ResizeSubscription {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeSubscription {
    /// Register `on_resize` for content-box size changes of `element`
    pub fn observe(element: &Element, mut on_resize: impl FnMut(Size) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
                return;
            };
            let rect = entry.content_rect();
            on_resize(Size::new(rect.width(), rect.height()));
        });

        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(element);
        tracing::info!("resize observer attached");

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Stop observing now rather than at drop
    pub fn disconnect(self) {
        drop(self);
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.observer.disconnect();
        tracing::info!("resize observer detached");
    }
}
