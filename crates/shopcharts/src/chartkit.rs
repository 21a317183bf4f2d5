//! # chartkit
//!
//! Core chart primitives: domain scales, value ticks, path builders.
//! Implements Strategy pattern for path generation.

use std::fmt::Write;

/// Number of intervals between value ticks (5 labelled positions)
pub const TICK_INTERVALS: usize = 4;

// ============================================================================
// DOMAIN SCALE
// ============================================================================

/// Linear mapping from a numeric data domain to a pixel span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainScale {
    pub min: f64,
    pub max: f64,
    /// `max(max - min, 1)`, never zero
    pub range: f64,
}

impl DomainScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            range: (max - min).max(1.0),
        }
    }

    /// Domain anchored at zero, as used by bar charts
    pub fn from_zero(max: f64) -> Self {
        Self::new(0.0, max)
    }

    /// Normalized position of a value in the domain
    pub fn ratio(&self, value: f64) -> f64 {
        (value - self.min) / self.range
    }

    /// Value to pixel offset along a span growing with the value
    pub fn pixel(&self, value: f64, span: f64) -> f64 {
        self.ratio(value) * span
    }

    /// Value to pixel offset for top-down coordinates (higher value, smaller y)
    pub fn pixel_inverted(&self, value: f64, span: f64) -> f64 {
        span - self.pixel(value, span)
    }
}

impl Default for DomainScale {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Derive the domain from the values actually supplied.
///
/// An empty slice yields `{ min: 0, max: 0, range: 1 }`.
pub fn compute_scale(values: &[f64]) -> DomainScale {
    if values.is_empty() {
        return DomainScale::default();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    DomainScale::new(min, max)
}

// ============================================================================
// TICKS
// ============================================================================

/// A labelled reference point on the value axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Absolute pixel y of the tick
    pub position: f64,
}

/// Fixed five evenly spaced ticks, highest value first (top of the plot)
pub fn value_ticks(scale: &DomainScale, top: f64, inner_height: f64) -> Vec<Tick> {
    (0..=TICK_INTERVALS)
        .map(|i| {
            let ratio = i as f64 / TICK_INTERVALS as f64;
            Tick {
                value: scale.min + scale.range * (1.0 - ratio),
                position: top + inner_height * ratio,
            }
        })
        .collect()
}

/// Even horizontal distribution for point series; a lone point is centred
pub fn distribution_ratio(index: usize, count: usize) -> f64 {
    if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.5
    }
}

// ============================================================================
// STRATEGY PATTERN: Path Generator Trait
// ============================================================================

/// Strategy trait for path generation
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Open polyline through every point in input order
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

/// Polyline closed down to a fixed baseline
#[derive(Debug, Clone)]
pub struct AreaPath {
    pub baseline_y: f64,
}

impl PathGenerator for AreaPath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(first_x, self.baseline_y);
        for &(x, y) in points {
            builder = builder.line_to(x, y);
        }
        builder.line_to(last_x, self.baseline_y).close().build()
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API; commands are space separated
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    fn separator(&mut self) {
        if !self.commands.is_empty() {
            self.commands.push(' ');
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.separator();
        // Writing to a String cannot fail
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.separator();
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.separator();
        let _ = write!(
            self.commands,
            "A{:.2},{:.2} 0 {} {} {:.2},{:.2}",
            radius, radius, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.separator();
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

/// Generate line path (non-closed)
pub fn line_path(points: &[(f64, f64)]) -> String {
    LinePath.generate(points)
}

/// Generate closed area path with baseline
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    AreaPath { baseline_y }.generate(points)
}

// ============================================================================
// POLAR GEOMETRY
// ============================================================================

/// Point on a circle; 0° points right and angles grow clockwise (SVG y-down)
pub fn polar_point(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

// ============================================================================
// TESTS
// ============================================================================
