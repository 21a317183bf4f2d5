//! Vector scene produced by the renderers.
//!
//! A scene is a flat-ish list of SVG primitives. The Leptos components draw
//! it into the DOM; [`Scene::to_svg`] serialises it for static export and
//! for tests.

use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub dash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub d: String,
    pub fill: String,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub fill: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupShape {
    pub class: Option<&'static str>,
    pub transform: Option<String>,
    pub children: Vec<Primitive>,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LineShape),
    Path(PathShape),
    Circle(CircleShape),
    Rect(RectShape),
    Text(TextShape),
    Group(GroupShape),
}

impl Primitive {
    /// Depth-first iterator over this primitive and everything nested in it
    pub fn walk(&self) -> Box<dyn Iterator<Item = &Primitive> + '_> {
        match self {
            Self::Group(group) => Box::new(
                std::iter::once(self).chain(group.children.iter().flat_map(Primitive::walk)),
            ),
            _ => Box::new(std::iter::once(self)),
        }
    }
}

/// Rendered chart
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    /// Accessible name (`aria-label`)
    pub label: &'static str,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f64, height: f64, label: &'static str) -> Self {
        Self {
            width,
            height,
            label,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    /// Every primitive, groups expanded depth-first
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().flat_map(Primitive::walk)
    }

    pub fn circles(&self) -> impl Iterator<Item = &CircleShape> {
        self.iter().filter_map(|p| match p {
            Primitive::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectShape> {
        self.iter().filter_map(|p| match p {
            Primitive::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathShape> {
        self.iter().filter_map(|p| match p {
            Primitive::Path(p) => Some(p),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineShape> {
        self.iter().filter_map(|p| match p {
            Primitive::Line(l) => Some(l),
            _ => None,
        })
    }

    /// Serialise as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(1024);
        // Writing to a String cannot fail
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{}" role="img" aria-label="{}">"#,
            self.width,
            self.height,
            self.viewbox(),
            self.label
        )?;
        out.push_str(r#"<rect width="100%" height="100%" fill="none"/>"#);
        for primitive in &self.primitives {
            write_primitive(out, primitive)?;
        }
        out.push_str("</svg>");
        Ok(())
    }
}

fn write_title(out: &mut String, tag: &str, title: Option<&str>) -> fmt::Result {
    match title {
        Some(title) => write!(out, "><title>{}</title></{}>", escape(title), tag),
        None => {
            out.push_str("/>");
            Ok(())
        }
    }
}

fn write_primitive(out: &mut String, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Line(l) => {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}""#,
                l.x1, l.y1, l.x2, l.y2, escape(&l.stroke)
            )?;
            if let Some(dash) = &l.dash {
                write!(out, r#" stroke-dasharray="{}""#, escape(dash))?;
            }
            out.push_str("/>");
        }
        Primitive::Path(p) => {
            write!(out, r#"<path d="{}" fill="{}""#, p.d, escape(&p.fill))?;
            if let Some(stroke) = &p.stroke {
                write!(out, r#" stroke="{}""#, escape(stroke))?;
            }
            if let Some(width) = p.stroke_width {
                write!(out, r#" stroke-width="{}""#, width)?;
            }
            write_title(out, "path", p.title.as_deref())?;
        }
        Primitive::Circle(c) => {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}""#,
                c.cx, c.cy, c.r, escape(&c.fill)
            )?;
            write_title(out, "circle", c.title.as_deref())?;
        }
        Primitive::Rect(r) => {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}""#,
                r.x, r.y, r.width, r.height, r.rx, escape(&r.fill)
            )?;
            write_title(out, "rect", r.title.as_deref())?;
        }
        Primitive::Text(t) => {
            write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
                t.x,
                t.y,
                t.font_size,
                t.anchor.as_str(),
                escape(&t.fill),
                escape(&t.content)
            )?;
        }
        Primitive::Group(g) => {
            out.push_str("<g");
            if let Some(class) = g.class {
                write!(out, r#" class="{}""#, class)?;
            }
            if let Some(transform) = &g.transform {
                write!(out, r#" transform="{}""#, transform)?;
            }
            out.push('>');
            for child in &g.children {
                write_primitive(out, child)?;
            }
            out.push_str("</g>");
        }
    }
    Ok(())
}

/// Escape text for SVG attribute and element content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
