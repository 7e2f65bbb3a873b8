//! Minimal SVG drawing surface.
//!
//! Draws plain (non-sketchy) shapes: fill patterns, roughness and bowing are
//! recorded as `data-*` attributes only. Good enough for inspecting layouts
//! offline with any browser.

use std::fmt::Write as _;
use std::path::Path;

use crate::core::types::{Result, Vec2};
use crate::render::draw::{DrawStyle, DrawSurface};
use crate::style::Rgba;

/// Accumulates drawing calls as SVG elements
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: f32,
    height: f32,
    background: Option<Rgba>,
    body: String,
    elements: usize,
}

impl SvgSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::new(),
            elements: 0,
        }
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of shapes drawn so far
    pub fn elements(&self) -> usize {
        self.elements
    }

    /// Drop all shapes, keeping the canvas size
    pub fn clear(&mut self) {
        self.body.clear();
        self.elements = 0;
    }

    /// Full SVG document
    pub fn finish(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(bg) = self.background {
            let _ = writeln!(out, r#"<rect width="100%" height="100%" {}/>"#, paint("fill", bg));
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.finish())?;
        Ok(())
    }

    fn push(&mut self, element: &str, geometry: &str, style: &DrawStyle, closed: bool) {
        let _ = writeln!(self.body, "<{} {} {}/>", element, geometry, attributes(style, closed));
        self.elements += 1;
    }
}

/// `name="#rrggbb"` plus an opacity attribute when translucent
fn paint(name: &str, color: Rgba) -> String {
    let hex = Rgba { a: 1.0, ..color };
    if color.a >= 1.0 {
        format!(r#"{}="{}""#, name, hex)
    } else {
        format!(r#"{}="{}" {}-opacity="{}""#, name, hex, name, color.a)
    }
}

fn attributes(style: &DrawStyle, closed: bool) -> String {
    let mut attrs = Vec::new();
    match style.fill {
        Some(fill) if closed => attrs.push(paint("fill", fill)),
        _ => attrs.push(r#"fill="none""#.to_string()),
    }
    attrs.push(paint("stroke", style.stroke.unwrap_or(Rgba::BLACK)));
    attrs.push(format!(r#"stroke-width="{}""#, style.stroke_width.unwrap_or(1.0)));
    if let Some(pattern) = style.fill_style {
        if let Ok(serde_json::Value::String(name)) = serde_json::to_value(pattern) {
            attrs.push(format!(r#"data-fill-style="{}""#, name));
        }
    }
    if let Some(r) = style.roughness {
        attrs.push(format!(r#"data-roughness="{}""#, r));
    }
    attrs.join(" ")
}

fn points_attr(points: &[Vec2]) -> String {
    let coords: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    format!(r#"points="{}""#, coords.join(" "))
}

impl DrawSurface for SvgSurface {
    fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, style: &DrawStyle) {
        let geometry = format!(r#"x="{}" y="{}" width="{}" height="{}""#, x, y, w, h);
        self.push("rect", &geometry, style, true);
    }

    fn circle(&mut self, x: f32, y: f32, diameter: f32, style: &DrawStyle) {
        let geometry = format!(r#"cx="{}" cy="{}" r="{}""#, x, y, diameter / 2.0);
        self.push("circle", &geometry, style, true);
    }

    fn polyline(&mut self, points: &[Vec2], style: &DrawStyle) {
        if points.len() < 2 {
            return;
        }
        self.push("polyline", &points_attr(points), style, false);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, style: &DrawStyle) {
        let geometry = format!(r#"x1="{}" y1="{}" x2="{}" y2="{}""#, x1, y1, x2, y2);
        self.push("line", &geometry, style, false);
    }

    fn polygon(&mut self, points: &[Vec2], style: &DrawStyle) {
        if points.len() < 3 {
            return;
        }
        self.push("polygon", &points_attr(points), style, true);
    }
}
