//! Drawing-primitive interface consumed by the renderer.
//!
//! The crate never owns a drawing surface. Everything it renders goes
//! through [`DrawSurface`], implemented by the host (a canvas binding, the
//! SVG writer in [`crate::render::svg`], or [`RecordingSurface`] in tests).

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::style::{FillPattern, Rgba};

/// Per-call style. Unset keys fall back to the surface's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<FillPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowing: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_angle: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hachure_gap: Option<f32>,
}

/// Sink for drawing calls
pub trait DrawSurface {
    fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, style: &DrawStyle);
    /// Circle centred on `(x, y)`; `diameter` follows the rough-sketch convention
    fn circle(&mut self, x: f32, y: f32, diameter: f32, style: &DrawStyle);
    fn polyline(&mut self, points: &[Vec2], style: &DrawStyle);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, style: &DrawStyle);
    fn polygon(&mut self, points: &[Vec2], style: &DrawStyle);
}

/// One recorded drawing call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DrawCall {
    Rectangle { x: f32, y: f32, w: f32, h: f32, style: DrawStyle },
    Circle { x: f32, y: f32, diameter: f32, style: DrawStyle },
    Polyline { points: Vec<Vec2>, style: DrawStyle },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, style: DrawStyle },
    Polygon { points: Vec<Vec2>, style: DrawStyle },
}

impl DrawCall {
    pub fn style(&self) -> &DrawStyle {
        match self {
            DrawCall::Rectangle { style, .. }
            | DrawCall::Circle { style, .. }
            | DrawCall::Polyline { style, .. }
            | DrawCall::Line { style, .. }
            | DrawCall::Polygon { style, .. } => style,
        }
    }

    /// Replay this call onto another surface
    pub fn replay(&self, surface: &mut dyn DrawSurface) {
        match self {
            DrawCall::Rectangle { x, y, w, h, style } => surface.rectangle(*x, *y, *w, *h, style),
            DrawCall::Circle { x, y, diameter, style } => surface.circle(*x, *y, *diameter, style),
            DrawCall::Polyline { points, style } => surface.polyline(points, style),
            DrawCall::Line { x1, y1, x2, y2, style } => surface.line(*x1, *y1, *x2, *y2, style),
            DrawCall::Polygon { points, style } => surface.polygon(points, style),
        }
    }
}

/// Surface that records every call, for tests and deferred replay
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Circle { .. }))
    }

    pub fn polylines(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(|c| matches!(c, DrawCall::Polyline { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32, style: &DrawStyle) {
        self.calls.push(DrawCall::Rectangle { x, y, w, h, style: *style });
    }

    fn circle(&mut self, x: f32, y: f32, diameter: f32, style: &DrawStyle) {
        self.calls.push(DrawCall::Circle { x, y, diameter, style: *style });
    }

    fn polyline(&mut self, points: &[Vec2], style: &DrawStyle) {
        self.calls.push(DrawCall::Polyline { points: points.to_vec(), style: *style });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, style: &DrawStyle) {
        self.calls.push(DrawCall::Line { x1, y1, x2, y2, style: *style });
    }

    fn polygon(&mut self, points: &[Vec2], style: &DrawStyle) {
        self.calls.push(DrawCall::Polygon { points: points.to_vec(), style: *style });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_and_replay() {
        let mut rec = RecordingSurface::new();
        let style = DrawStyle { stroke: Some(Rgba::BLACK), ..Default::default() };
        rec.circle(1.0, 2.0, 3.0, &style);
        rec.polyline(&[Vec2::ZERO, Vec2::ONE], &style);
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.circles().count(), 1);

        let mut copy = RecordingSurface::new();
        for call in &rec.calls {
            call.replay(&mut copy);
        }
        assert_eq!(copy.calls, rec.calls);
    }

    #[test]
    fn test_draw_call_json_shape() {
        let call = DrawCall::Line {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 0.0,
            style: DrawStyle { stroke_width: Some(2.0), ..Default::default() },
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["shape"], "line");
        assert_eq!(json["style"]["stroke_width"], 2.0);
        assert!(json["style"].get("fill").is_none());
    }
}
