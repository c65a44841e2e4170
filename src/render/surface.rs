use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

/// Minimal drawing seam so the same render code targets a live egui painter,
/// a software framebuffer, or a headless recording in tests.
pub trait Surface {
    fn clear(&mut self, color: Color32);
    fn draw_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
    fn draw_text(&mut self, position: Pos2, anchor: Align2, text: &str, size: f32, color: Color32);
}

/// Surface over an egui [`Painter`]. Positions are canvas-local and get
/// translated into the painter's clip rect.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn project(&self, position: Pos2) -> Pos2 {
        self.rect.min + position.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter.line_segment(
            [self.project(from), self.project(to)],
            Stroke::new(width, color),
        );
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(self.project(center), radius, color);
    }

    fn draw_text(&mut self, position: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.project(position),
            anchor,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    Circle {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Text {
        position: Pos2,
        anchor: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Headless surface that records every call, for asserting on render output
/// without a window.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color32) {
        self.ops.push(DrawOp::Clear { color });
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, position: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.ops.push(DrawOp::Text {
            position,
            anchor,
            text: text.to_string(),
            size,
            color,
        });
    }
}
