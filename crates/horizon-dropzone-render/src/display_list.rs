//! A recording renderer.
//!
//! [`DisplayList`] implements [`Renderer`] by recording every draw call as a
//! [`DrawCommand`] in window coordinates (translations already applied, clip
//! attached). Hosts replay the list into their own backend; tests assert on it.

use crate::paint::{Paint, Stroke, TextStyle};
use crate::renderer::{FrameStats, Renderer};
use crate::types::{Color, Point, Rect, RoundedRect, Size};

/// Average glyph advance relative to the font size, used for measuring.
const GLYPH_ADVANCE: f32 = 0.55;
/// Line height relative to the font size.
const LINE_HEIGHT: f32 = 1.25;

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Frame cleared to a color.
    Clear { color: Color, viewport: Size },
    FillRect { rect: Rect, paint: Paint, clip: Option<Rect> },
    FillRoundedRect { rect: RoundedRect, paint: Paint, clip: Option<Rect> },
    StrokeRect { rect: Rect, stroke: Stroke, clip: Option<Rect> },
    StrokeRoundedRect { rect: RoundedRect, stroke: Stroke, clip: Option<Rect> },
    Line { from: Point, to: Point, stroke: Stroke, clip: Option<Rect> },
    Text { text: String, origin: Point, style: TextStyle, clip: Option<Rect> },
}

#[derive(Debug, Clone, Copy, Default)]
struct RenderState {
    offset: Point,
    clip: Option<Rect>,
}

/// A [`Renderer`] that records draw commands.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    state: RenderState,
    stack: Vec<RenderState>,
    stats: FrameStats,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Iterate over the text of every recorded text command.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns true if any text command draws exactly `text`.
    pub fn contains_text(&self, text: &str) -> bool {
        self.texts().any(|t| t == text)
    }

    /// Remove all recorded commands and reset the state stack.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.state = RenderState::default();
        self.stack.clear();
        self.stats = FrameStats::default();
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.left() + self.state.offset.x,
            rect.top() + self.state.offset.y,
            rect.width(),
            rect.height(),
        )
    }

    fn map_point(&self, point: Point) -> Point {
        point.offset(self.state.offset.x, self.state.offset.y)
    }

    fn record(&mut self, command: DrawCommand) {
        self.stats.draw_calls += 1;
        self.commands.push(command);
    }
}

impl Renderer for DisplayList {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.clear();
        self.commands.push(DrawCommand::Clear {
            color: clear_color,
            viewport: viewport_size,
        });
    }

    fn end_frame(&mut self) -> FrameStats {
        if !self.stack.is_empty() {
            tracing::warn!(
                target: "horizon_dropzone_render::display_list",
                unbalanced = self.stack.len(),
                "frame ended with unbalanced save/restore"
            );
            self.stack.clear();
        }
        self.stats
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.state.offset = self.state.offset.offset(tx, ty);
    }

    fn clip_rect(&mut self, rect: Rect) {
        let rect = self.map_rect(rect);
        self.state.clip = Some(match self.state.clip {
            Some(current) => {
                let left = current.left().max(rect.left());
                let top = current.top().max(rect.top());
                let right = current.right().min(rect.right());
                let bottom = current.bottom().min(rect.bottom());
                Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
            }
            None => rect,
        });
    }

    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>) {
        let command = DrawCommand::FillRect {
            rect: self.map_rect(rect),
            paint: paint.into(),
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>) {
        let command = DrawCommand::FillRoundedRect {
            rect: RoundedRect::new(self.map_rect(rect.rect), rect.radius),
            paint: paint.into(),
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let command = DrawCommand::StrokeRect {
            rect: self.map_rect(rect),
            stroke: stroke.clone(),
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke) {
        let command = DrawCommand::StrokeRoundedRect {
            rect: RoundedRect::new(self.map_rect(rect.rect), rect.radius),
            stroke: stroke.clone(),
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let command = DrawCommand::Line {
            from: self.map_point(from),
            to: self.map_point(to),
            stroke: stroke.clone(),
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        let command = DrawCommand::Text {
            text: text.to_string(),
            origin: self.map_point(origin),
            style: *style,
            clip: self.state.clip,
        };
        self.record(command);
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        let glyphs = text.chars().count() as f32;
        Size::new(glyphs * style.size * GLYPH_ADVANCE, style.size * LINE_HEIGHT)
    }
}
