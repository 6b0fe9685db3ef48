//! Core renderer trait defining the 2D drawing interface.
//!
//! Widgets paint through [`Renderer`]; a host forwards the calls to whatever
//! backend it draws with. [`DisplayList`](crate::DisplayList) is a recording
//! implementation for hosts that replay commands later, and for tests.
//!
//! # Frame Lifecycle
//!
//! ```
//! use horizon_dropzone_render::{Color, DisplayList, Rect, Renderer, Size};
//!
//! let mut renderer = DisplayList::new();
//! renderer.begin_frame(Color::WHITE, Size::new(320.0, 200.0));
//!
//! renderer.save();
//! renderer.translate(10.0, 10.0);
//! renderer.fill_rect(Rect::new(0.0, 0.0, 50.0, 20.0), Color::GRAY);
//! renderer.restore();
//!
//! let stats = renderer.end_frame();
//! assert_eq!(stats.draw_calls, 1);
//! ```

use crate::paint::{Paint, Stroke, TextStyle};
use crate::types::{Color, Point, Rect, RoundedRect, Size};

/// Statistics from a frame render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw calls submitted.
    pub draw_calls: u32,
}

/// The core 2D rendering trait.
///
/// The renderer keeps a state stack holding the current translation and clip,
/// saved and restored with [`save`](Renderer::save) / [`restore`](Renderer::restore).
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame.
    fn end_frame(&mut self) -> FrameStats;

    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the current render state (translation and clip).
    fn save(&mut self);

    /// Restore the previously saved render state.
    fn restore(&mut self);

    /// Apply a translation to the current transform.
    fn translate(&mut self, tx: f32, ty: f32);

    /// Intersect the clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect);

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with the specified paint.
    fn fill_rect(&mut self, rect: Rect, paint: impl Into<Paint>);

    /// Fill a rounded rectangle with the specified paint.
    fn fill_rounded_rect(&mut self, rect: RoundedRect, paint: impl Into<Paint>);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Stroke the outline of a rounded rectangle.
    fn stroke_rounded_rect(&mut self, rect: RoundedRect, stroke: &Stroke);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke);

    /// Draw a single line of text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Measure a single line of text.
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size;

    // =========================================================================
    // Provided helpers
    // =========================================================================

    /// Draw text centered inside `rect`.
    fn draw_text_centered(&mut self, text: &str, rect: Rect, style: &TextStyle) {
        let size = self.measure_text(text, style);
        let origin = Point::new(
            rect.center().x - size.width / 2.0,
            rect.center().y - size.height / 2.0,
        );
        self.draw_text(text, origin, style);
    }
}
