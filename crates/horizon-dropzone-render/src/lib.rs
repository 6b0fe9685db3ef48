//! Painting primitives for Horizon Dropzone.
//!
//! Widgets describe what they draw through the [`Renderer`] trait using the
//! geometry, color and stroke types in this crate. A host application
//! implements [`Renderer`] on top of its graphics backend, or replays a
//! recorded [`DisplayList`].
//!
//! ```
//! use horizon_dropzone_render::{
//!     Color, DashPattern, DisplayList, Rect, Renderer, RoundedRect, Size, Stroke, TextStyle,
//! };
//!
//! let mut list = DisplayList::new();
//! list.begin_frame(Color::WHITE, Size::new(240.0, 120.0));
//!
//! let bounds = Rect::new(0.0, 0.0, 240.0, 120.0).deflate(8.0);
//! let border = Stroke::new(Color::GRAY, 2.0).with_dash(DashPattern::simple(6.0, 4.0));
//! list.stroke_rounded_rect(RoundedRect::new(bounds, 8.0), &border);
//! list.draw_text_centered("Drop files here.", bounds, &TextStyle::default());
//!
//! assert_eq!(list.end_frame().draw_calls, 2);
//! ```

mod display_list;
mod paint;
mod renderer;
mod types;

pub use display_list::{DisplayList, DrawCommand};
pub use paint::{DashPattern, Paint, Stroke, TextStyle};
pub use renderer::{FrameStats, Renderer};
pub use types::{Color, Point, Rect, RoundedRect, Size};
