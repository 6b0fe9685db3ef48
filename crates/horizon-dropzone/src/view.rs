//! The drop-zone view.
//!
//! [`DropZone`] binds a [`Store`] to window input and paints the zone: a
//! dashed box with the hint text, or a caller-supplied [`ResultView`], with
//! the alert dialog on top while one is present.

use std::path::PathBuf;
use std::sync::Arc;

use horizon_dropzone_core::logging::targets;
use horizon_dropzone_core::{MainQueue, PerfSpan, ThreadPool};
use horizon_dropzone_render::{
    Color, DashPattern, Point, Rect, Renderer, RoundedRect, Size, Stroke, TextStyle,
};
use url::Url;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::action::DropZoneAction;
use crate::config::{DropZoneConfig, DropZoneStyle};
use crate::drop_target::{DropTargetEvent, FileDropHandler};
use crate::error::DropZoneResult;
use crate::provider::{PathItemProvider, SharedItemProvider};
use crate::state::{AlertState, DropZoneState};
use crate::store::Store;

const ACCENT: Color = Color::from_rgb(0.0, 0.47, 0.84);
const ERROR: Color = Color::from_rgb(0.77, 0.16, 0.16);
const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.4);

const ALERT_MARGIN: f32 = 16.0;
const ALERT_MAX_WIDTH: f32 = 320.0;
const ALERT_HEIGHT: f32 = 132.0;
const ALERT_PADDING: f32 = 16.0;
const ALERT_LINE: f32 = 24.0;
const BUTTON_SIZE: Size = Size::new(72.0, 28.0);

/// Paints the zone once the caller takes over from the default hint box.
pub trait ResultView {
    /// Paint into `bounds` for the given state.
    fn paint<R: Renderer>(&mut self, renderer: &mut R, bounds: Rect, state: &DropZoneState);
}

/// Placeholder for a zone with no result view; the hint box is painted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResultView;

impl ResultView for NoResultView {
    fn paint<R: Renderer>(&mut self, _renderer: &mut R, _bounds: Rect, _state: &DropZoneState) {}
}

/// A drop target widget.
#[derive(Debug)]
pub struct DropZone<V: ResultView = NoResultView> {
    store: Store,
    style: DropZoneStyle,
    bounds: Rect,
    result_view: Option<V>,
    drop_handler: FileDropHandler,
    cursor: Option<Point>,
}

impl DropZone<NoResultView> {
    /// Create a zone from `config`, running fetches on `pool` and delivering
    /// their results through `queue`.
    pub fn new(
        config: DropZoneConfig,
        pool: Arc<ThreadPool>,
        queue: MainQueue,
    ) -> DropZoneResult<Self> {
        config.validate()?;
        let store = Store::new(DropZoneState::from_config(&config), pool, queue);
        Ok(Self {
            store,
            style: config.style,
            bounds: Rect::ZERO,
            result_view: None,
            drop_handler: FileDropHandler::new(),
            cursor: None,
        })
    }

    /// Create a zone using the global worker pool.
    pub fn with_global_pool(config: DropZoneConfig, queue: MainQueue) -> DropZoneResult<Self> {
        Self::new(config, ThreadPool::global(), queue)
    }
}

impl<V: ResultView> DropZone<V> {
    /// Replace the hint box with `view`.
    pub fn with_result_view<W: ResultView>(self, view: W) -> DropZone<W> {
        DropZone {
            store: self.store,
            style: self.style,
            bounds: self.bounds,
            result_view: Some(view),
            drop_handler: self.drop_handler,
            cursor: self.cursor,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// A snapshot of the zone's state.
    pub fn state(&self) -> DropZoneState {
        self.store.state()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Run completions waiting on the store's queue. Call from the queue's
    /// owning thread.
    pub fn process_pending(&self) -> DropZoneResult<usize> {
        Ok(self.store.queue().process_pending()?)
    }

    // =========================================================================
    // Drop handling
    // =========================================================================

    /// Offer dropped items to the zone.
    ///
    /// Returns `false` if the drop is rejected: no items, or several items
    /// while multiple files are disallowed (which raises the alert).
    pub fn on_drop(&mut self, providers: Vec<SharedItemProvider>) -> bool {
        if providers.is_empty() {
            tracing::debug!(target: targets::VIEW, "ignoring empty drop");
            return false;
        }

        let allow_multiple = self.store.with_state(|state| state.allow_multiple);
        if providers.len() > 1 && !allow_multiple {
            tracing::debug!(
                target: targets::VIEW,
                count = providers.len(),
                "rejecting multi-item drop"
            );
            self.store.send(DropZoneAction::MultipleFilesNotAllowed);
            return false;
        }

        tracing::debug!(target: targets::VIEW, count = providers.len(), "accepting drop");
        self.store.send(DropZoneAction::FileDropped(providers));
        true
    }

    /// Offer dropped files to the zone. See [`on_drop`](Self::on_drop).
    pub fn on_drop_paths(&mut self, paths: Vec<PathBuf>) -> bool {
        self.on_drop(PathItemProvider::from_paths(paths))
    }

    /// Mark the zone as hovered by a drag, or not.
    pub fn set_targeted(&self, targeted: bool) {
        self.store.send(DropZoneAction::Targeted(targeted));
    }

    /// Close the alert if one is shown.
    pub fn dismiss_alert(&self) {
        if self.store.with_state(|state| state.alert.is_some()) {
            self.store.send(DropZoneAction::AlertDismissed);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a window event to the zone.
    ///
    /// The zone covers the whole window for file drags. Returns true if the
    /// event was consumed and the zone should be repainted.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.store.queue().affinity().debug_assert_same_thread();
        if let Some(drop_event) = self.drop_handler.handle_window_event(event) {
            match drop_event {
                DropTargetEvent::Entered => self.set_targeted(true),
                DropTargetEvent::Left => self.set_targeted(false),
                DropTargetEvent::Dropped(paths) => {
                    self.set_targeted(false);
                    self.on_drop_paths(paths);
                }
            }
            return true;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_pointer_move(Point::from((position.x, position.y)))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.has_alert()
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => match self.cursor {
                Some(position) => self.handle_pointer_press(position),
                None => false,
            },
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.handle_key(&event.logical_key)
            }
            _ => false,
        }
    }

    /// Track the pointer. Returns true if the alert needs repainting.
    pub fn handle_pointer_move(&mut self, position: Point) -> bool {
        let previous = self.cursor.replace(position);
        if !self.has_alert() {
            return false;
        }
        let button = alert_layout(self.bounds).button;
        previous.is_none_or(|p| button.contains(p) != button.contains(position))
    }

    /// Handle a left click. While an alert is shown the zone swallows clicks;
    /// a click on its button dismisses it.
    pub fn handle_pointer_press(&mut self, position: Point) -> bool {
        if !self.has_alert() {
            return false;
        }
        if alert_layout(self.bounds).button.contains(position) {
            self.dismiss_alert();
        }
        true
    }

    /// Handle a key press. Escape and Enter dismiss the alert.
    pub fn handle_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Named(NamedKey::Escape | NamedKey::Enter) if self.has_alert() => {
                self.dismiss_alert();
                true
            }
            _ => false,
        }
    }

    fn has_alert(&self) -> bool {
        self.store.with_state(|state| state.alert.is_some())
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the zone into its bounds.
    pub fn paint<R: Renderer>(&mut self, renderer: &mut R) {
        let _span = PerfSpan::new("drop_zone_paint");
        self.store.queue().affinity().debug_assert_same_thread();
        let state = self.store.state();

        renderer.save();
        renderer.clip_rect(self.bounds);
        match self.result_view.as_mut() {
            Some(view) => view.paint(renderer, self.bounds, &state),
            None => paint_drop_target(renderer, self.bounds, &state, &self.style),
        }
        if let Some(alert) = &state.alert {
            let hovered = self
                .cursor
                .is_some_and(|p| alert_layout(self.bounds).button.contains(p));
            paint_alert(renderer, self.bounds, alert, &self.style, hovered);
        }
        renderer.restore();
    }
}

/// Paint the dashed hint box.
///
/// Exposed so custom result views can fall back to it.
pub fn paint_drop_target<R: Renderer>(
    renderer: &mut R,
    bounds: Rect,
    state: &DropZoneState,
    style: &DropZoneStyle,
) {
    let frame = RoundedRect::new(bounds.deflate(style.padding), style.corner_radius);
    let border_color = if state.targeted { ACCENT } else { Color::GRAY };
    if state.targeted {
        renderer.fill_rounded_rect(frame, ACCENT.with_alpha(0.08));
    }

    let border = Stroke::new(border_color, style.border_width)
        .with_dash(DashPattern::simple(style.dash_length, style.gap_length));
    renderer.stroke_rounded_rect(frame, &border);

    let text = TextStyle::new(Color::DARK_GRAY).with_size(style.font_size);
    renderer.draw_text_centered(&state.hint, frame.rect, &text);
}

struct AlertLayout {
    panel: Rect,
    title: Point,
    message: Point,
    button: Rect,
}

fn alert_layout(bounds: Rect) -> AlertLayout {
    let width = (bounds.width() - 2.0 * ALERT_MARGIN).clamp(0.0, ALERT_MAX_WIDTH);
    let panel = Rect::from_center(bounds.center(), Size::new(width, ALERT_HEIGHT));
    let inner = panel.deflate(ALERT_PADDING);
    AlertLayout {
        panel,
        title: inner.origin,
        message: inner.origin.offset(0.0, ALERT_LINE + 4.0),
        button: Rect::new(
            inner.right() - BUTTON_SIZE.width,
            inner.bottom() - BUTTON_SIZE.height,
            BUTTON_SIZE.width,
            BUTTON_SIZE.height,
        ),
    }
}

fn paint_alert<R: Renderer>(
    renderer: &mut R,
    bounds: Rect,
    alert: &AlertState,
    style: &DropZoneStyle,
    button_hovered: bool,
) {
    let layout = alert_layout(bounds);
    renderer.fill_rect(bounds, OVERLAY);
    renderer.fill_rounded_rect(RoundedRect::new(layout.panel, 6.0), Color::WHITE);

    let title = TextStyle::new(Color::BLACK).with_size(style.font_size + 2.0).bold();
    renderer.draw_text(&alert.title, layout.title, &title);
    let message = TextStyle::new(Color::DARK_GRAY).with_size(style.font_size);
    renderer.draw_text(&alert.message, layout.message, &message);

    let rule_y = layout.button.top() - ALERT_PADDING / 2.0;
    renderer.draw_line(
        Point::new(layout.panel.left(), rule_y),
        Point::new(layout.panel.right(), rule_y),
        &Stroke::new(Color::LIGHT_GRAY, 1.0),
    );

    let button = RoundedRect::new(layout.button, 4.0);
    let fill = if button_hovered { ACCENT.with_alpha(0.85) } else { ACCENT };
    renderer.fill_rounded_rect(button, fill);
    let label = TextStyle::new(Color::WHITE).with_size(style.font_size);
    renderer.draw_text_centered(&alert.button.label, layout.button, &label);
}

/// Result view listing the dropped files by name.
///
/// Shows the hint box until the first fetch completes, and the error
/// description when it fails.
#[derive(Debug, Clone, Default)]
pub struct UrlListView {
    style: DropZoneStyle,
}

impl UrlListView {
    pub fn new(style: DropZoneStyle) -> Self {
        Self { style }
    }

    fn line_height(&self) -> f32 {
        (self.style.font_size * 1.6).round()
    }
}

impl ResultView for UrlListView {
    fn paint<R: Renderer>(&mut self, renderer: &mut R, bounds: Rect, state: &DropZoneState) {
        let urls = match &state.result {
            None => return paint_drop_target(renderer, bounds, state, &self.style),
            Some(Ok(urls)) => urls,
            Some(Err(err)) => {
                let text = TextStyle::new(ERROR).with_size(self.style.font_size);
                renderer.draw_text_centered(err.description(), bounds, &text);
                return;
            }
        };

        let text = TextStyle::new(Color::BLACK).with_size(self.style.font_size);
        if urls.is_empty() {
            renderer.draw_text_centered("No files found.", bounds, &text);
            return;
        }

        let content = bounds.deflate(self.style.padding);
        let line_height = self.line_height();
        let mut y = content.top();
        for (index, url) in urls.iter().enumerate() {
            let remaining = urls.len() - index;
            let is_last_line = y + 2.0 * line_height > content.bottom();
            if is_last_line && remaining > 1 {
                let more = TextStyle::new(Color::GRAY).with_size(self.style.font_size);
                let origin = Point::new(content.left(), y);
                renderer.draw_text(&format!("+{remaining} more"), origin, &more);
                break;
            }
            renderer.draw_text(&display_name(url), Point::new(content.left(), y), &text);
            y += line_height;
        }
    }
}

/// A short name for a location: the file name of `file://` URLs, the full
/// URL otherwise.
pub fn display_name(url: &Url) -> String {
    url.to_file_path()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use horizon_dropzone_core::ThreadPoolConfig;
    use horizon_dropzone_render::{DisplayList, DrawCommand};

    use super::*;
    use crate::error::FetchError;
    use crate::provider::DataItemProvider;

    fn zone(config: DropZoneConfig) -> DropZone {
        let pool = Arc::new(ThreadPool::new(ThreadPoolConfig::with_threads(1)).unwrap());
        let mut zone = DropZone::new(config, pool, MainQueue::new()).unwrap();
        zone.set_bounds(Rect::new(0.0, 0.0, 400.0, 300.0));
        zone
    }

    fn providers(count: usize) -> Vec<SharedItemProvider> {
        (0..count)
            .map(|i| {
                let url = Url::parse(&format!("file:///tmp/{i}.txt")).unwrap();
                Arc::new(DataItemProvider::from_url(&url)) as SharedItemProvider
            })
            .collect()
    }

    fn record_actions(zone: &DropZone) -> Arc<parking_lot::Mutex<Vec<&'static str>>> {
        let log = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = log.clone();
        zone.store()
            .action_dispatched()
            .connect(move |action: &DropZoneAction| sink.lock().push(action.name()));
        log
    }

    #[test]
    fn test_multi_drop_rejected_when_disallowed() {
        let mut zone = zone(DropZoneConfig::default().with_allow_multiple(false));
        let actions = record_actions(&zone);

        assert!(!zone.on_drop(providers(3)));
        assert_eq!(*actions.lock(), vec!["multiple_files_not_allowed"]);
        assert!(zone.state().alert.is_some());

        assert!(zone.on_drop(providers(1)));
        assert_eq!(*actions.lock(), vec!["multiple_files_not_allowed", "file_dropped"]);
    }

    #[test]
    fn test_multi_drop_accepted_by_default() {
        let mut zone = zone(DropZoneConfig::default());
        assert!(zone.on_drop(providers(3)));
        assert!(zone.state().alert.is_none());
    }

    #[test]
    fn test_empty_drop_is_rejected_silently() {
        let mut zone = zone(DropZoneConfig::default());
        let actions = record_actions(&zone);
        assert!(!zone.on_drop(Vec::new()));
        assert!(actions.lock().is_empty());
    }

    #[test]
    fn test_hover_events_toggle_targeted() {
        let mut zone = zone(DropZoneConfig::default());
        assert!(zone.handle_window_event(&WindowEvent::HoveredFile("/tmp/a.txt".into())));
        assert!(zone.state().targeted);
        assert!(zone.handle_window_event(&WindowEvent::HoveredFileCancelled));
        assert!(!zone.state().targeted);
    }

    #[test]
    fn test_window_drop_dispatches_once_for_all_files() {
        let mut zone = zone(DropZoneConfig::default().with_allow_multiple(false));
        let actions = record_actions(&zone);

        zone.handle_window_event(&WindowEvent::HoveredFile("/tmp/a.txt".into()));
        zone.handle_window_event(&WindowEvent::HoveredFile("/tmp/b.txt".into()));
        zone.handle_window_event(&WindowEvent::DroppedFile("/tmp/a.txt".into()));
        zone.handle_window_event(&WindowEvent::DroppedFile("/tmp/b.txt".into()));

        assert_eq!(
            *actions.lock(),
            vec!["targeted", "targeted", "multiple_files_not_allowed"]
        );
        let state = zone.state();
        assert!(!state.targeted);
        assert!(state.alert.is_some());
    }

    #[test]
    fn test_alert_dismissed_by_key_and_button() {
        let mut zone = zone(DropZoneConfig::default().with_allow_multiple(false));
        assert!(!zone.handle_key(&Key::Named(NamedKey::Escape)));

        zone.on_drop(providers(2));
        assert!(zone.handle_key(&Key::Named(NamedKey::Enter)));
        assert!(zone.state().alert.is_none());

        zone.on_drop(providers(2));
        // Clicking outside the button keeps the alert up.
        assert!(zone.handle_pointer_press(Point::new(1.0, 1.0)));
        assert!(zone.state().alert.is_some());

        let button = alert_layout(zone.bounds()).button;
        assert!(zone.handle_pointer_press(button.center()));
        assert!(zone.state().alert.is_none());
    }

    #[test]
    fn test_pointer_move_repaints_only_on_button_crossing() {
        let mut zone = zone(DropZoneConfig::default().with_allow_multiple(false));
        assert!(!zone.handle_pointer_move(Point::new(5.0, 5.0)));

        zone.on_drop(providers(2));
        let button = alert_layout(zone.bounds()).button;
        assert!(zone.handle_pointer_move(button.center()));
        assert!(!zone.handle_pointer_move(button.center().offset(1.0, 0.0)));
        assert!(zone.handle_pointer_move(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_paint_hint_box() {
        let mut zone = zone(DropZoneConfig::default());
        let mut list = DisplayList::new();
        zone.paint(&mut list);

        assert!(list.contains_text("Drop files here."));
        assert!(list.commands().iter().any(|cmd| matches!(
            cmd,
            DrawCommand::StrokeRoundedRect { stroke, .. } if stroke.is_dashed()
        )));
    }

    #[test]
    fn test_paint_targeted_uses_accent_border() {
        let mut zone = zone(DropZoneConfig::default());
        zone.set_targeted(true);
        let mut list = DisplayList::new();
        zone.paint(&mut list);

        let border = list.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::StrokeRoundedRect { stroke, .. } => Some(stroke.paint.color()),
            _ => None,
        });
        assert_eq!(border, Some(ACCENT));
    }

    #[test]
    fn test_paint_alert_over_content() {
        let mut zone = zone(DropZoneConfig::default().with_allow_multiple(false));
        zone.on_drop(providers(2));
        let mut list = DisplayList::new();
        zone.paint(&mut list);

        assert!(list.contains_text("Error"));
        assert!(list.contains_text("Multiple files not allowed."));
        assert!(list.contains_text("OK"));
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts.first(), Some(&"Drop files here."));

        let panel = alert_layout(zone.bounds()).panel;
        assert!(list.commands().iter().any(|cmd| matches!(
            cmd,
            DrawCommand::Line { from, to, .. } if from.x == panel.left() && to.x == panel.right()
        )));
    }

    #[test]
    fn test_result_view_replaces_hint() {
        let mut zone = zone(DropZoneConfig::default()).with_result_view(UrlListView::default());
        zone.store().send(DropZoneAction::FileUrlsLoaded(Ok(vec![
            Url::parse("file:///home/user/a%20b.txt").unwrap(),
            Url::parse("https://example.com/x").unwrap(),
        ])));

        let mut list = DisplayList::new();
        zone.paint(&mut list);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["a b.txt", "https://example.com/x"]);
    }

    #[test]
    fn test_url_list_shows_failure() {
        let mut view = UrlListView::default();
        let mut state = DropZoneState::default();
        state.result = Some(Err(FetchError::new("item vanished")));

        let mut list = DisplayList::new();
        view.paint(&mut list, Rect::new(0.0, 0.0, 200.0, 100.0), &state);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["item vanished"]);
    }

    #[test]
    fn test_url_list_truncates_overflow() {
        let mut view = UrlListView::default();
        let mut state = DropZoneState::default();
        let urls = (0..20)
            .map(|i| Url::parse(&format!("file:///tmp/{i}.txt")).unwrap())
            .collect();
        state.result = Some(Ok(urls));

        let mut list = DisplayList::new();
        view.paint(&mut list, Rect::new(0.0, 0.0, 200.0, 100.0), &state);
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.len() < 20);
        assert!(texts.last().is_some_and(|t| t.ends_with("more")));
    }
}
