//! Drop files onto the window to see them resolved into locations.
//!
//! The zone is painted into a display list whose text is logged after every
//! repaint. Pass `--single` to reject drops of more than one file.
//!
//! Run with: cargo run -p horizon-dropzone --example drop_files

use horizon_dropzone::{DropZone, DropZoneAction, DropZoneConfig, UrlListView};
use horizon_dropzone_core::MainQueue;
use horizon_dropzone_render::{Color, DisplayList, Rect, Renderer, Size};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

/// Posted by the main queue's waker when completions are waiting.
#[derive(Debug, Clone, Copy)]
struct QueueReady;

struct App {
    zone: DropZone<UrlListView>,
    window: Option<Window>,
    display_list: DisplayList,
}

impl App {
    fn repaint(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let size = window.inner_size();
        let viewport = Size::from((size.width, size.height));
        self.zone
            .set_bounds(Rect::new(0.0, 0.0, viewport.width, viewport.height));

        self.display_list.begin_frame(Color::WHITE, viewport);
        self.zone.paint(&mut self.display_list);
        let stats = self.display_list.end_frame();

        let texts: Vec<&str> = self.display_list.texts().collect();
        tracing::info!(draw_calls = stats.draw_calls, ?texts, "repainted");
    }
}

impl ApplicationHandler<QueueReady> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("Drop files here")
            .with_inner_size(winit::dpi::LogicalSize::new(480.0, 320.0));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to create window");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, _event: QueueReady) {
        match self.zone.process_pending() {
            Ok(0) => {}
            Ok(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(err) => tracing::error!(error = %err, "failed to drain main queue"),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.zone.store().queue().clear_waker();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.repaint(),
            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            event => {
                if self.zone.handle_window_event(&event) {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,horizon_dropzone=debug")),
        )
        .init();

    let single = std::env::args().any(|arg| arg == "--single");
    let config = DropZoneConfig::default().with_allow_multiple(!single);

    let event_loop = EventLoop::<QueueReady>::with_user_event().build()?;
    let proxy: Mutex<EventLoopProxy<QueueReady>> = Mutex::new(event_loop.create_proxy());

    let queue = MainQueue::new();
    queue.set_waker(move || {
        let _ = proxy.lock().send_event(QueueReady);
    });

    let zone = DropZone::with_global_pool(config.clone(), queue)?
        .with_result_view(UrlListView::new(config.style));
    zone.store().action_dispatched().connect(|action: &DropZoneAction| {
        tracing::info!(action = action.name(), "action dispatched");
    });

    let mut app = App {
        zone,
        window: None,
        display_list: DisplayList::new(),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}
