//! Interactive faceted-gem demo.
//!
//! Controls:
//! - Drag: orbit the camera (unbounded, no flips)
//! - Arrow keys: step rotation
//! - Scroll wheel: zoom
//! - Hover a facet: highlight trail across neighbors
//! - Click a facet: open its pathway overlay (logged to the console)
//! - Click elsewhere: close the overlay
//! - Home: reset the view
//! - Escape: close the overlay, then quit
//!
//! If the GPU cannot be brought up the demo degrades to the vector
//! renderer and writes a static SVG next to the working directory instead
//! of crashing.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use lapidary_geometry::GemParams;
use lapidary_interact::WidgetEvent;
use lapidary_widget::{demo_pathways, Widget};
use lapidary_wgpu::renderer::model_matrix;
use lapidary_wgpu::{picking, Renderer};

/// Pointer travel below this many pixels counts as a click, not a drag.
const CLICK_SLOP: f32 = 4.0;

const FALLBACK_PATH: &str = "lapidary-gem.svg";

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    widget: Widget,
    start: Instant,
    hovered: Option<usize>,
    press_at: Option<(f32, f32)>,
    last_selected: Option<usize>,
}

impl App {
    fn new(widget: Widget) -> Self {
        Self {
            window: None,
            renderer: None,
            widget,
            start: Instant::now(),
            hovered: None,
            press_at: None,
            last_selected: None,
        }
    }

    fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Re-pick the facet under the cursor and emit enter/leave events.
    fn update_hover(&mut self) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        if renderer.camera.is_dragging() {
            return;
        }

        let style = self.widget.frame(self.elapsed());
        let view_proj =
            renderer
                .camera
                .view_projection_matrix(style.eye, style.up, renderer.aspect());
        let (x, y) = renderer.camera.cursor();
        let picked = picking::pick_facet(
            Vec2::new(x, y),
            renderer.viewport(),
            view_proj,
            model_matrix(&style),
            self.widget.mesh(),
        );

        if picked != self.hovered {
            if let Some(left) = self.hovered {
                self.widget.handle(&WidgetEvent::FacetLeft { facet: left });
            }
            if let Some(entered) = picked {
                self.widget
                    .handle(&WidgetEvent::FacetEntered { facet: entered });
            }
            self.hovered = picked;
        }
    }

    /// Log overlay content whenever the selection changes.
    fn log_overlay_change(&mut self) {
        let selected = self.widget.selection().selected();
        if selected == self.last_selected {
            return;
        }
        self.last_selected = selected;
        match self.widget.selected_pathway() {
            Some(pathway) => tracing::info!(
                "{}: {} | {}",
                pathway.title,
                pathway.subtitle,
                pathway.description
            ),
            None => tracing::info!("overlay closed"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Lapidary Gem")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(attrs).unwrap());
        self.window = Some(window.clone());

        match pollster::block_on(Renderer::new(window)) {
            Ok(mut renderer) => {
                renderer.upload_gem(self.widget.mesh());
                self.renderer = Some(renderer);
                self.start = Instant::now();
            }
            Err(e) => {
                // The widget is decorative: degrade, never crash
                tracing::warn!("3D renderer unavailable ({}), using vector fallback", e);
                let svg = lapidary_vector::render_widget(&self.widget, 0.0);
                match std::fs::write(FALLBACK_PATH, svg) {
                    Ok(()) => tracing::info!("wrote {}", FALLBACK_PATH),
                    Err(io) => tracing::error!("fallback write failed: {}", io),
                }
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key {
                KeyCode::Escape => {
                    if self.widget.selection().overlay_open() {
                        self.widget.handle(&WidgetEvent::OverlayDismissed);
                        self.log_overlay_change();
                    } else {
                        event_loop.exit();
                    }
                }
                KeyCode::Home => {
                    self.widget.reset();
                    self.hovered = None;
                    tracing::info!("view reset");
                }
                key => {
                    let Some(renderer) = &mut self.renderer else {
                        return;
                    };
                    if let Some(event) = renderer.camera.on_key(key) {
                        self.widget.handle(&event);
                    }
                }
            },

            WindowEvent::MouseInput { button, state, .. } => {
                let Some(renderer) = &mut self.renderer else {
                    return;
                };
                let Some(event) = renderer.camera.on_mouse_button(button, state) else {
                    return;
                };

                match event {
                    WidgetEvent::DragStarted { x, y } => {
                        self.press_at = Some((x, y));
                    }
                    WidgetEvent::DragEnded => {
                        // A press-release with no real travel is a click
                        let (x, y) = renderer.camera.cursor();
                        if let Some((px, py)) = self.press_at.take() {
                            let travel = Vec2::new(x - px, y - py).length();
                            if travel < CLICK_SLOP {
                                if let Some(facet) = self.hovered {
                                    self.widget.handle(&WidgetEvent::FacetClicked { facet });
                                } else if self.widget.selection().overlay_open() {
                                    self.widget.handle(&WidgetEvent::OverlayDismissed);
                                }
                            }
                        }
                    }
                    _ => {}
                }

                self.widget.handle(&event);
                self.log_overlay_change();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let drag = {
                    let Some(renderer) = &mut self.renderer else {
                        return;
                    };
                    renderer.camera.on_cursor_moved(position.x, position.y)
                };
                match drag {
                    Some(event) => self.widget.handle(&event),
                    None => self.update_hover(),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let Some(renderer) = &mut self.renderer else {
                    return;
                };
                let event = renderer.camera.on_scroll(delta);
                self.widget.handle(&event);
            }

            WindowEvent::RedrawRequested => {
                let style = self.widget.frame(self.elapsed());
                if let Some(renderer) = &mut self.renderer {
                    match renderer.render(&style) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = renderer.size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("out of GPU memory");
                            event_loop.exit();
                        }
                        Err(e) => {
                            tracing::warn!("render error: {:?}", e);
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let widget = match Widget::new(demo_pathways(), GemParams::default()) {
        Ok(widget) => widget,
        Err(e) => {
            tracing::error!("widget assembly failed: {}", e);
            return;
        }
    };

    tracing::info!("Lapidary gem demo");
    tracing::info!("Controls:");
    tracing::info!("  Drag          - Orbit (unbounded)");
    tracing::info!("  Arrow keys    - Step rotation");
    tracing::info!("  Scroll        - Zoom");
    tracing::info!("  Hover / click - Highlight / open pathway");
    tracing::info!("  Home          - Reset view");
    tracing::info!("  Escape        - Close overlay, then quit");

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(widget);
    event_loop.run_app(&mut app).unwrap();
}
