//! The render session: one owned record per mounted component, created after
//! the backend loads and consumed by teardown.

use crate::dom;
use crate::frame::FrameLoop;
use crate::loader::Backend;
use crate::render::GpuRenderer;
use anyhow::anyhow;
use lines_core::{FrameDriver, SessionConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Session {
    driver: Rc<RefCell<FrameDriver<GpuRenderer>>>,
    canvas: web::HtmlCanvasElement,
    on_resize: Closure<dyn FnMut()>,
    frame_loop: Option<FrameLoop>,
}

impl Session {
    /// Build the quad pipeline on `backend`, size it to `container` and
    /// attach `canvas`. Any prior content of the container is cleared first.
    pub fn init(
        backend: Backend,
        canvas: web::HtmlCanvasElement,
        container: &web::HtmlElement,
        config: &SessionConfig,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        if !container.is_connected() {
            anyhow::bail!("container is no longer attached to the page");
        }

        dom::clear_container(container);
        let viewport = dom::viewport_of(container);
        let renderer = GpuRenderer::new(backend, canvas.clone(), viewport.surface_size());
        let driver = Rc::new(RefCell::new(FrameDriver::new(renderer, config, viewport)));
        container
            .append_child(&canvas)
            .map_err(|e| anyhow!(format!("attach canvas: {:?}", e)))?;

        let driver_resize = driver.clone();
        let container_resize = container.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            driver_resize
                .borrow_mut()
                .resize(dom::viewport_of(&container_resize));
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| anyhow!(format!("resize listener: {:?}", e)))?;

        let size = driver.borrow().size();
        log::info!(
            "[session] initialized at {}x{} (dpr {})",
            size.width,
            size.height,
            viewport.device_pixel_ratio
        );
        Ok(Self {
            driver,
            canvas,
            on_resize,
            frame_loop: None,
        })
    }

    /// Start the refresh-driven draw loop.
    pub fn start(&mut self) {
        if self.frame_loop.is_none() {
            self.frame_loop = Some(FrameLoop::start(self.driver.clone()));
        }
    }

    /// Resolution uniform the next draw will use.
    pub fn resolution(&self) -> [f32; 2] {
        self.driver.borrow().uniforms().resolution
    }

    /// Cancel the pending frame, release the device, remove the resize
    /// listener and detach the canvas.
    pub fn tear_down(self) {
        if let Some(frame_loop) = &self.frame_loop {
            frame_loop.cancel();
        }
        self.driver.borrow_mut().release();
        if let Some(w) = web::window() {
            _ = w.remove_event_listener_with_callback(
                "resize",
                self.on_resize.as_ref().unchecked_ref(),
            );
        }
        self.canvas.remove();
        log::info!(
            "[session] torn down after {} frames",
            self.driver.borrow().frames()
        );
    }
}
