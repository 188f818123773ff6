use crate::render::GpuRenderer;
use lines_core::FrameDriver;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` chain with exactly one pending request.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(slot: &TickSlot) -> Option<i32> {
    let window = web::window()?;
    let slot = slot.borrow();
    let cb = slot.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .map_err(|e| log::error!("[frame] requestAnimationFrame failed: {:?}", e))
        .ok()
}

impl FrameLoop {
    pub fn start(driver: Rc<RefCell<FrameDriver<GpuRenderer>>>) -> Self {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_next = tick.clone();
        let pending_next = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_next.set(None);
            if driver.borrow().is_released() {
                return;
            }
            // schedule next, then draw this one
            pending_next.set(request_frame(&tick_next));
            driver.borrow_mut().tick();
        }) as Box<dyn FnMut()>));

        pending.set(request_frame(&tick));
        Self { tick, pending }
    }

    /// Cancel the pending request and drop the tick closure.
    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure <-> slot cycle
        self.tick.borrow_mut().take();
    }
}
