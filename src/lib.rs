#![cfg(target_arch = "wasm32")]
use lines_core::{Lifecycle, SessionConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
pub mod dom;
mod frame;
pub mod loader;
mod render;
mod session;

use session::Session;

struct Mount {
    lifecycle: Lifecycle,
    session: Option<Session>,
}

thread_local! {
    // Component mounted by `start()`; kept alive for the page's lifetime.
    static AUTO_MOUNT: RefCell<Option<ShaderAnimation>> = const { RefCell::new(None) };
}

/// The shader-lines component. Mounting requests the rendering backend once;
/// the effect starts drawing when it arrives. Dropping the handle unmounts.
#[wasm_bindgen]
pub struct ShaderAnimation {
    inner: Rc<RefCell<Mount>>,
}

#[wasm_bindgen]
impl ShaderAnimation {
    pub fn mount(container: web::HtmlElement) -> ShaderAnimation {
        Self::mount_with_config(container, SessionConfig::default())
    }

    /// Mount with a custom time step per refresh tick.
    #[wasm_bindgen(js_name = mountWith)]
    pub fn mount_with(
        container: web::HtmlElement,
        time_step: f32,
    ) -> Result<ShaderAnimation, JsValue> {
        let config = SessionConfig::default().with_time_step(time_step);
        config
            .validate()
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        Ok(Self::mount_with_config(container, config))
    }

    #[wasm_bindgen(js_name = mountById)]
    pub fn mount_by_id(id: &str) -> Result<ShaderAnimation, JsValue> {
        let document =
            dom::window_document().ok_or_else(|| js_sys::Error::new("no document"))?;
        let container = dom::find_container(&document, id)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        Ok(Self::mount(container))
    }

    /// Tear the component down. Safe to call more than once and at any phase.
    pub fn unmount(&self) {
        let mut mount = self.inner.borrow_mut();
        let previous = mount.lifecycle.tear_down();
        if let Some(session) = mount.session.take() {
            session.tear_down();
        }
        if !previous.is_terminal() {
            log::info!("[mount] unmounted while {}", previous);
        }
    }

    /// Current lifecycle phase, for diagnostics.
    pub fn phase(&self) -> String {
        self.inner.borrow().lifecycle.phase().to_string()
    }

    /// Current resolution uniform; empty until the session exists.
    pub fn resolution(&self) -> Vec<f32> {
        self.inner
            .borrow()
            .session
            .as_ref()
            .map(|s| s.resolution().to_vec())
            .unwrap_or_default()
    }
}

impl ShaderAnimation {
    fn mount_with_config(container: web::HtmlElement, config: SessionConfig) -> Self {
        let inner = Rc::new(RefCell::new(Mount {
            lifecycle: Lifecycle::new(),
            session: None,
        }));
        let begun = inner.borrow_mut().lifecycle.begin_load();
        match begun {
            Ok(()) => {
                log::info!("[mount] loading rendering backend");
                spawn_local(load_and_init(inner.clone(), container, config));
            }
            Err(e) => log::error!("[mount] {}", e),
        }
        Self { inner }
    }
}

impl Drop for ShaderAnimation {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn load_and_init(
    mount: Rc<RefCell<Mount>>,
    container: web::HtmlElement,
    config: SessionConfig,
) {
    let canvas = match dom::window_document()
        .ok_or_else(|| anyhow::anyhow!("no document"))
        .and_then(|d| dom::create_canvas(&d))
    {
        Ok(c) => c,
        Err(e) => {
            log::error!("[mount] {:?}", e);
            _ = mount.borrow_mut().lifecycle.fail_load();
            return;
        }
    };

    let loaded = loader::load(&canvas, config.power_preference).await;

    let mut m = mount.borrow_mut();
    let backend = match loaded {
        Ok(b) => b,
        Err(e) => {
            log::error!("[loader] failed to load rendering backend: {}", e);
            _ = m.lifecycle.fail_load();
            return;
        }
    };
    if let Err(e) = m.lifecycle.finish_load() {
        // unmounted while loading; the backend is dropped unused
        log::info!("[mount] {}", e);
        return;
    }
    match Session::init(backend, canvas, &container, &config) {
        Ok(mut session) => {
            if let Err(e) = m.lifecycle.start_animating() {
                log::error!("[mount] {}", e);
                session.tear_down();
                return;
            }
            session.start();
            m.session = Some(session);
        }
        Err(e) => {
            log::error!("[session] initialization failed: {:?}", e);
            m.lifecycle.tear_down();
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(constants::LOG_LEVEL).ok();
    log::info!("lines-web starting");

    let config = SessionConfig::default();
    let Some(el) =
        dom::window_document().and_then(|d| d.get_element_by_id(&config.container_id))
    else {
        log::info!(
            "no #{} on the page; waiting for an explicit mount",
            config.container_id
        );
        return Ok(());
    };
    let container = el.dyn_into::<web::HtmlElement>()?;
    let animation = ShaderAnimation::mount_with_config(container, config);
    AUTO_MOUNT.with(|slot| *slot.borrow_mut() = Some(animation));
    Ok(())
}
