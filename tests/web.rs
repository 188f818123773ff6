#![cfg(target_arch = "wasm32")]

use lines_core::PowerPreference;
use lines_web::{dom, loader, ShaderAnimation};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn sized_div(id: &str, w: u32, h: u32) -> web::HtmlElement {
    let document = dom::window_document().unwrap();
    let el = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web::HtmlElement>()
        .unwrap();
    el.set_id(id);
    el.set_attribute("style", &format!("width:{}px;height:{}px", w, h))
        .unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

async fn yield_to_event_loop() {
    for _ in 0..10 {
        JsFuture::from(js_sys::Promise::resolve(&wasm_bindgen::JsValue::NULL))
            .await
            .unwrap();
    }
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Wait until the backend load has resolved one way or the other.
async fn settled_phase(animation: &ShaderAnimation) -> String {
    for _ in 0..100 {
        let phase = animation.phase();
        if phase != "loading" {
            return phase;
        }
        sleep_ms(50).await;
    }
    animation.phase()
}

fn webgl2_available() -> bool {
    let document = dom::window_document().unwrap();
    let canvas = dom::create_canvas(&document).unwrap();
    matches!(canvas.get_context("webgl2"), Ok(Some(_)))
}

fn fire_resize() {
    let window = web::window().unwrap();
    window
        .dispatch_event(&web::Event::new("resize").unwrap())
        .unwrap();
}

#[wasm_bindgen_test]
fn viewport_reports_container_box() {
    let el = sized_div("vp-box", 200, 100);
    let vp = dom::viewport_of(&el);
    assert_eq!(vp.css_width, 200.0);
    assert_eq!(vp.css_height, 100.0);
    assert!(vp.device_pixel_ratio > 0.0);
    el.remove();
}

#[wasm_bindgen_test]
fn canvas_starts_detached() {
    let document = dom::window_document().unwrap();
    let canvas = dom::create_canvas(&document).unwrap();
    assert!(canvas.parent_node().is_none());
}

#[wasm_bindgen_test]
fn clear_container_removes_children() {
    let el = sized_div("clear-box", 10, 10);
    el.set_inner_html("<span>a</span><span>b</span>");
    assert_eq!(el.child_element_count(), 2);
    dom::clear_container(&el);
    assert_eq!(el.child_element_count(), 0);
    el.remove();
}

#[wasm_bindgen_test]
fn mount_by_missing_id_is_an_error() {
    assert!(ShaderAnimation::mount_by_id("does-not-exist").is_err());
}

#[wasm_bindgen_test]
fn mount_with_rejects_bad_time_step() {
    let el = sized_div("bad-step", 10, 10);
    assert!(ShaderAnimation::mount_with(el.clone(), 0.0).is_err());
    el.remove();
}

#[wasm_bindgen_test]
async fn unmount_before_load_leaves_container_empty() {
    let el = sized_div("early-unmount", 64, 64);
    let animation = ShaderAnimation::mount(el.clone());
    assert_eq!(animation.phase(), "loading");
    animation.unmount();
    assert_eq!(animation.phase(), "torn-down");
    yield_to_event_loop().await;
    assert_eq!(animation.phase(), "torn-down");
    assert_eq!(el.child_element_count(), 0);
    el.remove();
}

#[wasm_bindgen_test]
async fn loader_reaches_a_backend_whenever_webgl2_exists() {
    if !webgl2_available() {
        return;
    }
    let document = dom::window_document().unwrap();
    let canvas = dom::create_canvas(&document).unwrap();
    if let Err(e) = loader::load(&canvas, PowerPreference::default()).await {
        panic!("no backend although WebGL2 is available: {}", e);
    }
}

#[wasm_bindgen_test]
async fn session_follows_resize_and_unmounts_cleanly() {
    let el = sized_div("session-box", 120, 80);
    let animation = ShaderAnimation::mount(el.clone());
    let phase = settled_phase(&animation).await;
    if phase == "load-failed" {
        // no GPU in this browser: nothing may be attached
        assert_eq!(el.child_element_count(), 0);
        assert!(animation.resolution().is_empty());
        el.remove();
        return;
    }
    assert_eq!(phase, "animating");

    let dpr = web::window().unwrap().device_pixel_ratio();
    let expected = |w: f64, h: f64| vec![(w * dpr).floor() as f32, (h * dpr).floor() as f32];

    assert_eq!(el.child_element_count(), 1);
    let canvas = el
        .first_element_child()
        .unwrap()
        .dyn_into::<web::HtmlCanvasElement>()
        .unwrap();
    assert_eq!(animation.resolution(), expected(120.0, 80.0));
    assert_eq!(canvas.width() as f32, animation.resolution()[0]);

    el.set_attribute("style", "width:200px;height:50px").unwrap();
    fire_resize();
    assert_eq!(animation.resolution(), expected(200.0, 50.0));
    assert_eq!(canvas.height() as f32, animation.resolution()[1]);

    animation.unmount();
    assert_eq!(animation.phase(), "torn-down");
    assert_eq!(el.child_element_count(), 0);
    assert!(animation.resolution().is_empty());

    // the listener is gone; a later resize must not touch the released session
    fire_resize();
    sleep_ms(50).await;
    assert_eq!(el.child_element_count(), 0);
    el.remove();
}
