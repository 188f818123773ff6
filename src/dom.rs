use anyhow::anyhow;
use lines_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up the container element the component mounts into.
pub fn find_container(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!(format!("#{} is not an HtmlElement: {:?}", id, e)))
}

/// Container bounding box together with the current device pixel ratio.
pub fn viewport_of(container: &web::HtmlElement) -> Viewport {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = container.get_bounding_client_rect();
    Viewport::new(rect.width(), rect.height(), dpr)
}

/// Create a detached canvas that fills its parent once attached.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!(format!("create canvas: {:?}", e)))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!(format!("{:?}", e)))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    Ok(canvas)
}

#[inline]
pub fn clear_container(container: &web::HtmlElement) {
    container.set_inner_html("");
}
