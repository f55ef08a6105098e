//! Browser helpers

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, Response};

use crate::assets::{SpriteImage, decode_sprite};
use crate::error::{GameError, Result};
use crate::sim::Viewport;

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| GameError::CanvasMissing("no window".into()))
}

/// Window inner size in CSS pixels
pub fn window_viewport() -> Result<Viewport> {
    let window = window()?;
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Ok(Viewport::new(width as f32, height as f32))
}

/// Look up the game canvas by element id
pub fn canvas(id: &str) -> Result<HtmlCanvasElement> {
    window()?
        .document()
        .and_then(|doc| doc.get_element_by_id(id))
        .ok_or_else(|| GameError::CanvasMissing(format!("no element #{}", id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| GameError::CanvasMissing(format!("#{} is not a canvas", id)))
}

/// Match the canvas backing store to the viewport
pub fn size_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
    canvas.set_width(viewport.width.max(1.0) as u32);
    canvas.set_height(viewport.height.max(1.0) as u32);
}

/// GET `url` and return the body bytes
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let load_err = |reason: String| GameError::AssetLoad {
        path: url.to_string(),
        reason,
    };

    let response = JsFuture::from(window()?.fetch_with_str(url))
        .await
        .map_err(|e| load_err(format!("{:?}", e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| load_err("fetch did not return a Response".into()))?;
    if !response.ok() {
        return Err(load_err(format!("HTTP {}", response.status())));
    }

    let promise = response
        .array_buffer()
        .map_err(|e| load_err(format!("{:?}", e)))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| load_err(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Fetch and decode the player sprite
pub async fn load_sprite(url: &str) -> Result<SpriteImage> {
    let bytes = fetch_bytes(url).await?;
    decode_sprite(&bytes)
}

/// Tell whoever is at the page why the game is not running
pub fn notify_operator(error: &GameError) {
    log::error!("{}", error);
    if let Ok(window) = window() {
        let _ = window.alert_with_message(&error.operator_message());
    }
}
