// Compiles `src/fragment.glsl` and draws it once onto the page's `#canvas` element.
//
// Compiler and linker diagnostics end up in the browser console, as do the crate's own log
// messages.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use shader_preview::ShaderPreview;
use web_sys::{window, HtmlCanvasElement};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).unwrap();

    let canvas: Option<HtmlCanvasElement> = window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("canvas"))
        .and_then(|element| element.dyn_into().ok());

    let mut preview = ShaderPreview::new();

    if !preview.initialize(canvas.as_ref(), include_str!("fragment.glsl")) {
        for error in preview.errors() {
            log::error!("{}", error);
        }

        return;
    }

    // Zoom out a little so that more rings fit on the canvas.
    preview.set_scale(1.5);
    preview.render();
}
