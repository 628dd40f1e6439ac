//! Previews a fragment shader by drawing it over a fullscreen quad.
//!
//! A [ShaderPreview] binds a graphics context to a [Surface] (on the web: an
//! [HtmlCanvasElement](web_sys::HtmlCanvasElement) with a WebGL 1.0 context), compiles a fixed
//! vertex shader together with a caller-supplied fragment shader, uploads a quad that covers the
//! whole viewport, and then redraws that quad every time [ShaderPreview::render] is called.
//!
//! Compilation and linking happen once, in [ShaderPreview::initialize]. Diagnostics from the
//! shader compiler and linker are collected rather than raised, so that they can be shown to
//! whoever is editing the fragment shader.
//!
//! The host graphics API is abstracted behind [GraphicsContext], which keeps the crate testable
//! without a browser.

pub mod pipeline;
pub mod runtime;

mod preview;
pub use self::preview::{InitializationError, ReadyState, ShaderPreview};

pub use self::pipeline::{ShaderCompilationError, ShaderLinkingError, VERTEX_SHADER_SOURCE};
pub use self::runtime::{
    ContextError, ContextOptions, ContextOptionsBuilder, GraphicsContext, PowerPreference, Surface,
};

#[cfg(test)]
mod testing;
