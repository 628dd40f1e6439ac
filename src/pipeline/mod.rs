//! The fixed parts of a preview program: the built-in vertex stage and the fullscreen quad it
//! draws.

pub mod quad;
pub mod shader;

pub use self::shader::{ShaderCompilationError, ShaderLinkingError, VERTEX_SHADER_SOURCE};
