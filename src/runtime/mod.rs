//! The boundary between a preview and the host graphics environment.
//!
//! A [Surface] produces a [GraphicsContext], through which all GPU work is issued. The [web]
//! module implements both traits for an HTML canvas and WebGL 1.0.

mod context_options;
pub use self::context_options::{ContextOptions, ContextOptionsBuilder, PowerPreference};

mod graphics_context;
pub use self::graphics_context::{
    ClearMask, GraphicsContext, ShaderStage, Topology, UsageHint, VertexAttributeLayout,
};

mod surface;
pub use self::surface::{ContextError, Surface};

pub mod web;
