use failure::Fail;

use crate::runtime::{ContextOptions, GraphicsContext};

/// A drawable target, such as a canvas, that can produce a [GraphicsContext].
///
/// The dimensions are queried again every time a frame is rendered, so a surface that is resized
/// between frames is reflected in the uniforms of the next frame.
pub trait Surface {
    type Context: GraphicsContext;

    /// The width of the drawing buffer in pixels.
    fn width(&self) -> u32;

    /// The height of the drawing buffer in pixels.
    fn height(&self) -> u32;

    fn create_context(&self, options: &ContextOptions) -> Result<Self::Context, ContextError>;
}

#[derive(Fail, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ContextError {
    #[fail(display = "no surface was provided")]
    MissingSurface,
    #[fail(display = "the surface does not support graphics context creation")]
    Unsupported,
    #[fail(display = "the host refused to create a graphics context")]
    Refused,
}
