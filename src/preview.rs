use std::convert::TryFrom;

use failure::Fail;

use crate::pipeline::quad::{self, QUAD_TOPOLOGY, QUAD_VERTEX_COUNT};
use crate::pipeline::shader::{
    self, HEIGHT_UNIFORM, VERTEX_POSITION_ATTRIBUTE, VERTEX_SCALE_UNIFORM, VERTEX_SHADER_SOURCE,
    WIDTH_UNIFORM,
};
use crate::runtime::{
    ClearMask, ContextError, ContextOptions, GraphicsContext, ShaderStage, Surface,
};

type Context<S> = <S as Surface>::Context;
type Program<S> = <Context<S> as GraphicsContext>::Program;
type Buffer<S> = <Context<S> as GraphicsContext>::Buffer;
type UniformLocation<S> = <Context<S> as GraphicsContext>::UniformLocation;

/// Previews a fragment shader by drawing it over a fullscreen quad.
///
/// The fragment shader receives the `vVertexPosition` varying (clip-space position in `[-1, 1]`)
/// and may declare any of these uniforms:
///
/// - `uniform float uVertexScale`: the preview's [scale](ShaderPreview::scale).
/// - `uniform float uWidth`: the width of the surface in pixels.
/// - `uniform float uHeight`: the height of the surface in pixels.
///
/// A preview starts out uninitialized. [initialize](ShaderPreview::initialize) either makes it
/// ready to [render](ShaderPreview::render), or leaves it failed with diagnostics available from
/// [errors](ShaderPreview::errors):
///
/// ```ignore
/// let mut preview = ShaderPreview::new();
///
/// if preview.initialize(Some(&canvas), include_str!("fragment.glsl")) {
///     preview.set_scale(2.0);
///     preview.render();
/// } else {
///     for error in preview.errors() {
///         web_sys::console::error_1(&error.into());
///     }
/// }
/// ```
pub struct ShaderPreview<'a, S>
where
    S: Surface,
{
    options: ContextOptions,
    state: State<'a, S>,
    errors: Vec<String>,
    scale: f32,
}

enum State<'a, S>
where
    S: Surface,
{
    Uninitialized,
    Ready(ReadyState<'a, S>),
    Failed,
}

impl<'a, S> ShaderPreview<'a, S>
where
    S: Surface,
{
    pub fn new() -> Self {
        ShaderPreview::with_options(ContextOptions::default())
    }

    pub fn with_options(options: ContextOptions) -> Self {
        let scale = options.initial_scale();

        ShaderPreview {
            options,
            state: State::Uninitialized,
            errors: Vec::new(),
            scale,
        }
    }

    /// Acquires a context for the `surface`, builds a program from the built-in vertex shader and
    /// the `fragment_source`, and uploads the quad.
    ///
    /// Returns `true` if the preview is ready to render. Otherwise returns `false`; compiler and
    /// linker diagnostics are then available from [errors](ShaderPreview::errors). A missing
    /// surface or a refused context produces no diagnostics.
    ///
    /// Initializing again releases the GPU objects of the previous attempt and clears its
    /// diagnostics first.
    pub fn initialize(&mut self, surface: Option<&'a S>, fragment_source: &str) -> bool {
        self.state = State::Uninitialized;
        self.errors.clear();

        match ReadyState::create(surface, fragment_source, &self.options) {
            Ok(ready) => {
                self.state = State::Ready(ready);

                true
            }
            Err(error) => {
                log::warn!("shader preview initialization failed: {}", error);

                self.errors = error.diagnostics();
                self.state = State::Failed;

                false
            }
        }
    }

    /// The diagnostics collected by the most recent call to
    /// [initialize](ShaderPreview::initialize).
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_ready(&self) -> bool {
        match self.state {
            State::Ready(_) => true,
            _ => false,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Sets the value the `uVertexScale` uniform receives on the next frame.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// Draws one frame.
    ///
    /// # Panics
    ///
    /// Panics if the preview has not been successfully initialized.
    pub fn render(&self) {
        match &self.state {
            State::Ready(ready) => ready.render(self.scale),
            State::Uninitialized => panic!("cannot render a shader preview before initializing it"),
            State::Failed => panic!("cannot render a shader preview that failed to initialize"),
        }
    }
}

impl<'a, S> Default for ShaderPreview<'a, S>
where
    S: Surface,
{
    fn default() -> Self {
        ShaderPreview::new()
    }
}

/// Everything needed to draw a frame, built once by a successful initialization.
///
/// Owns the context, the linked program and the quad buffer; the program and buffer are deleted
/// when the ready state is dropped. The surface is borrowed.
pub struct ReadyState<'a, S>
where
    S: Surface,
{
    surface: &'a S,
    context: Context<S>,
    program: Program<S>,
    buffer: Buffer<S>,
    uniforms: UniformLocations<UniformLocation<S>>,
}

struct UniformLocations<L> {
    vertex_scale: Option<L>,
    width: Option<L>,
    height: Option<L>,
}

impl<'a, S> ReadyState<'a, S>
where
    S: Surface,
{
    /// Runs the complete initialization sequence, returning the first failure.
    ///
    /// Both shader stages are always compiled, so a [InitializationError::Shader] may carry a
    /// diagnostic for each stage (fragment stage first).
    pub fn create(
        surface: Option<&'a S>,
        fragment_source: &str,
        options: &ContextOptions,
    ) -> Result<Self, InitializationError> {
        let surface = surface.ok_or(ContextError::MissingSurface)?;
        let context = surface.create_context(options)?;

        context.viewport(0, 0, saturate(surface.width()), saturate(surface.height()));
        context.clear_color(options.clear_color());

        let fragment_shader = shader::compile(&context, ShaderStage::Fragment, fragment_source);
        let vertex_shader = shader::compile(&context, ShaderStage::Vertex, VERTEX_SHADER_SOURCE);

        let (vertex_shader, fragment_shader) = match (vertex_shader, fragment_shader) {
            (Ok(vertex_shader), Ok(fragment_shader)) => (vertex_shader, fragment_shader),
            (vertex_shader, fragment_shader) => {
                let mut diagnostics = Vec::new();

                match fragment_shader {
                    Ok(object) => context.delete_shader(&object),
                    Err(error) => diagnostics.push(error.log),
                }

                match vertex_shader {
                    Ok(object) => context.delete_shader(&object),
                    Err(error) => diagnostics.push(error.log),
                }

                return Err(InitializationError::Shader(diagnostics));
            }
        };

        let program = shader::link(&context, &vertex_shader, &fragment_shader);

        // The program keeps its attached stages alive.
        context.delete_shader(&vertex_shader);
        context.delete_shader(&fragment_shader);

        let program = program.map_err(|error| InitializationError::Shader(vec![error.log]))?;

        let position_location = context.attribute_location(&program, VERTEX_POSITION_ATTRIBUTE);

        if position_location.is_none() {
            log::warn!(
                "`{}` is not an active attribute of the linked program",
                VERTEX_POSITION_ATTRIBUTE
            );
        }

        let uniforms = UniformLocations {
            vertex_scale: context.uniform_location(&program, VERTEX_SCALE_UNIFORM),
            width: context.uniform_location(&program, WIDTH_UNIFORM),
            height: context.uniform_location(&program, HEIGHT_UNIFORM),
        };

        let buffer = match quad::upload(&context, position_location) {
            Some(buffer) => buffer,
            None => {
                context.delete_program(&program);

                return Err(InitializationError::ObjectCreation("vertex buffer"));
            }
        };

        log::debug!(
            "shader preview ready ({}x{})",
            surface.width(),
            surface.height()
        );

        Ok(ReadyState {
            surface,
            context,
            program,
            buffer,
            uniforms,
        })
    }

    /// Clears the surface and draws the quad with the given `uVertexScale` value.
    pub fn render(&self, scale: f32) {
        let context = &self.context;

        context.clear(ClearMask::COLOR | ClearMask::DEPTH);
        context.use_program(Some(&self.program));
        context.uniform_1f(self.uniforms.vertex_scale.as_ref(), scale);
        context.uniform_1f(self.uniforms.width.as_ref(), self.surface.width() as f32);
        context.uniform_1f(self.uniforms.height.as_ref(), self.surface.height() as f32);
        context.draw_arrays(QUAD_TOPOLOGY, 0, QUAD_VERTEX_COUNT);
    }
}

impl<'a, S> Drop for ReadyState<'a, S>
where
    S: Surface,
{
    fn drop(&mut self) {
        self.context.delete_buffer(&self.buffer);
        self.context.delete_program(&self.program);
    }
}

// GL `sizei` is signed.
fn saturate(dimension: u32) -> i32 {
    i32::try_from(dimension).unwrap_or(i32::MAX)
}

#[derive(Fail, Clone, PartialEq, Debug)]
pub enum InitializationError {
    #[fail(display = "could not acquire a graphics context: {}", _0)]
    Context(#[cause] ContextError),
    #[fail(display = "could not build the preview program")]
    Shader(Vec<String>),
    #[fail(display = "could not create a {}", _0)]
    ObjectCreation(&'static str),
}

impl InitializationError {
    /// The messages a [ShaderPreview] reports from [errors](ShaderPreview::errors) for this
    /// failure.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            InitializationError::Context(_) => Vec::new(),
            InitializationError::Shader(diagnostics) => diagnostics.clone(),
            error @ InitializationError::ObjectCreation(_) => vec![error.to_string()],
        }
    }
}

impl From<ContextError> for InitializationError {
    fn from(error: ContextError) -> Self {
        InitializationError::Context(error)
    }
}
