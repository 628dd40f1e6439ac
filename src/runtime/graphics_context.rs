use std::fmt;
use std::ops::BitOr;

/// The host graphics API a [ShaderPreview] drives.
///
/// Object handles (shaders, programs, buffers, uniform locations) are opaque associated types
/// owned by the caller. Nothing is released implicitly: every object created through a context
/// must be handed back to the matching `delete_*` method once it is no longer needed.
///
/// The method set mirrors the subset of WebGL 1.0 that is needed to compile a program, upload a
/// single vertex buffer and draw from it.
///
/// [ShaderPreview]: crate::ShaderPreview
pub trait GraphicsContext {
    type Shader;

    type Program;

    type Buffer;

    type UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;

    fn shader_source(&self, shader: &Self::Shader, source: &str);

    fn compile_shader(&self, shader: &Self::Shader);

    fn shader_compile_status(&self, shader: &Self::Shader) -> bool;

    fn shader_info_log(&self, shader: &Self::Shader) -> Option<String>;

    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);

    fn link_program(&self, program: &Self::Program);

    fn program_link_status(&self, program: &Self::Program) -> bool;

    fn program_info_log(&self, program: &Self::Program) -> Option<String>;

    fn use_program(&self, program: Option<&Self::Program>);

    fn delete_program(&self, program: &Self::Program);

    fn create_buffer(&self) -> Option<Self::Buffer>;

    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);

    /// Uploads `data` into the buffer currently bound to the array buffer binding point.
    fn array_buffer_data(&self, data: &[f32], usage_hint: UsageHint);

    fn delete_buffer(&self, buffer: &Self::Buffer);

    /// Returns `None` if `name` does not identify an active attribute of the `program`.
    fn attribute_location(&self, program: &Self::Program, name: &str) -> Option<u32>;

    fn enable_vertex_attribute_array(&self, location: u32);

    /// Describes the float attribute at `location` as sourced from the bound array buffer.
    fn vertex_attribute_pointer(&self, location: u32, layout: &VertexAttributeLayout);

    /// Returns `None` if `name` does not identify an active uniform of the `program`.
    fn uniform_location(&self, program: &Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Sets a `float` uniform of the program currently in use. A `None` location is ignored.
    fn uniform_1f(&self, location: Option<&Self::UniformLocation>, value: f32);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    fn clear_color(&self, color: [f32; 4]);

    fn clear(&self, mask: ClearMask);

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32);
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Hint to the driver about how the contents of a buffer will be used.
///
/// The quad is specified once and drawn from on every frame, so `StaticDraw` is the only hint a
/// preview issues.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UsageHint {
    StaticDraw,
}

/// The primitive topology of a draw call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Topology {
    TriangleFan,
}

/// Layout of a float vertex attribute inside an array buffer.
///
/// A `stride` of `0` means the attribute values are tightly packed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VertexAttributeLayout {
    pub components: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// Selects the buffers a [GraphicsContext::clear] call resets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClearMask(u32);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(0x4000);

    pub const DEPTH: ClearMask = ClearMask(0x0100);

    pub const STENCIL: ClearMask = ClearMask(0x0400);

    /// The mask as a GL bitfield.
    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: ClearMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ClearMask {
    type Output = ClearMask;

    fn bitor(self, rhs: ClearMask) -> ClearMask {
        ClearMask(self.0 | rhs.0)
    }
}
