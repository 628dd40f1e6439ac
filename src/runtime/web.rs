//! Binds the runtime traits to the browser: [HtmlCanvasElement] is a [Surface] that produces a
//! WebGL 1.0 context.
//!
//! WebGL objects are `JsValue` handles that are confined to the thread that created them, which
//! in practice is the main WASM thread.

use js_sys::Float32Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader,
    WebGlUniformLocation,
};

use crate::runtime::{
    ClearMask, ContextError, ContextOptions, GraphicsContext, ShaderStage, Surface, Topology,
    UsageHint, VertexAttributeLayout,
};

// Tried in order; older browsers only expose the prefixed identifier.
const CONTEXT_IDS: [&str; 2] = ["webgl", "experimental-webgl"];

impl Surface for HtmlCanvasElement {
    type Context = Gl;

    fn width(&self) -> u32 {
        HtmlCanvasElement::width(self)
    }

    fn height(&self) -> u32 {
        HtmlCanvasElement::height(self)
    }

    fn create_context(&self, options: &ContextOptions) -> Result<Gl, ContextError> {
        #[allow(deprecated)]
        let attributes = JsValue::from_serde(&options.context_attributes())
            .map_err(|_| ContextError::Unsupported)?;

        for id in CONTEXT_IDS.iter() {
            match self.get_context_with_context_options(id, &attributes) {
                Ok(Some(object)) => {
                    log::debug!("acquired a `{}` context", id);

                    return object
                        .dyn_into::<Gl>()
                        .map_err(|_| ContextError::Unsupported);
                }
                Ok(None) => log::debug!("canvas did not provide a `{}` context", id),
                Err(_) => return Err(ContextError::Unsupported),
            }
        }

        Err(ContextError::Refused)
    }
}

impl GraphicsContext for Gl {
    type Shader = WebGlShader;

    type Program = WebGlProgram;

    type Buffer = WebGlBuffer;

    type UniformLocation = WebGlUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Option<WebGlShader> {
        let tpe = match stage {
            ShaderStage::Vertex => Gl::VERTEX_SHADER,
            ShaderStage::Fragment => Gl::FRAGMENT_SHADER,
        };

        Gl::create_shader(self, tpe)
    }

    fn shader_source(&self, shader: &WebGlShader, source: &str) {
        Gl::shader_source(self, shader, source);
    }

    fn compile_shader(&self, shader: &WebGlShader) {
        Gl::compile_shader(self, shader);
    }

    fn shader_compile_status(&self, shader: &WebGlShader) -> bool {
        self.get_shader_parameter(shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &WebGlShader) -> Option<String> {
        self.get_shader_info_log(shader)
    }

    fn delete_shader(&self, shader: &WebGlShader) {
        Gl::delete_shader(self, Some(shader));
    }

    fn create_program(&self) -> Option<WebGlProgram> {
        Gl::create_program(self)
    }

    fn attach_shader(&self, program: &WebGlProgram, shader: &WebGlShader) {
        Gl::attach_shader(self, program, shader);
    }

    fn link_program(&self, program: &WebGlProgram) {
        Gl::link_program(self, program);
    }

    fn program_link_status(&self, program: &WebGlProgram) -> bool {
        self.get_program_parameter(program, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &WebGlProgram) -> Option<String> {
        self.get_program_info_log(program)
    }

    fn use_program(&self, program: Option<&WebGlProgram>) {
        Gl::use_program(self, program);
    }

    fn delete_program(&self, program: &WebGlProgram) {
        Gl::delete_program(self, Some(program));
    }

    fn create_buffer(&self) -> Option<WebGlBuffer> {
        Gl::create_buffer(self)
    }

    fn bind_array_buffer(&self, buffer: Option<&WebGlBuffer>) {
        self.bind_buffer(Gl::ARRAY_BUFFER, buffer);
    }

    fn array_buffer_data(&self, data: &[f32], usage_hint: UsageHint) {
        let usage = match usage_hint {
            UsageHint::StaticDraw => Gl::STATIC_DRAW,
        };

        self.buffer_data_with_array_buffer_view(
            Gl::ARRAY_BUFFER,
            &Float32Array::from(data),
            usage,
        );
    }

    fn delete_buffer(&self, buffer: &WebGlBuffer) {
        Gl::delete_buffer(self, Some(buffer));
    }

    fn attribute_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        let location = self.get_attrib_location(program, name);

        if location < 0 {
            None
        } else {
            Some(location as u32)
        }
    }

    fn enable_vertex_attribute_array(&self, location: u32) {
        self.enable_vertex_attrib_array(location);
    }

    fn vertex_attribute_pointer(&self, location: u32, layout: &VertexAttributeLayout) {
        self.vertex_attrib_pointer_with_i32(
            location,
            layout.components,
            Gl::FLOAT,
            layout.normalized,
            layout.stride,
            layout.offset,
        );
    }

    fn uniform_location(
        &self,
        program: &WebGlProgram,
        name: &str,
    ) -> Option<WebGlUniformLocation> {
        self.get_uniform_location(program, name)
    }

    fn uniform_1f(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.uniform1f(location, value);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        Gl::viewport(self, x, y, width, height);
    }

    fn clear_color(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;

        Gl::clear_color(self, r, g, b, a);
    }

    fn clear(&self, mask: ClearMask) {
        Gl::clear(self, mask.bits());
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        let mode = match topology {
            Topology::TriangleFan => Gl::TRIANGLE_FAN,
        };

        Gl::draw_arrays(self, mode, first, count);
    }
}
