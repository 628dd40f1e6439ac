//! A recording [Surface] and [GraphicsContext] for unit tests.
//!
//! Object handles are plain `u32` ids, allocated from a single counter starting at `1`. Uniform
//! locations are the uniform's name. Every context call is appended to a log shared with the
//! surface that created the context.
//!
//! Compilation is simulated: a source compiles when it mentions `main` and its braces balance.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::runtime::{
    ClearMask, ContextError, ContextOptions, GraphicsContext, ShaderStage, Surface, Topology,
    UsageHint, VertexAttributeLayout,
};

#[derive(Clone, PartialEq, Debug)]
pub(crate) enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32, String),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData(Vec<f32>, UsageHint),
    DeleteBuffer(u32),
    EnableVertexAttributeArray(u32),
    VertexAttributePointer(u32, VertexAttributeLayout),
    Uniform1f(Option<String>, f32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear(ClearMask),
    DrawArrays(Topology, i32, i32),
}

#[derive(Clone, Default)]
struct Behavior {
    refuse_context: bool,
    fail_vertex_stage: bool,
    omit_info_logs: bool,
    link_failure: Option<String>,
    fail_buffer: bool,
    fail_object_creation: bool,
    inactive_position_attribute: bool,
}

pub(crate) struct FakeSurface {
    width: Cell<u32>,
    height: Cell<u32>,
    behavior: Behavior,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl FakeSurface {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        FakeSurface {
            width: Cell::new(width),
            height: Cell::new(height),
            behavior: Behavior::default(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn refusing_context(mut self) -> Self {
        self.behavior.refuse_context = true;

        self
    }

    pub(crate) fn failing_vertex_stage(mut self) -> Self {
        self.behavior.fail_vertex_stage = true;

        self
    }

    pub(crate) fn without_info_logs(mut self) -> Self {
        self.behavior.omit_info_logs = true;

        self
    }

    pub(crate) fn failing_link(mut self, log: &str) -> Self {
        self.behavior.link_failure = Some(log.to_string());

        self
    }

    pub(crate) fn failing_buffer(mut self) -> Self {
        self.behavior.fail_buffer = true;

        self
    }

    /// Makes `create_shader` and `create_program` return no object.
    pub(crate) fn failing_object_creation(mut self) -> Self {
        self.behavior.fail_object_creation = true;

        self
    }

    /// Reports `aVertexPosition` as inactive, as a driver does when it optimizes the attribute out.
    pub(crate) fn inactive_position_attribute(mut self) -> Self {
        self.behavior.inactive_position_attribute = true;

        self
    }

    pub(crate) fn resize(&self, width: u32, height: u32) {
        self.width.set(width);
        self.height.set(height);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn draw_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| match call {
                Call::DrawArrays(..) => true,
                _ => false,
            })
            .count()
    }

    /// The ids of the last program and buffer created through this surface's contexts.
    pub(crate) fn created_program_and_buffer(&self) -> Option<(u32, u32)> {
        let calls = self.calls.borrow();

        let program = calls.iter().rev().find_map(|call| match call {
            Call::CreateProgram(id) => Some(*id),
            _ => None,
        })?;
        let buffer = calls.iter().rev().find_map(|call| match call {
            Call::CreateBuffer(id) => Some(*id),
            _ => None,
        })?;

        Some((program, buffer))
    }
}

impl Surface for FakeSurface {
    type Context = RecordingContext;

    fn width(&self) -> u32 {
        self.width.get()
    }

    fn height(&self) -> u32 {
        self.height.get()
    }

    fn create_context(&self, _options: &ContextOptions) -> Result<RecordingContext, ContextError> {
        if self.behavior.refuse_context {
            return Err(ContextError::Refused);
        }

        Ok(RecordingContext {
            behavior: self.behavior.clone(),
            calls: self.calls.clone(),
            next_id: Cell::new(1),
            shaders: RefCell::new(HashMap::new()),
            attachments: RefCell::new(HashMap::new()),
        })
    }
}

pub(crate) struct RecordingContext {
    behavior: Behavior,
    calls: Rc<RefCell<Vec<Call>>>,
    next_id: Cell<u32>,
    shaders: RefCell<HashMap<u32, FakeShader>>,
    attachments: RefCell<HashMap<u32, Vec<u32>>>,
}

#[derive(Default)]
struct FakeShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
}

impl RecordingContext {
    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self) -> u32 {
        let id = self.next_id.get();

        self.next_id.set(id + 1);

        id
    }

    fn program_mentions(&self, program: u32, name: &str) -> bool {
        let shaders = self.shaders.borrow();

        self.attachments
            .borrow()
            .get(&program)
            .map(|attached| {
                attached.iter().any(|id| {
                    shaders
                        .get(id)
                        .map(|shader| shader.source.contains(name))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(false)
    }
}

fn compiles(source: &str) -> bool {
    let mut depth = 0i32;

    for c in source.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => (),
        }

        if depth < 0 {
            return false;
        }
    }

    depth == 0 && source.contains("main")
}

impl GraphicsContext for RecordingContext {
    type Shader = u32;

    type Program = u32;

    type Buffer = u32;

    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Option<u32> {
        if self.behavior.fail_object_creation {
            return None;
        }

        let id = self.allocate();

        self.shaders.borrow_mut().insert(
            id,
            FakeShader {
                stage: Some(stage),
                ..FakeShader::default()
            },
        );
        self.record(Call::CreateShader(stage, id));

        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        if let Some(object) = self.shaders.borrow_mut().get_mut(shader) {
            object.source = source.to_string();
        }

        self.record(Call::ShaderSource(*shader, source.to_string()));
    }

    fn compile_shader(&self, shader: &u32) {
        if let Some(object) = self.shaders.borrow_mut().get_mut(shader) {
            let forced_failure =
                self.behavior.fail_vertex_stage && object.stage == Some(ShaderStage::Vertex);

            object.compiled = !forced_failure && compiles(&object.source);
        }

        self.record(Call::CompileShader(*shader));
    }

    fn shader_compile_status(&self, shader: &u32) -> bool {
        self.shaders
            .borrow()
            .get(shader)
            .map(|object| object.compiled)
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &u32) -> Option<String> {
        if self.behavior.omit_info_logs || self.shader_compile_status(shader) {
            return None;
        }

        let stage = self
            .shaders
            .borrow()
            .get(shader)
            .and_then(|object| object.stage)
            .map(|stage| stage.to_string())
            .unwrap_or_default();

        Some(format!("ERROR: {}: 0:1: '' : syntax error", stage))
    }

    fn delete_shader(&self, shader: &u32) {
        self.record(Call::DeleteShader(*shader));
    }

    fn create_program(&self) -> Option<u32> {
        if self.behavior.fail_object_creation {
            return None;
        }

        let id = self.allocate();

        self.attachments.borrow_mut().insert(id, Vec::new());
        self.record(Call::CreateProgram(id));

        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        if let Some(attached) = self.attachments.borrow_mut().get_mut(program) {
            attached.push(*shader);
        }

        self.record(Call::AttachShader(*program, *shader));
    }

    fn link_program(&self, program: &u32) {
        self.record(Call::LinkProgram(*program));
    }

    fn program_link_status(&self, _program: &u32) -> bool {
        self.behavior.link_failure.is_none()
    }

    fn program_info_log(&self, _program: &u32) -> Option<String> {
        self.behavior.link_failure.clone()
    }

    fn use_program(&self, program: Option<&u32>) {
        self.record(Call::UseProgram(program.copied()));
    }

    fn delete_program(&self, program: &u32) {
        self.record(Call::DeleteProgram(*program));
    }

    fn create_buffer(&self) -> Option<u32> {
        if self.behavior.fail_buffer {
            return None;
        }

        let id = self.allocate();

        self.record(Call::CreateBuffer(id));

        Some(id)
    }

    fn bind_array_buffer(&self, buffer: Option<&u32>) {
        self.record(Call::BindArrayBuffer(buffer.copied()));
    }

    fn array_buffer_data(&self, data: &[f32], usage_hint: UsageHint) {
        self.record(Call::ArrayBufferData(data.to_vec(), usage_hint));
    }

    fn delete_buffer(&self, buffer: &u32) {
        self.record(Call::DeleteBuffer(*buffer));
    }

    fn attribute_location(&self, program: &u32, name: &str) -> Option<u32> {
        if self.behavior.inactive_position_attribute && name == "aVertexPosition" {
            return None;
        }

        if self.program_mentions(*program, name) {
            Some(0)
        } else {
            None
        }
    }

    fn enable_vertex_attribute_array(&self, location: u32) {
        self.record(Call::EnableVertexAttributeArray(location));
    }

    fn vertex_attribute_pointer(&self, location: u32, layout: &VertexAttributeLayout) {
        self.record(Call::VertexAttributePointer(location, *layout));
    }

    fn uniform_location(&self, program: &u32, name: &str) -> Option<String> {
        if self.program_mentions(*program, name) {
            Some(name.to_string())
        } else {
            None
        }
    }

    fn uniform_1f(&self, location: Option<&String>, value: f32) {
        self.record(Call::Uniform1f(location.cloned(), value));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, color: [f32; 4]) {
        self.record(Call::ClearColor(color));
    }

    fn clear(&self, mask: ClearMask) {
        self.record(Call::Clear(mask));
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(Call::DrawArrays(topology, first, count));
    }
}
