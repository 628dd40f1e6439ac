use failure::Fail;

use crate::runtime::{GraphicsContext, ShaderStage};

/// The vertex stage every preview program is built with.
///
/// Passes `aVertexPosition` through as the clip-space position and forwards it to the fragment
/// stage as the `vVertexPosition` varying.
pub const VERTEX_SHADER_SOURCE: &str = "precision highp float;
attribute vec2 aVertexPosition;
varying vec2 vVertexPosition;
void main (void) {
	gl_Position = vec4 (aVertexPosition.x, aVertexPosition.y, 0.0, 1.0);
	vVertexPosition = aVertexPosition;
}";

pub const VERTEX_POSITION_ATTRIBUTE: &str = "aVertexPosition";

pub const VERTEX_SCALE_UNIFORM: &str = "uVertexScale";

pub const WIDTH_UNIFORM: &str = "uWidth";

pub const HEIGHT_UNIFORM: &str = "uHeight";

const LINK_FAILURE_FALLBACK: &str = "shader program failed to link";

#[derive(Fail, Clone, PartialEq, Debug)]
#[fail(display = "{} shader failed to compile: {}", stage, log)]
pub struct ShaderCompilationError {
    pub stage: ShaderStage,
    pub log: String,
}

#[derive(Fail, Clone, PartialEq, Debug)]
#[fail(display = "{}", log)]
pub struct ShaderLinkingError {
    pub log: String,
}

/// Creates and compiles a shader object for the `stage`.
///
/// A shader that fails to compile is deleted before the error is returned. When the host provides
/// no info log, the error carries a generic message naming the stage.
pub(crate) fn compile<C>(
    context: &C,
    stage: ShaderStage,
    source: &str,
) -> Result<C::Shader, ShaderCompilationError>
where
    C: GraphicsContext,
{
    let shader = context
        .create_shader(stage)
        .ok_or_else(|| ShaderCompilationError {
            stage,
            log: format!("could not create a {} shader object", stage),
        })?;

    context.shader_source(&shader, source);
    context.compile_shader(&shader);

    if !context.shader_compile_status(&shader) {
        let log = non_empty(context.shader_info_log(&shader))
            .unwrap_or_else(|| format!("{} shader failed to compile", stage));

        context.delete_shader(&shader);

        return Err(ShaderCompilationError { stage, log });
    }

    Ok(shader)
}

/// Links a vertex and a fragment shader into a program.
///
/// The shaders stay owned by the caller. A program that fails to link is deleted before the error
/// is returned.
pub(crate) fn link<C>(
    context: &C,
    vertex_shader: &C::Shader,
    fragment_shader: &C::Shader,
) -> Result<C::Program, ShaderLinkingError>
where
    C: GraphicsContext,
{
    let program = context.create_program().ok_or_else(|| ShaderLinkingError {
        log: "could not create a program object".to_string(),
    })?;

    context.attach_shader(&program, vertex_shader);
    context.attach_shader(&program, fragment_shader);
    context.link_program(&program);

    if !context.program_link_status(&program) {
        let log = non_empty(context.program_info_log(&program))
            .unwrap_or_else(|| LINK_FAILURE_FALLBACK.to_string());

        context.delete_program(&program);

        return Err(ShaderLinkingError { log });
    }

    Ok(program)
}

fn non_empty(log: Option<String>) -> Option<String> {
    log.filter(|log| !log.trim().is_empty())
}
