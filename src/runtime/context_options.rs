use serde_derive::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    Default,
    HighPerformance,
    LowPower,
}

impl Default for PowerPreference {
    fn default() -> Self {
        PowerPreference::Default
    }
}

/// Configures the graphics context a [ShaderPreview] acquires and the initial state it sets up.
///
/// Use [ContextOptions::begin] to override individual options:
///
/// ```
/// use shader_preview::{ContextOptions, PowerPreference};
///
/// let options = ContextOptions::begin()
///     .power_preference(PowerPreference::LowPower)
///     .clear_color([0.0, 0.0, 0.0, 1.0])
///     .finish();
///
/// assert_eq!(options.clear_color(), [0.0, 0.0, 0.0, 1.0]);
/// ```
///
/// [ShaderPreview]: crate::ShaderPreview
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOptions {
    alpha: bool,
    antialias: bool,
    depth: bool,
    preserve_drawing_buffer: bool,
    fail_if_major_performance_caveat: bool,
    premultiplied_alpha: bool,
    power_preference: PowerPreference,
    clear_color: [f32; 4],
    initial_scale: f32,
}

impl ContextOptions {
    pub fn begin() -> ContextOptionsBuilder {
        ContextOptionsBuilder {
            options: ContextOptions::default(),
        }
    }

    pub fn alpha(&self) -> bool {
        self.alpha
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn depth(&self) -> bool {
        self.depth
    }

    pub fn preserve_drawing_buffer(&self) -> bool {
        self.preserve_drawing_buffer
    }

    pub fn fail_if_major_performance_caveat(&self) -> bool {
        self.fail_if_major_performance_caveat
    }

    pub fn premultiplied_alpha(&self) -> bool {
        self.premultiplied_alpha
    }

    pub fn power_preference(&self) -> PowerPreference {
        self.power_preference
    }

    /// The color the drawing buffer is cleared to before every frame, as RGBA.
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// The value of the `uVertexScale` uniform until it is changed on the preview.
    pub fn initial_scale(&self) -> f32 {
        self.initial_scale
    }

    pub(crate) fn context_attributes(&self) -> ContextAttributes {
        ContextAttributes {
            alpha: self.alpha,
            antialias: self.antialias,
            depth: self.depth,
            premultiplied_alpha: self.premultiplied_alpha,
            preserve_drawing_buffer: self.preserve_drawing_buffer,
            power_preference: self.power_preference,
            fail_if_major_performance_caveat: self.fail_if_major_performance_caveat,
        }
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        ContextOptions {
            alpha: true,
            antialias: true,
            depth: true,
            preserve_drawing_buffer: false,
            fail_if_major_performance_caveat: false,
            premultiplied_alpha: true,
            power_preference: PowerPreference::default(),
            clear_color: [1.0, 1.0, 1.0, 1.0],
            initial_scale: 1.0,
        }
    }
}

pub struct ContextOptionsBuilder {
    options: ContextOptions,
}

impl ContextOptionsBuilder {
    pub fn alpha(mut self, alpha: bool) -> Self {
        self.options.alpha = alpha;

        self
    }

    pub fn antialias(mut self, antialias: bool) -> Self {
        self.options.antialias = antialias;

        self
    }

    pub fn depth(mut self, depth: bool) -> Self {
        self.options.depth = depth;

        self
    }

    pub fn preserve_drawing_buffer(mut self, preserve_drawing_buffer: bool) -> Self {
        self.options.preserve_drawing_buffer = preserve_drawing_buffer;

        self
    }

    pub fn fail_if_major_performance_caveat(
        mut self,
        fail_if_major_performance_caveat: bool,
    ) -> Self {
        self.options.fail_if_major_performance_caveat = fail_if_major_performance_caveat;

        self
    }

    pub fn premultiplied_alpha(mut self, premultiplied_alpha: bool) -> Self {
        self.options.premultiplied_alpha = premultiplied_alpha;

        self
    }

    pub fn power_preference(mut self, power_preference: PowerPreference) -> Self {
        self.options.power_preference = power_preference;

        self
    }

    pub fn clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.options.clear_color = clear_color;

        self
    }

    pub fn initial_scale(mut self, initial_scale: f32) -> Self {
        self.options.initial_scale = initial_scale;

        self
    }

    pub fn finish(self) -> ContextOptions {
        self.options
    }
}

// Mirrors the `WebGLContextAttributes` dictionary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContextAttributes {
    alpha: bool,
    antialias: bool,
    depth: bool,
    premultiplied_alpha: bool,
    preserve_drawing_buffer: bool,
    power_preference: PowerPreference,
    fail_if_major_performance_caveat: bool,
}
