use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Texture parameters the engine sets on 2D textures.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureParameter {
    MinFilter,
    MagFilter,
    WrapS,
    WrapT,
}

/// Values for [`TextureParameter`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureValue {
    Linear,
    Nearest,
    ClampToEdge,
    Repeat,
}

/// The GPU calls a surface needs, shaped after OpenGL ES 2 / WebGL 1.
///
/// One value of the implementing type is one GPU context; every surface owns its
/// own. Methods take `&self` because GL contexts are internally stateful and
/// single-threaded. Creation methods report driver failures as `String`, like
/// `glow` does.
pub trait GlApi {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── shaders ───────────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;

    /// A `None` location is ignored, as in GL.
    fn uniform_1_i32(&self, location: Option<&Self::UniformLocation>, value: i32);
    /// A `None` location is ignored, as in GL.
    fn uniform_1_f32(&self, location: Option<&Self::UniformLocation>, value: f32);

    // ── vertex input ──────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Uploads `data` into the bound array buffer with static-draw usage.
    fn array_buffer_data(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Describes a float attribute read from the bound array buffer.
    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<Self::Texture, String>;
    /// Selects texture unit `unit` (0-based).
    fn active_texture(&self, unit: u32);
    fn bind_texture_2d(&self, texture: Option<Self::Texture>);
    /// Uploads tightly packed RGBA8 rows into the bound 2D texture.
    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]);
    fn tex_parameter(&self, parameter: TextureParameter, value: TextureValue);
    fn delete_texture(&self, texture: Self::Texture);

    // ── frame state ───────────────────────────────────────────────────────

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn disable_depth_test(&self);
    fn draw_triangle_strip(&self, first: i32, count: i32);
}
