//! `GlApi` over a `glow` context (desktop GL, GLES, or WebGL).

use glow::HasContext;

use super::{GlApi, ShaderStage, TextureParameter, TextureValue};

type GlowShader = <glow::Context as HasContext>::Shader;
type GlowProgram = <glow::Context as HasContext>::Program;
type GlowBuffer = <glow::Context as HasContext>::Buffer;
type GlowTexture = <glow::Context as HasContext>::Texture;
type GlowUniformLocation = <glow::Context as HasContext>::UniformLocation;

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn parameter_enum(parameter: TextureParameter) -> u32 {
    match parameter {
        TextureParameter::MinFilter => glow::TEXTURE_MIN_FILTER,
        TextureParameter::MagFilter => glow::TEXTURE_MAG_FILTER,
        TextureParameter::WrapS => glow::TEXTURE_WRAP_S,
        TextureParameter::WrapT => glow::TEXTURE_WRAP_T,
    }
}

fn value_enum(value: TextureValue) -> i32 {
    let v = match value {
        TextureValue::Linear => glow::LINEAR,
        TextureValue::Nearest => glow::NEAREST,
        TextureValue::ClampToEdge => glow::CLAMP_TO_EDGE,
        TextureValue::Repeat => glow::REPEAT,
    };
    v as i32
}

// Safety: every call below forwards handles that were created by this same
// context, and the context is only used from the thread that owns it.
impl GlApi for glow::Context {
    type Shader = GlowShader;
    type Program = GlowProgram;
    type Buffer = GlowBuffer;
    type Texture = GlowTexture;
    type UniformLocation = GlowUniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<GlowShader, String> {
        unsafe { HasContext::create_shader(self, stage_enum(stage)) }
    }

    fn shader_source(&self, shader: GlowShader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: GlowShader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: GlowShader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: GlowShader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: GlowShader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<GlowProgram, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: GlowProgram, shader: GlowShader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn link_program(&self, program: GlowProgram) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: GlowProgram) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: GlowProgram) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<GlowProgram>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: GlowProgram) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn attrib_location(&self, program: GlowProgram, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: GlowProgram, name: &str) -> Option<GlowUniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_1_i32(&self, location: Option<&GlowUniformLocation>, value: i32) {
        unsafe { HasContext::uniform_1_i32(self, location, value) }
    }

    fn uniform_1_f32(&self, location: Option<&GlowUniformLocation>, value: f32) {
        unsafe { HasContext::uniform_1_f32(self, location, value) }
    }

    fn create_buffer(&self) -> Result<GlowBuffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_array_buffer(&self, buffer: Option<GlowBuffer>) {
        unsafe { self.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: GlowBuffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            HasContext::vertex_attrib_pointer_f32(
                self,
                index,
                components,
                glow::FLOAT,
                false,
                stride,
                offset,
            )
        }
    }

    fn create_texture(&self) -> Result<GlowTexture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&self, texture: Option<GlowTexture>) {
        unsafe { self.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        unsafe {
            self.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                w,
                h,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
        }
    }

    fn tex_parameter(&self, parameter: TextureParameter, value: TextureValue) {
        unsafe {
            self.tex_parameter_i32(glow::TEXTURE_2D, parameter_enum(parameter), value_enum(value))
        }
    }

    fn delete_texture(&self, texture: GlowTexture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn disable_depth_test(&self) {
        unsafe { self.disable(glow::DEPTH_TEST) }
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        unsafe { self.draw_arrays(glow::TRIANGLE_STRIP, first, count) }
    }
}
