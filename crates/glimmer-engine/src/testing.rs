//! Recording doubles for the GPU and the host.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::bail;
use image::{Rgba, RgbaImage};

use crate::asset::{AssetId, ImageHandle};
use crate::config::ContextAttributes;
use crate::coords::SurfaceSize;
use crate::gl::{GlApi, ShaderStage, TextureParameter, TextureValue};
use crate::host::{AssetSource, FrameRequester, Host, MountMode, SurfaceElement};
use crate::surface::TargetId;
use crate::time::TimeSource;

/// One recorded GPU call. Object handles are plain integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData(Vec<u8>),
    DeleteBuffer(u32),
    EnableVertexAttribArray(u32),
    VertexAttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: i32,
    },
    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    TexImage {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    TexParameter(TextureParameter, TextureValue),
    DeleteTexture(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DisableDepthTest,
    Uniform1i(String, i32),
    Uniform1f(String, f32),
    /// A uniform write against a location the program does not have.
    UniformIgnored,
    DrawTriangleStrip { first: i32, count: i32 },
}

const POSITION_LOCATION: u32 = 0;

#[derive(Debug, Default)]
struct DriverState {
    calls: Vec<Call>,
    next_object: u32,
    /// Live shader objects and their source text.
    shaders: HashMap<u32, String>,
    sources: Vec<String>,
    link_failure: Option<String>,
    hidden_uniforms: HashSet<String>,
}

impl DriverState {
    fn object(&mut self) -> u32 {
        self.next_object += 1;
        self.next_object
    }
}

/// Shared log behind every [`MockGl`] handed out by one driver.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<DriverState>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> MockGl {
        MockGl {
            state: self.state.clone(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Every shader source handed to the driver, in order.
    pub fn sources(&self) -> Vec<String> {
        self.state.borrow().sources.clone()
    }

    /// Makes every later link fail with `log`.
    pub fn fail_links(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_string());
    }

    /// Makes programs report no location for `name`.
    pub fn hide_uniform(&self, name: &str) {
        self.state.borrow_mut().hidden_uniforms.insert(name.to_string());
    }
}

/// Uniform location in the mock: the uniform's name.
#[derive(Debug, Clone, PartialEq)]
pub struct MockUniform(String);

/// Recording GPU context. Sources containing `#error` fail to compile.
#[derive(Debug, Clone)]
pub struct MockGl {
    state: Rc<RefCell<DriverState>>,
}

impl MockGl {
    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn create(&self, call: impl FnOnce(u32) -> Call) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.object();
        state.calls.push(call(id));
        id
    }

    fn shader_text(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .cloned()
            .unwrap_or_default()
    }
}

impl GlApi for MockGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = MockUniform;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.create(|id| Call::CreateShader(stage, id));
        self.state.borrow_mut().shaders.insert(id, String::new());
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ShaderSource(shader));
        state.sources.push(source.to_string());
        state.shaders.insert(shader, source.to_string());
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        !self.shader_text(shader).contains("#error")
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let text = self.shader_text(shader);
        if text.contains("#error") {
            format!("ERROR: 0:1: '{text}'")
        } else {
            String::new()
        }
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DeleteShader(shader));
        state.shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        Ok(self.create(Call::CreateProgram))
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.state.borrow().link_failure.is_none()
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.state.borrow().link_failure.clone().unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        (name == crate::program::POSITION_ATTRIBUTE).then_some(POSITION_LOCATION)
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<MockUniform> {
        let hidden = self.state.borrow().hidden_uniforms.contains(name);
        (!hidden).then(|| MockUniform(name.to_string()))
    }

    fn uniform_1_i32(&self, location: Option<&MockUniform>, value: i32) {
        self.record(match location {
            Some(MockUniform(name)) => Call::Uniform1i(name.clone(), value),
            None => Call::UniformIgnored,
        });
    }

    fn uniform_1_f32(&self, location: Option<&MockUniform>, value: f32) {
        self.record(match location {
            Some(MockUniform(name)) => Call::Uniform1f(name.clone(), value),
            None => Call::UniformIgnored,
        });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        Ok(self.create(Call::CreateBuffer))
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        self.record(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8]) {
        self.record(Call::ArrayBufferData(data.to_vec()));
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn create_texture(&self) -> Result<u32, String> {
        Ok(self.create(Call::CreateTexture))
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&self, texture: Option<u32>) {
        self.record(Call::BindTexture(texture));
    }

    fn tex_image_2d_rgba(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(Call::TexImage {
            width,
            height,
            pixels: pixels.to_vec(),
        });
    }

    fn tex_parameter(&self, parameter: TextureParameter, value: TextureValue) {
        self.record(Call::TexParameter(parameter, value));
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(Call::Clear);
    }

    fn disable_depth_test(&self) {
        self.record(Call::DisableDepthTest);
    }

    fn draw_triangle_strip(&self, first: i32, count: i32) {
        self.record(Call::DrawTriangleStrip { first, count });
    }
}

// ── host side ─────────────────────────────────────────────────────────────

pub fn solid_image(width: u32, height: u32) -> ImageHandle {
    ImageHandle::new(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
}

/// In-memory document resources plus a log of started fetches.
#[derive(Debug, Default)]
pub struct MockAssets {
    scripts: HashMap<String, String>,
    images: HashMap<String, ImageHandle>,
    pub text_fetches: Vec<AssetId>,
    pub image_loads: Vec<AssetId>,
    pub script_lookups: Cell<usize>,
}

impl MockAssets {
    pub fn with_script(mut self, name: &str, text: &str) -> Self {
        self.scripts.insert(name.to_string(), text.to_string());
        self
    }

    pub fn with_image(mut self, name: &str, image: ImageHandle) -> Self {
        self.images.insert(name.to_string(), image);
        self
    }
}

impl AssetSource for MockAssets {
    fn find_script(&self, name: &str) -> Option<String> {
        self.script_lookups.set(self.script_lookups.get() + 1);
        self.scripts.get(name).cloned()
    }

    fn find_image(&self, name: &str) -> Option<ImageHandle> {
        self.images.get(name).cloned()
    }

    fn fetch_text(&mut self, id: &AssetId) {
        self.text_fetches.push(id.clone());
    }

    fn load_image(&mut self, id: &AssetId) {
        self.image_loads.push(id.clone());
    }
}

#[derive(Debug, Default)]
pub struct MockFrames {
    pub requests: usize,
}

impl FrameRequester for MockFrames {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

/// A host element: attributes plus a rendered size.
#[derive(Debug, Clone)]
pub struct MockElement {
    attributes: HashMap<String, String>,
    size: SurfaceSize,
}

impl Default for MockElement {
    fn default() -> Self {
        Self {
            attributes: HashMap::new(),
            size: SurfaceSize::new(300, 150),
        }
    }
}

impl MockElement {
    pub fn new(shader: &str) -> Self {
        Self::default().with(crate::surface::SHADER_ATTRIBUTE, shader)
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn sized(mut self, width: u32, height: u32) -> Self {
        self.size = SurfaceSize::new(width, height);
        self
    }
}

impl SurfaceElement for MockElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }
}

pub struct MockHost {
    pub driver: MockDriver,
    pub assets: MockAssets,
    pub frame_requests: usize,
    pub mounted: Vec<(TargetId, MountMode)>,
    pub contexts: Vec<(TargetId, ContextAttributes)>,
    supported: bool,
    context_failure: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            driver: MockDriver::new(),
            assets: MockAssets::default(),
            frame_requests: 0,
            mounted: Vec::new(),
            contexts: Vec::new(),
            supported: true,
            context_failure: false,
        }
    }

    pub fn with_script(mut self, name: &str, text: &str) -> Self {
        self.assets = self.assets.with_script(name, text);
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    pub fn failing_contexts(mut self) -> Self {
        self.context_failure = true;
        self
    }
}

impl AssetSource for MockHost {
    fn find_script(&self, name: &str) -> Option<String> {
        self.assets.find_script(name)
    }

    fn find_image(&self, name: &str) -> Option<ImageHandle> {
        self.assets.find_image(name)
    }

    fn fetch_text(&mut self, id: &AssetId) {
        self.assets.fetch_text(id);
    }

    fn load_image(&mut self, id: &AssetId) {
        self.assets.load_image(id);
    }
}

impl FrameRequester for MockHost {
    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}

impl Host for MockHost {
    type Element = MockElement;
    type Gl = MockGl;

    fn gl_supported(&self) -> bool {
        self.supported
    }

    fn mount_target(&mut self, _element: &MockElement, target: TargetId, mode: MountMode) {
        self.mounted.push((target, mode));
    }

    fn create_context(
        &mut self,
        target: TargetId,
        attributes: &ContextAttributes,
    ) -> anyhow::Result<MockGl> {
        if self.context_failure {
            bail!("context lost for target {target}");
        }
        self.contexts.push((target, attributes.clone()));
        Ok(self.driver.context())
    }
}

/// Time source advanced by hand.
#[derive(Debug, Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}
