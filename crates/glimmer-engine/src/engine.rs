//! Engine context: owns every cache and registry and drives activations.
//!
//! The host calls in on three occasions: to replace elements, to report
//! asset settlements, and once per display refresh through [`Engine::tick`].

use std::collections::HashMap;

use crate::asset::{
    AssetId, AssetLoader, Collected, ImageHandle, RequestId, ResolvedAssets, Settled,
    ShaderSources,
};
use crate::config::EngineConfig;
use crate::coords::SurfaceSize;
use crate::error::ActivationError;
use crate::host::{Host, MountMode, SurfaceElement};
use crate::instance::{InstanceStore, RenderInstance};
use crate::program::ProgramCompiler;
use crate::scheduler::{RenderScheduler, SchedulerState};
use crate::surface::{SurfaceRequest, TargetId, Targets};
use crate::time::{FrameTime, MonotonicClock, TimeSource};

type ReadyHook = Box<dyn FnOnce(TargetId)>;
type ErrorHook = Box<dyn FnMut()>;

/// An element waiting for its assets.
struct PendingActivation<E> {
    element: E,
    target: TargetId,
    mode: MountMode,
    on_ready: Option<ReadyHook>,
}

pub struct Engine<H: Host> {
    host: H,
    config: EngineConfig,
    gl_supported: bool,

    clock: Box<dyn TimeSource>,
    compiler: ProgramCompiler,

    sources: ShaderSources,
    loader: AssetLoader,
    targets: Targets,
    activations: HashMap<RequestId, PendingActivation<H::Element>>,

    instances: InstanceStore<H::Gl>,
    scheduler: RenderScheduler,

    on_error: ErrorHook,
}

impl<H: Host> Engine<H> {
    pub fn new(host: H, config: EngineConfig) -> Self {
        let gl_supported = host.gl_supported();
        if !gl_supported {
            log::warn!("host reports no GPU support; surfaces will not be created");
        }

        let compiler = ProgramCompiler::new(config.vertex_shader.clone());

        Self {
            host,
            config,
            gl_supported,
            clock: Box::new(MonotonicClock),
            compiler,
            sources: ShaderSources::new(),
            loader: AssetLoader::new(),
            targets: Targets::new(),
            activations: HashMap::new(),
            instances: InstanceStore::new(),
            scheduler: RenderScheduler::new(),
            on_error: Box::new(|| {}),
        }
    }

    /// Replaces the time source used for activation origins and frame ticks.
    pub fn with_clock(mut self, clock: impl TimeSource + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Installs the hook invoked once per failed activation.
    pub fn set_error_hook(&mut self, hook: impl FnMut() + 'static) {
        self.on_error = Box::new(hook);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Every target created so far, including pending and failed ones.
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Shader id to source text table. Entries can be pre-seeded before a
    /// surface references them; programs already compiled are not affected
    /// by later edits.
    pub fn shader_sources(&self) -> &ShaderSources {
        &self.sources
    }

    pub fn shader_sources_mut(&mut self) -> &mut ShaderSources {
        &mut self.sources
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn pending_activations(&self) -> usize {
        self.activations.len()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    // ── activation ────────────────────────────────────────────────────────

    /// Turns `element` into a shader surface.
    ///
    /// Returns the target created for it, or `None` when nothing was created
    /// (no GPU support, or a failure detected before any asset was pending).
    pub fn replace(&mut self, element: H::Element, mode: MountMode) -> Option<TargetId> {
        self.start(element, mode, None)
    }

    /// Like [`replace`](Self::replace); `on_ready` runs once the surface is
    /// registered with the frame loop. It never runs for a failed activation.
    pub fn replace_with(
        &mut self,
        element: H::Element,
        mode: MountMode,
        on_ready: impl FnOnce(TargetId) + 'static,
    ) -> Option<TargetId> {
        self.start(element, mode, Some(Box::new(on_ready)))
    }

    /// Replaces every element of a discovery pass.
    pub fn replace_all<I>(&mut self, elements: I) -> Vec<TargetId>
    where
        I: IntoIterator<Item = H::Element>,
    {
        elements
            .into_iter()
            .filter_map(|element| self.replace(element, MountMode::Replace))
            .collect()
    }

    fn start(
        &mut self,
        element: H::Element,
        mode: MountMode,
        on_ready: Option<ReadyHook>,
    ) -> Option<TargetId> {
        if !self.gl_supported {
            log::debug!("replace ignored: no GPU support");
            return None;
        }

        let request = match SurfaceRequest::from_element(&element) {
            Ok(request) => request,
            Err(err) => {
                self.fail(&err);
                return None;
            }
        };

        let target = self.targets.create(element.size());
        log::debug!(
            "target {target}: shader {}, {} secondary texture(s)",
            request.shader,
            request.texture_count()
        );

        let pending = PendingActivation {
            element,
            target,
            mode,
            on_ready,
        };

        match self.loader.collect(&request, &mut self.host, &mut self.sources) {
            Ok(Collected::Ready(resolved)) => {
                self.activate(pending, resolved);
                self.targets.get(target).map(|t| t.id)
            }
            Ok(Collected::Pending(id)) => {
                self.activations.insert(id, pending);
                Some(target)
            }
            Err(err) => {
                self.targets.remove(target);
                self.fail(&err);
                None
            }
        }
    }

    fn activate(&mut self, pending: PendingActivation<H::Element>, resolved: ResolvedAssets) {
        let PendingActivation {
            element,
            target,
            mode,
            on_ready,
        } = pending;

        match self.build_instance(&element, target, mode, &resolved) {
            Ok(()) => {
                if let Some(on_ready) = on_ready {
                    on_ready(target);
                }
            }
            Err(err) => {
                // Nothing was mounted without a context.
                if matches!(err, ActivationError::Context { .. }) {
                    self.targets.remove(target);
                }
                self.fail(&err);
            }
        }
    }

    fn build_instance(
        &mut self,
        element: &H::Element,
        target: TargetId,
        mode: MountMode,
        resolved: &ResolvedAssets,
    ) -> Result<(), ActivationError> {
        // The target takes the element's size at activation time.
        self.targets.set_size(target, element.size());

        let gl = self
            .host
            .create_context(target, &self.config.context)
            .map_err(|err| ActivationError::Context {
                target,
                message: format!("{err:#}"),
            })?;

        self.host.mount_target(element, target, mode);

        let source = self
            .sources
            .get(&resolved.shader)
            .ok_or_else(|| ActivationError::MissingSource(resolved.shader.clone()))?;
        let program = self.compiler.compile(&gl, source)?;

        let instance = RenderInstance::new(
            target,
            gl,
            program,
            &resolved.textures,
            self.config.clear_color,
            self.clock.now(),
        )?;
        let key = self.instances.insert(instance);
        log::debug!("{key} registered for target {target}");

        self.scheduler.ensure_running(&mut self.host);
        Ok(())
    }

    fn fail(&mut self, err: &ActivationError) {
        log::error!("{err}");
        (self.on_error)();
    }

    // ── settlements ───────────────────────────────────────────────────────

    /// Reports shader text fetched for `id`.
    pub fn text_loaded(&mut self, id: &AssetId, text: impl Into<String>) {
        let settled = self.loader.text_loaded(id, text.into(), &mut self.sources);
        self.settle(settled);
    }

    /// Reports an image decoded for `id`.
    pub fn image_loaded(&mut self, id: &AssetId, image: ImageHandle) {
        let settled = self.loader.image_loaded(id, image);
        self.settle(settled);
    }

    /// Reports that `id` could not be fetched or decoded.
    pub fn asset_failed(&mut self, id: &AssetId, reason: &str) {
        let settled = self.loader.asset_failed(id, reason);
        self.settle(settled);
    }

    fn settle(&mut self, settled: Vec<Settled>) {
        for settlement in settled {
            match settlement {
                Settled::Ready(request, resolved) => {
                    if let Some(pending) = self.activations.remove(&request) {
                        self.activate(pending, resolved);
                    }
                }
                Settled::Failed(request, err) => {
                    if let Some(pending) = self.activations.remove(&request) {
                        self.targets.remove(pending.target);
                        self.fail(&err);
                    }
                }
            }
        }
    }

    // ── frame loop ────────────────────────────────────────────────────────

    /// Runs one frame. Hosts call this from the callback scheduled through
    /// [`FrameRequester::request_frame`](crate::host::FrameRequester::request_frame).
    pub fn tick(&mut self) -> FrameTime {
        let now = self.clock.now();
        self.scheduler
            .tick(now, &self.instances, &self.targets, &mut self.host)
    }

    /// Resizes a target; the next frame uses the new viewport.
    pub fn set_size(&mut self, target: TargetId, size: SurfaceSize) -> bool {
        self.targets.set_size(target, size)
    }

    /// Tears down one surface.
    ///
    /// Releases the instance's GPU objects, drops any activation still waiting
    /// for assets, and forgets the target. Returns false for an unknown target.
    pub fn dispose(&mut self, target: TargetId) -> bool {
        let mut found = false;

        if let Some(instance) = self
            .instances
            .key_for_target(target)
            .and_then(|key| self.instances.remove(key))
        {
            instance.release();
            found = true;
        }

        let waiting: Vec<RequestId> = self
            .activations
            .iter()
            .filter(|(_, pending)| pending.target == target)
            .map(|(request, _)| *request)
            .collect();
        for request in waiting {
            self.activations.remove(&request);
            self.loader.cancel(request);
            found = true;
        }

        found |= self.targets.remove(target).is_some();
        if found {
            log::debug!("target {target} disposed");
        }
        found
    }
}

impl<H: Host> Drop for Engine<H> {
    fn drop(&mut self) {
        let count = self.instances.len();
        for instance in self.instances.drain() {
            instance.release();
        }
        if count > 0 {
            log::debug!("engine shut down, released {count} instance(s)");
        }
    }
}
