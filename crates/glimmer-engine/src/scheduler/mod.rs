//! The shared frame loop.
//!
//! One loop drives every instance. It starts with the first activation and
//! re-schedules itself on every tick for as long as the engine lives.

use std::time::Instant;

use crate::coords::SurfaceSize;
use crate::gl::GlApi;
use crate::host::FrameRequester;
use crate::instance::{InstanceStore, RenderInstance};
use crate::render;
use crate::surface::Targets;
use crate::time::{FrameClock, FrameTime};

/// Loop state. There is no way back from `Running`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SchedulerState {
    /// No instance registered yet; no frame requested.
    #[default]
    Idle,
    /// A frame is requested on every tick.
    Running,
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    state: SchedulerState,
    clock: FrameClock,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Frames drawn so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// Starts the loop if it is not running yet.
    pub fn ensure_running<F: FrameRequester + ?Sized>(&mut self, frames: &mut F) {
        if self.state == SchedulerState::Idle {
            log::debug!("frame loop started");
            self.state = SchedulerState::Running;
            frames.request_frame();
        }
    }

    /// Runs one frame: schedules the next one, then redraws every instance.
    ///
    /// Instances whose target is no longer known are skipped.
    pub fn tick<G, F>(
        &mut self,
        now: Instant,
        instances: &InstanceStore<G>,
        targets: &Targets,
        frames: &mut F,
    ) -> FrameTime
    where
        G: GlApi,
        F: FrameRequester + ?Sized,
    {
        if self.state == SchedulerState::Idle {
            // A host may tick before the first activation; treat it as the start.
            self.state = SchedulerState::Running;
        }
        frames.request_frame();

        let frame = self.clock.tick(now);

        for (key, instance) in instances.iter() {
            match targets.size_of(instance.target()) {
                Some(size) => draw_instance(instance, size, now),
                None => log::trace!("{key}: target {} is gone", instance.target()),
            }
        }

        log::trace!(
            "frame {} drew {} instance(s), dt {:.4}s",
            frame.frame_index,
            instances.len(),
            frame.dt
        );

        frame
    }
}

/// Draws one instance. Every uniform is rewritten on every frame.
pub fn draw_instance<G: GlApi>(instance: &RenderInstance<G>, size: SurfaceSize, now: Instant) {
    let gl = instance.gl();
    let uniforms = instance.uniforms();

    let (x, y, w, h) = size.viewport();
    gl.viewport(x, y, w, h);
    gl.clear_color_buffer();

    gl.uniform_1_i32(uniforms.image.as_ref(), 0);
    gl.uniform_1_f32(uniforms.time.as_ref(), instance.elapsed(now));

    for (i, bound) in instance.bound_textures().iter().enumerate() {
        if *bound {
            // textureN samples the unit its slot (N + 1) was bound to.
            let unit = i32::try_from(i + 1).unwrap_or(i32::MAX);
            gl.uniform_1_i32(uniforms.textures[i].as_ref(), unit);
        }
    }

    render::draw_quad(gl, instance.vertex_buffer(), instance.position_attribute());
}
