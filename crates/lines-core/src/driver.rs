//! Frame driver: advances the time uniform once per refresh tick, keeps the
//! resolution uniform equal to the surface size, and stops drawing for good
//! once released.

use crate::config::SessionConfig;
use crate::uniforms::{SurfaceSize, Uniforms, Viewport};
use std::fmt::Debug;

/// Something the driver can size, draw into, and release.
pub trait DrawTarget {
    type Error: Debug;

    /// Resize the output surface to at most `size` physical pixels and return
    /// the size actually applied (targets may cap it to device limits).
    fn resize(&mut self, size: SurfaceSize) -> SurfaceSize;

    /// Draw one frame with the given uniforms.
    fn draw(&mut self, uniforms: &Uniforms) -> Result<(), Self::Error>;

    /// Whether `error` means no later draw can succeed.
    fn is_terminal(_error: &Self::Error) -> bool {
        false
    }

    /// Release the underlying graphics context. Called at most once.
    fn release(&mut self);
}

pub struct FrameDriver<T: DrawTarget> {
    target: T,
    uniforms: Uniforms,
    time_step: f32,
    size: SurfaceSize,
    frames: u64,
    failure_streak: u32,
    released: bool,
}

impl<T: DrawTarget> FrameDriver<T> {
    /// Take ownership of `target` and size it to `viewport`.
    pub fn new(mut target: T, config: &SessionConfig, viewport: Viewport) -> Self {
        let size = target.resize(viewport.surface_size());
        let mut uniforms = Uniforms::new(config.initial_time);
        uniforms.set_resolution(size);
        Self {
            target,
            uniforms,
            time_step: config.time_step,
            size,
            frames: 0,
            failure_streak: 0,
            released: false,
        }
    }

    /// Advance time by one step and draw. Returns `false` once released, in
    /// which case nothing is drawn and the caller must not reschedule.
    pub fn tick(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.uniforms.time += self.time_step;
        match self.target.draw(&self.uniforms) {
            Ok(()) => {
                if self.failure_streak > 0 {
                    log::info!(
                        "[frame] drawing again after {} failed frames",
                        self.failure_streak
                    );
                }
                self.failure_streak = 0;
            }
            Err(e) if T::is_terminal(&e) => {
                log::error!("[frame] draw failed: {:?}; stopping", e);
                self.release();
                return false;
            }
            Err(e) => {
                self.failure_streak += 1;
                if self.failure_streak == 1 {
                    log::warn!("[frame] draw failed: {:?}; reconfiguring surface", e);
                } else {
                    log::debug!("[frame] draw failed again: {:?}", e);
                }
                self.size = self.target.resize(self.size);
                self.uniforms.set_resolution(self.size);
            }
        }
        self.frames += 1;
        true
    }

    /// Resize the surface to match `viewport` and update the resolution
    /// uniform to the applied size before the next draw.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.released {
            return;
        }
        let requested = viewport.surface_size();
        let size = self.target.resize(requested);
        if size != requested {
            log::warn!(
                "[frame] surface capped to {}x{} (requested {}x{})",
                size.width,
                size.height,
                requested.width,
                requested.height
            );
        } else if size != self.size {
            log::debug!("[frame] resize {}x{}", size.width, size.height);
        }
        self.size = size;
        self.uniforms.set_resolution(size);
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.target.release();
        log::debug!("[frame] released after {} frames", self.frames);
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Consecutive failed draws; zero after any successful one.
    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
