use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    clouds::CloudField,
    particles::{DEFAULT_PARTICLE_CAP, ParticleField},
    scene::{FrameState, SceneRenderer},
    surface::{LogicalSize, Surface, Transform},
    theme::Theme,
};

/// Fallback size used to lay out clouds before a surface has been measured.
const REFERENCE_SIZE: LogicalSize = LogicalSize::new(1280.0, 720.0);

/// Host primitive that delivers the next display frame back to
/// [`AnimationController::on_frame`]. Multiple requests before a frame is
/// served must collapse into one.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub logical: LogicalSize,
    pub ratio: f32,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::measure(LogicalSize::default(), 1.0)
    }
}

impl Viewport {
    #[must_use]
    pub fn measure(logical: LogicalSize, ratio: f32) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        };
        let logical = LogicalSize::new(logical.width.max(0.0), logical.height.max(0.0));
        Self {
            logical,
            ratio,
            backing_width: (logical.width * ratio).round() as u32,
            backing_height: (logical.height * ratio).round() as u32,
        }
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::scale(self.ratio)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub particle_cap: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            particle_cap: DEFAULT_PARTICLE_CAP,
        }
    }
}

/// Owns the backdrop: theme, simulation fields, surface and the frame loop.
pub struct AnimationController<S, R = StdRng> {
    surface: Option<S>,
    viewport: Viewport,
    theme: Option<Theme>,
    particles: ParticleField,
    clouds: CloudField,
    renderer: SceneRenderer,
    scheduler: Box<dyn FrameScheduler + Send>,
    rng: R,
    running: bool,
    stopped: bool,
    frames: u64,
}

impl<S, R> std::fmt::Debug for AnimationController<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("bound", &self.surface.is_some())
            .field("viewport", &self.viewport)
            .field("theme", &self.theme)
            .field("particles", &self.particles.len())
            .field("clouds", &self.clouds.len())
            .field("running", &self.running)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> AnimationController<S, StdRng> {
    pub fn with_seed(
        config: ControllerConfig,
        scheduler: Box<dyn FrameScheduler + Send>,
        seed: Option<u64>,
    ) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self::new(config, scheduler, rng)
    }
}

impl<S: Surface, R: Rng> AnimationController<S, R> {
    pub fn new(
        config: ControllerConfig,
        scheduler: Box<dyn FrameScheduler + Send>,
        rng: R,
    ) -> Self {
        Self {
            surface: None,
            viewport: Viewport::default(),
            theme: None,
            particles: ParticleField::new(config.particle_cap),
            clouds: CloudField::default(),
            renderer: SceneRenderer,
            scheduler,
            rng,
            running: false,
            stopped: false,
            frames: 0,
        }
    }

    /// Binds the drawing surface. `None` leaves the controller inert: it keeps
    /// theme state but never schedules frames. Later calls after a successful
    /// bind are ignored.
    pub fn initialize(&mut self, surface: Option<S>) {
        if self.surface.is_some() {
            debug!("backdrop already initialized; ignoring surface");
            return;
        }
        let Some(surface) = surface else {
            info!("no drawing surface available; backdrop disabled");
            return;
        };
        self.surface = Some(surface);
        self.on_resize();
        if let Some(theme) = self.theme {
            // Clouds laid out before binding used the fallback size.
            let size = self.layout_size();
            self.clouds.reseed(theme.profile().clouds, size, &mut self.rng);
            self.start_loop();
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        let profile = theme.profile();
        self.theme = Some(theme);
        self.particles.configure(profile.rain_intensity, profile.wind);
        let size = self.layout_size();
        self.clouds.reseed(profile.clouds, size, &mut self.rng);
        info!(
            "backdrop theme set to {theme} (clouds={}, intensity={}, wind={})",
            profile.clouds, profile.rain_intensity, profile.wind
        );
        self.start_loop();
    }

    /// Re-measures the surface and rescales the drawing transform to match
    /// the new backing store.
    pub fn on_resize(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let viewport = Viewport::measure(surface.logical_size(), surface.device_pixel_ratio());
        surface.set_backing_size(viewport.backing_width, viewport.backing_height);
        surface.context().set_transform(viewport.transform());
        debug!(
            "backdrop resized to {}x{} logical, {}x{} backing (ratio {})",
            viewport.logical.width,
            viewport.logical.height,
            viewport.backing_width,
            viewport.backing_height,
            viewport.ratio
        );
        self.viewport = viewport;
        let steady = self.particles.steady_state_count(viewport.logical);
        if steady > self.particles.cap() {
            warn!(
                "particle cap {} below steady-state {steady}; rain thins near the bottom",
                self.particles.cap()
            );
        }
    }

    /// Renders one frame and asks for the next while the loop is running.
    pub fn on_frame(&mut self) {
        if !self.running {
            return;
        }
        let (Some(surface), Some(theme)) = (self.surface.as_mut(), self.theme) else {
            self.running = false;
            return;
        };
        self.renderer.render(
            theme,
            surface.context(),
            FrameState {
                size: self.viewport.logical,
                particles: &mut self.particles,
                clouds: &mut self.clouds,
                rng: &mut self.rng,
            },
        );
        self.frames = self.frames.saturating_add(1);
        self.scheduler.request_frame();
    }

    /// Stops requesting frames. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            debug!("backdrop loop stopped after {} frames", self.frames);
        }
        self.running = false;
        self.stopped = true;
    }

    /// Restarts a loop previously halted with [`Self::stop`].
    pub fn resume(&mut self) {
        self.stopped = false;
        if self.theme.is_some() {
            self.start_loop();
        }
    }

    fn start_loop(&mut self) {
        if self.running || self.stopped || self.surface.is_none() {
            return;
        }
        self.running = true;
        self.scheduler.request_frame();
    }

    fn layout_size(&self) -> LogicalSize {
        if self.viewport.logical.is_empty() {
            REFERENCE_SIZE
        } else {
            self.viewport.logical
        }
    }

    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    #[must_use]
    pub fn clouds(&self) -> &CloudField {
        &self.clouds
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Host-side access for layout changes; call [`Self::on_resize`] afterwards.
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }
}
