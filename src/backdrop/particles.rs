use std::collections::VecDeque;

use rand::Rng;

use super::surface::LogicalSize;

/// Drops spawned per frame at full intensity on the reference surface.
pub const BASE_SPAWN_RATE: f32 = 28.0;
pub const MIN_SPAWN_PER_FRAME: usize = 8;
pub const REFERENCE_AREA: f32 = 1280.0 * 720.0;
/// Distance past the bottom edge at which a drop is discarded.
pub const REMOVAL_MARGIN: f32 = 20.0;
/// Share of the wind applied to a drop's x position each frame.
pub const WIND_DRIFT: f32 = 0.5;
pub const MIN_VELOCITY: f32 = 9.0;
pub const MAX_VELOCITY: f32 = 16.0;
/// Drops spawn up to this far above the top edge.
pub const SPAWN_HEADROOM: f32 = 40.0;
/// Covers a full-height storm on the reference surface with room to spare,
/// so drops leave through the bottom margin rather than the cap.
pub const DEFAULT_PARTICLE_CAP: usize = 8000;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub length: f32,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct ParticleField {
    particles: VecDeque<Particle>,
    cap: usize,
    intensity: f32,
    wind: f32,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICLE_CAP)
    }
}

impl ParticleField {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            particles: VecDeque::new(),
            cap: cap.max(1),
            intensity: 0.0,
            wind: 0.0,
        }
    }

    /// Drops every particle and installs the rain parameters of a new theme.
    pub fn configure(&mut self, intensity: f32, wind: f32) {
        self.particles.clear();
        self.intensity = intensity.max(0.0);
        self.wind = wind;
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    #[must_use]
    pub fn wind(&self) -> f32 {
        self.wind
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Per-frame spawn budget, scaled by surface area so density looks the
    /// same at any resolution.
    #[must_use]
    pub fn spawn_count(&self, size: LogicalSize) -> usize {
        if self.intensity <= 0.0 || size.is_empty() {
            return 0;
        }
        let area_ratio = (size.width * size.height) / REFERENCE_AREA;
        let scaled = (self.intensity * BASE_SPAWN_RATE * area_ratio).floor() as usize;
        scaled.max(MIN_SPAWN_PER_FRAME)
    }

    /// Upper bound on live drops once spawning and pruning balance out: the
    /// slowest drop stays on screen for the whole fall.
    #[must_use]
    pub fn steady_state_count(&self, size: LogicalSize) -> usize {
        let fall = size.height.max(0.0) + REMOVAL_MARGIN + SPAWN_HEADROOM;
        self.spawn_count(size) * (fall / MIN_VELOCITY).ceil() as usize
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, count: usize, size: LogicalSize, rng: &mut R) {
        // Upwind overshoot so slanted streaks also cover the downwind edge.
        let reach = size.width.max(1.0) + self.wind.abs() * 40.0;
        for _ in 0..count {
            let particle = Particle {
                x: rng.random_range(0.0..reach),
                y: rng.random_range(-SPAWN_HEADROOM..0.0),
                velocity: rng.random_range(MIN_VELOCITY..MAX_VELOCITY),
                length: rng.random_range(10.0..22.0),
                opacity: rng.random_range(0.25..0.6),
            };
            self.push(particle);
        }
    }

    /// Appends a particle, discarding the oldest ones beyond the cap.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push_back(particle);
        while self.particles.len() > self.cap {
            self.particles.pop_front();
        }
    }

    pub fn advance(&mut self) {
        let drift = self.wind * WIND_DRIFT;
        for p in &mut self.particles {
            p.y += p.velocity;
            p.x += drift;
        }
    }

    pub fn prune(&mut self, surface_height: f32) {
        let limit = surface_height + REMOVAL_MARGIN;
        self.particles.retain(|p| p.y < limit);
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn drop_at(y: f32, velocity: f32) -> Particle {
        Particle {
            x: 100.0,
            y,
            velocity,
            length: 12.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn spawn_count_matches_storm_reference() {
        let mut field = ParticleField::default();
        field.configure(1.4, -4.5);
        assert_eq!(field.spawn_count(LogicalSize::new(1280.0, 720.0)), 39);
    }

    #[test]
    fn spawn_count_never_drops_below_floor() {
        let mut field = ParticleField::default();
        field.configure(0.9, -2.5);
        assert_eq!(field.spawn_count(LogicalSize::new(320.0, 200.0)), 8);
    }

    #[test]
    fn spawn_count_scales_with_area() {
        let mut field = ParticleField::default();
        field.configure(0.9, -2.5);
        // 0.9 * 28 * 4 = 100.8
        assert_eq!(field.spawn_count(LogicalSize::new(2560.0, 1440.0)), 100);
    }

    #[test]
    fn default_cap_holds_a_full_storm_on_reference_surface() {
        let mut field = ParticleField::default();
        field.configure(1.4, -4.5);
        // 39 drops per frame for ceil(780 / 9) = 87 frames
        let needed = field.steady_state_count(LogicalSize::new(1280.0, 720.0));
        assert_eq!(needed, 39 * 87);
        assert!(needed < field.cap());
    }

    #[test]
    fn dry_field_spawns_nothing() {
        let field = ParticleField::default();
        assert_eq!(field.spawn_count(LogicalSize::new(1280.0, 720.0)), 0);
    }

    #[test]
    fn push_discards_oldest_beyond_cap() {
        let mut field = ParticleField::new(3);
        for i in 0..5 {
            field.push(drop_at(i as f32, 1.0));
        }
        let ys: Vec<f32> = field.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn spawned_particles_start_above_the_surface() {
        let mut field = ParticleField::default();
        field.configure(1.4, -4.5);
        let mut rng = StdRng::seed_from_u64(7);
        field.spawn(50, LogicalSize::new(800.0, 600.0), &mut rng);
        assert_eq!(field.len(), 50);
        assert!(field.iter().all(|p| p.y < 0.0 && p.velocity > 0.0));
        assert!(field.iter().all(|p| (0.0..=1.0).contains(&p.opacity)));
    }

    #[test]
    fn advance_applies_velocity_and_wind_drift() {
        let mut field = ParticleField::default();
        field.configure(0.9, -2.5);
        field.push(drop_at(10.0, 12.0));
        field.advance();
        let p = field.iter().next().expect("particle");
        assert!((p.y - 22.0).abs() < f32::EPSILON);
        assert!((p.x - (100.0 - 2.5 * WIND_DRIFT)).abs() < f32::EPSILON);
    }

    #[test]
    fn prune_removes_only_particles_at_or_past_margin() {
        let mut field = ParticleField::default();
        field.push(drop_at(100.0 + REMOVAL_MARGIN - 0.5, 1.0));
        field.push(drop_at(100.0 + REMOVAL_MARGIN, 1.0));
        field.push(drop_at(500.0, 1.0));
        field.prune(100.0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn configure_clears_existing_particles() {
        let mut field = ParticleField::default();
        field.push(drop_at(1.0, 1.0));
        field.configure(1.4, -4.5);
        assert!(field.is_empty());
        assert!((field.wind() + 4.5).abs() < f32::EPSILON);
    }
}
