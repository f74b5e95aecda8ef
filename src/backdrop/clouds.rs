use rand::Rng;

use super::surface::LogicalSize;

/// Extra distance past the right edge a wrapped cloud may re-enter from.
pub const WRAP_JITTER: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub opacity: f32,
}

impl Cloud {
    #[must_use]
    pub fn is_off_left(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Fixed-size set of clouds on a horizontal conveyor.
#[derive(Debug, Default)]
pub struct CloudField {
    clouds: Vec<Cloud>,
}

impl CloudField {
    /// Replaces all clouds with `count` fresh ones scattered across the sky band.
    pub fn reseed<R: Rng + ?Sized>(&mut self, count: usize, size: LogicalSize, rng: &mut R) {
        let width = size.width.max(1.0);
        self.clouds.clear();
        self.clouds.extend((0..count).map(|_| {
            let cloud_w = rng.random_range(140.0..280.0);
            Cloud {
                x: rng.random_range(-cloud_w * 0.5..width),
                y: sky_band_y(size, rng),
                width: cloud_w,
                height: cloud_w * rng.random_range(0.45..0.6),
                speed: rng.random_range(0.15..0.6),
                opacity: rng.random_range(0.5..0.85),
            }
        }));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cloud> {
        self.clouds.iter()
    }

    /// Moves every cloud left by its own speed.
    pub fn drift<R: Rng + ?Sized>(&mut self, size: LogicalSize, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            wrap(cloud, size, rng);
        }
    }

    /// Moves every cloud left by the same fixed speed, ignoring per-cloud speed.
    pub fn drift_uniform<R: Rng + ?Sized>(&mut self, speed: f32, size: LogicalSize, rng: &mut R) {
        for cloud in &mut self.clouds {
            cloud.x -= speed;
            wrap(cloud, size, rng);
        }
    }
}

fn wrap<R: Rng + ?Sized>(cloud: &mut Cloud, size: LogicalSize, rng: &mut R) {
    if !cloud.is_off_left() {
        return;
    }
    cloud.x = size.width.max(0.0) + rng.random_range(0.0..WRAP_JITTER);
    cloud.y = sky_band_y(size, rng);
}

fn sky_band_y<R: Rng + ?Sized>(size: LogicalSize, rng: &mut R) -> f32 {
    let height = size.height.max(1.0);
    rng.random_range(height * 0.04..height * 0.4)
}
