use std::f32::consts::TAU;

use rand::Rng;

use super::{
    clouds::{Cloud, CloudField},
    particles::ParticleField,
    surface::{DrawContext, LogicalSize, Rgba},
    theme::Theme,
};

/// Drift speed of the faint cloud overlay on clear skies, in px per frame.
pub const CLEAR_DRIFT: f32 = 0.12;
const CLEAR_OVERLAY_ALPHA: f32 = 0.35;

struct SkyPalette {
    top: Rgba,
    bottom: Rgba,
}

const CLEAR_SKY: SkyPalette = SkyPalette {
    top: Rgba::rgb(120, 186, 236),
    bottom: Rgba::rgb(236, 245, 252),
};
const CLOUDY_SKY: SkyPalette = SkyPalette {
    top: Rgba::rgb(132, 142, 156),
    bottom: Rgba::rgb(204, 209, 217),
};
const RAIN_SKY: SkyPalette = SkyPalette {
    top: Rgba::rgb(72, 88, 110),
    bottom: Rgba::rgb(140, 155, 173),
};
const STORM_SKY: SkyPalette = SkyPalette {
    top: Rgba::rgb(24, 28, 40),
    bottom: Rgba::rgb(66, 74, 92),
};

const SUN_GLOW: Rgba = Rgba::rgb(255, 242, 190);
const CLOUD_WHITE: Rgba = Rgba::rgb(246, 248, 251);
const CLOUD_GRAY: Rgba = Rgba::rgb(232, 235, 240);
const RAIN_STREAK: Rgba = Rgba::rgb(196, 214, 236);
const STORM_STREAK: Rgba = Rgba::rgb(168, 188, 222);

/// Mutable simulation state a single frame reads and advances.
pub struct FrameState<'a, R: Rng + ?Sized> {
    pub size: LogicalSize,
    pub particles: &'a mut ParticleField,
    pub clouds: &'a mut CloudField,
    pub rng: &'a mut R,
}

/// Paints one theme per frame. Simulation steps run before any draw call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SceneRenderer;

impl SceneRenderer {
    pub fn render<R: Rng + ?Sized>(
        &self,
        theme: Theme,
        ctx: &mut dyn DrawContext,
        state: FrameState<'_, R>,
    ) {
        advance(theme, state.size, state.particles, state.clouds, state.rng);
        match theme {
            Theme::Clear => draw_clear(ctx, state.size, state.clouds),
            Theme::Cloudy => draw_cloudy(ctx, state.size, state.clouds),
            Theme::Rain => draw_wet(ctx, state.size, state.particles, &RAIN_SKY, RAIN_STREAK),
            Theme::Storm => draw_wet(ctx, state.size, state.particles, &STORM_SKY, STORM_STREAK),
        }
    }
}

fn advance<R: Rng + ?Sized>(
    theme: Theme,
    size: LogicalSize,
    particles: &mut ParticleField,
    clouds: &mut CloudField,
    rng: &mut R,
) {
    match theme {
        Theme::Clear => clouds.drift_uniform(CLEAR_DRIFT, size, rng),
        Theme::Cloudy => clouds.drift(size, rng),
        Theme::Rain | Theme::Storm => {
            let count = particles.spawn_count(size);
            particles.spawn(count, size, rng);
            particles.advance();
            particles.prune(size.height);
        }
    }
}

fn paint_sky(ctx: &mut dyn DrawContext, size: LogicalSize, palette: &SkyPalette) {
    let gradient = ctx
        .create_linear_gradient(0.0, 0.0, 0.0, size.height)
        .stop(0.0, palette.top)
        .stop(1.0, palette.bottom);
    ctx.set_fill_style(gradient.into());
    ctx.fill_rect(0.0, 0.0, size.width, size.height);
}

fn draw_clear(ctx: &mut dyn DrawContext, size: LogicalSize, clouds: &CloudField) {
    paint_sky(ctx, size, &CLEAR_SKY);
    paint_sun_glow(ctx, size);
    for cloud in clouds.iter() {
        paint_cloud(ctx, cloud, CLOUD_WHITE, cloud.opacity * CLEAR_OVERLAY_ALPHA);
    }
}

fn paint_sun_glow(ctx: &mut dyn DrawContext, size: LogicalSize) {
    let (cx, cy) = (size.width * 0.18, size.height * 0.16);
    let radius = size.width.min(size.height) * 0.35;
    let glow = ctx
        .create_radial_gradient(cx, cy, 0.0, radius)
        .stop(0.0, SUN_GLOW.with_alpha(0.9))
        .stop(0.35, SUN_GLOW.with_alpha(0.45))
        .stop(1.0, SUN_GLOW.with_alpha(0.0));
    ctx.set_fill_style(glow.into());
    ctx.fill_rect(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
}

fn draw_cloudy(ctx: &mut dyn DrawContext, size: LogicalSize, clouds: &CloudField) {
    paint_sky(ctx, size, &CLOUDY_SKY);
    for cloud in clouds.iter() {
        paint_cloud(ctx, cloud, CLOUD_GRAY, cloud.opacity);
    }
}

/// Three overlapping bumps: left, taller centre-left, right.
fn paint_cloud(ctx: &mut dyn DrawContext, cloud: &Cloud, color: Rgba, alpha: f32) {
    let (x, y, w, h) = (cloud.x, cloud.y, cloud.width, cloud.height);
    ctx.set_fill_style(color.with_alpha(alpha).into());
    ctx.begin_path();
    ctx.arc(x + w * 0.25, y + h * 0.62, h * 0.38, 0.0, TAU);
    ctx.arc(x + w * 0.45, y + h * 0.45, h * 0.5, 0.0, TAU);
    ctx.arc(x + w * 0.72, y + h * 0.6, h * 0.4, 0.0, TAU);
    ctx.fill();
}

fn draw_wet(
    ctx: &mut dyn DrawContext,
    size: LogicalSize,
    particles: &ParticleField,
    palette: &SkyPalette,
    streak: Rgba,
) {
    paint_sky(ctx, size, palette);
    let wind = particles.wind();
    ctx.set_line_width(1.0);
    for p in particles.iter() {
        ctx.set_stroke_style(streak.with_alpha(p.opacity).into());
        ctx.begin_path();
        ctx.move_to(p.x, p.y);
        ctx.line_to(p.x + wind, p.y + p.length);
        ctx.stroke();
    }
}
