#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

//! `tiny-skia` backed surface for the terminal backdrop. One backing pixel
//! maps to one half of a terminal cell.

use std::f32::consts::{FRAC_PI_2, TAU};

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, PathBuilder, Pixmap, Point, RadialGradient,
    Rect, Shader, SpreadMode, Stroke,
};

use crate::backdrop::surface::{
    DrawContext, Gradient, GradientShape, LogicalSize, Paint, Rgba, Surface, Transform,
};

/// Path commands recorded between `begin_path` and `fill`/`stroke`.
#[derive(Debug, Clone, Copy)]
enum PathOp {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc {
        cx: f32,
        cy: f32,
        radius: f32,
        start: f32,
        end: f32,
    },
}

pub struct RasterSurface {
    cols: u16,
    rows: u16,
    cell_size_px: f32,
    pixmap: Option<Pixmap>,
    transform: tiny_skia::Transform,
    fill_style: Paint,
    stroke_style: Paint,
    line_width: f32,
    path: Vec<PathOp>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("cell_size_px", &self.cell_size_px)
            .field("backing", &self.backing_size())
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    /// Returns `None` when the terminal has no usable area.
    #[must_use]
    pub fn for_cells(cols: u16, rows: u16, cell_size_px: f32) -> Option<Self> {
        if cols == 0 || rows == 0 || !(cell_size_px.is_finite() && cell_size_px >= 1.0) {
            return None;
        }
        Some(Self {
            cols,
            rows,
            cell_size_px,
            pixmap: None,
            transform: tiny_skia::Transform::identity(),
            fill_style: Paint::Solid(Rgba::rgb(0, 0, 0)),
            stroke_style: Paint::Solid(Rgba::rgb(0, 0, 0)),
            line_width: 1.0,
            path: Vec::new(),
        })
    }

    /// Updates the logical size after a terminal resize. The backing store is
    /// left alone until the owner re-measures.
    pub fn resize_cells(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    #[must_use]
    pub fn cells(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Opaque RGB at a backing pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some((color.red(), color.green(), color.blue()))
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for op in &self.path {
            match *op {
                PathOp::MoveTo(x, y) => pb.move_to(x, y),
                PathOp::LineTo(x, y) => pb.line_to(x, y),
                PathOp::Arc {
                    cx,
                    cy,
                    radius,
                    start,
                    end,
                } => push_arc(&mut pb, cx, cy, radius, start, end),
            }
        }
        pb.finish()
    }

    /// Stroke width in user space, widened so a line covers at least one
    /// backing pixel.
    fn device_line_width(&self) -> f32 {
        let t = self.transform;
        let scale = (t.sx * t.sy - t.kx * t.ky).abs().sqrt();
        if scale > 0.0 {
            self.line_width.max(1.0 / scale)
        } else {
            self.line_width
        }
    }
}

impl Surface for RasterSurface {
    fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(
            f32::from(self.cols) * self.cell_size_px,
            f32::from(self.rows) * 2.0 * self.cell_size_px,
        )
    }

    fn device_pixel_ratio(&self) -> f32 {
        1.0 / self.cell_size_px
    }

    fn backing_size(&self) -> (u32, u32) {
        self.pixmap
            .as_ref()
            .map_or((0, 0), |pixmap| (pixmap.width(), pixmap.height()))
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.pixmap = Pixmap::new(width, height).map(|mut pixmap| {
            pixmap.fill(Color::BLACK);
            pixmap
        });
        self.transform = tiny_skia::Transform::identity();
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        self
    }
}

impl DrawContext for RasterSurface {
    fn set_transform(&mut self, transform: Transform) {
        self.transform = to_skia_transform(transform);
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.fill_style = paint;
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.stroke_style = paint;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let Some(rect) = Rect::from_ltrb(
            x.min(x + width),
            y.min(y + height),
            x.max(x + width),
            y.max(y + height),
        ) else {
            return;
        };
        let Some(paint) = skia_paint(&self.fill_style) else {
            return;
        };
        let transform = self.transform;
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_rect(rect, &paint, transform, None);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(PathOp::LineTo(x, y));
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.push(PathOp::Arc {
            cx,
            cy,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn fill(&mut self) {
        let (Some(path), Some(paint)) = (self.build_path(), skia_paint(&self.fill_style)) else {
            return;
        };
        let transform = self.transform;
        if let Some(pixmap) = self.pixmap.as_mut() {
            // Arc subpaths share a winding direction, so non-zero covers their union.
            pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    fn stroke(&mut self) {
        let (Some(path), Some(paint)) = (self.build_path(), skia_paint(&self.stroke_style)) else {
            return;
        };
        let stroke = Stroke {
            width: self.device_line_width(),
            ..Stroke::default()
        };
        let transform = self.transform;
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

/// Adds an arc as a closed subpath. Full turns become circles; partial
/// sweeps are approximated with one cubic per quarter turn.
fn push_arc(pb: &mut PathBuilder, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
    let radius = radius.max(0.0);
    let sweep = (end - start).clamp(-TAU, TAU);
    if sweep.abs() >= TAU - 1e-4 {
        pb.push_circle(cx, cy, radius);
        return;
    }
    let steps = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / steps as f32;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    let mut a0 = start;
    pb.move_to(cx + radius * a0.cos(), cy + radius * a0.sin());
    for _ in 0..steps {
        let a1 = a0 + step;
        let (c0, s0, c1, s1) = (a0.cos(), a0.sin(), a1.cos(), a1.sin());
        pb.cubic_to(
            cx + radius * (c0 - k * s0),
            cy + radius * (s0 + k * c0),
            cx + radius * (c1 + k * s1),
            cy + radius * (s1 - k * c1),
            cx + radius * c1,
            cy + radius * s1,
        );
        a0 = a1;
    }
    pb.close();
}

fn to_skia_transform(t: Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(t.a, t.b, t.c, t.d, t.e, t.f)
}

fn to_skia_color(color: Rgba) -> Color {
    let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::from_rgba8(color.r, color.g, color.b, alpha)
}

fn skia_paint(paint: &Paint) -> Option<tiny_skia::Paint<'static>> {
    let shader = match paint {
        Paint::Solid(color) => Shader::SolidColor(to_skia_color(*color)),
        Paint::Gradient(gradient) => gradient_shader(gradient)?,
    };
    Some(tiny_skia::Paint {
        shader,
        anti_alias: true,
        ..tiny_skia::Paint::default()
    })
}

/// Gradients are defined in user space; the draw transform carries them to
/// the backing store along with the geometry.
fn gradient_shader(gradient: &Gradient) -> Option<Shader<'static>> {
    match gradient.shape {
        GradientShape::Linear { x0, y0, x1, y1 } => LinearGradient::new(
            Point::from_xy(x0, y0),
            Point::from_xy(x1, y1),
            skia_stops(gradient, |offset| offset),
            SpreadMode::Pad,
            tiny_skia::Transform::identity(),
        ),
        GradientShape::Radial { cx, cy, r0, r1 } => {
            if r1 <= r0 || r1 <= 0.0 {
                return None;
            }
            let center = Point::from_xy(cx, cy);
            // Stops are relative to the ring r0..r1; the shader measures from the center.
            let inner = r0.max(0.0) / r1;
            RadialGradient::new(
                center,
                center,
                r1,
                skia_stops(gradient, |offset| inner + offset * (1.0 - inner)),
                SpreadMode::Pad,
                tiny_skia::Transform::identity(),
            )
        }
    }
}

fn skia_stops(gradient: &Gradient, remap: impl Fn(f32) -> f32) -> Vec<GradientStop> {
    gradient
        .stops
        .iter()
        .map(|stop| GradientStop::new(remap(stop.offset), to_skia_color(stop.color)))
        .collect()
}
