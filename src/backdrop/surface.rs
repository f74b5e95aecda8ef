//! Drawing surface abstraction the animator paints onto.
//!
//! The shape mirrors a 2D canvas: a surface with a logical size and a
//! separately sized backing store, plus a stateful drawing context.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientShape {
    Linear {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
    },
    /// Concentric radial gradient; the outer circle shares the inner center.
    Radial {
        cx: f32,
        cy: f32,
        r0: f32,
        r1: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub shape: GradientShape,
    pub stops: Vec<ColorStop>,
}

impl Gradient {
    #[must_use]
    pub fn linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            shape: GradientShape::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    #[must_use]
    pub fn radial(cx: f32, cy: f32, r0: f32, r1: f32) -> Self {
        Self {
            shape: GradientShape::Radial { cx, cy, r0, r1 },
            stops: Vec::new(),
        }
    }

    #[must_use]
    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        let stop = ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        };
        let idx = self.stops.partition_point(|s| s.offset <= stop.offset);
        self.stops.insert(idx, stop);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(Gradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Self::Gradient(gradient)
    }
}

/// 2x3 affine transform, laid out like a canvas `setTransform(a, b, c, d, e, f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    #[must_use]
    pub const fn scale(factor: f32) -> Self {
        Self {
            a: factor,
            b: 0.0,
            c: 0.0,
            d: factor,
            e: 0.0,
            f: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LogicalSize {
    pub width: f32,
    pub height: f32,
}

impl LogicalSize {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Stateful 2D drawing context. Coordinates are user space; the current
/// transform maps them to backing-store pixels.
pub trait DrawContext {
    fn set_transform(&mut self, transform: Transform);
    fn set_fill_style(&mut self, paint: Paint);
    fn set_stroke_style(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Adds an arc as its own closed subpath. `fill` covers the union of subpaths.
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Gradient {
        Gradient::linear(x0, y0, x1, y1)
    }

    fn create_radial_gradient(&self, cx: f32, cy: f32, r0: f32, r1: f32) -> Gradient {
        Gradient::radial(cx, cy, r0, r1)
    }
}

pub trait Surface {
    fn logical_size(&self) -> LogicalSize;
    fn device_pixel_ratio(&self) -> f32;
    fn backing_size(&self) -> (u32, u32);
    /// Resizing the backing store resets the context transform to identity.
    fn set_backing_size(&mut self, width: u32, height: u32);
    fn context(&mut self) -> &mut dyn DrawContext;
}
