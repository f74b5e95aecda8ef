use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    backdrop::{
        FrameScheduler,
        surface::{DrawContext, LogicalSize, Paint, Surface, Transform},
    },
    cli::Cli,
    domain::weather::{CurrentConditions, Location},
};

pub(crate) fn test_cli() -> Cli {
    Cli {
        city: None,
        lat: None,
        lon: None,
        theme: None,
        weather_code: None,
        fps: None,
        cell_size: None,
        particle_cap: None,
        seed: Some(7),
        refresh_interval: None,
        no_status: false,
        geocode_url: None,
        forecast_url: None,
        log_file: None,
        save_settings: false,
    }
}

pub(crate) fn stockholm_location() -> Location {
    Location {
        name: "Stockholm".to_string(),
        latitude: 59.3293,
        longitude: 18.0686,
        country: Some("Sweden".to_string()),
        admin1: Some("Stockholm".to_string()),
    }
}

pub(crate) fn sample_conditions(weather_code: u8) -> CurrentConditions {
    CurrentConditions {
        temperature_2m_c: 7.0,
        relative_humidity_2m: 72.0,
        precipitation_mm: 0.4,
        wind_speed_10m: 10.0,
        pressure_msl_hpa: 1008.0,
        weather_code,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
    SetTransform(Transform),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// One filled path; `arcs` counts the arc subpaths it was built from.
    Fill {
        arcs: usize,
    },
    /// One stroked path with its points in user space.
    Stroke(Vec<(f32, f32)>),
}

/// `Surface` double that records draw calls instead of rasterizing them.
#[derive(Debug)]
pub(crate) struct RecordingSurface {
    pub logical: LogicalSize,
    pub ratio: f32,
    pub backing_size: (u32, u32),
    pub transform: Transform,
    pub ops: Vec<DrawOp>,
    path: Vec<(f32, f32)>,
    arcs: usize,
}

impl RecordingSurface {
    pub(crate) fn new(logical: LogicalSize, ratio: f32) -> Self {
        Self {
            logical,
            ratio,
            backing_size: (0, 0),
            transform: Transform::IDENTITY,
            ops: Vec::new(),
            path: Vec::new(),
            arcs: 0,
        }
    }
}

impl Surface for RecordingSurface {
    fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.ratio
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing_size
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing_size = (width, height);
        self.transform = Transform::IDENTITY;
    }

    fn context(&mut self) -> &mut dyn DrawContext {
        self
    }
}

impl DrawContext for RecordingSurface {
    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.ops.push(DrawOp::SetTransform(transform));
    }

    fn set_fill_style(&mut self, _paint: Paint) {}

    fn set_stroke_style(&mut self, _paint: Paint) {}

    fn set_line_width(&mut self, _width: f32) {}

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.arcs = 0;
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push((x, y));
    }

    fn arc(&mut self, _cx: f32, _cy: f32, _radius: f32, _start_angle: f32, _end_angle: f32) {
        self.arcs += 1;
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill { arcs: self.arcs });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke(self.path.clone()));
    }
}

/// Scheduler that only counts frame requests.
#[derive(Debug, Clone, Default)]
pub(crate) struct CountingScheduler {
    requests: Arc<AtomicUsize>,
}

impl CountingScheduler {
    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}
