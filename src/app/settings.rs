use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{backdrop::particles::DEFAULT_PARTICLE_CAP, cli::Cli};

pub const DEFAULT_FPS: u8 = 30;
pub const DEFAULT_CELL_SIZE_PX: f32 = 8.0;
pub const DEFAULT_REFRESH_SECS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub fps: u8,
    pub cell_size_px: f32,
    pub particle_cap: usize,
    pub refresh_interval_secs: u64,
    pub show_status: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            cell_size_px: DEFAULT_CELL_SIZE_PX,
            particle_cap: DEFAULT_PARTICLE_CAP,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            show_status: true,
        }
    }
}

impl RuntimeSettings {
    /// Layers explicit command-line values over `self`.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(fps) = cli.fps {
            self.fps = fps;
        }
        if let Some(size) = cli.cell_size {
            self.cell_size_px = size;
        }
        if let Some(cap) = cli.particle_cap {
            self.particle_cap = cap;
        }
        if let Some(secs) = cli.refresh_interval {
            self.refresh_interval_secs = secs;
        }
        if cli.no_status {
            self.show_status = false;
        }
        self.sanitized()
    }

    fn sanitized(mut self) -> Self {
        self.fps = self.fps.clamp(15, 60);
        if !(self.cell_size_px.is_finite() && self.cell_size_px >= 1.0) {
            self.cell_size_px = DEFAULT_CELL_SIZE_PX;
        }
        self.particle_cap = self.particle_cap.max(1);
        self.refresh_interval_secs = self.refresh_interval_secs.max(10);
        self
    }
}

/// Reads saved settings from the default location and applies CLI overrides.
pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    let path = if enable_disk { settings_path() } else { None };
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let saved = path
        .and_then(|path| fs::read_to_string(path).ok().map(|content| (path, content)))
        .and_then(|(path, content)| {
            match serde_json::from_str::<RuntimeSettings>(&content) {
                Ok(saved) => {
                    debug!("loaded settings from {}", path.display());
                    Some(saved)
                }
                Err(err) => {
                    warn!("ignoring unreadable settings {}: {err}", path.display());
                    None
                }
            }
        })
        .unwrap_or_default();
    saved.with_cli_overrides(cli)
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("WEATHER_BACKDROP_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-backdrop")
            .join("settings.json"),
    )
}
