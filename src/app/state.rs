use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, FrameSignal, start_frame_task, start_refresh_task},
        settings::{RuntimeSettings, load_runtime_settings, save_runtime_settings},
    },
    backdrop::{AnimationController, ControllerConfig, Theme},
    cli::Cli,
    data::{forecast::ForecastClient, geocode::GeocodeClient},
    domain::weather::{ConditionsReport, Location, weather_code_to_theme},
    ui::raster::RasterSurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub backdrop: AnimationController<RasterSurface>,
    pub report: Option<ConditionsReport>,
    pub last_error: Option<String>,
    /// Theme chosen with the number keys; wins over the weather.
    pub forced_theme: Option<Theme>,
    /// Theme derived from the command line or the latest conditions.
    pub weather_theme: Option<Theme>,
    pub settings: RuntimeSettings,
    pub settings_path: Option<PathBuf>,
    pub fetch_in_flight: bool,
    frame_signal: FrameSignal,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let (settings, settings_path) = load_runtime_settings(cli, true);
        Self::with_settings(cli, settings, settings_path)
    }

    pub fn with_settings(
        cli: &Cli,
        settings: RuntimeSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let frame_signal = FrameSignal::default();
        let backdrop = AnimationController::with_seed(
            ControllerConfig {
                particle_cap: settings.particle_cap,
            },
            Box::new(frame_signal.clone()),
            cli.seed,
        );
        Self {
            mode: AppMode::Loading,
            running: true,
            backdrop,
            report: None,
            last_error: None,
            forced_theme: None,
            weather_theme: cli.fixed_theme(),
            settings,
            settings_path,
            fetch_in_flight: false,
            frame_signal,
        }
    }

    /// Binds or resizes the backdrop surface for a terminal of `cols` x `rows`.
    pub fn attach_surface(&mut self, cols: u16, rows: u16) {
        if let Some(surface) = self.backdrop.surface_mut() {
            surface.resize_cells(cols, rows);
            self.backdrop.on_resize();
            return;
        }
        let surface = RasterSurface::for_cells(cols, rows, self.settings.cell_size_px);
        self.backdrop.initialize(surface);
    }

    #[must_use]
    pub fn frame_signal(&self) -> &FrameSignal {
        &self.frame_signal
    }

    #[must_use]
    pub fn effective_theme(&self) -> Option<Theme> {
        self.forced_theme.or(self.weather_theme)
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                cli.validate()?;
                self.persist_settings(cli);
                start_frame_task(tx.clone(), self.settings.fps, self.frame_signal.clone());
                self.apply_theme();
                if cli.wants_lookup() {
                    start_refresh_task(tx.clone(), self.settings.refresh_interval_secs);
                    self.start_fetch(tx, cli).await?;
                } else {
                    self.mode = AppMode::Ready;
                }
            }
            AppEvent::TickFrame => self.backdrop.on_frame(),
            AppEvent::TickRefresh => {
                if cli.wants_lookup() {
                    self.start_fetch(tx, cli).await?;
                }
            }
            AppEvent::Input(event) => self.handle_input(event, tx, cli).await?,
            AppEvent::FetchStarted => {
                self.fetch_in_flight = true;
                if self.report.is_none() {
                    self.mode = AppMode::Loading;
                }
            }
            AppEvent::ConditionsFetched(report) => {
                self.fetch_in_flight = false;
                let theme = weather_code_to_theme(report.current.weather_code);
                info!(
                    "conditions for {}: {} (code {}) -> {theme}",
                    report.location.display_name(),
                    report.current.label(),
                    report.current.weather_code
                );
                self.weather_theme = Some(theme);
                self.report = Some(report);
                self.last_error = None;
                self.mode = AppMode::Ready;
                self.apply_theme();
            }
            AppEvent::FetchFailed(err) => {
                warn!("weather lookup failed: {err}");
                self.fetch_in_flight = false;
                self.last_error = Some(err);
                self.mode = AppMode::Error;
            }
            AppEvent::Quit => {
                self.backdrop.stop();
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Char('r') => {
                    if cli.wants_lookup() {
                        self.start_fetch(tx, cli).await?;
                    }
                }
                KeyCode::Char('p' | ' ') => self.toggle_pause(),
                KeyCode::Char('0') => {
                    self.forced_theme = None;
                    self.apply_theme();
                }
                KeyCode::Char(digit @ '1'..='4') => {
                    let idx = (digit as usize) - ('1' as usize);
                    self.forced_theme = Theme::ALL.get(idx).copied();
                    self.apply_theme();
                }
                _ => {}
            },
            Event::Resize(cols, rows) => self.attach_surface(cols, rows),
            _ => {}
        }

        Ok(())
    }

    fn toggle_pause(&mut self) {
        if self.backdrop.is_stopped() {
            info!("backdrop resumed");
            self.backdrop.resume();
        } else {
            info!("backdrop paused");
            self.backdrop.stop();
        }
    }

    /// Pushes the effective theme into the backdrop when it changed.
    fn apply_theme(&mut self) {
        if let Some(theme) = self.effective_theme()
            && self.backdrop.theme() != Some(theme)
        {
            self.backdrop.set_theme(theme);
        }
    }

    fn persist_settings(&self, cli: &Cli) {
        if !cli.save_settings {
            return;
        }
        let Some(path) = self.settings_path.as_deref() else {
            warn!("no settings location available; not saving");
            return;
        };
        match save_runtime_settings(path, &self.settings) {
            Ok(()) => info!("saved settings to {}", path.display()),
            Err(err) => warn!("saving settings failed: {err:#}"),
        }
    }

    async fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) -> Result<()> {
        if self.fetch_in_flight {
            debug!("lookup already in flight");
            return Ok(());
        }
        self.fetch_in_flight = true;
        tx.send(AppEvent::FetchStarted).await?;

        let known = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => Some(Location::from_coords(lat, lon)),
            _ => self.report.as_ref().map(|report| report.location.clone()),
        };
        let city = cli.default_city();
        let geocoder = cli
            .geocode_url
            .clone()
            .map_or_else(GeocodeClient::new, GeocodeClient::with_base_url);
        let forecaster = cli
            .forecast_url
            .clone()
            .map_or_else(ForecastClient::new, ForecastClient::with_base_url);
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match lookup(&geocoder, &forecaster, known, &city).await {
                Ok(report) => AppEvent::ConditionsFetched(report),
                Err(err) => AppEvent::FetchFailed(format!("{err:#}")),
            };
            let _ = tx2.send(event).await;
        });

        Ok(())
    }
}

async fn lookup(
    geocoder: &GeocodeClient,
    forecaster: &ForecastClient,
    known: Option<Location>,
    city: &str,
) -> Result<ConditionsReport> {
    let location = match known {
        Some(location) => location,
        None => geocoder
            .resolve(city)
            .await?
            .ok_or_else(|| anyhow::anyhow!("No geocoding result for {city}"))?,
    };
    let current = forecaster.fetch_current(&location).await?;
    Ok(ConditionsReport { location, current })
}
