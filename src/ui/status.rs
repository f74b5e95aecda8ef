use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::{AppMode, AppState};

/// One-line summary: location, conditions, theme and drop count.
pub struct StatusLine<'a> {
    pub state: &'a AppState,
}

impl StatusLine<'_> {
    #[must_use]
    pub fn text(&self) -> String {
        let state = self.state;
        let theme = state
            .backdrop
            .theme()
            .map_or_else(|| "none".to_string(), |theme| theme.to_string());
        let forced = if state.forced_theme.is_some() { " (forced)" } else { "" };
        let paused = if state.backdrop.is_stopped() { " · paused" } else { "" };
        let drops = state.backdrop.particles().len();

        let lead = match (&state.report, state.mode) {
            (_, AppMode::Error) => format!(
                "⚠ {}",
                state.last_error.as_deref().unwrap_or("lookup failed")
            ),
            (Some(report), _) => format!(
                "{} · {} · {}°C · {}",
                report.location.display_name(),
                report.current.label(),
                report.current.rounded_temp(),
                report.current.readings()
            ),
            (None, AppMode::Loading) => "Fetching weather...".to_string(),
            (None, _) => "Offline backdrop".to_string(),
        };
        format!("{lead} · theme {theme}{forced} · drops {drops}{paused}")
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = if self.state.mode == AppMode::Error {
            Color::LightRed
        } else {
            Color::White
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.text()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " 1-4 theme · 0 live · p pause · r refresh · q quit ",
                Style::default().fg(Color::Gray),
            ),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}
