pub mod background;
pub mod raster;
pub mod status;

use ratatui::{Frame, layout::Rect, style::Color};

use crate::app::state::AppState;
use background::BackdropWidget;
use status::StatusLine;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        BackdropWidget {
            surface: state.backdrop.surface(),
            fallback: Color::Black,
        },
        area,
    );

    if state.settings.show_status && area.height > 1 {
        let status_area = Rect {
            x: area.x,
            y: area.bottom().saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(StatusLine { state }, status_area);
    }
}
