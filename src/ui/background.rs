#![allow(clippy::cast_lossless)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::ui::raster::RasterSurface;

const HALF_BLOCK: &str = "▀";

/// Copies the backdrop's backing store into the buffer, two pixel rows per
/// terminal row.
pub struct BackdropWidget<'a> {
    pub surface: Option<&'a RasterSurface>,
    pub fallback: Color,
}

impl Widget for BackdropWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(surface) = self.surface else {
            paint_flat(area, buf, self.fallback);
            return;
        };
        for row in 0..area.height {
            for col in 0..area.width {
                let x = u32::from(col);
                let top = surface.pixel(x, u32::from(row) * 2);
                let bottom = surface.pixel(x, u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.map_or(self.fallback, to_color))
                        .set_bg(bottom.map_or(self.fallback, to_color));
                }
            }
        }
    }
}

fn paint_flat(area: Rect, buf: &mut Buffer, color: Color) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

fn to_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::surface::{DrawContext, Rgba, Surface};

    fn painted_surface() -> RasterSurface {
        let mut surface = RasterSurface::for_cells(2, 1, 1.0).expect("surface");
        surface.set_backing_size(2, 2);
        surface.set_fill_style(Rgba::rgb(200, 10, 10).into());
        surface.fill_rect(0.0, 0.0, 2.0, 1.0);
        surface.set_fill_style(Rgba::rgb(10, 10, 200).into());
        surface.fill_rect(0.0, 1.0, 2.0, 1.0);
        surface
    }

    #[test]
    fn half_block_carries_top_and_bottom_pixels() {
        let surface = painted_surface();
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        BackdropWidget {
            surface: Some(&surface),
            fallback: Color::Black,
        }
        .render(area, &mut buf);

        let cell = buf.cell((1, 0)).expect("cell");
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(200, 10, 10));
        assert_eq!(cell.bg, Color::Rgb(10, 10, 200));
    }

    #[test]
    fn area_beyond_backing_store_uses_fallback() {
        let surface = painted_surface();
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        BackdropWidget {
            surface: Some(&surface),
            fallback: Color::Black,
        }
        .render(area, &mut buf);

        let cell = buf.cell((2, 1)).expect("cell");
        assert_eq!(cell.fg, Color::Black);
        assert_eq!(cell.bg, Color::Black);
    }

    #[test]
    fn missing_surface_paints_flat_background() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        BackdropWidget {
            surface: None,
            fallback: Color::Rgb(1, 2, 3),
        }
        .render(area, &mut buf);
        assert!(buf.content().iter().all(|cell| cell.bg == Color::Rgb(1, 2, 3)));
    }
}
