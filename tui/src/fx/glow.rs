//! Pointer-follow glow. A radial patch of cell backgrounds is blended
//! toward the theme glow color around the last pointer cell. Glyphs and
//! foregrounds are never touched, so text stays crisp inside the halo.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::theme::Theme;
use crate::theme::blend;

/// Halo radius in columns. Rows count double because terminal cells
/// are roughly twice as tall as they are wide.
const RADIUS_COLS: f32 = 11.0;
const MAX_STRENGTH: f32 = 0.4;

pub(crate) struct Glow {
    pos: Option<(u16, u16)>,
    enabled: bool,
}

impl Glow {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { pos: None, enabled }
    }

    /// Records the pointer cell in screen coordinates. Until the first
    /// pointer event arrives there is no halo at all.
    pub(crate) fn update(&mut self, column: u16, row: u16) {
        if self.enabled {
            self.pos = Some((column, row));
        }
    }

    pub(crate) fn position(&self) -> Option<(u16, u16)> {
        self.pos
    }

    pub(crate) fn apply(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let Some((cx, cy)) = self.pos else {
            return;
        };
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let dx = f32::from(x) - f32::from(cx);
                let dy = (f32::from(y) - f32::from(cy)) * 2.0;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= RADIUS_COLS {
                    continue;
                }
                let falloff = 1.0 - dist / RADIUS_COLS;
                let strength = falloff * falloff * MAX_STRENGTH;
                let cell = &mut buf[(x, y)];
                let base = match cell.bg {
                    Color::Reset => theme.bg,
                    other => other,
                };
                cell.set_bg(blend(base, theme.glow, strength));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeName;
    use ratatui::style::Style;

    fn theme() -> Theme {
        Theme::named(ThemeName::Moss)
    }

    fn page_buffer(area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        buf.set_style(area, Style::default().bg(theme().bg));
        buf
    }

    #[test]
    fn no_pointer_means_no_halo() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = page_buffer(area);
        let untouched = buf.clone();
        Glow::new(true).apply(area, &mut buf, &theme());
        assert_eq!(buf, untouched);
    }

    #[test]
    fn halo_brightens_near_the_pointer_only() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = page_buffer(area);
        let mut glow = Glow::new(true);
        glow.update(20, 6);
        glow.apply(area, &mut buf, &theme());

        assert_ne!(buf[(20, 6)].bg, theme().bg);
        assert_eq!(buf[(0, 0)].bg, theme().bg);
        assert_eq!(buf[(39, 11)].bg, theme().bg);
    }

    #[test]
    fn halo_never_rewrites_symbols() {
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = page_buffer(area);
        buf.set_string(14, 6, "quiet systems", Style::default());
        let symbols_before: Vec<String> =
            (0u16..40).map(|x| buf[(x, 6)].symbol().to_string()).collect();

        let mut glow = Glow::new(true);
        glow.update(20, 6);
        glow.apply(area, &mut buf, &theme());

        let symbols_after: Vec<String> =
            (0u16..40).map(|x| buf[(x, 6)].symbol().to_string()).collect();
        assert_eq!(symbols_before, symbols_after);
    }

    #[test]
    fn disabled_glow_ignores_pointer_events() {
        let mut glow = Glow::new(false);
        glow.update(5, 5);
        assert_eq!(glow.position(), None);

        let area = Rect::new(0, 0, 10, 4);
        let mut buf = page_buffer(area);
        let untouched = buf.clone();
        glow.apply(area, &mut buf, &theme());
        assert_eq!(buf, untouched);
    }
}
