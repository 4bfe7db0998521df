use std::ops::Range;

use folio_content::SectionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Columns reserved on the right for the progress readout.
const RIGHT_RESERVE: u16 = 6;

pub(crate) struct NavProps<'a> {
    pub brand: &'a str,
    pub active: Option<SectionId>,
    /// Scroll progress, `0..=100`.
    pub progress: u8,
    /// Transient status text; shown in place of the progress readout.
    pub notice: Option<&'a str>,
}

/// Clickable x-ranges of the nav links. Shared by the renderer and the
/// mouse hit test so the two can never disagree.
pub(crate) struct NavLayout {
    links: Vec<(SectionId, Range<u16>)>,
}

impl NavLayout {
    pub(crate) fn link_at(&self, x: u16) -> Option<SectionId> {
        self.links
            .iter()
            .find(|(_, range)| range.contains(&x))
            .map(|(id, _)| *id)
    }

    #[cfg(test)]
    fn ranges(&self) -> &[(SectionId, Range<u16>)] {
        &self.links
    }
}

pub(crate) fn nav_layout(width: u16, brand: &str) -> NavLayout {
    let mut links = Vec::new();
    let mut x = brand.width() as u16 + 4;
    for id in SectionId::iter() {
        let w = id.label().width() as u16 + 2;
        if x + w > width.saturating_sub(RIGHT_RESERVE) {
            break;
        }
        links.push((id, x..x + w));
        x += w;
    }
    NavLayout { links }
}

pub(crate) fn render_navbar(area: Rect, buf: &mut Buffer, theme: &Theme, props: &NavProps<'_>) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    buf.set_style(area, Style::default().bg(theme.surface));
    let y = area.y;
    buf.set_stringn(
        area.x + 1,
        y,
        props.brand,
        usize::from(area.width.saturating_sub(2)),
        theme.heading(),
    );

    let layout = nav_layout(area.width, props.brand);
    for (id, range) in &layout.links {
        let style = if props.active == Some(*id) {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            theme.muted()
        };
        buf.set_string(area.x + range.start + 1, y, id.label(), style);
    }

    let right = match props.notice {
        Some(text) => text.to_string(),
        None => format!("{:>3}%", props.progress.min(100)),
    };
    let max = usize::from(area.width.saturating_sub(2));
    let shown = right.width().min(max);
    if shown > 0 {
        let x = area.x + area.width - shown as u16 - 1;
        buf.set_stringn(x, y, &right, shown, theme.muted());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::test_theme;
    use pretty_assertions::assert_eq;

    const BRAND: &str = "Lexie.dev";

    fn render(width: u16, props: &NavProps<'_>) -> Buffer {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        render_navbar(area, &mut buf, &test_theme(), props);
        buf
    }

    fn row_text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn links_are_ordered_and_disjoint() {
        let layout = nav_layout(100, BRAND);
        assert_eq!(layout.ranges().len(), 5);
        for pair in layout.ranges().windows(2) {
            assert!(pair[0].1.end <= pair[1].1.start);
        }
    }

    #[test]
    fn link_hit_test_matches_the_rendered_labels() {
        let layout = nav_layout(100, BRAND);
        for (id, range) in layout.ranges() {
            let middle = range.start + (range.end - range.start) / 2;
            assert_eq!(layout.link_at(middle), Some(*id));
        }
        assert_eq!(layout.link_at(0), None);
        assert_eq!(layout.link_at(99), None);
    }

    #[test]
    fn active_link_is_underlined_in_accent() {
        let theme = test_theme();
        let props = NavProps {
            brand: BRAND,
            active: Some(SectionId::Projects),
            progress: 40,
            notice: None,
        };
        let buf = render(100, &props);
        let layout = nav_layout(100, BRAND);
        let (_, range) = &layout.ranges()[1];
        let cell = &buf[(range.start + 1, 0)];
        assert_eq!(cell.fg, theme.accent);
        assert!(cell.modifier.contains(Modifier::UNDERLINED));

        let (_, about) = &layout.ranges()[0];
        assert_eq!(buf[(about.start + 1, 0)].fg, theme.dim);
    }

    #[test]
    fn progress_is_right_aligned() {
        let props = NavProps {
            brand: BRAND,
            active: None,
            progress: 42,
            notice: None,
        };
        let text = row_text(&render(80, &props));
        assert!(text.trim_end().ends_with("42%"), "{text:?}");
    }

    #[test]
    fn notice_replaces_the_progress_readout() {
        let props = NavProps {
            brand: BRAND,
            active: None,
            progress: 42,
            notice: Some("opening resume…"),
        };
        let text = row_text(&render(80, &props));
        assert!(text.contains("opening resume…"), "{text:?}");
        assert!(!text.contains("42%"), "{text:?}");
    }

    #[test]
    fn narrow_bars_drop_trailing_links_without_panicking() {
        let layout = nav_layout(30, BRAND);
        assert!(layout.ranges().len() < 5);
        let props = NavProps {
            brand: BRAND,
            active: None,
            progress: 0,
            notice: None,
        };
        let text = row_text(&render(30, &props));
        assert!(text.contains(BRAND));
    }
}
