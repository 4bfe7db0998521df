//! Page building blocks. Each section of the portfolio implements
//! [`PageBlock`]: it reports its desired height for a content width,
//! how many staggered entrance children it has, and renders itself
//! into whatever slice of the viewport it currently occupies.

use std::borrow::Cow;

use folio_content::SectionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::fx::reveal::Reveal;

pub(crate) mod about;
pub(crate) mod contact;
pub(crate) mod footer;
pub(crate) mod hero;
pub(crate) mod navbar;
pub(crate) mod projects;
pub(crate) mod resume;
pub(crate) mod skills;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockId {
    Hero,
    Section(SectionId),
    Footer,
}

/// Per-frame inputs shared by every block: one entrance sample per
/// staggered child, and the hovered card if any. Palette is fixed per
/// run, so blocks carry their own [`Theme`] copy instead.
pub(crate) struct BlockFx<'a> {
    pub reveals: &'a [Reveal],
    pub hovered_card: Option<usize>,
}

impl BlockFx<'_> {
    /// Sample for one child; children without a sample are settled,
    /// which is what content-only rendering (tests, reduced motion)
    /// relies on.
    pub(crate) fn reveal(&self, child: u16) -> Reveal {
        self.reveals
            .get(usize::from(child))
            .copied()
            .unwrap_or(Reveal::settled())
    }
}

pub(crate) trait PageBlock {
    fn id(&self) -> BlockId;

    /// Number of staggered entrance children.
    fn children(&self) -> u16;

    fn desired_height(&self, width: u16) -> u16;

    /// Renders into `area`, which can be shorter than the desired
    /// height when the block is clipped at a viewport edge.
    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>);

    /// Block-local hit test for hoverable cards.
    fn card_at(&self, _x: u16, _y: u16, _width: u16) -> Option<usize> {
        None
    }
}

/// A laid-out text row: which entrance child it belongs to and where it
/// sits relative to the block top.
pub(crate) struct PlannedRow {
    pub child: u16,
    pub y: u16,
    pub centered: bool,
    pub line: Line<'static>,
}

pub(crate) struct RowPlan {
    pub rows: Vec<PlannedRow>,
    pub height: u16,
}

/// Draws a row plan with per-child entrance offsets applied. A child
/// that has not become visible yet is skipped entirely.
pub(crate) fn render_plan(plan: &RowPlan, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
    for row in &plan.rows {
        let reveal = fx.reveal(row.child);
        if !reveal.is_visible() {
            continue;
        }
        let y = row.y + reveal.rise;
        let line = reveal.fade_line(&row.line);
        if row.centered {
            put_line_centered(buf, area, y, &line);
        } else {
            put_line(buf, area, y, &line);
        }
    }
}

pub(crate) fn put_line(buf: &mut Buffer, area: Rect, dy: u16, line: &Line<'_>) {
    if dy >= area.height || area.width == 0 {
        return;
    }
    buf.set_line(area.x, area.y + dy, line, area.width);
}

pub(crate) fn put_line_centered(buf: &mut Buffer, area: Rect, dy: u16, line: &Line<'_>) {
    if dy >= area.height || area.width == 0 {
        return;
    }
    let width = line.width().min(usize::from(area.width)) as u16;
    let x = area.x + (area.width - width) / 2;
    buf.set_line(x, area.y + dy, line, width);
}

pub(crate) fn wrapped(text: &str, width: u16) -> Vec<String> {
    textwrap::wrap(text, usize::from(width.max(1)))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

pub(crate) const GRID_GAP: u16 = 2;

/// Card grid shape for a content width: column count and card width.
pub(crate) fn grid_columns(width: u16, count: usize) -> (usize, u16) {
    let columns = if width >= 84 {
        3
    } else if width >= 56 {
        2
    } else {
        1
    };
    let columns = columns.min(count.max(1));
    let gaps = GRID_GAP * (columns as u16 - 1);
    let card = width.saturating_sub(gaps) / columns as u16;
    (columns, card.max(12))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::theme::Theme;
    use crate::theme::ThemeName;

    /// Theme the section tests render with.
    pub(crate) fn test_theme() -> Theme {
        Theme::named(ThemeName::Moss)
    }

    /// Renders a block at its desired height with settled entrances and
    /// returns the rows with trailing padding stripped.
    pub(crate) fn render_to_lines(block: &dyn PageBlock, width: u16) -> Vec<String> {
        let height = block.desired_height(width).max(1);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let fx = BlockFx {
                    reveals: &[],
                    hovered_card: None,
                };
                block.render(frame.area(), frame.buffer_mut(), &fx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                let mut row = String::new();
                for x in 0..buffer.area.width {
                    row.push_str(buffer[(x, y)].symbol());
                }
                row.trim_end().to_string()
            })
            .collect()
    }

    pub(crate) fn joined(lines: &[String]) -> String {
        lines.join("\n")
    }
}
