use folio_content::SectionId;
use folio_content::SkillGroup;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Widget;

use crate::fx::reveal::Reveal;
use crate::sections::BlockFx;
use crate::sections::BlockId;
use crate::sections::GRID_GAP;
use crate::sections::PageBlock;
use crate::sections::grid_columns;
use crate::sections::put_line;
use crate::sections::wrapped;
use crate::theme::Theme;

const RULE_WIDTH: u16 = 18;
const HEADER_ROWS: u16 = 4;

/// Skill groups as bordered tiles, one bullet row per item. Child 0 is
/// the heading, child `1 + i` is group `i`.
pub(crate) struct SkillsBlock {
    groups: Vec<SkillGroup>,
    theme: Theme,
}

struct Grid {
    card_width: u16,
    inner_width: u16,
    rows: Vec<GridRow>,
    height: u16,
}

struct GridRow {
    first: usize,
    count: usize,
    y: u16,
    height: u16,
}

impl SkillsBlock {
    pub(crate) fn new(groups: &[SkillGroup], theme: Theme) -> Self {
        Self {
            groups: groups.to_vec(),
            theme,
        }
    }

    fn grid(&self, width: u16) -> Grid {
        let (columns, card_width) = grid_columns(width, self.groups.len());
        let inner_width = card_width.saturating_sub(4).max(8);
        let mut rows = Vec::new();
        let mut y = HEADER_ROWS;
        let mut first = 0;
        while first < self.groups.len() {
            let count = columns.min(self.groups.len() - first);
            let height = (first..first + count)
                .map(|i| self.tile_height(i, inner_width))
                .max()
                .unwrap_or(0);
            rows.push(GridRow {
                first,
                count,
                y,
                height,
            });
            y += height + 1;
            first += count;
        }
        Grid {
            card_width,
            inner_width,
            rows,
            height: y + 1,
        }
    }

    fn tile_height(&self, index: usize, inner_width: u16) -> u16 {
        let group = &self.groups[index];
        let title = wrapped(&group.title, inner_width).len() as u16;
        title + group.items.len() as u16 + 3
    }

    fn render_tile(&self, index: usize, tile: Rect, buf: &mut Buffer, reveal: Reveal) {
        let group = &self.groups[index];
        let frame = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(reveal.fade(self.theme.outline()))
            .style(Style::default().bg(self.theme.surface));
        let inner = frame.inner(tile);
        frame.render(tile, buf);
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let mut y = 0u16;
        for text in wrapped(&group.title, inner.width) {
            let style = reveal.fade(self.theme.body().bold());
            put_line(buf, inner, y, &Line::from(Span::styled(text, style)));
            y += 1;
        }
        y += 1;
        for item in &group.items {
            let bullet = reveal.fade(Style::default().fg(self.theme.accent_soft));
            let line = Line::from(vec![
                Span::styled("▪ ".to_string(), bullet),
                Span::styled(item.clone(), reveal.fade(self.theme.muted())),
            ]);
            put_line(buf, inner, y, &line);
            y += 1;
        }
    }
}

impl PageBlock for SkillsBlock {
    fn id(&self) -> BlockId {
        BlockId::Section(SectionId::Skills)
    }

    fn children(&self) -> u16 {
        1 + self.groups.len() as u16
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.grid(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        let grid = self.grid(area.width);

        let heading = fx.reveal(0);
        if heading.is_visible() {
            let line = Line::from(Span::styled(
                SectionId::Skills.label(),
                heading.fade(self.theme.heading()),
            ));
            put_line(buf, area, 1 + heading.rise, &line);
            let rule = Line::from(Span::styled(
                "─".repeat(usize::from(RULE_WIDTH.min(area.width))),
                heading.fade(self.theme.outline()),
            ));
            put_line(buf, area, 2 + heading.rise, &rule);
        }

        for row in &grid.rows {
            for slot in 0..row.count {
                let index = row.first + slot;
                let reveal = fx.reveal(index as u16 + 1);
                if !reveal.is_visible() {
                    continue;
                }
                let y = row.y + reveal.rise;
                if y >= area.height {
                    continue;
                }
                let x = area.x + slot as u16 * (grid.card_width + GRID_GAP);
                let tile = Rect {
                    x,
                    y: area.y + y,
                    width: grid.card_width,
                    height: row.height.min(area.height - y),
                }
                .intersection(buf.area);
                if tile.width < 4 || tile.height < 2 {
                    continue;
                }
                self.render_tile(index, tile, buf, reveal);
            }
        }
    }
}
