use folio_content::Project;
use folio_content::SectionId;
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
/// Heading, rule, and one blank row above the first card row.
const HEADER_ROWS: u16 = 4;

/// Project cards in a responsive grid. Child 0 is the heading; child
/// `1 + i` is card `i`, so cards cascade in with the stagger delay.
pub(crate) struct ProjectsBlock {
    projects: Vec<Project>,
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

impl ProjectsBlock {
    pub(crate) fn new(projects: &[Project], theme: Theme) -> Self {
        Self {
            projects: projects.to_vec(),
            theme,
        }
    }

    fn grid(&self, width: u16) -> Grid {
        let (columns, card_width) = grid_columns(width, self.projects.len());
        let inner_width = card_width.saturating_sub(4).max(8);
        let mut rows = Vec::new();
        let mut y = HEADER_ROWS;
        let mut first = 0;
        while first < self.projects.len() {
            let count = columns.min(self.projects.len() - first);
            let height = (first..first + count)
                .map(|i| self.card_height(i, inner_width))
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

    /// Borders plus title, blank, description, blank, stack.
    fn card_height(&self, index: usize, inner_width: u16) -> u16 {
        let project = &self.projects[index];
        let title = wrapped(&project.title, inner_width).len() as u16;
        let desc = wrapped(&project.description, inner_width).len() as u16;
        let stack = wrapped(&project.stack, inner_width).len() as u16;
        title + desc + stack + 4
    }

    fn render_card(
        &self,
        index: usize,
        card: Rect,
        buf: &mut Buffer,
        reveal: Reveal,
        hovered: bool,
    ) {
        let project = &self.projects[index];
        let border_style = if hovered {
            self.theme.accent()
        } else {
            self.theme.outline()
        };
        let frame = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(reveal.fade(border_style))
            .style(Style::default().bg(self.theme.surface));
        let inner = frame.inner(card);
        frame.render(card, buf);
        // One padding column between border and text.
        let inner = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };

        let title_style = if hovered {
            Style::default().fg(self.theme.accent_soft).bold()
        } else {
            self.theme.body().bold()
        };
        let mut y = 0u16;
        for text in wrapped(&project.title, inner.width) {
            put_line(buf, inner, y, &Line::from(Span::styled(text, reveal.fade(title_style))));
            y += 1;
        }
        y += 1;
        for text in wrapped(&project.description, inner.width) {
            let style = reveal.fade(self.theme.muted());
            put_line(buf, inner, y, &Line::from(Span::styled(text, style)));
            y += 1;
        }
        y += 1;
        for text in wrapped(&project.stack, inner.width) {
            let style = reveal.fade(Style::default().fg(self.theme.accent_soft));
            put_line(buf, inner, y, &Line::from(Span::styled(text, style)));
            y += 1;
        }
    }
}

impl PageBlock for ProjectsBlock {
    fn id(&self) -> BlockId {
        BlockId::Section(SectionId::Projects)
    }

    fn children(&self) -> u16 {
        1 + self.projects.len() as u16
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.grid(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        let grid = self.grid(area.width);

        let heading = fx.reveal(0);
        if heading.is_visible() {
            let line = Line::from(Span::styled(
                SectionId::Projects.label(),
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
                let card = Rect {
                    x,
                    y: area.y + y,
                    width: grid.card_width,
                    height: row.height.min(area.height - y),
                }
                .intersection(buf.area);
                if card.width < 4 || card.height < 2 {
                    continue;
                }
                let hovered = fx.hovered_card == Some(index);
                self.render_card(index, card, buf, reveal, hovered);
            }
        }
    }

    fn card_at(&self, x: u16, y: u16, width: u16) -> Option<usize> {
        let grid = self.grid(width);
        for row in &grid.rows {
            if y < row.y || y >= row.y + row.height {
                continue;
            }
            for slot in 0..row.count {
                let left = slot as u16 * (grid.card_width + GRID_GAP);
                if x >= left && x < left + grid.card_width {
                    return Some(row.first + slot);
                }
            }
        }
        None
    }
}
