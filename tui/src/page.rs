//! The portfolio as one tall page. Blocks are stacked top to bottom in
//! a fixed order; the page lays them out for a content width, converts
//! scroll offsets to anchor positions and back, and renders whichever
//! slice the viewport currently shows.

use std::ops::Range;
use std::time::Instant;

use chrono::Datelike;
use folio_content::Portfolio;
use folio_content::SectionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::fx::reveal::Reveal;
use crate::fx::reveal::RevealKey;
use crate::fx::reveal::Timeline;
use crate::sections::BlockFx;
use crate::sections::BlockId;
use crate::sections::PageBlock;
use crate::sections::about::AboutBlock;
use crate::sections::contact::ContactBlock;
use crate::sections::footer::FooterBlock;
use crate::sections::hero::HeroBlock;
use crate::sections::projects::ProjectsBlock;
use crate::sections::resume::ResumeBlock;
use crate::sections::skills::SkillsBlock;
use crate::theme::Theme;

/// Horizontal margin kept on each side of the content column.
const MARGIN: u16 = 2;
/// Text measure cap; wider terminals centre the column instead.
const MAX_CONTENT_WIDTH: u16 = 96;

/// Readable column width for a terminal width.
pub(crate) fn content_width(width: u16) -> u16 {
    width.saturating_sub(MARGIN * 2).min(MAX_CONTENT_WIDTH)
}

/// Per-frame inputs for rendering the page.
pub(crate) struct RenderCtx<'a> {
    pub theme: &'a Theme,
    pub timeline: &'a Timeline,
    pub now: Instant,
    pub hovered_card: Option<usize>,
}

pub(crate) struct Page {
    blocks: Vec<Box<dyn PageBlock>>,
}

impl Page {
    pub(crate) fn new(portfolio: &Portfolio, theme: Theme) -> Self {
        let year = chrono::Local::now().year();
        let blocks: Vec<Box<dyn PageBlock>> = vec![
            Box::new(HeroBlock::new(&portfolio.profile, theme)),
            Box::new(AboutBlock::new(&portfolio.about, theme)),
            Box::new(ProjectsBlock::new(&portfolio.projects, theme)),
            Box::new(SkillsBlock::new(&portfolio.skills, theme)),
            Box::new(ResumeBlock::new(&portfolio.resume, theme)),
            Box::new(ContactBlock::new(&portfolio.contact, theme)),
            Box::new(FooterBlock::new(&portfolio.profile.name, year, theme)),
        ];
        Self { blocks }
    }

    /// Row spans of every block, in page coordinates for `width`.
    pub(crate) fn block_bounds(&self, width: u16) -> Vec<(BlockId, Range<usize>)> {
        let content = content_width(width);
        let mut top = 0usize;
        self.blocks
            .iter()
            .map(|block| {
                let height = usize::from(block.desired_height(content));
                let range = top..top + height;
                top += height;
                (block.id(), range)
            })
            .collect()
    }

    pub(crate) fn total_height(&self, width: u16) -> usize {
        let content = content_width(width);
        self.blocks
            .iter()
            .map(|block| usize::from(block.desired_height(content)))
            .sum()
    }

    pub(crate) fn max_scroll(&self, width: u16, viewport_height: u16) -> usize {
        self.total_height(width)
            .saturating_sub(usize::from(viewport_height))
    }

    /// Scroll offset that puts the section's first row at the top of
    /// the viewport, clamped so the page never overscrolls.
    pub(crate) fn scroll_to_anchor(
        &self,
        id: SectionId,
        width: u16,
        viewport_height: u16,
    ) -> usize {
        let start = self
            .block_bounds(width)
            .into_iter()
            .find(|(block, _)| *block == BlockId::Section(id))
            .map(|(_, range)| range.start)
            .unwrap_or(0);
        start.min(self.max_scroll(width, viewport_height))
    }

    /// The section under the reading line, one quarter into the
    /// viewport. Fully scrolled pages always report the last section so
    /// a short tail can still win the highlight; above the first
    /// section nothing is active.
    pub(crate) fn active_section(
        &self,
        scroll: usize,
        width: u16,
        viewport_height: u16,
    ) -> Option<SectionId> {
        let sections: Vec<(SectionId, usize)> = self
            .block_bounds(width)
            .into_iter()
            .filter_map(|(id, range)| match id {
                BlockId::Section(section) => Some((section, range.start)),
                _ => None,
            })
            .collect();
        let max = self.max_scroll(width, viewport_height);
        if max > 0 && scroll >= max {
            return sections.last().map(|(section, _)| *section);
        }
        let probe = scroll + usize::from(viewport_height) / 4;
        sections
            .iter()
            .rev()
            .find(|(_, start)| *start <= probe)
            .map(|(section, _)| *section)
    }

    /// Scroll position as a percentage, `0..=100`.
    pub(crate) fn scroll_progress(&self, scroll: usize, width: u16, viewport_height: u16) -> u8 {
        let max = self.max_scroll(width, viewport_height);
        if max == 0 {
            return 100;
        }
        ((scroll.min(max) * 100) / max) as u8
    }

    /// Arms the entrance timeline for every block intersecting the
    /// viewport. Already armed blocks are left alone.
    pub(crate) fn arm_visible(
        &self,
        timeline: &mut Timeline,
        scroll: usize,
        width: u16,
        viewport_height: u16,
        now: Instant,
    ) {
        let content = content_width(width);
        let bottom = scroll + usize::from(viewport_height);
        let mut top = 0usize;
        for (index, block) in self.blocks.iter().enumerate() {
            let height = usize::from(block.desired_height(content));
            if top < bottom && top + height > scroll {
                timeline.arm_block(index, block.children(), now);
            }
            top += height;
        }
    }

    /// Hoverable card under an absolute screen position, if any.
    pub(crate) fn card_under(
        &self,
        area: Rect,
        scroll: usize,
        pos: (u16, u16),
    ) -> Option<usize> {
        let content = content_width(area.width);
        let x = area.x + (area.width - content) / 2;
        if pos.0 < x
            || pos.0 >= x + content
            || pos.1 < area.y
            || pos.1 >= area.y + area.height
        {
            return None;
        }
        let page_y = scroll + usize::from(pos.1 - area.y);
        let mut top = 0usize;
        for block in &self.blocks {
            let height = usize::from(block.desired_height(content));
            if page_y < top + height {
                return block.card_at(pos.0 - x, (page_y - top) as u16, content);
            }
            top += height;
        }
        None
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, scroll: usize, ctx: &RenderCtx<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let content = content_width(area.width);
        let x = area.x + (area.width - content) / 2;
        let mut cursor = -(scroll as i64);
        for (index, block) in self.blocks.iter().enumerate() {
            let height = block.desired_height(content);
            let top = cursor;
            cursor += i64::from(height);
            if cursor <= 0 {
                continue;
            }
            if top >= i64::from(area.height) {
                break;
            }
            let reveals = self.sample_block(index, block.as_ref(), ctx);
            let hovered = match block.id() {
                BlockId::Section(SectionId::Projects) => ctx.hovered_card,
                _ => None,
            };
            let fx = BlockFx {
                reveals: &reveals,
                hovered_card: hovered,
            };
            if top >= 0 {
                let visible = height.min(area.height - top as u16);
                let slice = Rect::new(x, area.y + top as u16, content, visible);
                block.render(slice, buf, &fx);
            } else {
                let skip = (-top) as u16;
                let column = Rect::new(x, area.y, content, area.height);
                let block = block.as_ref();
                render_clipped_top(block, &fx, skip, height, column, buf, ctx.theme);
            }
        }
    }

    fn sample_block(
        &self,
        index: usize,
        block: &dyn PageBlock,
        ctx: &RenderCtx<'_>,
    ) -> Vec<Reveal> {
        (0..block.children())
            .map(|child| ctx.timeline.sample(RevealKey { block: index, child }, ctx.now))
            .collect()
    }
}

/// Blocks only know how to draw from their own first row, so a block
/// entering at the top of the viewport is drawn whole into a scratch
/// buffer and the visible tail is copied out.
fn render_clipped_top(
    block: &dyn PageBlock,
    fx: &BlockFx<'_>,
    skip: u16,
    height: u16,
    column: Rect,
    buf: &mut Buffer,
    theme: &Theme,
) {
    let scratch_area = Rect::new(0, 0, column.width, height);
    let mut scratch = Buffer::empty(scratch_area);
    scratch.set_style(scratch_area, Style::default().bg(theme.bg));
    block.render(scratch_area, &mut scratch, fx);
    let visible = height.saturating_sub(skip).min(column.height);
    for dy in 0..visible {
        for dx in 0..column.width {
            buf[(column.x + dx, column.y + dy)] = scratch[(dx, skip + dy)].clone();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::sections::testing::test_theme;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use strum::IntoEnumIterator;

    fn sample_page() -> Page {
        Page::new(&Portfolio::sample(), test_theme())
    }

    fn render_rows(page: &Page, width: u16, height: u16, scroll: usize) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = test_theme();
        let timeline = Timeline::new(false);
        terminal
            .draw(|frame| {
                let ctx = RenderCtx {
                    theme: &theme,
                    timeline: &timeline,
                    now: Instant::now(),
                    hovered_card: None,
                };
                page.render(frame.area(), frame.buffer_mut(), scroll, &ctx);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                let row: String = (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    /// Strips chrome glyphs and rejoins wrapped text so full sentences
    /// can be counted across line breaks.
    fn normalized_text(rows: &[String]) -> String {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|symbol| match symbol {
                        '╭' | '╮' | '╰' | '╯' | '│' | '─' | '▪' => ' ',
                        other => other,
                    })
                    .collect::<String>()
            })
            .map(|row| row.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|row| !row.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn blocks_tile_the_page_in_order() {
        let page = sample_page();
        let bounds = page.block_bounds(50);
        let ids: Vec<BlockId> = bounds.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![
                BlockId::Hero,
                BlockId::Section(SectionId::About),
                BlockId::Section(SectionId::Projects),
                BlockId::Section(SectionId::Skills),
                BlockId::Section(SectionId::Resume),
                BlockId::Section(SectionId::Contact),
                BlockId::Footer,
            ]
        );
        let mut expected_start = 0;
        for (_, range) in &bounds {
            assert_eq!(range.start, expected_start);
            assert!(range.end > range.start);
            expected_start = range.end;
        }
        assert_eq!(expected_start, page.total_height(50));
    }

    #[test]
    fn every_entry_renders_exactly_once_in_a_single_column() {
        let page = sample_page();
        let portfolio = Portfolio::sample();
        let width = 50u16;
        let total = page.total_height(width) as u16;
        let rows = render_rows(&page, width, total, 0);
        let text = normalized_text(&rows);

        for project in &portfolio.projects {
            assert_eq!(text.matches(project.title.as_str()).count(), 1, "{}", project.title);
            assert_eq!(
                text.matches(project.description.as_str()).count(),
                1,
                "{}",
                project.description
            );
            assert_eq!(text.matches(project.stack.as_str()).count(), 1, "{}", project.stack);
        }
        assert_eq!(text.matches(portfolio.profile.tagline.as_str()).count(), 1);
        assert_eq!(text.matches(portfolio.about.as_str()).count(), 1);
        assert_eq!(text.matches(portfolio.resume.summary.as_str()).count(), 1);
        assert_eq!(text.matches(portfolio.contact.prompt.as_str()).count(), 1);
        assert_eq!(text.matches(portfolio.contact.email.as_str()).count(), 1);
        let footer = format!("© {} Lexie · Built with care", chrono::Local::now().year());
        assert_eq!(text.matches(footer.as_str()).count(), 1);
    }

    #[test]
    fn anchor_jumps_put_each_section_in_view() {
        let page = sample_page();
        let (width, height) = (50u16, 10u16);
        for id in SectionId::iter() {
            let scroll = page.scroll_to_anchor(id, width, height);
            let rows = render_rows(&page, width, height, scroll);
            let text = rows.join("\n");
            assert!(text.contains(id.label()), "{id:?}: {text}");
        }
    }

    #[test]
    fn the_reading_line_picks_the_active_section() {
        let page = sample_page();
        let (width, height) = (50u16, 10u16);
        assert_eq!(page.active_section(0, width, height), None);
        let max = page.max_scroll(width, height);
        for id in SectionId::iter() {
            let scroll = page.scroll_to_anchor(id, width, height);
            if scroll < max {
                assert_eq!(page.active_section(scroll, width, height), Some(id), "{id:?}");
            }
        }
        assert_eq!(page.active_section(max, width, height), Some(SectionId::Contact));
        assert_eq!(page.active_section(max + 10, width, height), Some(SectionId::Contact));
    }

    #[test]
    fn progress_runs_zero_to_one_hundred() {
        let page = sample_page();
        let (width, height) = (50u16, 10u16);
        let max = page.max_scroll(width, height);
        assert!(max > 0);
        assert_eq!(page.scroll_progress(0, width, height), 0);
        assert_eq!(page.scroll_progress(max, width, height), 100);
        assert_eq!(page.scroll_progress(max + 50, width, height), 100);

        let mut last = 0;
        for scroll in (0..=max).step_by(5) {
            let progress = page.scroll_progress(scroll, width, height);
            assert!(progress >= last, "{scroll}: {progress} < {last}");
            last = progress;
        }
    }

    #[test]
    fn top_clipped_blocks_keep_their_row_alignment() {
        let page = sample_page();
        // Page row 3 is the hero tagline; with three rows scrolled off
        // it must surface as the first viewport row.
        let rows = render_rows(&page, 50, 10, 3);
        assert!(rows[0].contains("Optimize · Empower · Elevate"), "{rows:?}");
    }

    #[test]
    fn clipped_rows_carry_the_page_background() {
        let page = sample_page();
        let theme = test_theme();
        let timeline = Timeline::new(false);
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        let ctx = RenderCtx {
            theme: &theme,
            timeline: &timeline,
            now: Instant::now(),
            hovered_card: None,
        };
        page.render(area, &mut buf, 3, &ctx);
        assert_eq!(buf[(10, 0)].bg, theme.bg);
    }

    #[test]
    fn pointer_hit_testing_reaches_project_cards() {
        let page = sample_page();
        let (width, height) = (50u16, 24u16);
        // Offset area, as under a navbar row.
        let area = Rect::new(0, 1, width, height);
        let scroll = page.scroll_to_anchor(SectionId::Projects, width, height);

        // First card's rows start four rows into the projects block.
        assert_eq!(page.card_under(area, scroll, (6, area.y + 4)), Some(0));
        // Heading row, margin column, and the navbar row all miss.
        assert_eq!(page.card_under(area, scroll, (6, area.y + 1)), None);
        assert_eq!(page.card_under(area, scroll, (0, area.y + 4)), None);
        assert_eq!(page.card_under(area, scroll, (6, 0)), None);
        // The hero has nothing hoverable.
        assert_eq!(page.card_under(area, 0, (6, area.y + 2)), None);
    }

    #[test]
    fn scrolling_arms_blocks_as_they_enter_the_viewport() {
        let page = sample_page();
        let mut timeline = Timeline::new(true);
        let now = Instant::now();
        page.arm_visible(&mut timeline, 0, 50, 10, now);
        assert!(timeline.armed(0));
        let skills_index = 3;
        assert!(!timeline.armed(skills_index));

        let scroll = page.scroll_to_anchor(SectionId::Skills, 50, 10);
        page.arm_visible(&mut timeline, scroll, 50, 10, now);
        assert!(timeline.armed(skills_index));
    }
}
