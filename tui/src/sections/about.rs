use folio_content::SectionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::sections::BlockFx;
use crate::sections::BlockId;
use crate::sections::PageBlock;
use crate::sections::PlannedRow;
use crate::sections::RowPlan;
use crate::sections::render_plan;
use crate::sections::wrapped;
use crate::theme::Theme;

const RULE_WIDTH: u16 = 18;

pub(crate) struct AboutBlock {
    about: String,
    theme: Theme,
}

impl AboutBlock {
    pub(crate) fn new(about: &str, theme: Theme) -> Self {
        Self {
            about: about.to_string(),
            theme,
        }
    }

    fn plan(&self, width: u16) -> RowPlan {
        let mut rows = Vec::new();
        let mut y = 1u16;

        rows.push(PlannedRow {
            child: 0,
            y,
            centered: false,
            line: Line::from(Span::styled(SectionId::About.label(), self.theme.heading())),
        });
        y += 1;
        rows.push(PlannedRow {
            child: 0,
            y,
            centered: false,
            line: Line::from(Span::styled(
                "─".repeat(usize::from(RULE_WIDTH.min(width))),
                self.theme.outline(),
            )),
        });
        y += 2;

        for text in wrapped(&self.about, width) {
            rows.push(PlannedRow {
                child: 1,
                y,
                centered: false,
                line: Line::from(Span::styled(text, self.theme.body())),
            });
            y += 1;
        }

        RowPlan {
            rows,
            height: y + 2,
        }
    }
}

impl PageBlock for AboutBlock {
    fn id(&self) -> BlockId {
        BlockId::Section(SectionId::About)
    }

    fn children(&self) -> u16 {
        2
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.plan(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        render_plan(&self.plan(area.width), area, buf, fx);
    }
}
