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
use crate::theme::Theme;

pub(crate) struct FooterBlock {
    name: String,
    year: i32,
    theme: Theme,
}

impl FooterBlock {
    pub(crate) fn new(name: &str, year: i32, theme: Theme) -> Self {
        Self {
            name: name.to_string(),
            year,
            theme,
        }
    }

    fn plan(&self, width: u16) -> RowPlan {
        let rows = vec![
            PlannedRow {
                child: 0,
                y: 1,
                centered: false,
                line: Line::from(Span::styled(
                    "─".repeat(usize::from(width)),
                    self.theme.outline(),
                )),
            },
            PlannedRow {
                child: 0,
                y: 2,
                centered: true,
                line: Line::from(Span::styled(
                    format!("© {} {} · Built with care", self.year, self.name),
                    self.theme.muted(),
                )),
            },
        ];
        RowPlan { rows, height: 4 }
    }
}

impl PageBlock for FooterBlock {
    fn id(&self) -> BlockId {
        BlockId::Footer
    }

    /// The footer never animates in; it is simply there.
    fn children(&self) -> u16 {
        0
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.plan(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        render_plan(&self.plan(area.width), area, buf, fx);
    }
}
