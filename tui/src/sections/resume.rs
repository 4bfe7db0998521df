use crossterm::event::KeyCode;
use folio_content::ResumeSection;
use folio_content::SectionId;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::key_hint;
use crate::sections::BlockFx;
use crate::sections::BlockId;
use crate::sections::PageBlock;
use crate::sections::PlannedRow;
use crate::sections::RowPlan;
use crate::sections::render_plan;
use crate::sections::wrapped;
use crate::theme::Theme;

const RULE_WIDTH: u16 = 18;

pub(crate) struct ResumeBlock {
    summary: String,
    document: String,
    theme: Theme,
}

impl ResumeBlock {
    pub(crate) fn new(resume: &ResumeSection, theme: Theme) -> Self {
        Self {
            summary: resume.summary.clone(),
            document: resume.document.display().to_string(),
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
            line: Line::from(Span::styled(SectionId::Resume.label(), self.theme.heading())),
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

        for text in wrapped(&self.summary, width) {
            rows.push(PlannedRow {
                child: 1,
                y,
                centered: false,
                line: Line::from(Span::styled(text, self.theme.body())),
            });
            y += 1;
        }
        y += 1;

        rows.push(PlannedRow {
            child: 2,
            y,
            centered: false,
            line: Line::from(vec![
                key_hint::plain(KeyCode::Char('o')).into(),
                Span::styled(" open resume".to_string(), self.theme.accent()),
                Span::styled(format!("  ·  {}", self.document), self.theme.muted()),
            ]),
        });

        RowPlan {
            rows,
            height: y + 3,
        }
    }
}

impl PageBlock for ResumeBlock {
    fn id(&self) -> BlockId {
        BlockId::Section(SectionId::Resume)
    }

    fn children(&self) -> u16 {
        3
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.plan(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        render_plan(&self.plan(area.width), area, buf, fx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::testing::joined;
    use crate::sections::testing::render_to_lines;
    use crate::sections::testing::test_theme;
    use folio_content::Portfolio;

    #[test]
    fn names_the_document_next_to_the_open_hint() {
        let portfolio = Portfolio::sample();
        let block = ResumeBlock::new(&portfolio.resume, test_theme());
        let text = joined(&render_to_lines(&block, 66));

        assert!(text.contains("Resume"), "{text}");
        assert!(text.contains("o open resume"), "{text}");
        assert!(text.contains("Alexis-Chaffin-Resume.pdf"), "{text}");
    }

    #[test]
    fn summary_paragraph_is_wrapped_in_full() {
        let portfolio = Portfolio::sample();
        let block = ResumeBlock::new(&portfolio.resume, test_theme());
        let lines = render_to_lines(&block, 40);

        let flowed = lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(
            flowed.contains("Specialized in Entra ID, automation, and Tier III troubleshooting."),
            "{flowed}"
        );
    }
}
