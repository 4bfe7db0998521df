use crossterm::event::KeyCode;
use folio_content::Contact;
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

/// Closing call-to-action, centered like the page it came from.
pub(crate) struct ContactBlock {
    prompt: String,
    email: String,
    profile: String,
    theme: Theme,
}

impl ContactBlock {
    pub(crate) fn new(contact: &Contact, theme: Theme) -> Self {
        let profile = contact
            .profile_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string();
        Self {
            prompt: contact.prompt.clone(),
            email: contact.email.clone(),
            profile,
            theme,
        }
    }

    fn plan(&self, width: u16) -> RowPlan {
        let mut rows = Vec::new();
        let mut y = 1u16;

        rows.push(PlannedRow {
            child: 0,
            y,
            centered: true,
            line: Line::from(Span::styled(SectionId::Contact.label(), self.theme.heading())),
        });
        y += 1;
        rows.push(PlannedRow {
            child: 0,
            y,
            centered: true,
            line: Line::from(Span::styled(
                "─".repeat(usize::from(RULE_WIDTH.min(width))),
                self.theme.outline(),
            )),
        });
        y += 2;

        for text in wrapped(&self.prompt, width) {
            rows.push(PlannedRow {
                child: 1,
                y,
                centered: true,
                line: Line::from(Span::styled(text, self.theme.body())),
            });
            y += 1;
        }
        y += 1;

        rows.push(PlannedRow {
            child: 2,
            y,
            centered: true,
            line: Line::from(vec![
                key_hint::plain(KeyCode::Char('e')).into(),
                Span::styled(format!(" {}", self.email), self.theme.accent()),
                Span::styled("   ".to_string(), self.theme.muted()),
                key_hint::plain(KeyCode::Char('x')).into(),
                Span::styled(format!(" {}", self.profile), self.theme.muted()),
            ]),
        });

        RowPlan {
            rows,
            height: y + 3,
        }
    }
}

impl PageBlock for ContactBlock {
    fn id(&self) -> BlockId {
        BlockId::Section(SectionId::Contact)
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
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::sections::testing::joined;
    use crate::sections::testing::render_to_lines;
    use crate::sections::testing::test_theme;
    use folio_content::Portfolio;

    fn block() -> ContactBlock {
        ContactBlock::new(&Portfolio::sample().contact, test_theme())
    }

    #[test]
    fn shows_both_outbound_links() {
        let text = joined(&render_to_lines(&block(), 66));
        assert!(text.contains("e hello@lexie.dev"), "{text}");
        assert!(text.contains("x github.com/lexiedev"), "{text}");
    }

    #[test]
    fn prompt_is_centered() {
        let lines = render_to_lines(&block(), 66);
        let prompt_row = lines
            .iter()
            .find(|l| l.contains("collaborating"))
            .expect("prompt row");
        let leading = prompt_row.len() - prompt_row.trim_start().len();
        let trimmed = prompt_row.trim().chars().count();
        // Roughly centered: the text is narrower than the column and
        // offset by about half the slack.
        let slack = 66 - trimmed;
        assert!(leading >= slack / 2 - 1 && leading <= slack / 2 + 1, "{leading} vs {slack}");
    }
}
