use crossterm::event::KeyCode;
use folio_content::Profile;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
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

/// Opening block: greeting, tagline, intro paragraph, the two calls to
/// action, and the key hints that replace a web page's scroll
/// affordances.
pub(crate) struct HeroBlock {
    name: String,
    tagline: String,
    intro: String,
    theme: Theme,
}

impl HeroBlock {
    pub(crate) fn new(profile: &Profile, theme: Theme) -> Self {
        Self {
            name: profile.name.clone(),
            tagline: profile.tagline.clone(),
            intro: profile.intro.clone(),
            theme,
        }
    }

    /// The two calls to action, pointing at the work and at the
    /// contact line.
    fn cta_line(&self) -> Line<'static> {
        let gap = "   ";
        Line::from(vec![
            key_hint::plain(KeyCode::Char('p')).into(),
            Span::styled(format!(" projects{gap}"), self.theme.accent()),
            key_hint::plain(KeyCode::Char('c')).into(),
            Span::styled(" contact".to_string(), self.theme.accent()),
        ])
    }

    fn hint_line(&self) -> Line<'static> {
        let gap = "   ";
        Line::from(vec![
            key_hint::plain(KeyCode::Down).into(),
            Span::styled(format!(" scroll{gap}"), self.theme.muted()),
            "1-5".dim(),
            Span::styled(format!(" jump{gap}"), self.theme.muted()),
            key_hint::plain(KeyCode::Char('o')).into(),
            Span::styled(format!(" resume{gap}"), self.theme.muted()),
            key_hint::plain(KeyCode::Char('q')).into(),
            Span::styled(" quit".to_string(), self.theme.muted()),
        ])
    }

    fn plan(&self, width: u16) -> RowPlan {
        let mut rows = Vec::new();
        let mut y = 2u16;

        rows.push(PlannedRow {
            child: 0,
            y,
            centered: false,
            line: Line::from(vec![
                Span::styled("Hi, I'm ".to_string(), self.theme.body().bold()),
                Span::styled(self.name.clone(), self.theme.heading()),
            ]),
        });
        y += 1;
        rows.push(PlannedRow {
            child: 0,
            y,
            centered: false,
            line: Line::from(Span::styled(self.tagline.clone(), self.theme.accent())),
        });
        y += 2;

        for text in wrapped(&self.intro, width) {
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
            line: self.cta_line(),
        });
        y += 2;

        rows.push(PlannedRow {
            child: 3,
            y,
            centered: false,
            line: self.hint_line(),
        });

        RowPlan {
            rows,
            height: y + 3,
        }
    }
}

impl PageBlock for HeroBlock {
    fn id(&self) -> BlockId {
        BlockId::Hero
    }

    fn children(&self) -> u16 {
        4
    }

    fn desired_height(&self, width: u16) -> u16 {
        self.plan(width).height
    }

    fn render(&self, area: Rect, buf: &mut Buffer, fx: &BlockFx<'_>) {
        render_plan(&self.plan(area.width), area, buf, fx);
    }
}
