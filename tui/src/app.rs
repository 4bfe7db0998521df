//! The interactive app: owns the scroll position, entrance timeline,
//! pointer effects, and outbound launches, and decides when the next
//! frame is owed.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use folio_content::Portfolio;
use folio_content::SectionId;
use futures::StreamExt;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::fx::backdrop::Backdrop;
use crate::fx::glow::Glow;
use crate::fx::reveal::Timeline;
use crate::key_hint;
use crate::key_hint::KeyBinding;
use crate::links::Launcher;
use crate::links::MAIL_SUBJECT;
use crate::links::SystemLauncher;
use crate::links::mailto;
use crate::links::resume_target;
use crate::page::Page;
use crate::page::RenderCtx;
use crate::sections::navbar::NavProps;
use crate::sections::navbar::nav_layout;
use crate::sections::navbar::render_navbar;
use crate::theme::Theme;
use crate::tui::FrameRequester;
use crate::tui::Tui;
use crate::tui::TuiEvent;

const KEY_QUIT: KeyBinding = key_hint::plain(KeyCode::Char('q'));
const KEY_ESC: KeyBinding = key_hint::plain(KeyCode::Esc);
const KEY_CTRL_C: KeyBinding = key_hint::ctrl(KeyCode::Char('c'));
const KEY_DOWN: KeyBinding = key_hint::plain(KeyCode::Down);
const KEY_UP: KeyBinding = key_hint::plain(KeyCode::Up);
const KEY_J: KeyBinding = key_hint::plain(KeyCode::Char('j'));
const KEY_K: KeyBinding = key_hint::plain(KeyCode::Char('k'));
const KEY_PAGE_DOWN: KeyBinding = key_hint::plain(KeyCode::PageDown);
const KEY_PAGE_UP: KeyBinding = key_hint::plain(KeyCode::PageUp);
const KEY_SPACE: KeyBinding = key_hint::plain(KeyCode::Char(' '));
const KEY_HALF_DOWN: KeyBinding = key_hint::ctrl(KeyCode::Char('d'));
const KEY_HALF_UP: KeyBinding = key_hint::ctrl(KeyCode::Char('u'));
const KEY_HOME: KeyBinding = key_hint::plain(KeyCode::Home);
const KEY_END: KeyBinding = key_hint::plain(KeyCode::End);
const KEY_TOP: KeyBinding = key_hint::plain(KeyCode::Char('g'));
const KEY_BOTTOM: KeyBinding = key_hint::shift(KeyCode::Char('G'));
const KEY_RESUME: KeyBinding = key_hint::plain(KeyCode::Char('o'));
const KEY_EMAIL: KeyBinding = key_hint::plain(KeyCode::Char('e'));
const KEY_PROFILE: KeyBinding = key_hint::plain(KeyCode::Char('x'));

/// Rows moved per wheel notch.
const WHEEL_STEP: usize = 3;
/// Frame cadence while entrance animations are in flight.
const REVEAL_FRAME: Duration = Duration::from_millis(33);
/// Relaxed cadence for the ambient backdrop drift.
const AMBIENT_FRAME: Duration = Duration::from_millis(120);
/// How long a transient notice stays on the nav bar.
const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Digit and mnemonic anchors, mirroring the nav link order.
fn anchor_key(c: char) -> Option<SectionId> {
    match c {
        '1' | 'a' => Some(SectionId::About),
        '2' | 'p' => Some(SectionId::Projects),
        '3' | 's' => Some(SectionId::Skills),
        '4' | 'r' => Some(SectionId::Resume),
        '5' | 'c' => Some(SectionId::Contact),
        _ => None,
    }
}

pub(crate) struct AppOptions {
    pub theme: Theme,
    /// False renders everything settled: no entrances, backdrop, glow.
    pub motion: bool,
    pub mouse: bool,
    pub seed: u64,
    /// Directory the content file was loaded from; relative resume
    /// paths resolve against it.
    pub content_dir: Option<PathBuf>,
}

struct Notice {
    text: String,
    until: Instant,
}

pub(crate) struct App {
    portfolio: Portfolio,
    page: Page,
    theme: Theme,
    timeline: Timeline,
    backdrop: Backdrop,
    glow: Glow,
    launcher: Box<dyn Launcher>,
    frame_requester: FrameRequester,
    content_dir: Option<PathBuf>,
    scroll: usize,
    hovered_card: Option<usize>,
    active_section: Option<SectionId>,
    notice: Option<Notice>,
    last_tick: Instant,
    /// Page rows of the last frame; input handling maps pointer and
    /// paging against this.
    page_area: Rect,
    done: bool,
}

impl App {
    pub(crate) fn new(
        portfolio: Portfolio,
        options: AppOptions,
        frame_requester: FrameRequester,
    ) -> Self {
        let page = Page::new(&portfolio, options.theme);
        Self {
            page,
            theme: options.theme,
            timeline: Timeline::new(options.motion),
            backdrop: Backdrop::new(options.seed, options.motion),
            glow: Glow::new(options.motion && options.mouse),
            launcher: Box::new(SystemLauncher),
            frame_requester,
            content_dir: options.content_dir,
            scroll: 0,
            hovered_card: None,
            active_section: None,
            notice: None,
            last_tick: Instant::now(),
            page_area: Rect::ZERO,
            portfolio,
            done: false,
        }
    }

    fn request_frame(&self) {
        self.frame_requester.schedule_frame();
    }

    pub(crate) fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Mouse(mouse) => self.handle_mouse(mouse),
            TuiEvent::Resize => self.request_frame(),
            TuiEvent::Draw => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if KEY_QUIT.is_press(key) || KEY_ESC.is_press(key) || KEY_CTRL_C.is_press(key) {
            self.done = true;
            return;
        }
        match key {
            k if KEY_DOWN.is_press(k) || KEY_J.is_press(k) => self.scroll_by(1),
            k if KEY_UP.is_press(k) || KEY_K.is_press(k) => self.scroll_by(-1),
            k if KEY_PAGE_DOWN.is_press(k) || KEY_SPACE.is_press(k) => self.scroll_page(1),
            k if KEY_PAGE_UP.is_press(k) => self.scroll_page(-1),
            k if KEY_HALF_DOWN.is_press(k) => self.scroll_half(1),
            k if KEY_HALF_UP.is_press(k) => self.scroll_half(-1),
            k if KEY_HOME.is_press(k) || KEY_TOP.is_press(k) => self.scroll_to(0),
            k if KEY_END.is_press(k) || KEY_BOTTOM.is_press(k) => self.scroll_to(usize::MAX),
            k if KEY_RESUME.is_press(k) => self.open_resume(),
            k if KEY_EMAIL.is_press(k) => self.open_email(),
            k if KEY_PROFILE.is_press(k) => self.open_profile(),
            k => {
                if (k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat)
                    && let KeyCode::Char(c) = k.code
                    && let Some(section) = anchor_key(c)
                {
                    self.jump_to(section);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => {
                self.glow.update(mouse.column, mouse.row);
                let hovered =
                    self.page
                        .card_under(self.page_area, self.scroll, (mouse.column, mouse.row));
                let changed = hovered != self.hovered_card || self.glow.position().is_some();
                self.hovered_card = hovered;
                if changed {
                    self.request_frame();
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP as i64),
            MouseEventKind::ScrollUp => self.scroll_by(-(WHEEL_STEP as i64)),
            MouseEventKind::Down(MouseButton::Left) if mouse.row == 0 => {
                let layout = nav_layout(self.page_area.width, &self.portfolio.profile.brand);
                if let Some(section) = layout.link_at(mouse.column) {
                    self.jump_to(section);
                }
            }
            _ => {}
        }
    }

    fn max_scroll(&self) -> usize {
        self.page
            .max_scroll(self.page_area.width, self.page_area.height)
    }

    fn scroll_by(&mut self, rows: i64) {
        let max = self.max_scroll() as i64;
        let next = self.scroll as i64 + rows;
        self.scroll = next.clamp(0, max) as usize;
        self.request_frame();
    }

    fn scroll_page(&mut self, direction: i64) {
        let rows = i64::from(self.page_area.height.max(1));
        self.scroll_by(direction * rows);
    }

    fn scroll_half(&mut self, direction: i64) {
        let rows = i64::from((self.page_area.height / 2).max(1));
        self.scroll_by(direction * rows);
    }

    fn scroll_to(&mut self, target: usize) {
        self.scroll = target.min(self.max_scroll());
        self.request_frame();
    }

    fn jump_to(&mut self, section: SectionId) {
        self.scroll =
            self.page
                .scroll_to_anchor(section, self.page_area.width, self.page_area.height);
        self.request_frame();
    }

    fn open_resume(&mut self) {
        let target = resume_target(self.content_dir.as_deref(), &self.portfolio.resume.document);
        self.launch(&target, "opening resume…");
    }

    fn open_email(&mut self) {
        let target = mailto(&self.portfolio.contact.email, MAIL_SUBJECT);
        self.launch(&target, "opening mail…");
    }

    fn open_profile(&mut self) {
        let target = self.portfolio.contact.profile_url.clone();
        self.launch(&target, "opening profile…");
    }

    fn launch(&mut self, target: &str, label: &str) {
        match self.launcher.launch(target) {
            Ok(()) => self.set_notice(label.to_string()),
            Err(error) => {
                tracing::warn!("failed to launch {target}: {error}");
                self.set_notice("open failed".to_string());
            }
        }
    }

    fn set_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            until: Instant::now() + NOTICE_TTL,
        });
        self.request_frame();
    }

    /// One frame: advance the clocks, lay the page out for the current
    /// size, paint every layer, and decide whether more frames are owed.
    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;

        let full = frame.area();
        let [nav_area, page_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(full);
        self.page_area = page_area;

        self.scroll = self.scroll.min(self.max_scroll());
        self.page.arm_visible(
            &mut self.timeline,
            self.scroll,
            page_area.width,
            page_area.height,
            now,
        );
        self.backdrop.ensure_size(page_area.width, page_area.height);
        self.backdrop.advance(dt);
        self.active_section =
            self.page
                .active_section(self.scroll, page_area.width, page_area.height);
        if let Some(notice) = &self.notice
            && now >= notice.until
        {
            self.notice = None;
        }

        let buf = frame.buffer_mut();
        buf.set_style(full, Style::default().bg(self.theme.bg));
        let ctx = RenderCtx {
            theme: &self.theme,
            timeline: &self.timeline,
            now,
            hovered_card: self.hovered_card,
        };
        self.page.render(page_area, buf, self.scroll, &ctx);
        self.backdrop.render(page_area, buf, self.scroll, &self.theme);
        self.glow.apply(page_area, buf, &self.theme);

        let progress = self
            .page
            .scroll_progress(self.scroll, page_area.width, page_area.height);
        let props = NavProps {
            brand: &self.portfolio.profile.brand,
            active: self.active_section,
            progress,
            notice: self.notice.as_ref().map(|notice| notice.text.as_str()),
        };
        render_navbar(nav_area, buf, &self.theme, &props);

        self.schedule_next_frame(now);
    }

    /// Frame economy: entrances run at the reveal cadence, the backdrop
    /// at the ambient one, a pending notice at its expiry. An idle page
    /// owes no frames at all.
    fn schedule_next_frame(&self, now: Instant) {
        if self.timeline.animating(now) {
            self.frame_requester.schedule_frame_in(REVEAL_FRAME);
        } else if self.backdrop.is_animated() {
            self.frame_requester.schedule_frame_in(AMBIENT_FRAME);
        } else if let Some(notice) = &self.notice {
            self.frame_requester
                .schedule_frame_in(notice.until.saturating_duration_since(now));
        }
    }
}

pub(crate) async fn run_app(
    tui: &mut Tui,
    portfolio: Portfolio,
    options: AppOptions,
) -> io::Result<()> {
    let mut app = App::new(portfolio, options, tui.frame_requester());
    app.request_frame();
    let mut events = tui.event_stream();
    while let Some(event) = events.next().await {
        match event {
            TuiEvent::Draw => {
                tui.draw(|frame| app.draw(frame))?;
            }
            other => app.handle_event(other),
        }
        if app.done {
            break;
        }
    }
    Ok(())
}
