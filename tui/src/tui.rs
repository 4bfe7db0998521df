//! Terminal lifecycle and the event plumbing behind the app loop: raw
//! mode and alternate screen guards, an input pump, and a frame clock
//! that coalesces redraw requests.

use std::io;
use std::io::Stdout;
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEvent;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use futures::StreamExt;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// One event delivered to the app loop.
#[derive(Debug)]
pub(crate) enum TuiEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// The frame clock owes a redraw.
    Draw,
}

/// Maps a raw terminal event. Key releases, focus changes, and pastes
/// stop here.
fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(TuiEvent::Key(key)),
        Event::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Handle for requesting frames. Requests made while one is already
/// owed coalesce into whichever deadline comes first.
#[derive(Clone)]
pub(crate) struct FrameRequester {
    tx: UnboundedSender<Duration>,
}

impl FrameRequester {
    pub(crate) fn schedule_frame(&self) {
        let _ = self.tx.send(Duration::ZERO);
    }

    pub(crate) fn schedule_frame_in(&self, delay: Duration) {
        let _ = self.tx.send(delay);
    }

    /// Requester wired to nothing, for driving app state in tests.
    #[cfg(test)]
    pub(crate) fn test_requester() -> Self {
        let (tx, _rx) = unbounded_channel();
        Self { tx }
    }

    /// Requester plus its raw receiver, for asserting on scheduling.
    #[cfg(test)]
    pub(crate) fn test_pair() -> (Self, UnboundedReceiver<Duration>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

/// Registry of the runtime tasks a mounted terminal owns. Teardown
/// aborts and drains them all, so repeated enter/exit cycles cannot
/// leave a pump behind.
#[derive(Default)]
pub(crate) struct ListenerSet {
    tasks: Vec<JoinHandle<()>>,
}

impl ListenerSet {
    pub(crate) fn register(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(crate) fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

pub(crate) struct Tui {
    pub(crate) terminal: Terminal<CrosstermBackend<Stdout>>,
    event_tx: UnboundedSender<TuiEvent>,
    events: Option<UnboundedReceiver<TuiEvent>>,
    frame_tx: UnboundedSender<Duration>,
    listeners: ListenerSet,
    mouse_capture: bool,
    active: bool,
}

impl Tui {
    /// Sets up the terminal handle and the frame clock. The clock is
    /// not a listener: it parks between requests and ends on its own
    /// once every [`FrameRequester`] is gone.
    pub(crate) fn new(mouse_capture: bool) -> io::Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (event_tx, event_rx) = unbounded_channel();
        let (frame_tx, frame_rx) = unbounded_channel();
        tokio::spawn(run_frame_clock(frame_rx, event_tx.clone()));
        Ok(Self {
            terminal,
            event_tx,
            events: Some(event_rx),
            frame_tx,
            listeners: ListenerSet::default(),
            mouse_capture,
            active: false,
        })
    }

    pub(crate) fn frame_requester(&self) -> FrameRequester {
        FrameRequester {
            tx: self.frame_tx.clone(),
        }
    }

    /// Claims the terminal and starts listening for input. Calling it
    /// while already entered is a no-op.
    pub(crate) fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, cursor::Hide)?;
        if self.mouse_capture {
            execute!(self.terminal.backend_mut(), EnableMouseCapture)?;
        }
        self.terminal.clear()?;
        self.listeners.register(tokio::spawn(pump_input(self.event_tx.clone())));
        self.active = true;
        Ok(())
    }

    /// Stops the input listeners and restores the terminal. Safe to
    /// call more than once; later calls are no-ops, including the one
    /// from `Drop`.
    pub(crate) fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.listeners.shutdown();
        restore_terminal(self.mouse_capture)
    }

    /// Takes the event receiver. A second call returns a stream that is
    /// already closed, which ends the app loop instead of panicking.
    pub(crate) fn event_stream(&mut self) -> UnboundedReceiverStream<TuiEvent> {
        match self.events.take() {
            Some(rx) => UnboundedReceiverStream::new(rx),
            None => {
                let (_tx, rx) = unbounded_channel();
                UnboundedReceiverStream::new(rx)
            }
        }
    }

    pub(crate) fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn restore_terminal(mouse_capture: bool) -> io::Result<()> {
    if mouse_capture {
        execute!(stdout(), DisableMouseCapture)?;
    }
    execute!(stdout(), LeaveAlternateScreen, cursor::Show)?;
    disable_raw_mode()
}

/// Restores the terminal before the default panic report so the
/// message is not swallowed by the alternate screen.
pub(crate) fn install_panic_hook(mouse_capture: bool) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal(mouse_capture);
        default_hook(info);
    }));
}

async fn pump_input(tx: UnboundedSender<TuiEvent>) {
    let mut stream = EventStream::new();
    while let Some(Ok(event)) = stream.next().await {
        if let Some(mapped) = map_event(event)
            && tx.send(mapped).is_err()
        {
            break;
        }
    }
}

/// Turns frame requests into `Draw` events, keeping only the earliest
/// pending deadline. Ends when the request channel closes.
async fn run_frame_clock(mut requests: UnboundedReceiver<Duration>, tx: UnboundedSender<TuiEvent>) {
    let mut deadline: Option<Instant> = None;
    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(delay) = request else {
                    break;
                };
                let at = Instant::now() + delay;
                deadline = Some(match deadline {
                    Some(existing) => existing.min(at),
                    None => at,
                });
            }
            () = sleep_until_deadline(deadline), if deadline.is_some() => {
                deadline = None;
                if tx.send(TuiEvent::Draw).is_err() {
                    break;
                }
            }
        }
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use crossterm::event::KeyModifiers;

    #[test]
    fn map_event_filters_input_noise() {
        let press = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(map_event(press), Some(TuiEvent::Key(_))));

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(map_event(release).is_none());

        assert!(map_event(Event::FocusGained).is_none());
        assert!(matches!(
            map_event(Event::Resize(80, 24)),
            Some(TuiEvent::Resize)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn frame_clock_coalesces_bursts_to_the_earliest_deadline() {
        let (frame_tx, frame_rx) = unbounded_channel();
        let (event_tx, mut event_rx) = unbounded_channel();
        let clock = tokio::spawn(run_frame_clock(frame_rx, event_tx));

        let requester = FrameRequester { tx: frame_tx };
        requester.schedule_frame_in(Duration::from_millis(40));
        requester.schedule_frame_in(Duration::from_millis(10));
        requester.schedule_frame_in(Duration::from_millis(25));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(matches!(event_rx.try_recv(), Ok(TuiEvent::Draw)));
        assert!(event_rx.try_recv().is_err(), "one burst, one frame");

        clock.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_requests_draw_on_the_next_tick() {
        let (frame_tx, frame_rx) = unbounded_channel();
        let (event_tx, mut event_rx) = unbounded_channel();
        let clock = tokio::spawn(run_frame_clock(frame_rx, event_tx));

        let requester = FrameRequester { tx: frame_tx };
        requester.schedule_frame();
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(matches!(event_rx.try_recv(), Ok(TuiEvent::Draw)));

        clock.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn frame_clock_stops_when_requests_close() {
        let (frame_tx, frame_rx) = unbounded_channel::<Duration>();
        let (event_tx, _event_rx) = unbounded_channel();
        let clock = tokio::spawn(run_frame_clock(frame_rx, event_tx));

        drop(frame_tx);
        let joined = tokio::time::timeout(Duration::from_secs(1), clock).await;
        assert!(joined.is_ok());
    }

    #[tokio::test]
    async fn listener_cycles_leave_no_tasks_behind() {
        let mut listeners = ListenerSet::default();
        assert!(listeners.is_empty());
        for _ in 0..3 {
            listeners.register(tokio::spawn(std::future::pending::<()>()));
            listeners.register(tokio::spawn(std::future::pending::<()>()));
            assert!(!listeners.is_empty());
            listeners.shutdown();
            assert!(listeners.is_empty());
        }
    }
}
