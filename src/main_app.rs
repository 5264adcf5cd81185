use crate::chapter_list::{ChapterList, FilterMode};
use crate::event_source::{Event, EventSource, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::paginator::Chrome;
use crate::position::Navigation;
use crate::session::ReadingSession;
use crate::theme::{Base16Palette, OCEANIC_NEXT};
use anyhow::Result;
use log::{debug, error, info};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Padding, Paragraph},
};
use std::time::Duration;

/// Rows of the reader view that are not page text: book title, chapter
/// title, page counter, two spacers and the key help.
const READER_FIXED_ROWS: u16 = 6;

const READER_HELP: &str = "Enter/Space: next  b/PgUp: previous  l: chapters  q: quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Reader,
    ChapterList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    session: ReadingSession,
    mode: Mode,
    chapter_list: ChapterList,
    title: String,
    chrome: Chrome,
    palette: Base16Palette,
    last_error: Option<String>,
}

impl App {
    pub fn new(session: ReadingSession, title: impl Into<String>, chrome: Chrome) -> Self {
        let chapter_list = ChapterList::new(session.book().chapters());
        Self {
            session,
            mode: Mode::Reader,
            chapter_list,
            title: title.into(),
            chrome,
            palette: OCEANIC_NEXT,
            last_error: None,
        }
    }

    pub fn session(&self) -> &ReadingSession {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppAction::Quit);
        }

        match self.mode {
            Mode::Reader => self.handle_reader_key(key.code),
            Mode::ChapterList => self.handle_chapter_list_key(key.code),
        }
    }

    fn handle_reader_key(&mut self, code: KeyCode) -> Option<AppAction> {
        let nav = match code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('l') => {
                self.open_chapter_list();
                return None;
            }
            KeyCode::Enter
            | KeyCode::Char(' ')
            | KeyCode::Right
            | KeyCode::Down
            | KeyCode::PageDown => Navigation::NextPage,
            KeyCode::Left | KeyCode::Up | KeyCode::PageUp | KeyCode::Char('b') => {
                Navigation::PreviousPage
            }
            KeyCode::Home => Navigation::FirstPage,
            KeyCode::End => Navigation::LastPage,
            _ => return None,
        };
        self.navigate(nav);
        None
    }

    fn handle_chapter_list_key(&mut self, code: KeyCode) -> Option<AppAction> {
        if self.chapter_list.filter_mode() == FilterMode::Input {
            match code {
                KeyCode::Char(c) => self.chapter_list.push_filter_char(c),
                KeyCode::Backspace => self.chapter_list.pop_filter_char(),
                KeyCode::Enter => self.chapter_list.confirm_filter(),
                KeyCode::Esc => self.chapter_list.clear_filter(),
                KeyCode::Down => self.chapter_list.next(),
                KeyCode::Up => self.chapter_list.previous(),
                _ => {}
            }
            return None;
        }

        match code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char('/') => self.chapter_list.start_filter(),
            KeyCode::Esc if self.chapter_list.filter_mode() == FilterMode::Applied => {
                self.chapter_list.clear_filter()
            }
            KeyCode::Esc => self.mode = Mode::Reader,
            KeyCode::Char('j') | KeyCode::Down => self.chapter_list.next(),
            KeyCode::Char('k') | KeyCode::Up => self.chapter_list.previous(),
            KeyCode::Enter => {
                if let Some(index) = self.chapter_list.selected() {
                    self.navigate(Navigation::Chapter(index + 1));
                }
                self.mode = Mode::Reader;
            }
            _ => {}
        }
        None
    }

    fn open_chapter_list(&mut self) {
        self.chapter_list.clear_filter();
        if let Some((index, _)) = self.session.current_chapter() {
            self.chapter_list.select(index);
        }
        self.mode = Mode::ChapterList;
    }

    fn navigate(&mut self, nav: Navigation) {
        match self.session.apply(nav) {
            Ok(_) => self.last_error = None,
            Err(e) => {
                error!("{nav:?} failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        match self.session.resize(width, height, self.chrome) {
            Ok(true) => debug!(
                "Re-paginated for {width}x{height}, now at page {}",
                self.session.position().page + 1
            ),
            Ok(false) => {}
            Err(e) => {
                error!("Resize to {width}x{height} failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        match self.mode {
            Mode::ChapterList => self.chapter_list.render(f, area, &self.palette),
            Mode::Reader => self.draw_reader(f, area),
        }
    }

    fn draw_reader(&self, f: &mut Frame, area: Rect) {
        let left = self.chrome.horizontal / 2;
        let right = self.chrome.horizontal - left;
        let spare_rows = self.chrome.vertical.saturating_sub(READER_FIXED_ROWS);
        let top = spare_rows / 2;
        let bottom = spare_rows - top;

        let block = Block::default().padding(Padding::new(left, right, top, bottom));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(page) = self.session.current_page() else {
            f.render_widget(
                Paragraph::new("No pages found.").style(self.palette.meta_style()),
                inner,
            );
            return;
        };

        let [header, chapter, status, _, content, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let chapter_title = self
            .session
            .current_chapter()
            .map(|(_, chapter)| chapter.title.as_str())
            .unwrap_or_default();
        let page_status = format!(
            "Page {}/{}",
            self.session.position().page + 1,
            self.session.book().page_count()
        );

        f.render_widget(
            Paragraph::new(self.title.as_str()).style(self.palette.title_style()),
            header,
        );
        f.render_widget(
            Paragraph::new(chapter_title).style(self.palette.meta_style()),
            chapter,
        );
        f.render_widget(
            Paragraph::new(page_status).style(self.palette.meta_style()),
            status,
        );
        f.render_widget(Paragraph::new(page).style(self.palette.text_style()), content);

        let footer_line = match &self.last_error {
            Some(message) => Line::styled(message.as_str(), self.palette.error_style()),
            None => Line::styled(READER_HELP, self.palette.footer_style()),
        };
        f.render_widget(Paragraph::new(footer_line), footer);
    }
}

pub fn run_app_with_event_source<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let size = terminal.size()?;
    app.handle_resize(size.width, size.height);

    let poll_timeout = Duration::from_millis(250);
    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| app.draw(f))?;
            needs_redraw = false;
        }

        if !event_source.poll(poll_timeout)? {
            continue;
        }

        match event_source.read()? {
            Event::Key(key) => {
                if app.handle_key_event(key) == Some(AppAction::Quit) {
                    info!("Quit requested");
                    return Ok(());
                }
                needs_redraw = true;
            }
            Event::Resize(width, height) => {
                app.handle_resize(width, height);
                needs_redraw = true;
            }
            _ => {}
        }
    }
}
