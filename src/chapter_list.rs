use crate::chapter_extractor::Chapter;
use crate::theme::Base16Palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Inactive,
    Input,   // typing the filter after `/`
    Applied, // filter locked, list navigable
}

/// Chapter picker shown over the reader, with a `/` title filter.
pub struct ChapterList {
    items: Vec<String>,
    visible: Vec<usize>,
    state: ListState,
    filter: String,
    filter_mode: FilterMode,
}

impl ChapterList {
    pub fn new(chapters: &[Chapter]) -> Self {
        let items: Vec<String> = chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| format!("{:3}. {}", i + 1, chapter.title))
            .collect();
        let visible = (0..items.len()).collect();

        let mut list = Self {
            items,
            visible,
            state: ListState::default(),
            filter: String::new(),
            filter_mode: FilterMode::Inactive,
        };
        list.select_first();
        list
    }

    /// Number of chapters currently shown.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Highlights chapter `index` (0-based) if it is shown, otherwise the
    /// nearest shown chapter before it.
    pub fn select(&mut self, index: usize) {
        if self.visible.is_empty() {
            return;
        }
        let row = self
            .visible
            .iter()
            .rposition(|&chapter| chapter <= index)
            .unwrap_or(0);
        self.state.select(Some(row));
    }

    /// 0-based index of the highlighted chapter.
    pub fn selected(&self) -> Option<usize> {
        self.state
            .selected()
            .and_then(|row| self.visible.get(row).copied())
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.visible.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.visible.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn start_filter(&mut self) {
        self.filter_mode = FilterMode::Input;
        self.filter.clear();
        self.refilter();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter.pop();
        self.refilter();
    }

    /// Locks the typed filter. An empty filter is the same as cancelling.
    pub fn confirm_filter(&mut self) {
        if self.filter.is_empty() {
            self.clear_filter();
        } else {
            self.filter_mode = FilterMode::Applied;
        }
    }

    /// Shows every chapter again, keeping the highlighted one if any.
    pub fn clear_filter(&mut self) {
        let selected = self.selected();
        self.filter_mode = FilterMode::Inactive;
        self.filter.clear();
        self.refilter();
        if let Some(index) = selected {
            self.select(index);
        }
    }

    fn refilter(&mut self) {
        let query = self.filter.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        self.select_first();
    }

    fn select_first(&mut self) {
        let row = if self.visible.is_empty() { None } else { Some(0) };
        self.state.select(row);
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, palette: &Base16Palette) {
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .map(|&i| {
                ListItem::new(Line::from(Span::styled(
                    self.items[i].as_str(),
                    palette.text_style(),
                )))
            })
            .collect();

        let title = match self.filter_mode {
            FilterMode::Inactive => " Chapters ".to_string(),
            FilterMode::Input => format!(" Chapters /{}_ ", self.filter),
            FilterMode::Applied => format!(" Chapters /{} ", self.filter),
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(palette.border_style())
                    .style(Style::default().bg(palette.base_00)),
            )
            .highlight_style(palette.highlight_style())
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.state);
    }
}
