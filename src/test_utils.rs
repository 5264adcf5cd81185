pub mod test_helpers {
    use crate::book::Book;
    use crate::event_source::{Event, KeyCode, SimulatedEventSource};
    use crate::paginator::PageLayout;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Builds a scripted input sequence for the reader.
    #[derive(Default)]
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        pub fn press_key(mut self, code: KeyCode) -> Self {
            self.events.push(SimulatedEventSource::key(code));
            self
        }

        pub fn press_ctrl_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::ctrl_char_key(c));
            self
        }

        pub fn press_enter(self) -> Self {
            self.press_key(KeyCode::Enter)
        }

        /// Space `times` times.
        pub fn next_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key(' '));
            }
            self
        }

        /// `b` `times` times.
        pub fn previous_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('b'));
            }
            self
        }

        pub fn first_page(self) -> Self {
            self.press_key(KeyCode::Home)
        }

        pub fn last_page(self) -> Self {
            self.press_key(KeyCode::End)
        }

        /// Opens the chapter list, moves down `offset` entries from the
        /// current chapter and jumps there.
        pub fn jump_chapters_ahead(mut self, offset: usize) -> Self {
            self.events.push(SimulatedEventSource::char_key('l'));
            for _ in 0..offset {
                self.events.push(SimulatedEventSource::char_key('j'));
            }
            self.press_enter()
        }

        pub fn open_chapter_list(self) -> Self {
            self.press_char('l')
        }

        pub fn resize(mut self, width: u16, height: u16) -> Self {
            self.events.push(SimulatedEventSource::resize(width, height));
            self
        }

        pub fn quit(self) -> Self {
            self.press_char('q')
        }

        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// `count` chapters titled "Chapter N", each with `words` numbered words.
    pub fn numbered_book(count: usize, words: usize, layout: PageLayout) -> Book {
        let mut document = String::from("<html><body>");
        for chapter in 1..=count {
            document.push_str(&format!(
                "<h3><a name=\"ch{chapter}\"></a>Chapter {chapter}</h3>\n<p>"
            ));
            for word in 1..=words {
                document.push_str(&format!("w{chapter}x{word} "));
            }
            document.push_str("</p>\n");
        }
        document.push_str("</body></html>");

        Book::from_document(&document, layout).expect("generated document has chapters")
    }

    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Terminal contents as text, trailing blanks trimmed.
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }

        while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            lines.pop();
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use crate::paginator::PageLayout;

    #[test]
    fn test_scenario_builder() {
        let scenario = TestScenarioBuilder::new()
            .next_page(2)
            .jump_chapters_ahead(1)
            .resize(100, 40)
            .quit()
            .build();

        // 2 pages, l + j + enter, resize, q
        assert_eq!(scenario.events.len(), 7);
    }

    #[test]
    fn test_numbered_book() {
        let book = numbered_book(3, 50, PageLayout::new(40, 10));
        assert_eq!(book.chapters().len(), 3);
        assert_eq!(book.chapters()[2].title, "Chapter 3");
        assert!(book.chapters()[0].text.starts_with("w1x1 w1x2"));
    }
}
