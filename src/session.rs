use crate::book::Book;
use crate::chapter_extractor::Chapter;
use crate::error::ReaderError;
use crate::paginator::{Chrome, PageLayout};
use crate::position::{Navigation, ReadingPosition, navigate, remap_page};
use crate::position_store::{PositionRecord, PositionStore};
use log::{debug, info, warn};

/// A book, the reader's place in it, and where that place is saved.
///
/// Every change of position is written through to the store. If the write
/// fails the position is rolled back and the error returned.
pub struct ReadingSession {
    book: Book,
    position: ReadingPosition,
    store: Box<dyn PositionStore>,
}

impl ReadingSession {
    /// Restores the saved position, clamped to the book. A missing or
    /// unreadable record starts at the first page.
    pub fn open(book: Book, store: Box<dyn PositionStore>) -> Self {
        let saved_page = match store.load() {
            Ok(Some(record)) => record.page,
            Ok(None) => 0,
            Err(e) => {
                warn!("Ignoring unreadable reading position: {e}");
                0
            }
        };
        let position = ReadingPosition::clamped(saved_page, book.page_count());
        if i64::try_from(position.page).ok() != Some(saved_page) {
            info!(
                "Saved page {saved_page} clamped to {} ({} pages)",
                position.page,
                book.page_count()
            );
        }

        Self {
            book,
            position,
            store,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn position(&self) -> ReadingPosition {
        self.position
    }

    pub fn current_page(&self) -> Option<&str> {
        self.book.page(self.position.page)
    }

    pub fn current_chapter(&self) -> Option<(usize, &Chapter)> {
        self.book.chapter_at(self.position.page)
    }

    pub fn is_at_last_page(&self) -> bool {
        self.position.page + 1 >= self.book.page_count()
    }

    /// Applies `nav`. Returns whether the position changed.
    pub fn apply(&mut self, nav: Navigation) -> Result<bool, ReaderError> {
        let target = navigate(
            self.position,
            self.book.page_count(),
            self.book.chapters(),
            nav,
        )?;
        match target {
            Some(position) => {
                debug!("{nav:?}: page {} -> {}", self.position.page, position.page);
                self.move_to(position)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-paginates for a terminal of `width` x `height` if that changes the
    /// page layout, keeping the reader at the same fraction of the book.
    /// Returns whether the book was re-paginated.
    pub fn resize(
        &mut self,
        width: u16,
        height: u16,
        chrome: Chrome,
    ) -> Result<bool, ReaderError> {
        let layout = PageLayout::for_terminal(width, height, chrome, self.book.layout());
        let old_total = self.book.page_count();
        if !self.book.relayout(layout) {
            return Ok(false);
        }

        let new_total = self.book.page_count();
        let page = if old_total > 0 && new_total > 0 {
            remap_page(self.position.page, old_total, new_total)
        } else {
            self.position.page.min(new_total.saturating_sub(1))
        };
        info!(
            "Resized to {width}x{height}: page {}/{old_total} -> {page}/{new_total}",
            self.position.page
        );

        // The new pagination stands even if saving fails.
        self.position = ReadingPosition::new(page);
        self.persist()?;
        Ok(true)
    }

    /// Back to the first page.
    pub fn reset(&mut self) -> Result<(), ReaderError> {
        self.move_to(ReadingPosition::default())
    }

    fn move_to(&mut self, position: ReadingPosition) -> Result<(), ReaderError> {
        let previous = std::mem::replace(&mut self.position, position);
        if let Err(e) = self.persist() {
            self.position = previous;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), ReaderError> {
        let chapter = self
            .current_chapter()
            .map(|(index, _)| index)
            .unwrap_or_default();
        let record = PositionRecord::at(self.position.page, chapter);
        self.store.save(&record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::position_store::EphemeralPositionStore;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample_book() -> Book {
        let chapters = (1..=4)
            .map(|i| {
                Chapter::new(
                    format!("Chapter {i}"),
                    format!("c{i}"),
                    "All work and no play makes Jack a dull boy. ".repeat(30),
                )
            })
            .collect();
        Book::from_chapters(chapters, PageLayout::new(40, 10))
    }

    /// Store whose writes can be switched off; counts successful saves.
    struct FlakyStore {
        record: Option<PositionRecord>,
        fail_writes: Rc<Cell<bool>>,
        saves: Rc<Cell<usize>>,
    }

    impl PositionStore for FlakyStore {
        fn load(&self) -> Result<Option<PositionRecord>, PersistenceError> {
            Ok(self.record.clone())
        }

        fn save(&mut self, record: &PositionRecord) -> Result<(), PersistenceError> {
            if self.fail_writes.get() {
                return Err(std::io::Error::other("disk full").into());
            }
            self.saves.set(self.saves.get() + 1);
            self.record = Some(record.clone());
            Ok(())
        }
    }

    struct UnreadableStore;

    impl PositionStore for UnreadableStore {
        fn load(&self) -> Result<Option<PositionRecord>, PersistenceError> {
            Err(std::io::Error::other("permission denied").into())
        }

        fn save(&mut self, _record: &PositionRecord) -> Result<(), PersistenceError> {
            Ok(())
        }
    }

    fn store_at(page: i64) -> Box<dyn PositionStore> {
        Box::new(EphemeralPositionStore::with_record(PositionRecord {
            page,
            chapter: None,
            last_read: None,
        }))
    }

    #[test]
    fn test_open_clamps_saved_page() {
        let book = sample_book();
        let last = book.page_count() - 1;

        assert_eq!(ReadingSession::open(book.clone(), store_at(-5)).position().page, 0);
        assert_eq!(ReadingSession::open(book.clone(), store_at(3)).position().page, 3);
        assert_eq!(ReadingSession::open(book, store_at(100_000)).position().page, last);
    }

    #[test]
    fn test_open_without_record_or_with_broken_store() {
        let store = Box::new(EphemeralPositionStore::new());
        let session = ReadingSession::open(sample_book(), store);
        assert_eq!(session.position().page, 0);

        let session = ReadingSession::open(sample_book(), Box::new(UnreadableStore));
        assert_eq!(session.position().page, 0);
    }

    #[test]
    fn test_apply_moves_and_persists() {
        let saves = Rc::new(Cell::new(0));
        let store = FlakyStore {
            record: None,
            fail_writes: Rc::new(Cell::new(false)),
            saves: saves.clone(),
        };
        let mut session = ReadingSession::open(sample_book(), Box::new(store));

        assert!(session.apply(Navigation::NextPage).unwrap());
        assert!(session.apply(Navigation::NextPage).unwrap());
        assert!(session.apply(Navigation::PreviousPage).unwrap());
        assert_eq!(session.position().page, 1);
        assert_eq!(saves.get(), 3);

        // no-op at the start does not write
        session.apply(Navigation::FirstPage).unwrap();
        assert!(!session.apply(Navigation::PreviousPage).unwrap());
        assert_eq!(saves.get(), 4);
    }

    #[test]
    fn test_chapter_jump_and_invalid_reference() {
        let mut session = ReadingSession::open(sample_book(), store_at(2));
        let third_start = session.book().chapters()[2].start_page;

        session.apply(Navigation::Chapter(3)).unwrap();
        assert_eq!(session.position().page, third_start);
        assert_eq!(session.current_chapter().map(|(i, _)| i), Some(2));

        let err = session.apply(Navigation::Chapter(9)).unwrap_err();
        assert!(matches!(
            err,
            ReaderError::InvalidChapterReference { index: 9, count: 4 }
        ));
        assert_eq!(session.position().page, third_start);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let fail_writes = Rc::new(Cell::new(false));
        let store = FlakyStore {
            record: None,
            fail_writes: fail_writes.clone(),
            saves: Rc::new(Cell::new(0)),
        };
        let mut session = ReadingSession::open(sample_book(), Box::new(store));
        session.apply(Navigation::NextPage).unwrap();

        fail_writes.set(true);
        let err = session.apply(Navigation::NextPage).unwrap_err();
        assert!(matches!(err, ReaderError::Persistence(_)));
        assert_eq!(session.position().page, 1);

        assert!(session.reset().is_err());
        assert_eq!(session.position().page, 1);
    }

    #[test]
    fn test_resize_remaps_proportionally() {
        let mut session = ReadingSession::open(sample_book(), store_at(0));
        session.apply(Navigation::LastPage).unwrap();
        let old_total = session.book().page_count();
        let old_page = session.position().page;

        // 40 + 4 columns, 10 + 8 rows is the current layout: nothing to do
        assert!(!session.resize(44, 18, Chrome::default()).unwrap());

        assert!(session.resize(24, 13, Chrome::default()).unwrap());
        let new_total = session.book().page_count();
        assert!(new_total > old_total);
        assert_eq!(
            session.position().page,
            remap_page(old_page, old_total, new_total)
        );
        assert!(session.position().page < new_total);
    }

    #[test]
    fn test_resize_keeps_new_layout_when_save_fails() {
        let fail_writes = Rc::new(Cell::new(true));
        let store = FlakyStore {
            record: None,
            fail_writes,
            saves: Rc::new(Cell::new(0)),
        };
        let mut session = ReadingSession::open(sample_book(), Box::new(store));

        assert!(session.resize(200, 60, Chrome::default()).is_err());
        assert_eq!(session.book().layout(), PageLayout::new(196, 52));
        assert!(session.position().page < session.book().page_count());
    }

    #[test]
    fn test_current_page_and_last_page() {
        let mut session = ReadingSession::open(sample_book(), store_at(0));
        assert!(session.current_page().unwrap().starts_with("Chapter 1"));
        assert!(!session.is_at_last_page());

        session.apply(Navigation::LastPage).unwrap();
        assert!(session.is_at_last_page());
    }
}
