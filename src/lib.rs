// Export modules for use in tests and the binary
pub mod book;
pub mod chapter_extractor;
pub mod chapter_list;
pub mod commands;
pub mod entities;
pub mod error;
pub mod event_source;
pub mod main_app;
pub mod markup_cleaner;
pub mod paginator;
pub mod panic_handler;
pub mod position;
pub mod position_store;
pub mod session;
pub mod settings;
pub mod theme;

pub mod test_utils;

pub use book::Book;
pub use chapter_extractor::Chapter;
pub use error::{PersistenceError, ReaderError};
pub use main_app::{App, run_app_with_event_source};
pub use paginator::{Chrome, PageLayout};
pub use position::{Navigation, ReadingPosition};
pub use session::ReadingSession;
