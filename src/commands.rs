//! Non-interactive subcommands. Each one writes its report to `out`.

use crate::book::Book;
use crate::position::{Navigation, ReadingPosition, chapter_for_page};
use crate::position_store::{PositionRecord, PositionStore};
use crate::session::ReadingSession;
use anyhow::Result;
use log::{info, warn};
use std::io::Write;

pub const PAGE_SEPARATOR: &str = "\n---\n\n";
pub const NO_PAGES: &str = "No pages found.";
pub const END_OF_BOOK: &str = "End of book. Use `pagerat reset` to start over.";

/// One `NNN. Title` line per chapter.
pub fn list_chapters(book: &Book, out: &mut impl Write) -> Result<()> {
    for (i, chapter) in book.chapters().iter().enumerate() {
        writeln!(out, "{:3}. {}", i + 1, chapter.title)?;
    }
    Ok(())
}

/// Prints up to `count` pages from the current position and moves past
/// them. Stops at the last page, which stays the saved position.
pub fn read_pages(session: &mut ReadingSession, count: usize, out: &mut impl Write) -> Result<()> {
    if session.book().page_count() == 0 {
        writeln!(out, "{NO_PAGES}")?;
        return Ok(());
    }

    for printed in 0..count {
        if printed > 0 {
            write!(out, "{PAGE_SEPARATOR}")?;
        }
        write_page_header(session.book(), session.position(), out)?;
        writeln!(out)?;
        if let Some(page) = session.current_page() {
            writeln!(out, "{page}")?;
        }

        if session.is_at_last_page() {
            writeln!(out)?;
            writeln!(out, "{END_OF_BOOK}")?;
            break;
        }
        session.apply(Navigation::NextPage)?;
    }
    Ok(())
}

/// Where the saved position points, without moving it.
pub fn show_status(book: &Book, store: &dyn PositionStore, out: &mut impl Write) -> Result<()> {
    if book.page_count() == 0 {
        writeln!(out, "{NO_PAGES}")?;
        return Ok(());
    }

    let record = store.load().unwrap_or_else(|e| {
        warn!("Ignoring unreadable reading position: {e}");
        None
    });
    let saved_page = record.as_ref().map(|r| r.page).unwrap_or_default();
    let position = ReadingPosition::clamped(saved_page, book.page_count());

    write_page_header(book, position, out)?;
    if let Some(last_read) = record.and_then(|r| r.last_read) {
        writeln!(out, "Last read {}", last_read.format("%Y-%m-%d %H:%M UTC"))?;
    }
    Ok(())
}

/// Moves to the first page of 1-based `chapter`.
pub fn goto_chapter(
    session: &mut ReadingSession,
    chapter: usize,
    out: &mut impl Write,
) -> Result<()> {
    session.apply(Navigation::Chapter(chapter))?;
    let title = &session.book().chapters()[chapter - 1].title;
    writeln!(out, "Moved to chapter {chapter}: {title}")?;
    Ok(())
}

/// Saves page 0. Does not need the book.
pub fn reset_position(store: &mut dyn PositionStore, out: &mut impl Write) -> Result<()> {
    store.save(&PositionRecord::at(0, 0))?;
    info!("Reading position reset");
    writeln!(out, "Progress reset to the beginning.")?;
    Ok(())
}

fn write_page_header(book: &Book, position: ReadingPosition, out: &mut impl Write) -> Result<()> {
    let chapters = book.chapters();
    let index = chapter_for_page(chapters, position.page);
    writeln!(
        out,
        "Chapter {}/{}: {}",
        index + 1,
        chapters.len(),
        chapters[index].title
    )?;
    writeln!(out, "Page {}/{}", position.page + 1, book.page_count())?;
    Ok(())
}
