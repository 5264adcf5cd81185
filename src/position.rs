use crate::chapter_extractor::Chapter;
use crate::error::ReaderError;

/// Index of the page the reader is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadingPosition {
    pub page: usize,
}

impl ReadingPosition {
    pub fn new(page: usize) -> Self {
        Self { page }
    }

    /// Pulls an arbitrary (possibly negative) stored page into
    /// `[0, page_count - 1]`, or 0 for an empty book.
    pub fn clamped(page: i64, page_count: usize) -> Self {
        let last = page_count.saturating_sub(1);
        let page = usize::try_from(page.max(0)).unwrap_or(usize::MAX);
        Self {
            page: page.min(last),
        }
    }
}

/// Movements the reader can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// 1-based chapter number.
    Chapter(usize),
}

/// Index of the last chapter starting at or before `page`.
///
/// Returns 0 for an empty chapter list.
pub fn chapter_for_page(chapters: &[Chapter], page: usize) -> usize {
    chapters
        .iter()
        .take_while(|chapter| chapter.start_page <= page)
        .count()
        .saturating_sub(1)
}

/// Moves `old_page` to the same fraction of the book after the page count
/// changed from `old_total` to `new_total`.
pub fn remap_page(old_page: usize, old_total: usize, new_total: usize) -> usize {
    if old_total == 0 || new_total == 0 {
        return 0;
    }
    let scaled = old_page as u128 * new_total as u128 / old_total as u128;
    usize::try_from(scaled)
        .unwrap_or(usize::MAX)
        .min(new_total - 1)
}

/// Computes where `nav` leads from `position`.
///
/// `Ok(None)` means there is nowhere to go (a boundary, or already there).
/// An out-of-range chapter number is an error and leaves nothing changed.
pub fn navigate(
    position: ReadingPosition,
    page_count: usize,
    chapters: &[Chapter],
    nav: Navigation,
) -> Result<Option<ReadingPosition>, ReaderError> {
    let last = page_count.saturating_sub(1);
    let target = match nav {
        Navigation::NextPage if position.page < last => position.page + 1,
        Navigation::PreviousPage if position.page > 0 => position.page - 1,
        Navigation::NextPage | Navigation::PreviousPage => return Ok(None),
        Navigation::FirstPage => 0,
        Navigation::LastPage => last,
        Navigation::Chapter(number) => {
            if number == 0 || number > chapters.len() {
                return Err(ReaderError::InvalidChapterReference {
                    index: number,
                    count: chapters.len(),
                });
            }
            // A chapter with no pages of its own starts where the next one
            // does, which can equal the page count at the end of the book.
            return Ok(Some(ReadingPosition::new(
                chapters[number - 1].start_page.min(last),
            )));
        }
    };

    Ok((target != position.page).then_some(ReadingPosition::new(target)))
}
