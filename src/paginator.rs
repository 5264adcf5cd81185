use crate::chapter_extractor::Chapter;
use crate::markup_cleaner::PARAGRAPH_BREAK;
use log::debug;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

pub const MIN_LINE_WIDTH: usize = 20;
pub const MIN_LINES_PER_PAGE: usize = 5;
pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const DEFAULT_LINES_PER_PAGE: usize = 25;

/// Page geometry. Always at least `MIN_LINE_WIDTH` x `MIN_LINES_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    line_width: usize,
    lines_per_page: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_WIDTH, DEFAULT_LINES_PER_PAGE)
    }
}

impl PageLayout {
    pub fn new(line_width: usize, lines_per_page: usize) -> Self {
        Self {
            line_width: line_width.max(MIN_LINE_WIDTH),
            lines_per_page: lines_per_page.max(MIN_LINES_PER_PAGE),
        }
    }

    /// Derives the page geometry for a terminal of `width` x `height` cells.
    ///
    /// The chrome margins are subtracted first and the floors applied after.
    /// A zero dimension means the size is unknown, so `fallback` is used for
    /// that axis.
    pub fn for_terminal(width: u16, height: u16, chrome: Chrome, fallback: PageLayout) -> Self {
        let line_width = if width == 0 {
            fallback.line_width
        } else {
            usize::from(width.saturating_sub(chrome.horizontal))
        };
        let lines_per_page = if height == 0 {
            fallback.lines_per_page
        } else {
            usize::from(height.saturating_sub(chrome.vertical))
        };
        Self::new(line_width, lines_per_page)
    }

    pub fn line_width(&self) -> usize {
        self.line_width
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }
}

/// Terminal cells taken by everything around the page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub horizontal: u16,
    pub vertical: u16,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            horizontal: 4,
            vertical: 8,
        }
    }
}

/// Paginates every chapter and returns the flattened page sequence together
/// with a copy of the chapters whose `start_page` points into it.
///
/// Chapters with nothing to show contribute no pages; their `start_page`
/// equals that of the next chapter.
pub fn paginate(chapters: &[Chapter], layout: PageLayout) -> (Vec<String>, Vec<Chapter>) {
    let mut pages = Vec::new();
    let mut stamped = Vec::with_capacity(chapters.len());

    for chapter in chapters {
        let mut chapter = chapter.clone();
        chapter.start_page = pages.len();

        let source = format!("{}{}{}", chapter.title, PARAGRAPH_BREAK, chapter.text);
        pages.extend(paginate_text(
            source.trim(),
            layout.line_width(),
            layout.lines_per_page(),
        ));
        stamped.push(chapter);
    }

    debug!(
        "Paginated {} chapters into {} pages at {}x{}",
        stamped.len(),
        pages.len(),
        layout.line_width(),
        layout.lines_per_page()
    );
    (pages, stamped)
}

/// Wraps `text` to `line_width` and slices the lines into pages of at most
/// `lines_per_page` lines. No floors are applied here.
pub fn paginate_text(text: &str, line_width: usize, lines_per_page: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let wrapped = wrap_text(text, line_width);
    let lines: Vec<&str> = wrapped.split('\n').collect();

    lines
        .chunks(lines_per_page.max(1))
        .map(|chunk| chunk.join("\n").trim().to_string())
        .collect()
}

/// Wraps each paragraph independently and rejoins them with a blank line.
pub fn wrap_text(text: &str, line_width: usize) -> String {
    text.split(PARAGRAPH_BREAK)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| wrap_paragraph(paragraph, line_width))
        .collect::<Vec<_>>()
        .join(PARAGRAPH_BREAK)
}

/// Greedy word wrap on display width. Runs of whitespace collapse to one
/// space. A word wider than `line_width` gets a line of its own and is never
/// split, hyphens included.
pub fn wrap_paragraph(paragraph: &str, line_width: usize) -> String {
    let words = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
    let options = Options::new(line_width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    textwrap::wrap(&words, options).join("\n")
}
