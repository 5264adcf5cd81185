use crate::chapter_extractor::{Chapter, extract};
use crate::error::ReaderError;
use crate::paginator::{PageLayout, paginate};
use crate::position::chapter_for_page;
use log::info;
use std::fs;
use std::path::Path;

/// Chapters of a document and their pages at one layout.
///
/// The pages are always the concatenation of every chapter's pagination at
/// `layout`; changing the layout re-paginates the whole book.
#[derive(Debug, Clone)]
pub struct Book {
    chapters: Vec<Chapter>,
    pages: Vec<String>,
    layout: PageLayout,
}

impl Book {
    pub fn open(path: &Path, layout: PageLayout) -> Result<Self, ReaderError> {
        info!("Opening book {}", path.display());
        let document = fs::read_to_string(path).map_err(|source| ReaderError::Document {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_document(&document, layout)
    }

    pub fn from_document(document: &str, layout: PageLayout) -> Result<Self, ReaderError> {
        Ok(Self::from_chapters(extract(document)?, layout))
    }

    pub fn from_chapters(chapters: Vec<Chapter>, layout: PageLayout) -> Self {
        let (pages, chapters) = paginate(&chapters, layout);
        info!(
            "Book has {} chapters, {} pages at {}x{}",
            chapters.len(),
            pages.len(),
            layout.line_width(),
            layout.lines_per_page()
        );
        Self {
            chapters,
            pages,
            layout,
        }
    }

    /// Re-paginates for `layout`. Returns false, doing nothing, when the
    /// layout is unchanged.
    pub fn relayout(&mut self, layout: PageLayout) -> bool {
        if layout == self.layout {
            return false;
        }
        *self = Self::from_chapters(std::mem::take(&mut self.chapters), layout);
        true
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    /// The chapter owning `page`, if the book has any chapters.
    pub fn chapter_at(&self, page: usize) -> Option<(usize, &Chapter)> {
        let index = chapter_for_page(&self.chapters, page);
        self.chapters.get(index).map(|chapter| (index, chapter))
    }
}
