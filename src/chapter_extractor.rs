use crate::error::ReaderError;
use crate::markup_cleaner::{clean, clean_inline};
use log::{debug, info};
use regex::Regex;
use std::sync::LazyLock;

/// Chapter header: `<h3><a name="ANCHOR"></a>TITLE</h3>`.
static CHAPTER_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<h3><a name="([^"]+)"></a>(.*?)</h3>"#)
        .expect("Failed to compile chapter marker regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    /// Identifier taken verbatim from the source markup.
    pub anchor: String,
    pub text: String,
    /// Index of this chapter's first page in the book-wide page sequence.
    pub start_page: usize,
}

impl Chapter {
    pub fn new(
        title: impl Into<String>,
        anchor: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            anchor: anchor.into(),
            text: text.into(),
            start_page: 0,
        }
    }
}

/// A chapter header found in the document, before any cleaning.
struct Marker<'a> {
    anchor: &'a str,
    raw_title: &'a str,
    start: usize,
    end: usize,
}

fn find_markers(document: &str) -> Vec<Marker<'_>> {
    CHAPTER_MARKER_RE
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Marker {
                anchor: caps.get(1)?.as_str(),
                raw_title: caps.get(2)?.as_str(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Splits a document into chapters, in document order.
///
/// Each chapter's body runs from the end of its header to the start of the
/// next header (or the end of the document).
pub fn extract(document: &str) -> Result<Vec<Chapter>, ReaderError> {
    let markers = find_markers(document);
    if markers.is_empty() {
        return Err(ReaderError::NoChaptersFound);
    }

    let chapters: Vec<Chapter> = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let body_end = markers
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(document.len());
            let body = &document[marker.end..body_end];
            let chapter = Chapter::new(
                clean_inline(marker.raw_title),
                marker.anchor,
                clean(body),
            );
            debug!(
                "Chapter {} '{}' ({}): {} chars of text",
                i + 1,
                chapter.title,
                chapter.anchor,
                chapter.text.len()
            );
            chapter
        })
        .collect();

    info!("Extracted {} chapters", chapters.len());
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_plain_chapters() {
        let doc = r#"<h3><a name="c1"></a>One</h3>Hello   world.<h3><a name="c2"></a>Two</h3>Bye."#;
        let chapters = extract(doc).unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "One");
        assert_eq!(chapters[0].anchor, "c1");
        assert_eq!(chapters[0].text, "Hello world.");
        assert_eq!(chapters[1].title, "Two");
        assert_eq!(chapters[1].anchor, "c2");
        assert_eq!(chapters[1].text, "Bye.");
    }

    #[test]
    fn test_no_markers_is_an_error() {
        let doc = "<h2>Not a chapter</h2><p>Text</p>";
        assert!(matches!(extract(doc), Err(ReaderError::NoChaptersFound)));
        assert!(matches!(extract(""), Err(ReaderError::NoChaptersFound)));
    }

    #[test]
    fn test_front_matter_before_first_marker_is_ignored() {
        let doc = r#"<html><body><h1>Don Quijote</h1><p>Prologue junk</p>
<h3><a name="cap1"></a>Cap&iacute;tulo <i>primero</i></h3>
<p>En un lugar de la Mancha,</p>
<p>de cuyo nombre no quiero acordarme.</p>
</body></html>"#;
        let chapters = extract(doc).unwrap();

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Capítulo primero");
        assert_eq!(
            chapters[0].text,
            "En un lugar de la Mancha,\n\nde cuyo nombre no quiero acordarme."
        );
    }

    #[test]
    fn test_multiline_title_and_empty_body() {
        let doc = "<h3><a name=\"a\"></a>Part\n One</h3><h3><a name=\"b\"></a>Part Two</h3>Body";
        let chapters = extract(doc).unwrap();

        assert_eq!(chapters[0].title, "Part\n One");
        assert_eq!(chapters[0].text, "");
        assert_eq!(chapters[1].text, "Body");
    }

    #[test]
    fn test_marker_tags_are_case_sensitive() {
        let doc = r#"<H3><A NAME="c1"></A>One</H3>Body"#;
        assert!(matches!(extract(doc), Err(ReaderError::NoChaptersFound)));
    }

    #[test]
    fn test_start_pages_are_unset_after_extraction() {
        let doc = r#"<h3><a name="c1"></a>One</h3>a<h3><a name="c2"></a>Two</h3>b"#;
        assert!(extract(doc).unwrap().iter().all(|c| c.start_page == 0));
    }
}
