use crate::entities::decode_entities;
use regex::Regex;
use std::sync::LazyLock;

/// Separator between paragraphs in cleaned text.
pub const PARAGRAPH_BREAK: &str = "\n\n";

/// Structural tags that survive cleaning as whitespace, in the order they are
/// translated. `</p>` must run before `<p>` so the closing form is not eaten
/// by the opening pattern.
static BREAK_TAGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [("br", "\n"), ("/p", PARAGRAPH_BREAK), ("p", ""), ("hr", "\n")]
        .into_iter()
        .map(|(tag, replacement)| (tag_regex(tag), replacement))
        .collect()
});

static MULTI_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Failed to compile multi newline regex"));

fn tag_regex(tag: &str) -> Regex {
    Regex::new(&format!(r"(?i)<\s*{}\b[^>]*>", regex::escape(tag)))
        .expect("Failed to compile break tag regex")
}

/// Cleans a fragment of chapter markup into plain text.
///
/// Line breaks, paragraph ends and horizontal rules are kept as newlines,
/// every other tag is dropped, entities are decoded, and whitespace is
/// normalized so paragraphs are separated by exactly one blank line.
pub fn clean(fragment: &str) -> String {
    let mut text = fragment.replace("\r\n", "\n").replace('\r', "\n");

    for (re, replacement) in BREAK_TAGS.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }

    let text = strip_tags(&text);
    let text = decode_entities(&text);
    normalize_whitespace(&text)
}

/// Cleans a single-line fragment such as a chapter title.
pub fn clean_inline(fragment: &str) -> String {
    decode_entities(&strip_tags(fragment)).trim().to_string()
}

/// Removes everything between `<` and the following `>`.
///
/// Tags are not tracked for nesting; an unclosed `<` swallows the rest of
/// the input.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// Collapses runs of whitespace inside each line, trims every line, and
/// squeezes three or more newlines into a single paragraph break.
pub fn normalize_whitespace(input: &str) -> String {
    let joined = input
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n");

    MULTI_NEWLINE_RE
        .replace_all(&joined, PARAGRAPH_BREAK)
        .trim()
        .to_string()
}
