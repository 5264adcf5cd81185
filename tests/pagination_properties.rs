use pagerat::chapter_extractor::Chapter;
use pagerat::paginator::{MIN_LINE_WIDTH, MIN_LINES_PER_PAGE, PageLayout, paginate};
use pagerat::position::{chapter_for_page, remap_page};
use proptest::prelude::*;
use unicode_width::UnicodeWidthStr;

fn chapter_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            8 => "[a-z]{1,12}",
            1 => "[a-z]{21,30}",
            1 => Just("\n\n".to_string()),
        ],
        0..120,
    )
    .prop_map(|words| words.join(" "))
}

fn chapters() -> impl Strategy<Value = Vec<Chapter>> {
    prop::collection::vec(chapter_text(), 1..6).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chapter::new(format!("Chapter {}", i + 1), format!("c{i}"), text))
            .collect()
    })
}

fn layouts() -> impl Strategy<Value = PageLayout> {
    (0usize..120, 0usize..40).prop_map(|(width, lines)| PageLayout::new(width, lines))
}

proptest! {
    #[test]
    fn prop_pagination_is_deterministic(chapters in chapters(), layout in layouts()) {
        let first = paginate(&chapters, layout);
        let second = paginate(&chapters, layout);
        prop_assert_eq!(first.0, second.0);
        prop_assert_eq!(first.1, second.1);
    }

    #[test]
    fn prop_layout_respects_floors(layout in layouts()) {
        prop_assert!(layout.line_width() >= MIN_LINE_WIDTH);
        prop_assert!(layout.lines_per_page() >= MIN_LINES_PER_PAGE);
    }

    #[test]
    fn prop_start_pages_are_ordered(chapters in chapters(), layout in layouts()) {
        let (pages, stamped) = paginate(&chapters, layout);
        prop_assert_eq!(stamped.len(), chapters.len());
        prop_assert_eq!(stamped[0].start_page, 0);
        for pair in stamped.windows(2) {
            prop_assert!(pair[0].start_page <= pair[1].start_page);
        }
        prop_assert!(stamped.iter().all(|c| c.start_page <= pages.len()));
    }

    #[test]
    fn prop_pages_fit_layout(chapters in chapters(), layout in layouts()) {
        let (pages, _) = paginate(&chapters, layout);
        for page in &pages {
            prop_assert!(!page.trim().is_empty());
            prop_assert!(page.lines().count() <= layout.lines_per_page());
            for line in page.lines() {
                let single_word = !line.contains(' ');
                prop_assert!(
                    line.width() <= layout.line_width() || single_word,
                    "line {:?} wider than {}",
                    line,
                    layout.line_width()
                );
            }
        }
    }

    #[test]
    fn prop_remap_stays_in_range(
        old_total in 1usize..5000,
        new_total in 1usize..5000,
        seed: usize,
    ) {
        let old_page = seed % old_total;
        let page = remap_page(old_page, old_total, new_total);
        prop_assert!(page < new_total);
        prop_assert_eq!(remap_page(old_page, old_total, old_total), old_page);
    }

    #[test]
    fn prop_chapter_for_page_finds_last_started(
        chapters in chapters(),
        layout in layouts(),
        seed: usize,
    ) {
        let (pages, stamped) = paginate(&chapters, layout);
        prop_assume!(!pages.is_empty());
        let page = seed % pages.len();

        let index = chapter_for_page(&stamped, page);
        prop_assert!(stamped[index].start_page <= page);
        if let Some(next) = stamped.get(index + 1) {
            prop_assert!(next.start_page > page);
        }
    }
}

#[test]
fn test_empty_chapter_list_maps_to_zero() {
    assert_eq!(chapter_for_page(&[], 7), 0);
    assert_eq!(remap_page(3, 0, 10), 0);
}
