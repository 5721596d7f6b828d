//! One extractor per admin page.
//!
//! Extractors take the decoded page markup, usually with the active
//! [`PageLayout`](crate::PageLayout), and return typed records. None of them
//! perform I/O. Landmarks that are missing where absence is legitimate (an
//! empty list, no pending request) yield an empty result; landmarks that
//! must be present yield a [`PageError`].

pub mod bulk;
pub mod members;
pub mod moderation;
pub mod options;
pub mod roster;
pub mod settings;

use scraper::{ElementRef, Selector};

use crate::error::PageError;

pub(crate) fn selector(css: &str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|_| PageError::InvalidSelector(css.to_string()))
}

pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Elements under `root` in document order, `root` included.
pub(crate) fn elements_in_order(root: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    root.descendants().filter_map(ElementRef::wrap).collect()
}

/// Position of the first `tag` element at or after `from` whose text is
/// exactly `label`.
pub(crate) fn find_label(
    elements: &[ElementRef],
    from: usize,
    tag: &str,
    label: &str,
) -> Option<usize> {
    elements
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, element)| {
            element.value().name().eq_ignore_ascii_case(tag) && element_text(**element) == label
        })
        .map(|(index, _)| index)
}

/// Position of the first `tag` element strictly after `after`.
pub(crate) fn find_following(elements: &[ElementRef], after: usize, tag: &str) -> Option<usize> {
    elements
        .iter()
        .enumerate()
        .skip(after + 1)
        .find(|(_, element)| element.value().name().eq_ignore_ascii_case(tag))
        .map(|(index, _)| index)
}
