use scraper::Html;

pub const LIST_ITEM_OPEN: &str = "<li>";
pub const LIST_ITEM_CLOSE: &str = "</li>";

/// Recover the items of a list whose entries are opened but never closed.
///
/// Every `close` marker is dropped, the rest is split on `open`, and each
/// trimmed, non-empty segment is one item. Leading content before the first
/// marker is dropped with the other empty segments. Items keep any inline
/// markup they contain.
pub fn split_unclosed_items(inner: &str, open: &str, close: &str) -> Vec<String> {
    if open.is_empty() {
        return Vec::new();
    }
    let stripped = if close.is_empty() {
        inner.to_string()
    } else {
        inner.replace(close, "")
    };
    stripped
        .split(open)
        .skip(1)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// `<li>` items of a list container, reduced to their text content.
pub fn list_item_texts(inner: &str) -> Vec<String> {
    split_unclosed_items(inner, LIST_ITEM_OPEN, LIST_ITEM_CLOSE)
        .iter()
        .map(|item| fragment_text(item))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Text content of a markup fragment with entities decoded and tags dropped.
pub fn fragment_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{fragment_text, list_item_texts, split_unclosed_items};
    use pretty_assertions::assert_eq;

    fn wrap_unclosed(items: &[&str]) -> String {
        items.iter().map(|item| format!("\n<li>{item}")).collect()
    }

    #[test]
    fn unclosed_items_round_trip() {
        let cases: &[&[&str]] = &[
            &[],
            &["solo@example.com"],
            &["a@example.com", "b c", "x -- reason"],
            &["<em>a</em>@example.com", "<b>b</b> -- <i>bad</i> address"],
            &["tom&amp;jerry@example.com", "x_y%40example.com"],
        ];
        for items in cases {
            let markup = wrap_unclosed(items);
            assert_eq!(
                split_unclosed_items(&markup, "<li>", "</li>"),
                items.to_vec(),
                "markup {markup:?}"
            );
        }
    }

    #[test]
    fn empty_and_markerless_input_yield_nothing() {
        assert!(split_unclosed_items("", "<li>", "</li>").is_empty());
        assert!(split_unclosed_items("just some text", "<li>", "</li>").is_empty());
    }

    #[test]
    fn closed_items_are_handled_like_unclosed() {
        let markup = "<li>one</li>\n<li>two</li>";
        assert_eq!(split_unclosed_items(markup, "<li>", "</li>"), ["one", "two"]);
    }

    #[test]
    fn leading_content_and_blank_items_are_dropped() {
        let markup = "heading text<li>  <li>only</li>";
        assert_eq!(split_unclosed_items(markup, "<li>", "</li>"), ["only"]);
    }

    #[test]
    fn inline_markup_is_kept_in_the_fragment() {
        let markup = "<li><em>a</em>@example.com<li>b";
        assert_eq!(
            split_unclosed_items(markup, "<li>", "</li>"),
            ["<em>a</em>@example.com", "b"]
        );
    }

    #[test]
    fn item_texts_decode_entities() {
        let markup = "<li>tom&amp;jerry@example.com<li><b>c</b>@example.com";
        assert_eq!(
            list_item_texts(markup),
            ["tom&jerry@example.com", "c@example.com"]
        );
        assert_eq!(fragment_text("  <i>x</i> "), "x");
    }
}
