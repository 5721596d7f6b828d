use scraper::Html;

use super::{element_text, selector};
use crate::error::PageError;
use crate::layout::PageLayout;

/// Addresses on the public `/roster/<list>` page.
///
/// The roster obscures each address as `local at domain`; links whose text
/// does not have that shape are not member entries and are skipped.
pub fn extract_roster_emails(html: &str, layout: &PageLayout) -> Result<Vec<String>, PageError> {
    let document = Html::parse_document(html);
    let link_sel = selector("a")?;

    Ok(document
        .select(&link_sel)
        .filter_map(|link| decode_obscured(&element_text(link), &layout.roster_at_token))
        .collect())
}

/// `"alice at example.com"` → `alice@example.com`.
pub fn decode_obscured(text: &str, at_token: &str) -> Option<String> {
    let mut tokens = text.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(local), Some(at), Some(domain), None) if at == at_token => {
            Some(format!("{local}@{domain}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_three_part_text() {
        assert_eq!(
            decode_obscured("alice at example.com", "at").as_deref(),
            Some("alice@example.com")
        );
    }

    #[test]
    fn skips_anything_else() {
        assert_eq!(decode_obscured("alice example.com", "at"), None);
        assert_eq!(decode_obscured("alice at example.com extra", "at"), None);
        assert_eq!(decode_obscured("", "at"), None);
    }

    #[test]
    fn reads_links_from_roster_page() {
        let html = r#"<ul>
            <li><a href="../options/l/alice--at--example.com">alice at example.com</a>
            <li><a href="../options/l/bob--at--example.org">bob  at
                example.org</a>
            <li><a href="../listinfo/l">Back to list info</a>
        </ul>"#;
        assert_eq!(
            extract_roster_emails(html, &PageLayout::default()).unwrap(),
            ["alice@example.com", "bob@example.org"]
        );
    }
}
