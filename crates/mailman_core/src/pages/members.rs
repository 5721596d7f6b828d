use scraper::Html;

use super::{element_text, selector};
use crate::error::PageError;
use crate::layout::PageLayout;

/// Member addresses listed on `/admin/<list>/members`.
///
/// Reads the first hyperlink of every row of the member table, skipping the
/// header row. A page without that table (empty list, or a layout change)
/// yields no members.
pub fn extract_member_emails(html: &str, layout: &PageLayout) -> Result<Vec<String>, PageError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let link_sel = selector("a")?;

    let Some(table) = document.select(&table_sel).nth(layout.members_table_index) else {
        return Ok(Vec::new());
    };

    let emails = table
        .select(&row_sel)
        .skip(1)
        .filter_map(|row| row.select(&link_sel).next())
        .map(element_text)
        .filter(|email| !email.is_empty())
        .collect();
    Ok(emails)
}
