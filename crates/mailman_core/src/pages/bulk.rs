use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::error::PageError;
use crate::layout::PageLayout;
use crate::markup::list_item_texts;
use crate::model::{BulkAddResults, BulkRemoveResults, BulkSyncResults, MemberError};

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Result page of `/admin/<list>/members/add`.
pub fn extract_add_results(html: &str, layout: &PageLayout) -> Result<BulkAddResults, PageError> {
    let document = Html::parse_document(html);
    read_add_results(&document, layout)
}

/// Result page of `/admin/<list>/members/remove`.
pub fn extract_remove_results(
    html: &str,
    layout: &PageLayout,
) -> Result<BulkRemoveResults, PageError> {
    let document = Html::parse_document(html);
    read_remove_results(&document, layout)
}

/// Result page of `/admin/<list>/members/sync`, which reports both
/// subscriptions and removals.
pub fn extract_sync_results(html: &str, layout: &PageLayout) -> Result<BulkSyncResults, PageError> {
    let document = Html::parse_document(html);
    Ok(BulkSyncResults {
        added: read_add_results(&document, layout)?,
        removed: read_remove_results(&document, layout)?,
    })
}

fn read_add_results(document: &Html, layout: &PageLayout) -> Result<BulkAddResults, PageError> {
    let added = list_after_heading(document, &layout.subscribed_heading)?;
    let errors = list_after_heading(document, &layout.subscribe_error_heading)?
        .iter()
        .map(|item| parse_member_error(item, &layout.error_reason_separator))
        .collect();
    Ok(BulkAddResults { added, errors })
}

fn read_remove_results(
    document: &Html,
    layout: &PageLayout,
) -> Result<BulkRemoveResults, PageError> {
    let removed = list_after_heading(document, &layout.unsubscribed_heading)?;
    Ok(BulkRemoveResults { removed })
}

/// `address -- reason`, where the reason part is optional.
pub fn parse_member_error(item: &str, separator: &str) -> MemberError {
    match item.split_once(separator) {
        Some((email, reason)) => MemberError {
            email: email.trim().to_string(),
            error_reason: Some(reason.trim().to_string()),
        },
        None => MemberError {
            email: item.trim().to_string(),
            error_reason: None,
        },
    }
}

/// Items of the list that directly follows the heading titled `title`.
///
/// The server omits a section entirely when it has nothing to report, so a
/// missing heading is an empty section.
fn list_after_heading(document: &Html, title: &str) -> Result<Vec<String>, PageError> {
    let heading_sel = selector(HEADINGS)?;
    let Some(heading) = document
        .select(&heading_sel)
        .find(|heading| element_text(*heading) == title)
    else {
        return Ok(Vec::new());
    };

    let list = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(|element| matches!(element.value().name(), "ul" | "ol"))
        .ok_or_else(|| PageError::MissingListAfterHeading {
            heading: title.to_string(),
        })?;

    Ok(list_item_texts(&list.inner_html()))
}
