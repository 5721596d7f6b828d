use chrono::NaiveDateTime;
use ego_tree::NodeId;
use mailman_logging::mm_debug;
use scraper::node::Node;
use scraper::{ElementRef, Html};

use super::{element_text, elements_in_order, find_following, find_label, selector};
use crate::error::PageError;
use crate::layout::PageLayout;
use crate::model::{ModerationRequest, ModerationRequestDetails};

/// Node ids of one sender group on the moderation queue page.
struct HeldGroup {
    table: NodeId,
    from_label: NodeId,
    from_wrapper: NodeId,
}

/// Held messages listed on `/admindb/<list>`.
///
/// Messages are grouped per sender in bordered tables. The sender is read
/// once per group from the element carrying the `From:` label; every link in
/// the group after the first one is a held message whose fields are the
/// cells following its labels.
pub fn extract_moderation_requests(
    html: &str,
    layout: &PageLayout,
) -> Result<Vec<ModerationRequest>, PageError> {
    let mut document = Html::parse_document(html);
    let group_sel = selector(&format!(r#"table[border="{}"]"#, layout.held_group_border))?;
    let label_sel = selector(&layout.label_tag)?;

    let mut groups = Vec::new();
    for table in document.select(&group_sel) {
        let from_label = table
            .select(&label_sel)
            .find(|label| element_text(*label) == layout.from_label)
            .ok_or_else(|| missing(&layout.from_label))?;
        let from_wrapper = from_label
            .parent()
            .ok_or_else(|| missing(&layout.from_label))?;
        groups.push(HeldGroup {
            table: table.id(),
            from_label: from_label.id(),
            from_wrapper: from_wrapper.id(),
        });
    }

    // The sender is the text left in the wrapper once the label is gone.
    for group in &groups {
        if let Some(mut label) = document.tree.get_mut(group.from_label) {
            label.detach();
        }
    }

    let mut requests = Vec::new();
    for group in &groups {
        let sender_email = document
            .tree
            .get(group.from_wrapper)
            .and_then(first_text)
            .ok_or_else(|| missing(&layout.from_label))?;
        let table = document
            .tree
            .get(group.table)
            .and_then(ElementRef::wrap)
            .ok_or_else(|| missing("held message group"))?;
        requests.extend(read_group(table, &sender_email, layout)?);
    }

    mm_debug!(
        "moderation queue: {} groups, {} held messages",
        groups.len(),
        requests.len()
    );
    Ok(requests)
}

fn read_group(
    table: ElementRef,
    sender_email: &str,
    layout: &PageLayout,
) -> Result<Vec<ModerationRequest>, PageError> {
    let elements = elements_in_order(table);
    let links: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, element)| {
            element.value().name() == "a" && element.value().attr("href").is_some()
        })
        .map(|(index, _)| index)
        .collect();

    let mut requests = Vec::new();
    let messages = links.get(1..).unwrap_or(&[]);
    for (position, &link) in messages.iter().enumerate() {
        let href = elements[link].value().attr("href").unwrap_or_default();
        // A message's fields end where the next message link starts.
        let end = messages
            .get(position + 1)
            .copied()
            .unwrap_or(elements.len());
        let fields = &elements[..end];
        let field = |label: &str| labelled_cell(fields, link, &layout.label_tag, label);
        let received = field(layout.received_label.as_str())?;

        requests.push(ModerationRequest {
            message_id: message_id_from_href(href)?,
            sender_email: sender_email.to_string(),
            subject: field(layout.subject_label.as_str())?,
            size_description: field(layout.size_label.as_str())?,
            reason: field(layout.reason_label.as_str())?,
            received_date: parse_received_date(&received, &layout.received_date_format)?,
        });
    }
    Ok(requests)
}

/// Text of the nearest cell after the nearest `label` following `from`,
/// both searched no further than the end of `elements`.
fn labelled_cell(
    elements: &[ElementRef],
    from: usize,
    tag: &str,
    label: &str,
) -> Result<String, PageError> {
    let label_at = find_label(elements, from, tag, label).ok_or_else(|| missing(label))?;
    let cell_at = find_following(elements, label_at, "td")
        .ok_or_else(|| missing(&format!("cell after {label}")))?;
    Ok(element_text(elements[cell_at]))
}

/// Held message id from a link such as `admindb/list?msgid=42`.
pub fn message_id_from_href(href: &str) -> Result<u64, PageError> {
    href.rsplit('=')
        .next()
        .and_then(|id| id.trim().parse().ok())
        .ok_or_else(|| PageError::InvalidMessageId(href.to_string()))
}

/// Parse a received timestamp such as `Mon Jan  2 15:04:05 2023`.
///
/// Runs of whitespace are collapsed first since single-digit days are
/// space-padded on the page.
pub fn parse_received_date(value: &str, format: &str) -> Result<NaiveDateTime, PageError> {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, format).map_err(|_| PageError::InvalidDate {
        value: value.to_string(),
        format: format.to_string(),
    })
}

/// Details page `/admindb/<list>?msgid=<id>`.
///
/// A page without the excerpt label means the id has no pending request,
/// which is `Ok(None)`. An excerpt without headers is never served for a
/// real request and is reported as a page error.
pub fn extract_moderation_details(
    html: &str,
    message_id: u64,
    layout: &PageLayout,
) -> Result<Option<ModerationRequestDetails>, PageError> {
    let document = Html::parse_document(html);
    let elements = elements_in_order(document.root_element());

    let Some(excerpt_at) = find_label(&elements, 0, &layout.label_tag, &layout.excerpt_label)
    else {
        return Ok(None);
    };
    let message_contents = textarea_after(&elements, excerpt_at, &layout.excerpt_label)?;

    let headers_at = find_label(&elements, 0, &layout.label_tag, &layout.headers_label)
        .ok_or_else(|| missing(&layout.headers_label))?;
    let headers = textarea_after(&elements, headers_at, &layout.headers_label)?;

    Ok(Some(ModerationRequestDetails {
        message_id,
        message_contents,
        headers,
    }))
}

fn textarea_after(elements: &[ElementRef], label_at: usize, label: &str) -> Result<String, PageError> {
    let area_at = find_following(elements, label_at, "textarea")
        .ok_or_else(|| missing(&format!("text area after {label}")))?;
    Ok(elements[area_at].text().collect())
}

fn first_text(node: ego_tree::NodeRef<'_, Node>) -> Option<String> {
    node.children().find_map(|child| {
        let text = match child.value() {
            Node::Text(text) => text.trim().to_string(),
            Node::Element(_) => ElementRef::wrap(child).map(element_text)?,
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

fn missing(what: &str) -> PageError {
    PageError::MissingLandmark(what.to_string())
}
