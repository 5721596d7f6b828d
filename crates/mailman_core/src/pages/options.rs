use scraper::Html;

use super::selector;
use crate::error::PageError;
use crate::model::GeneralOptions;

const CHUNK_SIZE_FIELD: &str = "admin_member_chunksize";

/// Options on `/admin/<list>/general`. Every field must be present.
pub fn extract_general_options(html: &str) -> Result<GeneralOptions, PageError> {
    let document = Html::parse_document(html);
    Ok(GeneralOptions {
        send_reminders: boolean_field(&document, "send_reminders")?,
        welcome_msg: field_value(&document, "welcome_msg")?,
        send_welcome_msg: boolean_field(&document, "send_welcome_msg")?,
        goodbye_msg: field_value(&document, "goodbye_msg")?,
        send_goodbye_msg: boolean_field(&document, "send_goodbye_msg")?,
        admin_immed_notify: boolean_field(&document, "admin_immed_notify")?,
        admin_notify_mchanges: boolean_field(&document, "admin_notify_mchanges")?,
        respond_to_post_requests: boolean_field(&document, "respond_to_post_requests")?,
        admin_member_chunksize: integer_field(&document, CHUNK_SIZE_FIELD)?,
    })
}

/// Members shown per page on the admin members listing.
pub fn extract_member_chunk_size(html: &str) -> Result<u32, PageError> {
    integer_field(&Html::parse_document(html), CHUNK_SIZE_FIELD)
}

/// A yes/no option rendered as radio buttons valued `0` and `1`.
pub fn boolean_field(document: &Html, name: &str) -> Result<bool, PageError> {
    let inputs = selector(&format!(r#"input[name="{name}"]"#))?;
    let mut choices = document.select(&inputs).peekable();
    if choices.peek().is_none() {
        return Err(PageError::MissingLandmark(name.to_string()));
    }
    choices
        .find(|choice| choice.value().attr("checked").is_some())
        .map(|choice| choice.value().attr("value") == Some("1"))
        .ok_or_else(|| PageError::UnsetBooleanOption(name.to_string()))
}

pub fn integer_field(document: &Html, name: &str) -> Result<u32, PageError> {
    let raw = field_value(document, name)?;
    raw.trim().parse().map_err(|_| PageError::InvalidInteger {
        field: name.to_string(),
        value: raw,
    })
}

/// Literal value of the input or text area called `name`.
pub fn field_value(document: &Html, name: &str) -> Result<String, PageError> {
    let input_sel = selector(&format!(r#"input[name="{name}"]"#))?;
    if let Some(input) = document.select(&input_sel).next() {
        return Ok(input.value().attr("value").unwrap_or_default().to_string());
    }
    let area_sel = selector(&format!(r#"textarea[name="{name}"]"#))?;
    document
        .select(&area_sel)
        .next()
        .map(|area| area.text().collect())
        .ok_or_else(|| PageError::MissingLandmark(name.to_string()))
}
