use scraper::{ElementRef, Html, Selector};

use super::selector;
use crate::error::PageError;
use crate::field_name::parse_setting_field;
use crate::layout::PageLayout;
use crate::model::MemberSettings;

/// Per-member options from the member table of `/admin/<list>/members`.
///
/// Every checkbox in a member row is named `<quoted-address>_<key>`; its
/// checked state is the flag value. Rows carrying no setting checkboxes
/// (footers, spacer rows) are skipped.
pub fn extract_member_settings(
    html: &str,
    layout: &PageLayout,
) -> Result<Vec<MemberSettings>, PageError> {
    let document = Html::parse_document(html);
    let table_sel = selector(&format!(
        r#"table[width="{}"][border="{}"]"#,
        layout.settings_table_width, layout.settings_table_border
    ))?;
    let row_sel = selector("tr")?;
    let input_sel = selector("input")?;

    let Some(table) = document.select(&table_sel).next() else {
        return Ok(Vec::new());
    };

    let mut members = Vec::new();
    for row in table.select(&row_sel).skip(layout.settings_header_rows) {
        if let Some(settings) = read_row(row, &input_sel)? {
            members.push(settings);
        }
    }
    Ok(members)
}

fn read_row(row: ElementRef, input_sel: &Selector) -> Result<Option<MemberSettings>, PageError> {
    let mut settings: Option<MemberSettings> = None;

    for input in row.select(input_sel).filter(|input| is_checkbox(*input)) {
        let Some(name) = input.value().attr("name") else {
            continue;
        };
        let Some((email, key)) = parse_setting_field(name)? else {
            continue;
        };

        let current = settings.get_or_insert_with(|| MemberSettings::new(email.clone()));
        if current.email != email {
            return Err(PageError::MismatchedMemberRow {
                expected: current.email.clone(),
                found: email,
            });
        }
        current.set(key, input.value().attr("checked").is_some());
    }

    Ok(settings)
}

fn is_checkbox(input: ElementRef) -> bool {
    input
        .value()
        .attr("type")
        .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
}
