use serde::{Deserialize, Serialize};

/// Markup landmarks the extractors and encoders rely on.
///
/// These are the parts most likely to change between server releases, so
/// they are kept together and can be overridden from a profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Position of the member table among all tables on the members page.
    pub members_table_index: usize,
    pub settings_table_width: String,
    pub settings_table_border: String,
    /// Title and column header rows above the first member row.
    pub settings_header_rows: usize,

    pub subscribed_heading: String,
    pub subscribe_error_heading: String,
    pub unsubscribed_heading: String,

    /// `border` attribute of each sender group on the moderation page.
    pub held_group_border: String,
    /// Element wrapping every field label.
    pub label_tag: String,
    pub from_label: String,
    pub subject_label: String,
    pub size_label: String,
    pub reason_label: String,
    pub received_label: String,
    pub received_date_format: String,
    pub excerpt_label: String,
    pub headers_label: String,

    /// Separator between an address and its failure reason.
    pub error_reason_separator: String,
    /// Word between local part and domain on the public roster.
    pub roster_at_token: String,

    pub login_button: (String, String),
    pub members_submit: (String, String),
    pub options_submit: (String, String),
    pub moderation_submit: (String, String),
    pub all_moderated_button: (String, String),
}

impl PageLayout {
    /// Pages served by Mailman 2.1.
    pub fn mailman_2_1() -> Self {
        Self {
            members_table_index: 4,
            settings_table_width: "90%".to_string(),
            settings_table_border: "2".to_string(),
            settings_header_rows: 2,
            subscribed_heading: "Successfully subscribed:".to_string(),
            subscribe_error_heading: "Error subscribing:".to_string(),
            unsubscribed_heading: "Successfully Unsubscribed:".to_string(),
            held_group_border: "1".to_string(),
            label_tag: "strong".to_string(),
            from_label: "From:".to_string(),
            subject_label: "Subject:".to_string(),
            size_label: "Size:".to_string(),
            reason_label: "Reason:".to_string(),
            received_label: "Received:".to_string(),
            received_date_format: "%a %b %d %H:%M:%S %Y".to_string(),
            excerpt_label: "Message Excerpt:".to_string(),
            headers_label: "Message Headers:".to_string(),
            error_reason_separator: " -- ".to_string(),
            roster_at_token: "at".to_string(),
            login_button: pair("admlogin", "Let me in..."),
            members_submit: pair("setmemberopts_btn", "Submit Your Changes"),
            options_submit: pair("submit", "Submit Your Changes"),
            moderation_submit: pair("submit", "Submit All Data"),
            all_moderated_button: pair("allmodbit_btn", "Set"),
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::mailman_2_1()
    }
}

fn pair(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}
