//! Builders for the form bodies the admin pages accept.
//!
//! Field order follows what a browser submits. Keys may repeat, so payloads
//! are kept as ordered pairs and never collapsed into a map.

use crate::field_name::{encode_address, setting_field};
use crate::layout::PageLayout;
use crate::model::{
    AddMembersOptions, GeneralOptionsChanges, MemberSettings, ModerationAction,
    ModerationOptions, RemoveMembersOptions,
};

pub const PASSWORD_FIELD: &str = "adminpw";
const CHECKED: &str = "on";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormPayload {
    pairs: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn push_pair(&mut self, (name, value): &(String, String)) {
        self.push(name.as_str(), value.as_str());
    }

    pub fn extend(&mut self, other: FormPayload) {
        self.pairs.extend(other.pairs);
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every value submitted under `name`, in order.
    pub fn values<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a str> + 'n
    where
        'a: 'n,
    {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first(name).is_some()
    }
}

impl FromIterator<(String, String)> for FormPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

pub fn login_form(password: &str, layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    form.push(PASSWORD_FIELD, password);
    form.push_pair(&layout.login_button);
    form
}

/// Checkbox fields of one member. Disabled flags are left out: the server
/// reads a missing checkbox as off.
pub fn member_settings_fields(settings: &MemberSettings) -> FormPayload {
    let mut form = FormPayload::new();
    form.push("user", encode_address(&settings.email));
    for key in settings.enabled_keys() {
        form.push(setting_field(&settings.email, key), CHECKED);
    }
    form
}

pub fn member_settings_form(members: &[MemberSettings], layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    for settings in members {
        form.extend(member_settings_fields(settings));
    }
    form.push_pair(&layout.members_submit);
    form
}

pub fn add_members_form(
    emails: &[String],
    options: AddMembersOptions,
    layout: &PageLayout,
) -> FormPayload {
    let mut form = FormPayload::new();
    form.push("subscribe_or_invite", "0");
    form.push(
        "send_welcome_msg_to_this_batch",
        flag(options.send_welcome_message),
    );
    form.push(
        "send_notifications_to_list_owner",
        flag(options.notify_owner),
    );
    form.push("subscribees", emails.join("\n"));
    form.push_pair(&layout.members_submit);
    form
}

pub fn remove_members_form(
    emails: &[String],
    options: RemoveMembersOptions,
    layout: &PageLayout,
) -> FormPayload {
    let mut form = FormPayload::new();
    form.push(
        "send_unsub_ack_to_this_batch",
        flag(options.send_acknowledgement),
    );
    form.push(
        "send_unsub_notifications_to_list_owner",
        flag(options.notify_owner),
    );
    form.push("unsubscribees", emails.join("\n"));
    form.push_pair(&layout.members_submit);
    form
}

pub fn sync_members_form(emails: &[String], layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    form.push("memberlist", emails.join("\n"));
    form.push_pair(&layout.members_submit);
    form
}

pub fn moderation_form(
    message_id: u64,
    action: ModerationAction,
    options: &ModerationOptions,
    layout: &PageLayout,
) -> FormPayload {
    let mut form = FormPayload::new();
    form.push(message_id.to_string(), action.form_value());
    if let Some(message) = &options.rejection_message {
        form.push(format!("comment-{message_id}"), message.as_str());
    }
    if options.preserve_for_admin {
        form.push(format!("preserve-{message_id}"), CHECKED);
    }
    if options.forward_to_owner {
        form.push(format!("forward-{message_id}"), CHECKED);
        if let Some(address) = &options.forward_address {
            form.push(format!("forward-addr-{message_id}"), address.as_str());
        }
    }
    form.push_pair(&layout.moderation_submit);
    form
}

pub fn all_moderated_form(moderated: bool, layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    form.push("allmodbit_val", flag(moderated));
    form.push_pair(&layout.all_moderated_button);
    form
}

pub fn accepted_senders_form(senders: &[String], layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    form.push("accept_these_nonmembers", senders.join("\n"));
    form.push_pair(&layout.options_submit);
    form
}

pub fn general_options_form(changes: &GeneralOptionsChanges, layout: &PageLayout) -> FormPayload {
    let mut form = FormPayload::new();
    push_bool(&mut form, "send_reminders", changes.send_reminders);
    push_text(&mut form, "welcome_msg", changes.welcome_msg.as_deref());
    push_bool(&mut form, "send_welcome_msg", changes.send_welcome_msg);
    push_text(&mut form, "goodbye_msg", changes.goodbye_msg.as_deref());
    push_bool(&mut form, "send_goodbye_msg", changes.send_goodbye_msg);
    push_bool(&mut form, "admin_immed_notify", changes.admin_immed_notify);
    push_bool(&mut form, "admin_notify_mchanges", changes.admin_notify_mchanges);
    push_bool(
        &mut form,
        "respond_to_post_requests",
        changes.respond_to_post_requests,
    );
    if let Some(chunk) = changes.admin_member_chunksize {
        form.push("admin_member_chunksize", chunk.to_string());
    }
    form.push_pair(&layout.options_submit);
    form
}

fn push_bool(form: &mut FormPayload, name: &str, value: Option<bool>) {
    if let Some(value) = value {
        form.push(name, flag(value));
    }
}

fn push_text(form: &mut FormPayload, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        form.push(name, value);
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
