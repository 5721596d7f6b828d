//! Records returned by the extractors and accepted by the encoders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Per-member option keys, as suffixed onto checkbox names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    Moderated,
    Hidden,
    NoMail,
    Ack,
    NotMeToo,
    NoDupes,
    Digest,
    PlainTextDigest,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::Moderated,
        SettingKey::Hidden,
        SettingKey::NoMail,
        SettingKey::Ack,
        SettingKey::NotMeToo,
        SettingKey::NoDupes,
        SettingKey::Digest,
        SettingKey::PlainTextDigest,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            SettingKey::Moderated => "mod",
            SettingKey::Hidden => "hide",
            SettingKey::NoMail => "nomail",
            SettingKey::Ack => "ack",
            SettingKey::NotMeToo => "notmetoo",
            SettingKey::NoDupes => "nodupes",
            SettingKey::Digest => "digest",
            SettingKey::PlainTextDigest => "plain",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.suffix() == suffix)
    }
}

/// Options of one subscriber as shown on the admin members page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberSettings {
    pub email: String,
    #[serde(default)]
    pub moderated: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub no_mail: bool,
    #[serde(default)]
    pub ack: bool,
    #[serde(default)]
    pub not_me_too: bool,
    #[serde(default)]
    pub no_dupes: bool,
    #[serde(default)]
    pub digest: bool,
    #[serde(default)]
    pub plain_text_digest: bool,
}

impl MemberSettings {
    /// All flags off.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Moderated => self.moderated,
            SettingKey::Hidden => self.hidden,
            SettingKey::NoMail => self.no_mail,
            SettingKey::Ack => self.ack,
            SettingKey::NotMeToo => self.not_me_too,
            SettingKey::NoDupes => self.no_dupes,
            SettingKey::Digest => self.digest,
            SettingKey::PlainTextDigest => self.plain_text_digest,
        }
    }

    pub fn set(&mut self, key: SettingKey, enabled: bool) {
        let flag = match key {
            SettingKey::Moderated => &mut self.moderated,
            SettingKey::Hidden => &mut self.hidden,
            SettingKey::NoMail => &mut self.no_mail,
            SettingKey::Ack => &mut self.ack,
            SettingKey::NotMeToo => &mut self.not_me_too,
            SettingKey::NoDupes => &mut self.no_dupes,
            SettingKey::Digest => &mut self.digest,
            SettingKey::PlainTextDigest => &mut self.plain_text_digest,
        };
        *flag = enabled;
    }

    pub fn enabled_keys(&self) -> impl Iterator<Item = SettingKey> + '_ {
        SettingKey::ALL.into_iter().filter(|key| self.get(*key))
    }
}

/// An address the server refused to subscribe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberError {
    pub email: String,
    pub error_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkAddResults {
    pub added: Vec<String>,
    pub errors: Vec<MemberError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkRemoveResults {
    pub removed: Vec<String>,
}

/// The sync page reports subscriptions and removals on one page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkSyncResults {
    pub added: BulkAddResults,
    pub removed: BulkRemoveResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddMembersOptions {
    pub send_welcome_message: bool,
    pub notify_owner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveMembersOptions {
    pub send_acknowledgement: bool,
    pub notify_owner: bool,
}

/// One held message as listed on the moderation queue page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub message_id: u64,
    pub sender_email: String,
    pub subject: String,
    pub size_description: String,
    pub reason: String,
    pub received_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRequestDetails {
    pub message_id: u64,
    pub message_contents: String,
    pub headers: String,
}

/// Disposition of a held message. `Defer` leaves it in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Defer,
    Approve,
    Reject,
    Discard,
}

impl ModerationAction {
    /// Value of the per-message radio button on the admindb form.
    pub fn form_value(self) -> &'static str {
        match self {
            ModerationAction::Defer => "0",
            ModerationAction::Approve => "1",
            ModerationAction::Reject => "2",
            ModerationAction::Discard => "3",
        }
    }
}

impl std::str::FromStr for ModerationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "defer" => Ok(ModerationAction::Defer),
            "approve" | "accept" => Ok(ModerationAction::Approve),
            "reject" => Ok(ModerationAction::Reject),
            "discard" => Ok(ModerationAction::Discard),
            other => Err(format!("unknown moderation action {other:?}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModerationOptions {
    /// Sent back to the poster when rejecting.
    pub rejection_message: Option<String>,
    pub preserve_for_admin: bool,
    pub forward_to_owner: bool,
    /// Overrides the forward address the form pre-fills.
    pub forward_address: Option<String>,
}

/// Settings from the list's "General Options" page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralOptions {
    // Notifications
    pub send_reminders: bool,
    pub welcome_msg: String,
    pub send_welcome_msg: bool,
    pub goodbye_msg: String,
    pub send_goodbye_msg: bool,
    pub admin_immed_notify: bool,
    pub admin_notify_mchanges: bool,
    pub respond_to_post_requests: bool,

    // Additional settings
    pub admin_member_chunksize: u32,
}

/// Partial update of [`GeneralOptions`]; `None` keeps the server's value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralOptionsChanges {
    pub send_reminders: Option<bool>,
    pub welcome_msg: Option<String>,
    pub send_welcome_msg: Option<bool>,
    pub goodbye_msg: Option<String>,
    pub send_goodbye_msg: Option<bool>,
    pub admin_immed_notify: Option<bool>,
    pub admin_notify_mchanges: Option<bool>,
    pub respond_to_post_requests: Option<bool>,

    pub admin_member_chunksize: Option<u32>,
}

impl GeneralOptionsChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
