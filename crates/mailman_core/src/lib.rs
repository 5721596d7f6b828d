//! Mailman core: page extractors and form builders for the admin web UI.
//!
//! Nothing in this crate performs I/O. It turns admin page markup into typed
//! records and typed changes into the form bodies the pages submit.
mod error;
pub mod field_name;
pub mod forms;
mod layout;
pub mod markup;
mod model;
pub mod pages;

pub use error::PageError;
pub use forms::FormPayload;
pub use layout::PageLayout;
pub use model::{
    AddMembersOptions, BulkAddResults, BulkRemoveResults, BulkSyncResults, GeneralOptions,
    GeneralOptionsChanges, MemberError, MemberSettings, ModerationAction, ModerationOptions,
    ModerationRequest, ModerationRequestDetails, RemoveMembersOptions, SettingKey,
};
pub use pages::bulk::{extract_add_results, extract_remove_results, extract_sync_results};
pub use pages::members::extract_member_emails;
pub use pages::moderation::{extract_moderation_details, extract_moderation_requests};
pub use pages::options::{extract_general_options, extract_member_chunk_size};
pub use pages::roster::extract_roster_emails;
pub use pages::settings::extract_member_settings;
