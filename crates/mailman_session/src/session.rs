use mailman_core::forms::{self, PASSWORD_FIELD};
use mailman_core::{
    AddMembersOptions, BulkAddResults, BulkRemoveResults, BulkSyncResults, FormPayload,
    GeneralOptions, GeneralOptionsChanges, MemberSettings, ModerationAction, ModerationOptions,
    ModerationRequest, ModerationRequestDetails, PageLayout, RemoveMembersOptions,
};
use mailman_logging::{mm_debug, mm_info, mm_trace, redact};
use url::Url;

use crate::decode::decode_page;
use crate::endpoints::Endpoints;
use crate::error::SessionError;
use crate::transport::{RawResponse, ReqwestTransport, Transport, TransportSettings};

const HTTP_OK: u16 = 200;
const HTTP_UNAUTHORIZED: u16 = 401;

/// An authenticated admin session for one list.
///
/// The session is fixed at construction; only the transport's cookie jar
/// changes between calls. Each operation is a single request answered by a
/// single page, with no retries.
pub struct ListSession<T: Transport = ReqwestTransport> {
    transport: T,
    endpoints: Endpoints,
    password: String,
    layout: PageLayout,
}

impl ListSession<ReqwestTransport> {
    /// Build the default HTTP transport and log in.
    pub fn connect(
        base_url: &str,
        list: &str,
        password: &str,
        settings: &TransportSettings,
        layout: PageLayout,
    ) -> Result<Self, SessionError> {
        let transport = ReqwestTransport::new(settings)?;
        let session = Self::with_transport(transport, base_url, list, password, layout);
        session.authenticate()?;
        Ok(session)
    }
}

impl<T: Transport> ListSession<T> {
    /// Wrap an existing transport without logging in.
    pub fn with_transport(
        transport: T,
        base_url: &str,
        list: &str,
        password: &str,
        layout: PageLayout,
    ) -> Self {
        Self {
            transport,
            endpoints: Endpoints::new(base_url, list),
            password: password.to_string(),
            layout,
        }
    }

    pub fn list(&self) -> &str {
        self.endpoints.list()
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Post the admin password to the list's login page. The server answers
    /// a wrong password with 401.
    pub fn authenticate(&self) -> Result<(), SessionError> {
        let url = self.endpoints.login()?;
        let payload = forms::login_form(&self.password, &self.layout);
        let response = self.post(&url, &payload)?;
        match response.status {
            HTTP_OK => {
                mm_info!("authenticated to list {}", self.list());
                Ok(())
            }
            HTTP_UNAUTHORIZED => Err(SessionError::IncorrectPassword {
                list: self.list().to_string(),
            }),
            status => Err(SessionError::UnexpectedStatus {
                operation: "authenticating",
                status,
            }),
        }
    }

    pub fn member_emails(&self) -> Result<Vec<String>, SessionError> {
        let html = self.fetch_page("fetching member emails", &self.endpoints.members()?)?;
        Ok(mailman_core::extract_member_emails(&html, &self.layout)?)
    }

    /// Settings of every member on the members page, or of the members
    /// matching `find` when given.
    pub fn member_settings(&self, find: Option<&str>) -> Result<Vec<MemberSettings>, SessionError> {
        let url = match find {
            Some(pattern) => self.endpoints.find_members(pattern)?,
            None => self.endpoints.members()?,
        };
        let html = self.fetch_page("fetching member settings", &url)?;
        Ok(mailman_core::extract_member_settings(&html, &self.layout)?)
    }

    pub fn set_member_settings(&self, members: &[MemberSettings]) -> Result<(), SessionError> {
        let payload = forms::member_settings_form(members, &self.layout);
        self.submit("updating member settings", &self.endpoints.members()?, payload)?;
        Ok(())
    }

    pub fn add_members(
        &self,
        emails: &[String],
        options: AddMembersOptions,
    ) -> Result<BulkAddResults, SessionError> {
        let payload = forms::add_members_form(emails, options, &self.layout);
        let html = self.submit("adding members", &self.endpoints.add_members()?, payload)?;
        Ok(mailman_core::extract_add_results(&html, &self.layout)?)
    }

    pub fn remove_members(
        &self,
        emails: &[String],
        options: RemoveMembersOptions,
    ) -> Result<BulkRemoveResults, SessionError> {
        let payload = forms::remove_members_form(emails, options, &self.layout);
        let html = self.submit("removing members", &self.endpoints.remove_members()?, payload)?;
        Ok(mailman_core::extract_remove_results(&html, &self.layout)?)
    }

    /// Replace the membership with exactly `emails`.
    pub fn sync_members(&self, emails: &[String]) -> Result<BulkSyncResults, SessionError> {
        let payload = forms::sync_members_form(emails, &self.layout);
        let html = self.submit("syncing members", &self.endpoints.sync_members()?, payload)?;
        Ok(mailman_core::extract_sync_results(&html, &self.layout)?)
    }

    pub fn moderation_requests(&self) -> Result<Vec<ModerationRequest>, SessionError> {
        let url = self.endpoints.moderation_queue()?;
        let html = self.fetch_page("fetching moderation requests", &url)?;
        Ok(mailman_core::extract_moderation_requests(&html, &self.layout)?)
    }

    /// `Ok(None)` when nothing is held under `message_id`.
    pub fn moderation_request_details(
        &self,
        message_id: u64,
    ) -> Result<Option<ModerationRequestDetails>, SessionError> {
        let url = self.endpoints.moderation_details(message_id)?;
        let html = self.fetch_page("fetching moderation request details", &url)?;
        Ok(mailman_core::extract_moderation_details(
            &html,
            message_id,
            &self.layout,
        )?)
    }

    pub fn moderate(
        &self,
        message_id: u64,
        action: ModerationAction,
        options: &ModerationOptions,
    ) -> Result<(), SessionError> {
        let payload = forms::moderation_form(message_id, action, options, &self.layout);
        let url = self.endpoints.moderation_queue()?;
        self.submit("moderating message", &url, payload)?;
        Ok(())
    }

    /// Set or clear the moderation bit of every member at once.
    pub fn set_all_moderated(&self, moderated: bool) -> Result<(), SessionError> {
        let payload = forms::all_moderated_form(moderated, &self.layout);
        self.submit("setting global moderation", &self.endpoints.members()?, payload)?;
        Ok(())
    }

    /// Replace the non-member addresses and patterns whose posts are
    /// accepted without moderation.
    pub fn set_accepted_senders(&self, senders: &[String]) -> Result<(), SessionError> {
        let payload = forms::accepted_senders_form(senders, &self.layout);
        let url = self.endpoints.sender_filters()?;
        self.submit("updating accepted senders", &url, payload)?;
        Ok(())
    }

    pub fn general_options(&self) -> Result<GeneralOptions, SessionError> {
        let url = self.endpoints.general_options()?;
        let html = self.fetch_page("fetching general options", &url)?;
        Ok(mailman_core::extract_general_options(&html)?)
    }

    pub fn update_general_options(&self, changes: &GeneralOptionsChanges) -> Result<(), SessionError> {
        if changes.is_empty() {
            mm_debug!("no general option changes for {}", self.list());
            return Ok(());
        }
        let payload = forms::general_options_form(changes, &self.layout);
        let url = self.endpoints.general_options()?;
        self.submit("updating general options", &url, payload)?;
        Ok(())
    }

    /// Members shown per page of the admin members listing.
    pub fn member_chunk_size(&self) -> Result<u32, SessionError> {
        let url = self.endpoints.general_options()?;
        let html = self.fetch_page("fetching member chunk size", &url)?;
        Ok(mailman_core::extract_member_chunk_size(&html)?)
    }

    /// Addresses on the public roster page, with obscured addresses restored.
    pub fn roster(&self) -> Result<Vec<String>, SessionError> {
        let html = self.fetch_page("fetching roster", &self.endpoints.roster()?)?;
        Ok(mailman_core::extract_roster_emails(&html, &self.layout)?)
    }

    fn fetch_page(&self, operation: &'static str, url: &Url) -> Result<String, SessionError> {
        let response = self.transport.get(url)?;
        mm_debug!("GET {url} -> {}", response.status);
        page_body(operation, response)
    }

    /// POST `payload` with the admin password prepended.
    fn submit(
        &self,
        operation: &'static str,
        url: &Url,
        payload: FormPayload,
    ) -> Result<String, SessionError> {
        let mut form = FormPayload::new();
        form.push(PASSWORD_FIELD, self.password.as_str());
        form.extend(payload);
        let response = self.post(url, &form)?;
        page_body(operation, response)
    }

    fn post(&self, url: &Url, payload: &FormPayload) -> Result<RawResponse, SessionError> {
        for (name, value) in payload.pairs() {
            mm_trace!("  {name}={}", redact(name, value));
        }
        let response = self.transport.post_form(url, payload)?;
        mm_debug!(
            "POST {url} ({} fields) -> {}",
            payload.len(),
            response.status
        );
        Ok(response)
    }
}

fn page_body(operation: &'static str, response: RawResponse) -> Result<String, SessionError> {
    if response.status != HTTP_OK {
        return Err(SessionError::UnexpectedStatus {
            operation,
            status: response.status,
        });
    }
    let page = decode_page(&response.body, response.content_type.as_deref())?;
    Ok(page.html)
}
