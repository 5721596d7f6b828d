//! URL templates for the Mailman 2 admin CGI scripts.

use url::Url;

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
    list: String,
}

impl Endpoints {
    /// `base` is the mailman CGI root, e.g. `https://lists.example.org/mailman`.
    pub fn new(base: &str, list: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            list: list.to_string(),
        }
    }

    pub fn list(&self) -> &str {
        &self.list
    }

    pub fn login(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}", self.list))
    }

    pub fn members(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/members", self.list))
    }

    /// Members page filtered by the server-side `findmember` search.
    pub fn find_members(&self, pattern: &str) -> Result<Url, SessionError> {
        let mut url = self.members()?;
        url.query_pairs_mut().append_pair("findmember", pattern);
        Ok(url)
    }

    pub fn add_members(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/members/add", self.list))
    }

    pub fn remove_members(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/members/remove", self.list))
    }

    pub fn sync_members(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/members/sync", self.list))
    }

    pub fn general_options(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/general", self.list))
    }

    pub fn sender_filters(&self) -> Result<Url, SessionError> {
        self.build(&format!("admin/{}/privacy/sender", self.list))
    }

    pub fn moderation_queue(&self) -> Result<Url, SessionError> {
        self.build(&format!("admindb/{}", self.list))
    }

    pub fn moderation_details(&self, message_id: u64) -> Result<Url, SessionError> {
        let mut url = self.moderation_queue()?;
        url.query_pairs_mut()
            .append_pair("msgid", &message_id.to_string());
        Ok(url)
    }

    pub fn roster(&self) -> Result<Url, SessionError> {
        self.build(&format!("roster/{}", self.list))
    }

    fn build(&self, path: &str) -> Result<Url, SessionError> {
        let raw = format!("{}/{path}", self.base);
        Url::parse(&raw).map_err(|err| SessionError::InvalidUrl(format!("{raw}: {err}")))
    }
}
