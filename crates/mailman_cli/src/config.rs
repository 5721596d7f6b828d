//! Connection profile loading.
//!
//! A profile is a RON file naming the server and list. Command-line flags
//! and the password environment variable take precedence over it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use mailman_core::PageLayout;
use mailman_logging::mm_info;
use mailman_session::TransportSettings;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub base_url: Option<String>,
    pub list: Option<String>,
    pub password: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Replaces the built-in Mailman 2.1 landmarks when the server's pages
    /// differ.
    pub layout: Option<PageLayout>,
}

impl Default for Profile {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            base_url: None,
            list: None,
            password: None,
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.as_secs(),
            layout: None,
        }
    }
}

/// Values given on the command line, each overriding the profile.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub list: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub list: String,
    pub password: String,
    pub transport: TransportSettings,
    pub layout: PageLayout,
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    let profile = ron::from_str(&content)
        .with_context(|| format!("failed to parse profile {}", path.display()))?;
    mm_info!("Loaded profile from {:?}", path);
    Ok(profile)
}

impl Profile {
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let Some(base_url) = overrides.base_url.or(self.base_url) else {
            bail!("no server given: pass --base-url or set base_url in the profile");
        };
        let Some(list) = overrides.list.or(self.list) else {
            bail!("no list given: pass --list or set list in the profile");
        };
        let Some(password) = overrides.password.or(self.password) else {
            bail!("no admin password given: pass --password or set MAILMAN_ADMIN_PASSWORD");
        };
        Ok(Settings {
            base_url,
            list,
            password,
            transport: TransportSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            layout: self.layout.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    fn write_profile(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_profile_uses_defaults() {
        let file = write_profile(
            r#"(
                base_url: Some("https://lists.example.org/mailman"),
                list: Some("team"),
                request_timeout_secs: 5,
            )"#,
        );
        let profile = load_profile(file.path()).unwrap();
        assert_eq!(profile.list.as_deref(), Some("team"));
        assert_eq!(profile.request_timeout_secs, 5);
        assert_eq!(profile.connect_timeout_secs, 10);
        assert_eq!(profile.layout, None);
    }

    #[test]
    fn layout_override_keeps_unnamed_landmarks() {
        let file = write_profile(
            r#"(
                layout: Some((
                    members_table_index: 3,
                    roster_at_token: "chez",
                )),
            )"#,
        );
        let layout = load_profile(file.path()).unwrap().layout.unwrap();
        assert_eq!(layout.members_table_index, 3);
        assert_eq!(layout.roster_at_token, "chez");
        assert_eq!(layout.label_tag, "strong");
    }

    #[test]
    fn command_line_beats_profile() {
        let profile = Profile {
            base_url: Some("https://old.example.org".to_string()),
            list: Some("team".to_string()),
            password: Some("from-file".to_string()),
            ..Profile::default()
        };
        let settings = profile
            .resolve(Overrides {
                base_url: Some("https://new.example.org".to_string()),
                list: None,
                password: Some("from-env".to_string()),
            })
            .unwrap();
        assert_eq!(settings.base_url, "https://new.example.org");
        assert_eq!(settings.list, "team");
        assert_eq!(settings.password, "from-env");
        assert_eq!(settings.transport, TransportSettings::default());
    }

    #[test]
    fn missing_password_is_an_error() {
        let profile = Profile {
            base_url: Some("https://lists.example.org".to_string()),
            list: Some("team".to_string()),
            ..Profile::default()
        };
        let err = profile.resolve(Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("MAILMAN_ADMIN_PASSWORD"));
    }

    #[test]
    fn unreadable_profile_names_the_path() {
        let err = load_profile(Path::new("/nonexistent/profile.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/profile.ron"));
    }
}
