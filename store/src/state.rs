//! Client state owned by a [`Store`](crate::Store).
//!
//! Fields are private: after construction, state only changes through
//! [`Mutation`](crate::Mutation)s.

use serde::{Deserialize, Serialize};

use lesspass_config::{DEFAULT_BASE_URL, ResolvedConfig};
use lesspass_types::{PasswordId, PasswordProfile, PasswordVersion, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub(crate) authenticated: bool,
    /// Active password: the profile the user is currently viewing.
    pub(crate) password: Option<PasswordProfile>,
    /// Template applied to new sites.
    pub(crate) default_password: PasswordProfile,
    /// Saved profiles, unique by `id`.
    pub(crate) passwords: Vec<PasswordProfile>,
    /// When the active password was last set.
    pub(crate) last_use: Option<Timestamp>,
    #[serde(rename = "baseURL")]
    pub(crate) base_url: String,
}

impl Default for State {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, PasswordProfile::default())
    }
}

impl State {
    /// Fresh session: signed out, no active password, nothing saved.
    #[must_use]
    pub fn new(base_url: impl Into<String>, default_password: PasswordProfile) -> Self {
        Self {
            authenticated: false,
            password: None,
            default_password,
            passwords: Vec::new(),
            last_use: None,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.base_url(), config.default_password())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn is_guest(&self) -> bool {
        !self.authenticated
    }

    #[must_use]
    pub fn password(&self) -> Option<&PasswordProfile> {
        self.password.as_ref()
    }

    /// Active password, falling back to the default template.
    #[must_use]
    pub fn active_password(&self) -> &PasswordProfile {
        self.password.as_ref().unwrap_or(&self.default_password)
    }

    #[must_use]
    pub fn default_password(&self) -> &PasswordProfile {
        &self.default_password
    }

    #[must_use]
    pub fn passwords(&self) -> &[PasswordProfile] {
        &self.passwords
    }

    #[must_use]
    pub fn find_password(&self, id: &PasswordId) -> Option<&PasswordProfile> {
        self.passwords.iter().find(|profile| profile.has_id(id))
    }

    #[must_use]
    pub fn last_use(&self) -> Option<Timestamp> {
        self.last_use
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Version of the active password, or of the default template when none is active.
    #[must_use]
    pub fn version(&self) -> PasswordVersion {
        self.active_password().version
    }
}
