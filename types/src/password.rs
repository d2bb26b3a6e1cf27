//! Password profiles: the per-site generation policy and the partial
//! overrides merged into the default template.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PasswordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown password version {0} (expected 1 or 2)")]
pub struct UnknownVersionError(pub u8);

/// Generation algorithm revision a profile was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PasswordVersion {
    V1,
    #[default]
    V2,
}

impl PasswordVersion {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            PasswordVersion::V1 => 1,
            PasswordVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for PasswordVersion {
    type Error = UnknownVersionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PasswordVersion::V1),
            2 => Ok(PasswordVersion::V2),
            other => Err(UnknownVersionError(other)),
        }
    }
}

impl From<PasswordVersion> for u8 {
    fn from(value: PasswordVersion) -> Self {
        value.as_u8()
    }
}

/// A site password profile.
///
/// Missing fields deserialize from [`PasswordProfile::default`], so a payload
/// such as `{"version": 1}` is a complete profile with the stock policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordProfile {
    pub site: String,
    pub login: String,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub length: u8,
    pub counter: u32,
    pub version: PasswordVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PasswordId>,
}

impl PasswordProfile {
    pub const MIN_LENGTH: u8 = 5;
    pub const MAX_LENGTH: u8 = 35;
    pub const DEFAULT_LENGTH: u8 = 16;

    /// Overwrite every field present in `patch`, leaving the rest untouched.
    pub fn merge(&mut self, patch: &PasswordPatch) {
        if let Some(site) = &patch.site {
            self.site.clone_from(site);
        }
        if let Some(login) = &patch.login {
            self.login.clone_from(login);
        }
        if let Some(uppercase) = patch.uppercase {
            self.uppercase = uppercase;
        }
        if let Some(lowercase) = patch.lowercase {
            self.lowercase = lowercase;
        }
        if let Some(numbers) = patch.numbers {
            self.numbers = numbers;
        }
        if let Some(symbols) = patch.symbols {
            self.symbols = symbols;
        }
        if let Some(length) = patch.length {
            self.length = length;
        }
        if let Some(counter) = patch.counter {
            self.counter = counter;
        }
        if let Some(version) = patch.version {
            self.version = version;
        }
    }

    #[must_use]
    pub fn has_id(&self, id: &PasswordId) -> bool {
        self.id.as_ref() == Some(id)
    }
}

impl Default for PasswordProfile {
    fn default() -> Self {
        Self {
            site: String::new(),
            login: String::new(),
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            length: Self::DEFAULT_LENGTH,
            counter: 1,
            version: PasswordVersion::default(),
            id: None,
        }
    }
}

/// Partial profile: `None` means "leave as is".
///
/// There is no `id`; the default template is never bound to a saved entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbols: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<PasswordVersion>,
}
