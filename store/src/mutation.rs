//! Named mutations.
//!
//! Every variant has a stable identifier (`LOGIN`, `SET_PASSWORD`, ...)
//! shared with callers that address mutations by name. On the wire a
//! mutation is `{"type": "<NAME>", "payload": {...}}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use lesspass_types::{PasswordId, PasswordPatch, PasswordProfile, PasswordVersion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutation {
    Logout,
    Login,
    /// Replace the active password and stamp `last_use`.
    SetPassword { password: PasswordProfile },
    /// Merge the present fields into the default template.
    SetDefaultPassword { password: PasswordPatch },
    SetPasswords { passwords: Vec<PasswordProfile> },
    /// Remove a saved profile; an active password with the same id falls back to the default.
    DeletePassword { id: PasswordId },
    SetBaseUrl {
        #[serde(rename = "baseURL")]
        base_url: String,
    },
    SetVersion { version: PasswordVersion },
    /// Reuse the active password if it was set recently, otherwise start from the default.
    LoadPasswordFirstTime,
}

impl Mutation {
    #[must_use]
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Logout => MutationKind::Logout,
            Mutation::Login => MutationKind::Login,
            Mutation::SetPassword { .. } => MutationKind::SetPassword,
            Mutation::SetDefaultPassword { .. } => MutationKind::SetDefaultPassword,
            Mutation::SetPasswords { .. } => MutationKind::SetPasswords,
            Mutation::DeletePassword { .. } => MutationKind::DeletePassword,
            Mutation::SetBaseUrl { .. } => MutationKind::SetBaseUrl,
            Mutation::SetVersion { .. } => MutationKind::SetVersion,
            Mutation::LoadPasswordFirstTime => MutationKind::LoadPasswordFirstTime,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Resolve a mutation from its identifier and JSON payload.
    ///
    /// Payloads of mutations that take none are ignored.
    pub fn from_named(name: &str, payload: Option<Value>) -> Result<Self, MutationError> {
        let kind: MutationKind = name.parse()?;
        let mut envelope = serde_json::Map::new();
        envelope.insert("type".to_owned(), Value::from(kind.as_str()));

        if kind.takes_payload() {
            let payload = payload.ok_or(MutationError::MissingPayload(kind))?;
            envelope.insert("payload".to_owned(), payload);
        }

        serde_json::from_value(Value::Object(envelope))
            .map_err(|source| MutationError::Payload { kind, source })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Logout,
    Login,
    SetPassword,
    SetDefaultPassword,
    SetPasswords,
    DeletePassword,
    SetBaseUrl,
    SetVersion,
    LoadPasswordFirstTime,
}

impl MutationKind {
    pub const ALL: [MutationKind; 9] = [
        MutationKind::Logout,
        MutationKind::Login,
        MutationKind::SetPassword,
        MutationKind::SetDefaultPassword,
        MutationKind::SetPasswords,
        MutationKind::DeletePassword,
        MutationKind::SetBaseUrl,
        MutationKind::SetVersion,
        MutationKind::LoadPasswordFirstTime,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MutationKind::Logout => "LOGOUT",
            MutationKind::Login => "LOGIN",
            MutationKind::SetPassword => "SET_PASSWORD",
            MutationKind::SetDefaultPassword => "SET_DEFAULT_PASSWORD",
            MutationKind::SetPasswords => "SET_PASSWORDS",
            MutationKind::DeletePassword => "DELETE_PASSWORD",
            MutationKind::SetBaseUrl => "SET_BASE_URL",
            MutationKind::SetVersion => "SET_VERSION",
            MutationKind::LoadPasswordFirstTime => "LOAD_PASSWORD_FIRST_TIME",
        }
    }

    #[must_use]
    pub const fn takes_payload(self) -> bool {
        !matches!(
            self,
            MutationKind::Logout | MutationKind::Login | MutationKind::LoadPasswordFirstTime
        )
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationKind {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MutationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| MutationError::Unknown(s.to_owned()))
    }
}

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("unknown mutation {0:?}")]
    Unknown(String),
    #[error("{0} requires a payload")]
    MissingPayload(MutationKind),
    #[error("invalid {kind} payload")]
    Payload {
        kind: MutationKind,
        source: serde_json::Error,
    },
}
