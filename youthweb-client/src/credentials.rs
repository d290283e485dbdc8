// youthweb-client/src/credentials.rs
// User credentials exchanged for a bearer token by the auth resource

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Valid credential lookup keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    Username,
    Secret,
}

impl CredentialKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::Username => "username",
            CredentialKey::Secret => "secret",
        }
    }
}

impl FromStr for CredentialKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "username" => Ok(CredentialKey::Username),
            "secret" => Ok(CredentialKey::Secret),
            other => Err(ClientError::InvalidCredentialKey(other.to_string())),
        }
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Username and token secret
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn get(&self, key: CredentialKey) -> &str {
        match key {
            CredentialKey::Username => &self.username,
            CredentialKey::Secret => &self.secret,
        }
    }

    /// Whether both fields are empty (never set)
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.secret.is_empty()
    }
}

// Keep the secret out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"***")
            .finish()
    }
}
