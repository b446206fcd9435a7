//! Passenger account model.
//!
//! Usernames are the primary key of the user collection and are kept exactly
//! as submitted: no trimming and no case folding, so lookups are
//! case-sensitive.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Username was empty or only whitespace.
    Blank,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Unique account name.
///
/// # Examples
/// ```
/// use railbook::domain::Username;
///
/// let name = Username::new("alice").unwrap();
/// assert_eq!(name.as_ref(), "alice");
/// assert!(Username::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UsernameValidationError::Blank);
        }
        Ok(Self(raw))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered passenger.
///
/// The password is stored verbatim; credential hardening is out of scope for
/// this service.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password: String,
}

impl User {
    /// Build a user record from its parts.
    pub fn new(username: Username, password: impl Into<String>) -> Self {
        Self {
            username,
            password: password.into(),
        }
    }

    /// Account name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Exact, case-sensitive password comparison.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
