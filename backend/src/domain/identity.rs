//! Per-request session identity.
//!
//! Each request carries its own [`SessionIdentity`], loaded from and written
//! back to the client's session by the inbound adapter. The passenger login
//! and the admin flag are independent: a client may hold either, both, or
//! neither.

use crate::domain::{Error, Username};

/// Authentication state of one client session.
///
/// # Examples
/// ```
/// use railbook::domain::{SessionIdentity, Username};
///
/// let mut identity = SessionIdentity::anonymous();
/// assert!(identity.require_user().is_err());
///
/// identity.sign_in(Username::new("alice").unwrap());
/// identity.grant_admin();
/// assert_eq!(identity.require_user().unwrap().as_ref(), "alice");
/// assert!(identity.require_admin().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    user: Option<Username>,
    admin: bool,
}

impl SessionIdentity {
    /// Identity with no active logins.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Rebuild an identity from stored session values.
    pub fn from_parts(user: Option<Username>, admin: bool) -> Self {
        Self { user, admin }
    }

    /// Currently logged-in passenger, if any.
    pub fn current_user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    /// Whether an admin session is active.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Require a passenger session.
    pub fn require_user(&self) -> Result<&Username, Error> {
        self.user.as_ref().ok_or_else(Error::login_required)
    }

    /// Require an admin session.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.admin {
            Ok(())
        } else {
            Err(Error::admin_login_required())
        }
    }

    /// Record a successful passenger login.
    pub fn sign_in(&mut self, username: Username) {
        self.user = Some(username);
    }

    /// Forget the passenger login. Calling this when logged out is a no-op.
    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// Record a successful admin login.
    pub fn grant_admin(&mut self) {
        self.admin = true;
    }

    /// Drop the admin flag. Calling this when not an admin is a no-op.
    pub fn revoke_admin(&mut self) {
        self.admin = false;
    }
}
