//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! the domain's [`SessionIdentity`]: load it at the start of a request, hand
//! it to a service, and store it back when the service changed it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionIdentity, Username};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ADMIN_KEY: &str = "admin";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Rebuild the caller's identity from the session cookie.
    ///
    /// A cookie holding a blank username is treated as logged out.
    pub fn identity(&self) -> Result<SessionIdentity, Error> {
        let username = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let user = match username {
            Some(raw) => match Username::new(raw) {
                Ok(username) => Some(username),
                Err(error) => {
                    tracing::warn!("invalid username in session cookie: {error}");
                    None
                }
            },
            None => None,
        };
        let admin = self
            .0
            .get::<bool>(ADMIN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?
            .unwrap_or(false);
        Ok(SessionIdentity::from_parts(user, admin))
    }

    /// Persist `identity` into the session cookie.
    pub fn store(&self, identity: &SessionIdentity) -> Result<(), Error> {
        match identity.current_user() {
            Some(username) => self
                .0
                .insert(USERNAME_KEY, username.as_str())
                .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?,
            None => {
                self.0.remove(USERNAME_KEY);
            }
        }
        if identity.is_admin() {
            self.0
                .insert(ADMIN_KEY, true)
                .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        } else {
            self.0.remove(ADMIN_KEY);
        }
        Ok(())
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
