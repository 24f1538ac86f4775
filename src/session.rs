//! Session state shared with views.
//!
//! The current user and the login token flag are published on `watch`
//! channels, so every subscriber sees the latest value first and then each
//! later change.

use std::sync::LazyLock;

use regex::Regex;
use tokio::sync::watch;
use tracing::info;

use crate::config::Config;
use crate::error::{GraphbookError, Result};
use crate::types::Student;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub struct SessionService {
    user: watch::Sender<Option<Student>>,
    token: watch::Sender<bool>,
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionService {
    pub fn new() -> Self {
        let (user, _) = watch::channel(None);
        let (token, _) = watch::channel(false);
        Self { user, token }
    }

    /// Build a logged-in session from the resolved email and configured names.
    pub fn from_config(config: &Config, explicit_email: Option<&str>) -> Result<Self> {
        let email = config.resolve_email(explicit_email)?;
        validate_email(&email)?;

        let session = Self::new();
        session.login(Student::with_email(
            &email,
            config.first_name.as_deref(),
            config.last_name.as_deref(),
        ));
        Ok(session)
    }

    pub fn login(&self, student: Student) {
        info!(email = %student.email_address, "session user logged in");
        self.user.send_replace(Some(student));
        self.token.send_replace(true);
    }

    /// Clear the session user. Subscribed views keep their last list but
    /// refuse to fetch until a user logs in again.
    #[allow(dead_code)]
    pub fn logout(&self) {
        info!("session user logged out");
        self.user.send_replace(None);
        self.token.send_replace(false);
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<Student>> {
        self.user.subscribe()
    }

    pub fn subscribe_token(&self) -> watch::Receiver<bool> {
        self.token.subscribe()
    }

    /// Snapshot of the session user, for callers outside a view.
    #[allow(dead_code)]
    pub fn current_user(&self) -> Option<Student> {
        self.user.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        *self.token.borrow()
    }
}

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(GraphbookError::InvalidEmail(email.to_string()))
    }
}
