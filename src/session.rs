use crate::config::Config;
use std::fmt;

/// Authenticated request context for the chat platform.
///
/// Plans only carry the session so callers can issue follow-up requests;
/// nothing in this crate calls into it. Share it between plans with `Arc`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    /// Create a session acting as the given platform user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Create a session without a known user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a session for the user named in the config, if any
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_id: config.session_user_id.clone(),
        }
    }

    /// ID of the user this session acts as
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
