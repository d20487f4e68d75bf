//! Session identity adapter.

use crate::config::IdentityConfig;
use crate::error::{CliError, Result};
use stackit_domain::traits::IdentityProvider;
use tracing::info;

/// Identity of the user driving the current session.
///
/// Stands in for the external auth provider: it starts from the configured
/// identity and changes through `login` and `logout`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    user: Option<String>,
}

impl SessionIdentity {
    /// A signed-out session.
    pub fn signed_out() -> Self {
        Self { user: None }
    }

    /// A session signed in as `user`.
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self { user: Some(user.into()) }
    }

    /// Resolve the starting identity; an explicit override wins over the config.
    pub fn resolve(explicit: Option<&str>, config: &IdentityConfig) -> Self {
        let user = explicit
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| config.resolve());
        Self { user }
    }

    /// Sign in as `user`.
    pub fn login(&mut self, user: &str) -> Result<()> {
        let user = user.trim();
        if user.is_empty() {
            return Err(CliError::InvalidInput("Identity must not be empty".to_string()));
        }
        info!(user, "signed in");
        self.user = Some(user.to_string());
        Ok(())
    }

    /// Sign out.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user, "signed out");
        }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }
}
