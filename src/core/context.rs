//! Per-request session context
//!
//! Correlation identifiers for the request an agent is being assembled for.
//! Every field is optional: the hosting server fills in whatever it knows,
//! and components that need a missing field degrade gracefully rather than
//! erroring (a missing principal simply means no brokered credentials, so
//! the agent runs with fewer tools).

/// Identifiers describing who an agent is being assembled for
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Opaque identifier of the end user / tenant owning this request
    pub principal_id: Option<String>,

    /// Conversation or thread identifier the request belongs to
    pub session_id: Option<String>,

    /// Short-lived upstream identity token, exchangeable for a downstream
    /// MCP access token
    pub identity_token: Option<String>,
}

impl SessionContext {
    /// Create an empty context (no principal, no session, no token)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the principal identifier
    pub fn with_principal(mut self, principal_id: impl Into<String>) -> Self {
        self.principal_id = Some(principal_id.into());
        self
    }

    /// Set the session identifier
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the upstream identity token
    pub fn with_identity_token(mut self, token: impl Into<String>) -> Self {
        self.identity_token = Some(token.into());
        self
    }
}
