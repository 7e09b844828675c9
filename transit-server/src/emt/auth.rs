//! Credential handling for the Mobility Labs API.
//!
//! The API accepts a long-lived access token directly, or issues one in
//! exchange for a client id and passkey. Either way the token is resolved
//! once, before any client is usable.

use std::fmt;

/// How the EMT client obtains its access token.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Use the given access token as-is.
    PreSharedToken(String),
    /// Log in with a client id and passkey to obtain a token.
    LoginExchange { client_id: String, passkey: String },
}

impl AuthStrategy {
    pub fn token(token: impl Into<String>) -> Self {
        AuthStrategy::PreSharedToken(token.into())
    }

    pub fn login(client_id: impl Into<String>, passkey: impl Into<String>) -> Self {
        AuthStrategy::LoginExchange {
            client_id: client_id.into(),
            passkey: passkey.into(),
        }
    }

    /// Short label for logs. Never includes secrets.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthStrategy::PreSharedToken(_) => "access token",
            AuthStrategy::LoginExchange { .. } => "client id and passkey",
        }
    }
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::PreSharedToken(_) => f.write_str("PreSharedToken(<redacted>)"),
            AuthStrategy::LoginExchange { client_id, .. } => f
                .debug_struct("LoginExchange")
                .field("client_id", client_id)
                .field("passkey", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let token = AuthStrategy::token("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));

        let login = AuthStrategy::login("client-1", "hunter2");
        let debug = format!("{login:?}");
        assert!(debug.contains("client-1"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(AuthStrategy::token("t").kind(), "access token");
        assert_eq!(AuthStrategy::login("a", "b").kind(), "client id and passkey");
    }
}
