use rand::RngCore;
use std::fmt;
use thiserror::Error;

/// Number of random bytes behind a session id
pub const SESSION_ID_BYTES: usize = 16;

/// Session id parse failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid session id: {0}")]
pub struct InvalidSessionId(pub String);

/// Session identifier
///
/// Value object: an opaque token of 16 OS-random bytes, carried as 32 lowercase hex chars
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Mint a fresh unpredictable session id
    pub fn new() -> Self {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Parse a client-supplied token
    ///
    /// Only well-formed ids are accepted; anything else is treated by callers as absent.
    pub fn parse(s: &str) -> Result<Self, InvalidSessionId> {
        let well_formed = s.len() == SESSION_ID_BYTES * 2
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidSessionId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
