use crate::{ActionName, ActionNameRef, Token, TokenRef};
use std::collections::HashMap;
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NonceError {
    #[error("Session doesn't carry any nonces")]
    NoSession,

    #[error("Invalid nonce")]
    InvalidNonce,
}

/// State attached to a session
#[derive(Debug, Default)]
pub struct SessionState {
    nonce_registry: Option<HashMap<ActionName, Token>>,
}

impl SessionState {
    /// Issue a fresh nonce for the action
    ///
    /// Replaces the nonce previously issued for the same action, if there was one.
    pub fn issue(&mut self, action: &ActionNameRef) -> Token {
        let token = Token::generate();
        self.nonce_registry
            .get_or_insert_with(HashMap::new)
            .insert(action.to_owned(), token.clone());

        token
    }

    /// Check the submitted nonce against the one issued for the action
    ///
    /// On success the nonce is removed from the registry. A mismatch leaves the registry untouched.
    pub fn validate_and_consume(
        &mut self,
        action: &ActionNameRef,
        submitted: Option<&TokenRef>,
    ) -> Result<(), NonceError> {
        let registry = self
            .nonce_registry
            .as_mut()
            .ok_or(NonceError::NoSession)?;

        let (Some(expected), Some(submitted)) = (registry.get(action), submitted) else {
            return Err(NonceError::InvalidNonce);
        };

        let matches: bool = expected
            .as_str()
            .as_bytes()
            .ct_eq(submitted.as_str().as_bytes())
            .into();

        if !matches {
            return Err(NonceError::InvalidNonce);
        }

        registry.remove(action);
        Ok(())
    }

    /// Whether a nonce was ever issued in this session
    #[must_use]
    pub fn has_registry(&self) -> bool {
        self.nonce_registry.is_some()
    }

    /// Number of nonces that were issued but not yet consumed
    #[must_use]
    pub fn live_nonces(&self) -> usize {
        self.nonce_registry.as_ref().map_or(0, HashMap::len)
    }
}
