// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Single-slot credential cache.
//!
//! Repeated operations for the same user keep asking for the same API token,
//! and each miss costs a read of the users index file. One slot is enough,
//! because the host drives one user-initiated operation at a time. This is
//! purely an optimization: a lookup for any *other* username must miss, so
//! callers fall back to the index file instead of ever seeing a stale or
//! wrong token across user switches.

/// Cache of the most recently stored `(username, api_token)` pair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCache {
    entry: Option<(String, String)>,
}

impl TokenCache {
    /// Construct new empty token cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a freshly written token, replacing whatever was cached.
    pub fn store(&mut self, username: impl Into<String>, token: impl Into<String>) {
        self.entry = Some((username.into(), token.into()));
    }

    /// Look up the cached token, hitting only on an exact username match.
    pub fn lookup(&self, username: &str) -> Option<&str> {
        match &self.entry {
            Some((cached_user, token)) if cached_user == username => Some(token),
            _ => None,
        }
    }

    /// Drop the cached pair entirely.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_hits_only_for_stored_username() {
        let mut cache = TokenCache::new();
        cache.store("alice", "token-a");

        assert_eq!(cache.lookup("alice"), Some("token-a"));
        assert_eq!(cache.lookup("bob"), None);
    }

    #[test]
    fn store_overwrites_previous_user() {
        let mut cache = TokenCache::new();
        cache.store("alice", "token-a");
        cache.store("bob", "token-b");

        assert_eq!(cache.lookup("alice"), None);
        assert_eq!(cache.lookup("bob"), Some("token-b"));
    }

    #[test]
    fn invalidate_clears_the_slot() {
        let mut cache = TokenCache::new();
        cache.store("alice", "token-a");
        cache.invalidate();

        assert_eq!(cache.lookup("alice"), None);
    }
}
