use secrecy::SecretString;
use tracing::warn;

use crate::storage::{ADMIN_TOKEN_KEY, ADMIN_USER_KEY, SessionStore, TOKEN_KEY, USER_KEY};

/// Which stored session a credential belongs to.
///
/// Marker enum (no data) -- the token itself lives in [`Credential`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialScope {
    /// Administrative console session (`adminToken` / `adminUser`).
    Admin,
    /// Regular user session (`token` / `user`).
    User,
}

impl CredentialScope {
    /// Storage key of this scope's bearer token.
    pub fn token_key(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_TOKEN_KEY,
            Self::User => TOKEN_KEY,
        }
    }

    /// Storage key of this scope's cached identity.
    pub fn identity_key(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_USER_KEY,
            Self::User => USER_KEY,
        }
    }
}

impl std::fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::User => "user",
        })
    }
}

/// The credential chosen to authorize one request.
#[derive(Debug, Clone)]
pub enum Credential {
    Admin(SecretString),
    User(SecretString),
    Anonymous,
}

impl Credential {
    pub fn scope(&self) -> Option<CredentialScope> {
        match self {
            Self::Admin(_) => Some(CredentialScope::Admin),
            Self::User(_) => Some(CredentialScope::User),
            Self::Anonymous => None,
        }
    }

    /// The bearer token, if any.
    pub fn bearer(&self) -> Option<&SecretString> {
        match self {
            Self::Admin(token) | Self::User(token) => Some(token),
            Self::Anonymous => None,
        }
    }
}

/// Which credential a request is allowed to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Whatever the session holds, admin first.
    #[default]
    Session,
    /// Only this scope's token. A 401 purges this scope alone.
    Scope(CredentialScope),
    /// No credential at all, and a 401 leaves the session untouched.
    /// Sign-in attempts go out this way.
    Anonymous,
}

impl AuthMode {
    /// The credential this mode selects from `store`.
    pub fn credential(self, store: &dyn SessionStore) -> Credential {
        match self {
            Self::Session => select_credential(store),
            Self::Scope(scope) => scoped_credential(store, scope),
            Self::Anonymous => Credential::Anonymous,
        }
    }

    /// Session scope to purge when a request sent with `sent` gets a 401.
    pub fn expiry_scope(self, sent: Option<CredentialScope>) -> Option<CredentialScope> {
        match self {
            // Anonymous 401s still belong to the user session.
            Self::Session => Some(sent.unwrap_or(CredentialScope::User)),
            Self::Scope(scope) => Some(scope),
            Self::Anonymous => None,
        }
    }
}

/// Pick the credential for a call: admin token, else user token, else none.
///
/// Administrative pages share the store with regular user pages, so when
/// both tokens exist the admin one wins. Empty values count as absent and
/// an unreadable store yields [`Credential::Anonymous`].
pub fn select_credential(store: &dyn SessionStore) -> Credential {
    if let Some(token) = read_token(store, CredentialScope::Admin) {
        return Credential::Admin(token);
    }
    if let Some(token) = read_token(store, CredentialScope::User) {
        return Credential::User(token);
    }
    Credential::Anonymous
}

/// The token of one scope only, never the other.
pub fn scoped_credential(store: &dyn SessionStore, scope: CredentialScope) -> Credential {
    match (scope, read_token(store, scope)) {
        (CredentialScope::Admin, Some(token)) => Credential::Admin(token),
        (CredentialScope::User, Some(token)) => Credential::User(token),
        (_, None) => Credential::Anonymous,
    }
}

fn read_token(store: &dyn SessionStore, scope: CredentialScope) -> Option<SecretString> {
    match store.get(scope.token_key()) {
        Ok(Some(token)) if !token.is_empty() => Some(SecretString::from(token)),
        Ok(_) => None,
        Err(e) => {
            warn!(%scope, error = %e, "could not read stored token, continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
    }

    #[test]
    fn admin_token_wins_when_both_present() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "user-tok"), (ADMIN_TOKEN_KEY, "admin-tok")]);
        let credential = select_credential(&store);
        assert_eq!(credential.scope(), Some(CredentialScope::Admin));
        assert_eq!(credential.bearer().unwrap().expose_secret(), "admin-tok");
    }

    #[test]
    fn user_token_alone_is_used() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "user-tok")]);
        let credential = select_credential(&store);
        assert_eq!(credential.scope(), Some(CredentialScope::User));
        assert_eq!(credential.bearer().unwrap().expose_secret(), "user-tok");
    }

    #[test]
    fn no_tokens_means_anonymous() {
        let credential = select_credential(&MemoryStore::new());
        assert!(matches!(credential, Credential::Anonymous));
        assert!(credential.bearer().is_none());
    }

    #[test]
    fn empty_admin_token_does_not_shadow_user_token() {
        let store = MemoryStore::with_entries([(ADMIN_TOKEN_KEY, ""), (TOKEN_KEY, "user-tok")]);
        assert_eq!(select_credential(&store).scope(), Some(CredentialScope::User));
    }

    #[test]
    fn unreadable_store_degrades_to_anonymous() {
        assert!(matches!(select_credential(&BrokenStore), Credential::Anonymous));
    }

    #[test]
    fn scoped_mode_ignores_the_other_scope() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "user-tok"), (ADMIN_TOKEN_KEY, "admin-tok")]);
        let credential = AuthMode::Scope(CredentialScope::User).credential(&store);
        assert_eq!(credential.bearer().unwrap().expose_secret(), "user-tok");

        let admin_only = MemoryStore::with_entries([(ADMIN_TOKEN_KEY, "admin-tok")]);
        let credential = AuthMode::Scope(CredentialScope::User).credential(&admin_only);
        assert!(matches!(credential, Credential::Anonymous));
    }

    #[test]
    fn anonymous_mode_never_attaches_or_expires() {
        let store = MemoryStore::with_entries([(ADMIN_TOKEN_KEY, "admin-tok")]);
        assert!(matches!(AuthMode::Anonymous.credential(&store), Credential::Anonymous));
        assert_eq!(AuthMode::Anonymous.expiry_scope(None), None);
    }

    #[test]
    fn expiry_follows_the_mode() {
        assert_eq!(AuthMode::Session.expiry_scope(None), Some(CredentialScope::User));
        assert_eq!(
            AuthMode::Session.expiry_scope(Some(CredentialScope::Admin)),
            Some(CredentialScope::Admin)
        );
        assert_eq!(
            AuthMode::Scope(CredentialScope::User).expiry_scope(None),
            Some(CredentialScope::User)
        );
    }

    #[test]
    fn scopes_name_their_slots() {
        assert_eq!(CredentialScope::Admin.token_key(), "adminToken");
        assert_eq!(CredentialScope::Admin.identity_key(), "adminUser");
        assert_eq!(CredentialScope::User.token_key(), "token");
        assert_eq!(CredentialScope::User.identity_key(), "user");
    }
}
