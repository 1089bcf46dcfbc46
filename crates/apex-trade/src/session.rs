//! Trade session: the signed-in account, persisted across restarts.

use apex_cache::{Cache, CacheError};

use crate::account::TradeAccount;
use crate::directory::TradeDirectory;
use crate::TradeError;

/// Storage key holding the signed-in account record.
pub const TRADE_SESSION_KEY: &str = "tradeUser";

/// The current trade identity.
///
/// A new session is `loading` until [`TradeSession::restore`] has read the
/// stored record. Route guards treat that window as undecided.
#[derive(Debug)]
pub struct TradeSession {
    cache: Cache,
    user: Option<TradeAccount>,
    is_loading: bool,
}

impl TradeSession {
    /// A session that has not yet read storage.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            user: None,
            is_loading: true,
        }
    }

    /// Create a session and restore it immediately.
    pub fn open(cache: Cache) -> Result<Self, TradeError> {
        let mut session = Self::new(cache);
        session.restore()?;
        Ok(session)
    }

    /// Read the stored account record. A malformed record is logged and
    /// treated as signed out.
    pub fn restore(&mut self) -> Result<(), TradeError> {
        let user = match self.cache.get::<TradeAccount>(TRADE_SESSION_KEY) {
            Ok(user) => user,
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(error = %e, key = TRADE_SESSION_KEY, "stored trade session is malformed, ignoring");
                None
            }
            Err(e) => {
                self.is_loading = false;
                return Err(e.into());
            }
        };

        if let Some(account) = &user {
            tracing::debug!(account = %account.account_number, "trade session restored");
        }
        self.user = user;
        self.is_loading = false;
        Ok(())
    }

    /// Check credentials against `directory` and persist the account on
    /// success. A failed attempt leaves any existing session untouched.
    pub fn login(
        &mut self,
        directory: &TradeDirectory,
        email: &str,
        password: &str,
    ) -> Result<&TradeAccount, TradeError> {
        let account = match directory.authenticate(email, password) {
            Ok(account) => account,
            Err(e) => {
                tracing::info!(email, "trade login rejected");
                return Err(e);
            }
        };

        self.cache.set(TRADE_SESSION_KEY, &account)?;
        tracing::info!(
            account = %account.account_number,
            tier = %account.discount_tier,
            "trade login"
        );
        Ok(self.user.insert(account))
    }

    /// Sign out and delete the stored record.
    pub fn logout(&mut self) -> Result<(), TradeError> {
        if let Some(account) = self.user.take() {
            tracing::info!(account = %account.account_number, "trade logout");
        }
        self.cache.delete(TRADE_SESSION_KEY)?;
        Ok(())
    }

    pub fn user(&self) -> Option<&TradeAccount> {
        self.user.as_ref()
    }

    /// The signed-in account, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<&TradeAccount, TradeError> {
        self.user.as_ref().ok_or(TradeError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> TradeDirectory {
        TradeDirectory::demo().unwrap()
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = TradeSession::new(Cache::in_memory());
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_restore_without_record() {
        let session = TradeSession::open(Cache::in_memory()).unwrap();
        assert!(!session.is_loading());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_login_persists_record() {
        let cache = Cache::in_memory();
        let mut session = TradeSession::open(cache.clone()).unwrap();

        let account = session
            .login(&directory(), "trade@apexmotors.co.uk", "trade123")
            .unwrap();
        assert_eq!(account.account_number, "APX-78432");

        let raw = cache.get_raw(TRADE_SESSION_KEY).unwrap().unwrap();
        assert!(raw.contains("\"companyName\""));
        assert!(!raw.contains("trade123"));

        let restored = TradeSession::open(cache).unwrap();
        assert_eq!(restored.user().unwrap().email, "trade@apexmotors.co.uk");
    }

    #[test]
    fn test_failed_login_keeps_session() {
        let cache = Cache::in_memory();
        let mut session = TradeSession::open(cache.clone()).unwrap();
        session.login(&directory(), "demo@garage.com", "demo123").unwrap();

        let err = session
            .login(&directory(), "demo@garage.com", "wrong")
            .unwrap_err();
        assert!(matches!(err, TradeError::InvalidCredentials));
        assert_eq!(session.user().unwrap().account_number, "APX-99001");
    }

    #[test]
    fn test_logout_deletes_record() {
        let cache = Cache::in_memory();
        let mut session = TradeSession::open(cache.clone()).unwrap();
        session.login(&directory(), "demo@garage.com", "demo123").unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(!cache.exists(TRADE_SESSION_KEY).unwrap());
        assert!(matches!(
            session.require_user(),
            Err(TradeError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_malformed_record_is_signed_out() {
        let cache = Cache::in_memory();
        cache.set(TRADE_SESSION_KEY, "not an account").unwrap();

        let session = TradeSession::open(cache).unwrap();
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
    }
}
