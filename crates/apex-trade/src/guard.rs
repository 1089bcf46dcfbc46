//! Route protection for trade-only pages.

use crate::session::TradeSession;

/// Where unauthenticated visitors are sent.
pub const TRADE_LOGIN_PATH: &str = "/trade/login";

/// Outcome of checking a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Session not restored yet; render a placeholder.
    Loading,
    /// Send the visitor to this path.
    Redirect(&'static str),
    Allow,
}

impl RouteAccess {
    pub fn check(session: &TradeSession) -> Self {
        if session.is_loading() {
            RouteAccess::Loading
        } else if session.is_authenticated() {
            RouteAccess::Allow
        } else {
            RouteAccess::Redirect(TRADE_LOGIN_PATH)
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteAccess::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::TradeDirectory;
    use apex_cache::Cache;

    #[test]
    fn test_guard_outcomes() {
        let mut session = TradeSession::new(Cache::in_memory());
        assert_eq!(RouteAccess::check(&session), RouteAccess::Loading);

        session.restore().unwrap();
        assert_eq!(
            RouteAccess::check(&session),
            RouteAccess::Redirect("/trade/login")
        );

        let directory = TradeDirectory::demo().unwrap();
        session.login(&directory, "demo@garage.com", "demo123").unwrap();
        assert!(RouteAccess::check(&session).is_allowed());
    }
}
