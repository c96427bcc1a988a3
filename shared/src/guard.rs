//! Navigation guard.
//!
//! Runs before every route transition and turns a navigation request into a
//! [`Decision`]. Protected routes need a session at the moment of the check;
//! everything else goes through untouched.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Decision, NavigationRequest, RedirectReason, RouteTarget};
use crate::routes::{RouteError, RouteTable, LOGIN_PATH};
use crate::session::{Session, SessionError, SessionProvider};

pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of delays, so the guard can time out on any executor.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// What to do with a protected route when the session lookup fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionFailurePolicy {
    /// Treat the session as absent and redirect to login
    #[default]
    FailClosed,
    /// Hand the error back to the caller
    Surface,
}

#[derive(Debug, Clone)]
pub struct GuardConfig {
    pub login_path: String,
    pub session_timeout: Duration,
    pub failure_policy: SessionFailurePolicy,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH.to_string(),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            failure_policy: SessionFailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("session lookup failed: {0}")]
    Session(#[from] SessionError),

    #[error("session lookup timed out after {0:?}")]
    Timeout(Duration),

    /// A newer navigation started while this one waited on the session
    #[error("navigation superseded by a newer request")]
    Superseded,
}

pub struct NavigationGuard<P, T> {
    table: Rc<RouteTable>,
    provider: P,
    timer: T,
    config: GuardConfig,
    generation: Cell<u64>,
}

impl<P: SessionProvider, T: Timer> NavigationGuard<P, T> {
    /// Build a guard over `table`.
    ///
    /// The login path must be a public view route, otherwise every redirect
    /// would bounce back into the guard. It is stored in the table's own
    /// spelling, so `/Login/` redirects to `/login`.
    pub fn new(
        table: Rc<RouteTable>,
        provider: P,
        timer: T,
        config: GuardConfig,
    ) -> Result<Self, RouteError> {
        let mut config = config;
        // redirect to the table's spelling, which is what the router recognises
        config.login_path = table.public_view_path(&config.login_path)?.to_string();

        Ok(Self {
            table,
            provider,
            timer,
            config,
            generation: Cell::new(0),
        })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide where the navigation from `from` to `to` ends up.
    ///
    /// Only protected routes query the session provider. If another check
    /// starts while this one is waiting on the provider, this one returns
    /// [`GuardError::Superseded`].
    pub async fn check(
        &self,
        to: &NavigationRequest,
        from: &NavigationRequest,
    ) -> Result<Decision, GuardError> {
        let ticket = self.begin();

        let Some(entry) = self.table.resolve(&to.target_path) else {
            debug!(to = %to.target_path, from = %from.target_path, "no route matches");
            return Ok(Decision::NotFound {
                path: to.target_path.clone(),
            });
        };

        let decision = match &entry.target {
            RouteTarget::Redirect(target) => Decision::Redirect {
                path: target.clone(),
                reason: RedirectReason::Alias,
            },
            RouteTarget::View(_) if !entry.requires_auth => Decision::Proceed {
                path: entry.path.clone(),
            },
            RouteTarget::View(_) => {
                let lookup = self.query_session().await;
                if self.generation.get() != ticket {
                    debug!(to = %to.target_path, "dropping superseded navigation");
                    return Err(GuardError::Superseded);
                }
                self.decide_protected(&entry.path, lookup)?
            }
        };

        debug!(
            to = %to.target_path,
            from = %from.target_path,
            decision = ?decision,
            "navigation resolved"
        );
        Ok(decision)
    }

    fn begin(&self) -> u64 {
        let ticket = self.generation.get().wrapping_add(1);
        self.generation.set(ticket);
        ticket
    }

    async fn query_session(&self) -> Result<Option<Session>, GuardError> {
        let lookup = self.provider.current_session();
        let timeout = self.timer.sleep(self.config.session_timeout);

        match future::select(lookup, timeout).await {
            Either::Left((result, _)) => result.map_err(GuardError::Session),
            Either::Right(((), _)) => Err(GuardError::Timeout(self.config.session_timeout)),
        }
    }

    fn decide_protected(
        &self,
        path: &str,
        lookup: Result<Option<Session>, GuardError>,
    ) -> Result<Decision, GuardError> {
        match lookup {
            Ok(Some(_)) => Ok(Decision::Proceed {
                path: path.to_string(),
            }),
            Ok(None) => Ok(Decision::Redirect {
                path: self.config.login_path.clone(),
                reason: RedirectReason::Unauthenticated,
            }),
            Err(err) => match self.config.failure_policy {
                SessionFailurePolicy::FailClosed => {
                    warn!(path, error = %err, "session lookup failed, redirecting to login");
                    Ok(Decision::Redirect {
                        path: self.config.login_path.clone(),
                        reason: RedirectReason::SessionUnavailable,
                    })
                }
                SessionFailurePolicy::Surface => Err(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RootRoute, RouteEntry, View};
    use crate::routes::{HOME_PATH, ROOT_PATH, SIGNUP_PATH};
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use tokio_test::{assert_err, assert_ok};

    struct TokioTimer;

    impl Timer for TokioTimer {
        fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
            Box::pin(tokio::time::sleep(duration))
        }
    }

    /// Returns a fixed answer and counts how often it was asked.
    struct StaticProvider {
        session: Option<Session>,
        calls: RefCell<usize>,
    }

    impl StaticProvider {
        fn signed_in() -> Self {
            Self {
                session: Some(Session::new(json!({ "id": "u1" }))),
                calls: RefCell::new(0),
            }
        }

        fn signed_out() -> Self {
            Self {
                session: None,
                calls: RefCell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl SessionProvider for StaticProvider {
        async fn current_session(&self) -> Result<Option<Session>, SessionError> {
            *self.calls.borrow_mut() += 1;
            Ok(self.session.clone())
        }
    }

    struct FailingProvider;

    #[async_trait(?Send)]
    impl SessionProvider for FailingProvider {
        async fn current_session(&self) -> Result<Option<Session>, SessionError> {
            Err(SessionError::Unavailable("503 Service Unavailable".to_string()))
        }
    }

    struct HangingProvider;

    #[async_trait(?Send)]
    impl SessionProvider for HangingProvider {
        async fn current_session(&self) -> Result<Option<Session>, SessionError> {
            future::pending::<Result<Option<Session>, SessionError>>().await
        }
    }

    /// Signed in, but takes a while to say so.
    struct SlowProvider(Duration);

    #[async_trait(?Send)]
    impl SessionProvider for SlowProvider {
        async fn current_session(&self) -> Result<Option<Session>, SessionError> {
            tokio::time::sleep(self.0).await;
            Ok(Some(Session::new(json!({ "id": "u1" }))))
        }
    }

    fn guard_with<P: SessionProvider>(provider: P) -> NavigationGuard<P, TokioTimer> {
        guard_with_config(provider, GuardConfig::default(), RootRoute::Welcome)
    }

    fn guard_with_config<P: SessionProvider>(
        provider: P,
        config: GuardConfig,
        root: RootRoute,
    ) -> NavigationGuard<P, TokioTimer> {
        NavigationGuard::new(Rc::new(RouteTable::standard(root)), provider, TokioTimer, config)
            .expect("standard table has a public login route")
    }

    fn nav(path: &str) -> NavigationRequest {
        NavigationRequest::new(path)
    }

    fn redirect_to_login(reason: RedirectReason) -> Decision {
        Decision::Redirect {
            path: LOGIN_PATH.to_string(),
            reason,
        }
    }

    #[tokio::test]
    async fn test_home_without_session_redirects_to_login() {
        let guard = guard_with(StaticProvider::signed_out());
        let decision = assert_ok!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(decision, redirect_to_login(RedirectReason::Unauthenticated));
    }

    #[tokio::test]
    async fn test_home_with_session_proceeds() {
        let guard = guard_with(StaticProvider::signed_in());
        let decision = assert_ok!(guard.check(&nav("/home"), &nav("/login")).await);
        assert_eq!(
            decision,
            Decision::Proceed {
                path: "/home".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_without_session_proceeds() {
        let guard = guard_with(StaticProvider::signed_out());
        let decision = assert_ok!(guard.check(&nav("/login"), &nav("/home")).await);
        assert_eq!(
            decision,
            Decision::Proceed {
                path: "/login".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let guard = guard_with(StaticProvider::signed_out());
        let decision = assert_ok!(guard.check(&nav("/unknown"), &nav("/")).await);
        assert_eq!(
            decision,
            Decision::NotFound {
                path: "/unknown".to_string()
            }
        );
    }

    #[test]
    fn test_every_route_follows_the_decision_table() {
        for root in [RootRoute::Welcome, RootRoute::RedirectToSignup] {
            for signed_in in [false, true] {
                let provider = if signed_in {
                    StaticProvider::signed_in()
                } else {
                    StaticProvider::signed_out()
                };
                let guard = guard_with_config(provider, GuardConfig::default(), root);
                let entries: Vec<RouteEntry> = guard.table().entries().to_vec();

                for entry in entries.iter().filter(|e| e.view().is_some()) {
                    let decision = tokio_test::block_on(guard.check(&nav(&entry.path), &nav("/")));
                    let decision = assert_ok!(decision);

                    let expected = if entry.requires_auth && !signed_in {
                        redirect_to_login(RedirectReason::Unauthenticated)
                    } else {
                        Decision::Proceed {
                            path: entry.path.clone(),
                        }
                    };
                    assert_eq!(decision, expected, "{} signed_in={signed_in}", entry.path);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_decisions_are_idempotent() {
        for provider in [StaticProvider::signed_in(), StaticProvider::signed_out()] {
            let guard = guard_with(provider);
            for path in ["/home", "/login", "/", "/nowhere"] {
                let first = guard.check(&nav(path), &nav("/signup")).await;
                let second = guard.check(&nav(path), &nav("/signup")).await;
                assert_eq!(first, second, "{path}");
            }
        }
    }

    #[tokio::test]
    async fn test_public_routes_skip_session_lookup() {
        let guard = guard_with(StaticProvider::signed_out());
        for path in ["/", "/signup", "/login", "/forgot-password", "/missing"] {
            assert_ok!(guard.check(&nav(path), &nav("/")).await);
        }
        assert_eq!(*guard.provider.calls.borrow(), 0);

        assert_ok!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(*guard.provider.calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_root_alias_redirects_to_signup() {
        let guard = guard_with_config(
            StaticProvider::signed_out(),
            GuardConfig::default(),
            RootRoute::RedirectToSignup,
        );
        let decision = assert_ok!(guard.check(&nav(ROOT_PATH), &nav(ROOT_PATH)).await);
        assert_eq!(
            decision,
            Decision::Redirect {
                path: SIGNUP_PATH.to_string(),
                reason: RedirectReason::Alias,
            }
        );
    }

    #[tokio::test]
    async fn test_session_failure_fails_closed_by_default() {
        let guard = guard_with(FailingProvider);
        let decision = assert_ok!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(decision, redirect_to_login(RedirectReason::SessionUnavailable));

        // public routes are unaffected by a broken provider
        let decision = assert_ok!(guard.check(&nav("/login"), &nav("/home")).await);
        assert_eq!(decision.path(), "/login");
    }

    #[tokio::test]
    async fn test_session_failure_can_be_surfaced() {
        let config = GuardConfig {
            failure_policy: SessionFailurePolicy::Surface,
            ..GuardConfig::default()
        };
        let guard = guard_with_config(FailingProvider, config, RootRoute::Welcome);
        let err = assert_err!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(
            err,
            GuardError::Session(SessionError::Unavailable("503 Service Unavailable".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out() {
        let guard = guard_with(HangingProvider);
        let decision = assert_ok!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(decision, redirect_to_login(RedirectReason::SessionUnavailable));

        let config = GuardConfig {
            session_timeout: Duration::from_millis(250),
            failure_policy: SessionFailurePolicy::Surface,
            ..GuardConfig::default()
        };
        let guard = guard_with_config(HangingProvider, config, RootRoute::Welcome);
        let err = assert_err!(guard.check(&nav("/home"), &nav("/")).await);
        assert_eq!(err, GuardError::Timeout(Duration::from_millis(250)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_navigation_supersedes_pending_check() {
        let guard = guard_with(SlowProvider(Duration::from_millis(100)));
        let home = nav(HOME_PATH);
        let root = nav(ROOT_PATH);

        let (first, second) = tokio::join!(guard.check(&home, &root), guard.check(&home, &root));

        assert_eq!(first, Err(GuardError::Superseded));
        assert_eq!(
            second,
            Ok(Decision::Proceed {
                path: HOME_PATH.to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_public_navigation_supersedes_pending_check() {
        let guard = guard_with(SlowProvider(Duration::from_millis(100)));
        let (home, root, signup) = (nav(HOME_PATH), nav(ROOT_PATH), nav(SIGNUP_PATH));

        let (first, second) =
            tokio::join!(guard.check(&home, &root), guard.check(&signup, &root));

        assert_eq!(first, Err(GuardError::Superseded));
        assert_eq!(second.map(|d| d.path().to_string()), Ok("/signup".to_string()));
    }

    #[test]
    fn test_login_path_must_be_public_view() {
        let table = Rc::new(RouteTable::standard(RootRoute::Welcome));

        for login_path in ["/home", "/missing"] {
            let config = GuardConfig {
                login_path: login_path.to_string(),
                ..GuardConfig::default()
            };
            let result = NavigationGuard::new(
                table.clone(),
                StaticProvider::signed_out(),
                TokioTimer,
                config,
            );
            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some(RouteError::InvalidLoginPath(login_path.to_string()).to_string())
            );
        }

        let table = Rc::new(
            RouteTable::new(vec![
                RouteEntry::public("/signin", View::Login),
                RouteEntry::protected("/app", View::Home),
            ])
            .unwrap(),
        );
        let config = GuardConfig {
            login_path: "/signin".to_string(),
            ..GuardConfig::default()
        };
        assert!(NavigationGuard::new(table, StaticProvider::signed_out(), TokioTimer, config).is_ok());
    }

    #[tokio::test]
    async fn test_login_path_redirects_to_table_spelling() {
        for login_path in ["/login/", "/Login", "/LOGIN/", "/login?next=/home"] {
            let config = GuardConfig {
                login_path: login_path.to_string(),
                ..GuardConfig::default()
            };
            let guard =
                guard_with_config(StaticProvider::signed_out(), config, RootRoute::Welcome);

            let decision = assert_ok!(guard.check(&nav(HOME_PATH), &nav(ROOT_PATH)).await);
            assert_eq!(
                decision,
                redirect_to_login(RedirectReason::Unauthenticated),
                "{login_path}"
            );
        }
    }
}
