//! Route table and navigation.
//!
//! Every navigation supersedes the previous one: work started inside an older
//! [`ViewScope`] is dropped (and its HTTP request cancelled) as soon as a newer
//! navigation begins.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::sync::watch;

use crate::middleware::{GuardOutcome, RouteGuard};
use crate::models::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Accounts,
    Categories,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Accounts,
        Route::Categories,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::Accounts => "/contas",
            Route::Categories => "/categorias",
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Accounts | Route::Categories)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| format!("Unknown route: {}", s))
    }
}

/// Outcome of one navigation attempt
#[derive(Debug)]
pub enum Navigation {
    /// Build the view. `session` is set for protected routes.
    Render {
        route: Route,
        session: Option<Session>,
        scope: ViewScope,
    },
    /// The guard refused; the protected view was never built.
    Redirect { from: Route, to: Route },
}

impl Navigation {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect { .. })
    }
}

pub struct Navigator {
    guard: RouteGuard,
    generation: watch::Sender<u64>,
}

impl Navigator {
    pub fn new(guard: RouteGuard) -> Self {
        let (generation, _) = watch::channel(0);
        Self { guard, generation }
    }

    pub async fn navigate(&self, route: Route) -> Navigation {
        let scope = self.begin();

        if !route.is_protected() {
            return Navigation::Render {
                route,
                session: None,
                scope,
            };
        }

        match self.guard.evaluate().await {
            GuardOutcome::Proceed(session) => Navigation::Render {
                route,
                session: Some(session),
                scope,
            },
            GuardOutcome::RedirectTo(to) => {
                tracing::info!("Redirecting {} to {}: not authenticated", route, to);
                Navigation::Redirect { from: route, to }
            }
        }
    }

    fn begin(&self) -> ViewScope {
        self.generation.send_modify(|g| *g += 1);
        let rx = self.generation.subscribe();
        let generation = *rx.borrow();
        ViewScope { generation, rx }
    }
}

/// Cancellation handle for the work of one rendered view
#[derive(Debug, Clone)]
pub struct ViewScope {
    generation: u64,
    rx: watch::Receiver<u64>,
}

impl ViewScope {
    pub fn is_current(&self) -> bool {
        *self.rx.borrow() == self.generation
    }

    /// Run `fut` unless a newer navigation starts first, in which case it is
    /// dropped and `None` comes back.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if !self.is_current() {
            return None;
        }

        let mut rx = self.rx.clone();
        let generation = self.generation;
        tokio::select! {
            output = fut => Some(output),
            _ = superseded(&mut rx, generation) => {
                tracing::debug!("Dropping stale request from navigation {}", generation);
                None
            }
        }
    }
}

async fn superseded(rx: &mut watch::Receiver<u64>, generation: u64) {
    loop {
        if rx.changed().await.is_err() {
            // Navigator gone: nothing can supersede this scope any more
            std::future::pending::<()>().await;
        }
        if *rx.borrow_and_update() != generation {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionCheck;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Counting {
        session: Option<Session>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionCheck for Counting {
        async fn probe(&self) -> Option<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.session.clone()
        }
    }

    fn navigator(session: Option<Session>) -> (Navigator, Arc<Counting>) {
        let check = Arc::new(Counting {
            session,
            calls: AtomicUsize::new(0),
        });
        (Navigator::new(RouteGuard::new(check.clone())), check)
    }

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>(), Ok(route));
        }
        assert_eq!("/contas/".parse::<Route>(), Ok(Route::Accounts));
        assert!("/transacoes".parse::<Route>().is_err());
    }

    #[tokio::test]
    async fn test_protected_routes_redirect_without_session() {
        let (nav, _) = navigator(None);
        for route in [Route::Dashboard, Route::Accounts, Route::Categories] {
            match nav.navigate(route).await {
                Navigation::Redirect { from, to } => {
                    assert_eq!(from, route);
                    assert_eq!(to, Route::Login);
                }
                Navigation::Render { .. } => panic!("{route} rendered without a session"),
            }
        }
    }

    #[tokio::test]
    async fn test_public_routes_skip_the_guard() {
        let (nav, check) = navigator(None);
        assert!(!nav.navigate(Route::Login).await.is_redirect());
        assert!(!nav.navigate(Route::Register).await.is_redirect());
        assert_eq!(check.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_each_navigation_probes_again() {
        let session = Session::from_identity(json!({"user_id": 1})).unwrap();
        let (nav, check) = navigator(Some(session.clone()));

        for _ in 0..2 {
            match nav.navigate(Route::Accounts).await {
                Navigation::Render { session: got, .. } => assert_eq!(got, Some(session.clone())),
                Navigation::Redirect { .. } => panic!("redirected with a session"),
            }
        }
        assert_eq!(check.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_newer_navigation_cancels_pending_work() {
        let (nav, _) = navigator(None);
        let Navigation::Render { scope, .. } = nav.navigate(Route::Login).await else {
            panic!("login must render");
        };

        let pending = scope.run(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "stale"
        });
        let (result, _) = tokio::join!(pending, async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            nav.navigate(Route::Register).await
        });

        assert_eq!(result, None);
        assert!(!scope.is_current());
        assert_eq!(scope.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn test_current_scope_completes() {
        let (nav, _) = navigator(None);
        let Navigation::Render { scope, .. } = nav.navigate(Route::Register).await else {
            panic!("register must render");
        };
        assert_eq!(scope.run(async { 42 }).await, Some(42));
    }
}
