//! Routing core shared by the app and the server: the route table, the
//! navigation guard and the shell configuration wire types.

pub mod api;
pub mod guard;
pub mod models;
pub mod routes;
pub mod session;

pub use guard::{GuardConfig, GuardError, NavigationGuard, SessionFailurePolicy, Timer};
pub use models::{
    Decision, NavigationRequest, RedirectReason, RootRoute, RouteEntry, RouteTarget, View,
};
pub use routes::{RouteError, RouteTable};
pub use session::{Session, SessionError, SessionProvider};
