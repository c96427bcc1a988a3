use serde::{Deserialize, Serialize};

/// View component a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    SignUp,
    Login,
    ForgotPassword,
    Home,
    Welcome,
}

/// What a matched route resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    View(View),
    /// Static alias to another path in the same table
    Redirect(String),
}

/// One row of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub target: RouteTarget,
    pub requires_auth: bool,
}

impl RouteEntry {
    pub fn public(path: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View(view),
            requires_auth: false,
        }
    }

    pub fn protected(path: impl Into<String>, view: View) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View(view),
            requires_auth: true,
        }
    }

    pub fn alias(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(target.into()),
            requires_auth: false,
        }
    }

    pub fn view(&self) -> Option<View> {
        match self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

/// Deployment-time choice for what `/` does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootRoute {
    #[default]
    Welcome,
    RedirectToSignup,
}

/// A single navigation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target_path: String,
}

impl NavigationRequest {
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
        }
    }
}

/// Why the guard sent a navigation somewhere else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Protected route and no session
    Unauthenticated,
    /// Protected route and the session provider failed or timed out
    SessionUnavailable,
    /// The matched route is an alias for another path
    Alias,
}

/// Outcome of guarding one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed { path: String },
    Redirect { path: String, reason: RedirectReason },
    NotFound { path: String },
}

impl Decision {
    /// Path the router should end up on after this decision.
    pub fn path(&self) -> &str {
        match self {
            Self::Proceed { path } | Self::Redirect { path, .. } | Self::NotFound { path } => path,
        }
    }
}
