//! Static route table.
//!
//! Paths are literal. Matching ignores the query string and fragment, treats a
//! trailing slash as optional and is ASCII case-insensitive. The first entry
//! whose path matches wins.

use thiserror::Error;

use crate::models::{RootRoute, RouteEntry, RouteTarget, View};

pub const SIGNUP_PATH: &str = "/signup";
pub const LOGIN_PATH: &str = "/login";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
pub const HOME_PATH: &str = "/home";
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route table has no entries")]
    EmptyTable,

    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("route {from} redirects to {to}, which is not a view route")]
    DanglingRedirect { from: String, to: String },

    #[error("login path {0} must resolve to a public view route")]
    InvalidLoginPath(String),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from an ordered list of entries.
    ///
    /// Every redirect has to land on a view entry, so a single resolution
    /// step is always enough and alias loops cannot be configured.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        if entries.is_empty() {
            return Err(RouteError::EmptyTable);
        }

        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(RouteError::InvalidPath(entry.path.clone()));
            }
        }

        let table = Self { entries };

        for entry in &table.entries {
            if let RouteTarget::Redirect(to) = &entry.target {
                let lands_on_view = table
                    .resolve(to)
                    .map_or(false, |target| target.view().is_some());
                if !lands_on_view {
                    return Err(RouteError::DanglingRedirect {
                        from: entry.path.clone(),
                        to: to.clone(),
                    });
                }
            }
        }

        Ok(table)
    }

    /// The canonical application routes.
    pub fn standard(root: RootRoute) -> Self {
        let root_entry = match root {
            RootRoute::Welcome => RouteEntry::public(ROOT_PATH, View::Welcome),
            RootRoute::RedirectToSignup => RouteEntry::alias(ROOT_PATH, SIGNUP_PATH),
        };

        Self {
            entries: vec![
                RouteEntry::public(SIGNUP_PATH, View::SignUp),
                RouteEntry::public(LOGIN_PATH, View::Login),
                RouteEntry::public(FORGOT_PASSWORD_PATH, View::ForgotPassword),
                RouteEntry::protected(HOME_PATH, View::Home),
                root_entry,
            ],
        }
    }

    /// Look up the entry for `path`; `None` means no route matches.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        let wanted = normalize_path(path);
        self.entries
            .iter()
            .find(|entry| normalize_path(&entry.path).eq_ignore_ascii_case(wanted))
    }

    /// Canonical path of the public view route matching `path`.
    ///
    /// Redirect targets such as the login page must pass this, or the guard
    /// would send users somewhere it then refuses or cannot render.
    pub fn public_view_path(&self, path: &str) -> Result<&str, RouteError> {
        self.resolve(path)
            .filter(|entry| entry.view().is_some() && !entry.requires_auth)
            .map(|entry| entry.path.as_str())
            .ok_or_else(|| RouteError::InvalidLoginPath(path.to_string()))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

/// Strip query, fragment and trailing slashes. An empty path is the root.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}
