use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use shared::api::ShellConfig;
use shared::routes::LOGIN_PATH;
use shared::{RootRoute, RouteTable, SessionFailurePolicy};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub root_route: RootRoute,
    pub login_path: String,
    pub session_timeout_ms: u64,
    pub session_failure_policy: SessionFailurePolicy,
    pub session_storage_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `shell.toml` and the
    /// environment, in increasing order of precedence.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::default())
    }

    fn load(env: config::Environment) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("port", 8080)?
            .set_default("dist_dir", "frontend/dist")?
            .set_default("root_route", "welcome")?
            .set_default("login_path", LOGIN_PATH)?
            .set_default("session_timeout_ms", 5000)?
            .set_default("session_failure_policy", "fail_closed")?
            .add_source(config::File::with_name("shell").required(false))
            .add_source(env)
            .build()
            .context("Failed to load configuration")?;

        let mut config: Self = settings
            .try_deserialize()
            .context("SUPABASE_URL and SUPABASE_ANON_KEY must be set")?;
        config.validate()?;
        config.canonicalize_login_path()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.supabase_url.starts_with("https://") || self.supabase_url.starts_with("http://"),
            "SUPABASE_URL must be an http(s) URL"
        );
        ensure!(
            !self.supabase_anon_key.is_empty(),
            "SUPABASE_ANON_KEY must not be empty"
        );
        ensure!(
            self.session_timeout_ms > 0,
            "SESSION_TIMEOUT_MS must be greater than zero"
        );

        Ok(())
    }

    /// Rewrite the login path to the route table's spelling.
    fn canonicalize_login_path(&mut self) -> Result<()> {
        let table = RouteTable::standard(self.root_route);
        let canonical = table
            .public_view_path(&self.login_path)
            .with_context(|| format!("LOGIN_PATH {} is not a public route", self.login_path))?;
        self.login_path = canonical.to_string();

        Ok(())
    }

    pub fn shell_config(&self) -> ShellConfig {
        ShellConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            root_route: self.root_route,
            login_path: self.login_path.clone(),
            session_timeout_ms: self.session_timeout_ms,
            session_failure_policy: self.session_failure_policy,
            session_storage_key: self.session_storage_key.clone(),
        }
    }
}
