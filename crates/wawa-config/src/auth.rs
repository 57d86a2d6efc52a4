use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Cookie-based JWT authentication configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HS256 signing secret; auth routes are disabled when empty
    #[serde(default)]
    pub jwt_secret: Option<SecretString>,

    /// SQLite database holding user accounts
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Name of the cookie carrying the token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Token and cookie lifetime (e.g. "60m")
    #[serde(default = "default_token_ttl", deserialize_with = "crate::duration::deserialize")]
    pub token_ttl: Duration,

    /// Mark the cookie `Secure` (HTTPS deployments)
    #[serde(default)]
    pub secure_cookie: bool,
}

impl AuthConfig {
    /// Signing secret, ignoring empty values
    pub fn jwt_secret(&self) -> Option<&SecretString> {
        crate::non_empty(self.jwt_secret.as_ref())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            database_path: default_database_path(),
            cookie_name: default_cookie_name(),
            token_ttl: default_token_ttl(),
            secure_cookie: false,
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("wawa.db")
}

fn default_cookie_name() -> String {
    "jwt_token".to_string()
}

const fn default_token_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}
