use std::fmt;

/// Default root of the receipt-check API.
pub const DEFAULT_BASE_URL: &str = "https://proverkacheka.nalog.ru:9999";

/// Environment variable holding the API login.
pub const ENV_LOGIN: &str = "CHECKFNS_APILOGIN";
/// Environment variable holding the API password.
pub const ENV_PASSWORD: &str = "CHECKFNS_APIPWD";
/// Environment variable enabling raw request/response dumps.
pub const ENV_DEBUG: &str = "CHECKFNS_DEBUG";

/// Credentials and switches for the receipt-check API.
///
/// Built once at start-up and passed by reference to every call.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP Basic login.
    pub login: String,
    /// HTTP Basic password.
    pub password: String,
    /// Dump raw requests and responses to the log.
    pub debug: bool,
    /// Scheme, host and port of the API, without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Create a configuration with the given credentials and defaults otherwise.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            debug: false,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Read `CHECKFNS_APILOGIN`, `CHECKFNS_APIPWD` and `CHECKFNS_DEBUG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables read as empty. Any non-empty `CHECKFNS_DEBUG`
    /// enables debug dumps.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self::new(get(ENV_LOGIN), get(ENV_PASSWORD)).with_debug(!get(ENV_DEBUG).is_empty())
    }

    /// Enable or disable raw dumps.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("login", &self.login)
            .field("password", &"***")
            .field("debug", &self.debug)
            .field("base_url", &self.base_url)
            .finish()
    }
}
