#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL without a trailing slash, e.g. `http://localhost:8000`.
    pub backend_url: String,
    pub env: Environment,
    pub log_level: String,
    /// City whose pharmacies the map view loads.
    pub default_city: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
