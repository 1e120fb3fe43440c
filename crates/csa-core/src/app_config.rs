use std::net::SocketAddr;

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

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub apify_api_token: String,
    pub provider_url: String,
    pub provider_timeout_secs: u64,
    pub provider_user_agent: String,
    /// Upper bound on comments requested from the provider per post.
    pub max_comments: u32,
    /// Upper bound on comment pages the provider walks per post.
    pub max_pages: u32,
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("apify_api_token", &"[redacted]")
            .field("provider_url", &self.provider_url)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("provider_user_agent", &self.provider_user_agent)
            .field("max_comments", &self.max_comments)
            .field("max_pages", &self.max_pages)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}
