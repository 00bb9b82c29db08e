use std::env;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub default_style: Option<String>,
    pub output_dir: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            user_agent: None,
        }
    }
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `RDECOR_BACKEND_URL`, falling back to `BACKEND_URL`, then the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("RDECOR_BACKEND_URL")
            .or_else(|| lookup("BACKEND_URL"))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let user_agent = lookup("RDECOR_USER_AGENT");

        BackendConfig {
            base_url,
            user_agent,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Base URL without a trailing slash, so endpoint paths can be appended directly.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend: BackendConfig::default(),
            default_style: None,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            backend: BackendConfig::from_lookup(&lookup),
            default_style: lookup("RDECOR_DEFAULT_STYLE"),
            output_dir: lookup("RDECOR_OUTPUT_DIR"),
        }
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_backend() {
        let config = BackendConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.base_url, "http://localhost:8001");
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn prefers_crate_specific_variable() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            ("BACKEND_URL", "http://fallback:9000"),
            ("RDECOR_BACKEND_URL", "http://design:8001/"),
        ]));
        assert_eq!(config.base_url, "http://design:8001/");
        assert_eq!(config.normalized_base_url(), "http://design:8001");

        let fallback = BackendConfig::from_lookup(lookup_from(&[("BACKEND_URL", "http://fallback:9000")]));
        assert_eq!(fallback.base_url, "http://fallback:9000");
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = BackendConfig::from_lookup(lookup_from(&[("RDECOR_BACKEND_URL", "  ")]));
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new()
            .with_backend(BackendConfig::new().with_base_url("http://127.0.0.1:9999"))
            .with_default_style("Coastal")
            .with_output_dir("renders");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.default_style.as_deref(), Some("Coastal"));
        assert_eq!(config.output_dir.as_deref(), Some("renders"));

        let from_env = Config::from_lookup(lookup_from(&[("RDECOR_DEFAULT_STYLE", "Industrial")]));
        assert_eq!(from_env.default_style.as_deref(), Some("Industrial"));
        assert_eq!(from_env.backend.base_url, DEFAULT_BACKEND_URL);
    }
}
