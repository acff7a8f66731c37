use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1";
pub(crate) const DEFAULT_CURRENCY: &str = "$";

/// Page sizes used by the different list surfaces.
pub(crate) const ADMIN_PAGE_SIZE: usize = 10;
pub(crate) const CATALOG_PAGE_SIZE: usize = 8;
pub(crate) const GRID_PAGE_SIZE: usize = 12;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub currency: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self::fallback();

        // `window.ENV.API_URL` is the documented key; `api_url` is still accepted.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    let read = |key: &str| {
                        js_sys::Reflect::get(&env, &key.into())
                            .ok()
                            .and_then(|v| v.as_string())
                    };

                    if let Some(url) = read("API_URL").or_else(|| read("api_url")) {
                        config.api_url = url;
                    }
                    if let Some(currency) = read("CURRENCY") {
                        config.currency = currency;
                    }
                }
            }
        }

        config.api_url = normalize_base_url(&config.api_url);
        config
    }

    pub fn fallback() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Base URLs are joined with paths that start with `/`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://api.example.com/v1//"),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_normalize_base_url_empty_falls_back() {
        assert_eq!(normalize_base_url("   "), DEFAULT_API_URL);
    }

    #[test]
    fn test_fallback_config() {
        let c = EnvConfig::fallback();
        assert_eq!(c.api_url, DEFAULT_API_URL);
        assert_eq!(c.currency, "$");
    }
}
