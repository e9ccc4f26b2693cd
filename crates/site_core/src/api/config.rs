//! Build-time API endpoints.

/// Featured-stores endpoint used when none is configured.
pub const DEFAULT_FEATURED_STORES_ENDPOINT: &str = "https://api.guiabrecho.com.br/site/featured";

/// Backend endpoints baked into the build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiConfig {
    /// Production API origin.
    pub base_url: Option<String>,
    /// API origin used when the site is served from a development host.
    pub dev_base_url: Option<String>,
    /// Absolute URL of the featured-stores list.
    pub featured_stores_endpoint: String,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Whether `hostname` is a local or development deployment.
pub fn is_dev_host(hostname: Option<&str>) -> bool {
    let Some(host) = hostname.filter(|host| !host.is_empty()) else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    host == "localhost" || host == "127.0.0.1" || host.starts_with("dev.") || host.contains(".dev")
}

impl ApiConfig {
    /// Builds a config from raw values, trimming each; blank values count as unset.
    pub fn from_raw(
        base_url: Option<&str>,
        dev_base_url: Option<&str>,
        featured_stores_endpoint: Option<&str>,
    ) -> Self {
        Self {
            base_url: non_blank(base_url),
            dev_base_url: non_blank(dev_base_url),
            featured_stores_endpoint: non_blank(featured_stores_endpoint)
                .unwrap_or_else(|| DEFAULT_FEATURED_STORES_ENDPOINT.to_string()),
        }
    }

    /// Reads `GUIA_API_BASE_URL`, `GUIA_DEV_API_BASE_URL`, and `GUIA_FEATURED_STORES_ENDPOINT`
    /// as set when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::from_raw(
            option_env!("GUIA_API_BASE_URL"),
            option_env!("GUIA_DEV_API_BASE_URL"),
            option_env!("GUIA_FEATURED_STORES_ENDPOINT"),
        )
    }

    /// API origin for a page served from `hostname`. Development hosts never fall back to the
    /// production origin.
    pub fn select_api_base(&self, hostname: Option<&str>) -> Option<&str> {
        if is_dev_host(hostname) {
            self.dev_base_url.as_deref()
        } else {
            self.base_url.as_deref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_hosts_are_detected() {
        assert!(is_dev_host(Some("localhost")));
        assert!(is_dev_host(Some("127.0.0.1")));
        assert!(is_dev_host(Some("DEV.guiabrecho.com.br")));
        assert!(is_dev_host(Some("preview.dev.example")));
        assert!(!is_dev_host(Some("guiabrecho.com.br")));
        assert!(!is_dev_host(None));
    }

    #[test]
    fn base_is_selected_by_host() {
        let config = ApiConfig::from_raw(
            Some(" https://api.guiabrecho.com.br "),
            Some("https://dev-api.guiabrecho.com.br"),
            None,
        );
        assert_eq!(
            config.select_api_base(Some("guiabrecho.com.br")),
            Some("https://api.guiabrecho.com.br")
        );
        assert_eq!(
            config.select_api_base(Some("localhost")),
            Some("https://dev-api.guiabrecho.com.br")
        );
        assert_eq!(config.featured_stores_endpoint, DEFAULT_FEATURED_STORES_ENDPOINT);

        let prod_only = ApiConfig::from_raw(Some("https://api.guiabrecho.com.br"), Some("  "), None);
        assert_eq!(prod_only.select_api_base(Some("localhost")), None);
    }
}
