use crate::*;
use serde::{Deserialize, Deserializer};

pub static DEFAULT_PAGES_PATH: &str = "src/pages";
pub static DEFAULT_PAGE: &str = "inicio";
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(250);
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(2000);

/// Holds the navigation settings of the site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// How long the exit transition plays before the fragment is requested
    #[serde(rename = "transition_ms", deserialize_with = "millis")]
    pub transition_duration: Duration,
    /// Pause between a failed load and the attempt to show the default page
    #[serde(rename = "fallback_ms", deserialize_with = "millis")]
    pub fallback_delay: Duration,
    /// Directory the fragments are served from, relative to the site root
    pub pages_path: String,
    pub default_page: PageName,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            transition_duration: DEFAULT_TRANSITION_DURATION,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
            pages_path: DEFAULT_PAGES_PATH.to_owned(),
            default_page: PageName(DEFAULT_PAGE.to_owned()),
        }
    }
}

impl SiteConfig {
    /// Reads settings from toml, keys that are missing keep their defaults
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Url of the fragment that holds `page`
    pub fn fragment_url(&self, page: &PageName) -> String {
        let dir = self.pages_path.trim_end_matches('/');
        if dir.is_empty() {
            format!("{page}.html")
        } else {
            format!("{dir}/{page}.html")
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_site() {
        let config = SiteConfig::default();
        assert_eq!(config.transition_duration, Duration::from_millis(250));
        assert_eq!(config.fallback_delay, Duration::from_secs(2));
        assert_eq!(config.default_page.as_str(), "inicio");
        let page = PageName::parse("contacto").unwrap();
        assert_eq!(config.fragment_url(&page), "src/pages/contacto.html");
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = SiteConfig::from_toml(
            r#"
            transition_ms = 100
            pages_path = "fragments/"
            "#,
        )
        .unwrap();
        assert_eq!(config.transition_duration, Duration::from_millis(100));
        assert_eq!(config.fallback_delay, DEFAULT_FALLBACK_DELAY);
        assert_eq!(config.default_page.as_str(), DEFAULT_PAGE);
        let page = PageName::parse("inicio").unwrap();
        assert_eq!(config.fragment_url(&page), "fragments/inicio.html");
    }

    #[test]
    fn blank_default_page_is_rejected() {
        let err = SiteConfig::from_toml(r#"default_page = " ""#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_pages_path_points_at_site_root() {
        let config = SiteConfig {
            pages_path: String::new(),
            ..Default::default()
        };
        let page = PageName::parse("inicio").unwrap();
        assert_eq!(config.fragment_url(&page), "inicio.html");
    }
}
