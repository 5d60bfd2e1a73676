//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Backend REST API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Algolia upstream settings (used by the proxy)
    #[serde(default)]
    pub algolia: AlgoliaConfig,

    /// GraphQL upstream settings (used by the proxy)
    #[serde(default)]
    pub graphql: GraphqlConfig,

    /// Category endpoints aggregated into the combined listing
    #[serde(default = "defaults::default_categories")]
    pub categories: Vec<CategoryDescriptor>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment-variable overrides on top of file values.
    ///
    /// Recognized variables: `API_BASE_URL`, `API_TOKEN`,
    /// `ALGOLIA_APP_ID`, `ALGOLIA_API_KEY`, `ALGOLIA_INDEX`.
    pub fn apply_env(&mut self) {
        if let Ok(base) = std::env::var("API_BASE_URL") {
            if !base.trim().is_empty() {
                self.api.base_url = base;
            }
        }
        if let Ok(token) = std::env::var("API_TOKEN") {
            if !token.trim().is_empty() {
                self.api.token = Some(token);
            }
        }
        if let Ok(app_id) = std::env::var("ALGOLIA_APP_ID") {
            if !app_id.trim().is_empty() {
                self.algolia.app_id = app_id;
            }
        }
        if let Ok(api_key) = std::env::var("ALGOLIA_API_KEY") {
            if !api_key.trim().is_empty() {
                self.algolia.api_key = api_key;
            }
        }
        if let Ok(index) = std::env::var("ALGOLIA_INDEX") {
            if !index.trim().is_empty() {
                self.algolia.index = index;
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.client.max_concurrent == 0 {
            return Err(AppError::validation("client.max_concurrent must be > 0"));
        }
        if self.client.page_size == 0 {
            return Err(AppError::validation("client.page_size must be > 0"));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        if self.categories.is_empty() {
            return Err(AppError::validation("No categories defined"));
        }
        for descriptor in &self.categories {
            if descriptor.endpoint.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Category '{}' has an empty endpoint",
                    descriptor.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            api: ApiConfig::default(),
            algolia: AlgoliaConfig::default(),
            graphql: GraphqlConfig::default(),
            categories: defaults::default_categories(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent requests during aggregation
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,

    /// Items requested per category endpoint
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Debounce interval for search input, in milliseconds
    #[serde(default = "defaults::debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
            page_size: defaults::page_size(),
            debounce_ms: defaults::debounce_ms(),
        }
    }
}

/// Backend REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Bearer token for the Authorization header
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            token: None,
        }
    }
}

/// Algolia upstream settings consumed by the search proxy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AlgoliaConfig {
    /// Application id, also part of the upstream hostname
    #[serde(default)]
    pub app_id: String,

    /// Search-only API key attached server-side
    #[serde(default)]
    pub api_key: String,

    /// Index queried by the proxy
    #[serde(default = "defaults::algolia_index")]
    pub index: String,
}

impl AlgoliaConfig {
    /// Upstream query URL for the configured application and index.
    pub fn query_url(&self) -> String {
        format!(
            "https://{}-dsn.algolia.net/1/indexes/{}/query",
            self.app_id, self.index
        )
    }
}

/// GraphQL upstream settings consumed by the artwork proxy route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlConfig {
    /// Metaphysics endpoint URL
    #[serde(default = "defaults::graphql_endpoint")]
    pub endpoint: String,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::graphql_endpoint(),
        }
    }
}

/// Kind of listing a category endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Gallery,
    Museum,
    Show,
}

impl CategoryKind {
    /// Key under `data` that holds this kind's item array.
    pub fn payload_key(&self) -> &'static str {
        match self {
            CategoryKind::Gallery => "galleries",
            CategoryKind::Museum => "museums",
            CategoryKind::Show => "shows",
        }
    }

    /// The listing kind produced by endpoints of this category kind.
    pub fn listing_kind(&self) -> super::ListingKind {
        match self {
            CategoryKind::Gallery => super::ListingKind::Gallery,
            CategoryKind::Museum => super::ListingKind::Museum,
            CategoryKind::Show => super::ListingKind::Show,
        }
    }
}

/// A category endpoint aggregated into the combined listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Display name, also the category label on normalized items
    pub name: String,

    /// Endpoint path relative to the API base URL
    pub endpoint: String,

    /// URL slug identifying the category
    pub slug: String,

    /// Which response shape this endpoint returns
    pub kind: CategoryKind,
}

mod defaults {
    use super::{CategoryDescriptor, CategoryKind};

    // Client defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; Atelier/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        5
    }
    pub fn page_size() -> usize {
        100
    }
    pub fn debounce_ms() -> u64 {
        500
    }

    // API defaults
    pub fn base_url() -> String {
        "http://localhost:5000".into()
    }

    // Upstream defaults
    pub fn algolia_index() -> String {
        "artworks".into()
    }
    pub fn graphql_endpoint() -> String {
        "https://metaphysics-cdn.artsy.net/v2".into()
    }

    // The compiled-in category list mirrored from the browsing pages.
    pub fn default_categories() -> Vec<CategoryDescriptor> {
        fn descriptor(
            name: &str,
            endpoint: &str,
            slug: &str,
            kind: CategoryKind,
        ) -> CategoryDescriptor {
            CategoryDescriptor {
                name: name.to_string(),
                endpoint: endpoint.to_string(),
                slug: slug.to_string(),
                kind,
            }
        }

        vec![
            descriptor(
                "Contemporary Galleries",
                "/api/galleries?category=contemporary",
                "contemporary-galleries",
                CategoryKind::Gallery,
            ),
            descriptor(
                "Modern Galleries",
                "/api/galleries?category=modern",
                "modern-galleries",
                CategoryKind::Gallery,
            ),
            descriptor(
                "Photography Galleries",
                "/api/galleries?category=photography",
                "photography-galleries",
                CategoryKind::Gallery,
            ),
            descriptor(
                "Sculpture Galleries",
                "/api/galleries?category=sculpture",
                "sculpture-galleries",
                CategoryKind::Gallery,
            ),
            descriptor(
                "Art Museums",
                "/api/museums?category=art",
                "art-museums",
                CategoryKind::Museum,
            ),
            descriptor(
                "Design Museums",
                "/api/museums?category=design",
                "design-museums",
                CategoryKind::Museum,
            ),
            descriptor(
                "University Museums",
                "/api/museums?category=university",
                "university-museums",
                CategoryKind::Museum,
            ),
            descriptor(
                "Current Shows",
                "/api/shows?status=current",
                "current-shows",
                CategoryKind::Show,
            ),
            descriptor(
                "Upcoming Shows",
                "/api/shows?status=upcoming",
                "upcoming-shows",
                CategoryKind::Show,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.client.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_categories() {
        let mut config = Config::default();
        config.categories.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn algolia_query_url_embeds_app_id_and_index() {
        let algolia = AlgoliaConfig {
            app_id: "ABC123".into(),
            api_key: "secret".into(),
            index: "artworks".into(),
        };
        assert_eq!(
            algolia.query_url(),
            "https://ABC123-dsn.algolia.net/1/indexes/artworks/query"
        );
    }

    #[test]
    fn default_categories_cover_all_kinds() {
        let categories = Config::default().categories;
        for kind in [CategoryKind::Gallery, CategoryKind::Museum, CategoryKind::Show] {
            assert!(categories.iter().any(|c| c.kind == kind));
        }
    }
}
