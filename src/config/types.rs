use serde::{Deserialize, Serialize};
use url::Url;

/// Largest number of books a single search may return
pub const MAX_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
    #[serde(default = "default_catalog_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_description_timeout")]
    pub description_timeout_seconds: u64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Fetch each book's description after searching
    #[serde(default = "default_true")]
    pub fetch_descriptions: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_catalog_url(),
            timeout_seconds: default_catalog_timeout(),
            description_timeout_seconds: default_description_timeout(),
            default_limit: default_limit(),
            fetch_descriptions: true,
        }
    }
}

fn default_catalog_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_catalog_timeout() -> u64 {
    10
}

fn default_description_timeout() -> u64 {
    6
}

fn default_limit() -> usize {
    MAX_SEARCH_LIMIT
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout for the "Hello" availability probe
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_seconds: u64,
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_seconds: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
    #[serde(default = "default_num_ctx")]
    pub num_ctx: u32,
    #[serde(default = "default_keep_alive")]
    pub keep_alive: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            url: default_generation_url(),
            model: default_model(),
            probe_timeout_seconds: default_probe_timeout(),
            analysis_timeout_seconds: default_analysis_timeout(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            num_predict: default_num_predict(),
            num_ctx: default_num_ctx(),
            keep_alive: default_keep_alive(),
        }
    }
}

fn default_generation_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "phi3:mini".to_string()
}

fn default_probe_timeout() -> u64 {
    30
}

fn default_analysis_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.6
}

fn default_top_p() -> f32 {
    0.9
}

fn default_num_predict() -> u32 {
    400
}

fn default_num_ctx() -> u32 {
    2048
}

fn default_keep_alive() -> String {
    "10m".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

/// Terminal color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Soft,
    Default,
    Mono,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Soft => write!(f, "soft"),
            Theme::Default => write!(f, "default"),
            Theme::Mono => write!(f, "mono"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" => Ok(Theme::Soft),
            "default" => Ok(Theme::Default),
            "mono" | "monochrome" | "plain" => Ok(Theme::Mono),
            other => Err(format!("Unknown theme '{}' (expected soft, default or mono)", other)),
        }
    }
}

impl Config {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_http_url(&self.catalog.base_url) {
            errors.push(format!("catalog.base_url: {}", e));
        }
        if let Err(e) = validate_http_url(&self.generation.url) {
            errors.push(format!("generation.url: {}", e));
        }
        if self.generation.model.trim().is_empty() {
            errors.push("generation.model must not be empty".to_string());
        }

        for (name, value) in [
            ("catalog.timeout_seconds", self.catalog.timeout_seconds),
            ("catalog.description_timeout_seconds", self.catalog.description_timeout_seconds),
            ("generation.probe_timeout_seconds", self.generation.probe_timeout_seconds),
            ("generation.analysis_timeout_seconds", self.generation.analysis_timeout_seconds),
        ] {
            if value == 0 {
                errors.push(format!("{} must be greater than zero", name));
            }
        }

        if self.catalog.default_limit == 0 || self.catalog.default_limit > MAX_SEARCH_LIMIT {
            errors.push(format!(
                "catalog.default_limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn validate_http_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| format!("'{}' is not a valid URL ({})", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("unsupported scheme '{}'", scheme)),
    }
}
