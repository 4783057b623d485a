use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Catalog-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    /// Absolute URL of the site index page listing every collection
    pub fn index_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.site.base_url)?.join(&self.site.index_path)
    }
}

/// The catalogue site being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Root address of the site, ending with `/`
    pub base_url: String,

    /// Path of the index page, relative to `base_url`
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

/// HTTP client behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hard per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Where results are written
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving one CSV file per collection
    pub csv_dir: PathBuf,

    /// Directory receiving downloaded item images
    pub images_dir: PathBuf,

    /// Optional markdown report of the run
    #[serde(default)]
    pub summary_path: Option<PathBuf>,
}

/// Image download settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImagesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// JPEG encoder quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_index_path() -> String {
    "index.html".to_string()
}

fn default_user_agent() -> String {
    format!("catalog-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_jpeg_quality() -> u8 {
    85
}
