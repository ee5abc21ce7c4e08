use crate::cli::{Backend, Cli, DuplicatePolicy};
use serde::Deserialize;
use std::path::PathBuf;

/// Resolved runtime configuration. Precedence: built-in defaults, then the
/// optional config file, then command-line flags. The metadata API is
/// configured from the environment only.
#[derive(Debug)]
pub struct Config {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub on_duplicate: DuplicatePolicy,
    pub api: Option<ApiConfig>,
}

/// Credentials for the OMDb-compatible metadata service. Both values must be
/// present; with either missing, adds fall back to manual entry.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    backend: Option<Backend>,
    data_dir: Option<PathBuf>,
    on_duplicate: Option<DuplicatePolicy>,
}

fn config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/cinelog/config.toml"))
}

fn load_file_config() -> anyhow::Result<FileConfig> {
    let Some(path) = config_path() else {
        return Ok(FileConfig::default());
    };
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

fn api_from_env() -> Option<ApiConfig> {
    let base_url = std::env::var("OMDB_API_URL").ok()?;
    let api_key = std::env::var("OMDB_API_KEY").ok()?;
    if base_url.trim().is_empty() || api_key.trim().is_empty() {
        return None;
    }
    Some(ApiConfig { base_url, api_key })
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let file = load_file_config()?;
        Ok(Self {
            backend: cli.backend.or(file.backend).unwrap_or(Backend::Json),
            data_dir: cli
                .data_dir
                .clone()
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from("data")),
            on_duplicate: cli
                .on_duplicate
                .or(file.on_duplicate)
                .unwrap_or(DuplicatePolicy::Overwrite),
            api: api_from_env(),
        })
    }

    /// The website export lands next to the catalog it renders.
    pub fn website_path(&self) -> PathBuf {
        self.data_dir.join("index.html")
    }
}
