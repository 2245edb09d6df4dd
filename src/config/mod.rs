use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(alias = "endpoint")]
    pub url: Option<String>,
    pub input_file: Option<String>,
    #[serde(alias = "query")]
    pub search: Option<String>,
    pub region: Option<String>,
    pub population: Option<String>,
    pub page_size: Option<usize>,
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub theme: Option<String>,
    pub no_color: Option<bool>,
    pub interactive: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".countrydeck").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn expand_tilde_string(path: &str) -> String {
    expand_tilde(path).to_string_lossy().to_string()
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    let blank = contents
        .lines()
        .map(str::trim)
        .all(|l| l.is_empty() || l.starts_with('#'));
    if blank {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str::<ConfigFile>(contents).map_err(|e| e.to_string())
}

pub fn load_config(path: &Path, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

const DEFAULT_CONFIG_YAML: &str = r#"# countrydeck config
#
# Location (default):
#   ~/.countrydeck/config.yml

# Data source (choose one)
url: https://restcountries.com/v3.1/all
# input_file: ./countries.json

# HTTP (optional)
# timeout: 10
# proxy: http://127.0.0.1:8080

# Default filters
# search: ""
# region: Europe
# population: all   # all, lt1m, 1m-10m, gt10m

# View
page_size: 20
theme: light
interactive: false

# Output (optional)
# output: ./countries.html
# output_format: html
no_color: false
"#;

/// Writes the commented template unless a file is already there.
/// Returns whether a new file was written.
pub fn write_default_config(path: &Path) -> Result<bool, String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create '{}': {e}", parent.display()))?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(format!("failed to create '{}': {e}", path.display())),
    };
    file.write_all(DEFAULT_CONFIG_YAML.as_bytes())
        .map_err(|e| format!("failed to write '{}': {e}", path.display()))?;
    Ok(true)
}
