//! Configuration: optional `ferias.toml` merged with command-line flags
//!
//! ```toml
//! title = "Dashboard de Férias"
//! data = "ferias.xlsx"
//! sheet = "Ferias2024"
//! bind = "127.0.0.1:8501"
//!
//! [colors]
//! RH = "#C0392B"
//! MB = "#1B4F72"
//! ```

use ferias_core::Roster;
use ferias_loader::LoadError;
use ferias_render::DepartmentPalette;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ferias.toml";
/// Spreadsheet read when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "ferias.xlsx";
/// Page title when nothing else is configured
pub const DEFAULT_TITLE: &str = "Dashboard de Férias";
/// Listen address for `serve`
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid color '{color}' for department '{department}' (expected #RGB or #RRGGBB)")]
    InvalidColor { department: String, color: String },
}

/// Contents of `ferias.toml`; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub title: Option<String>,
    pub data: Option<PathBuf>,
    pub sheet: Option<String>,
    pub bind: Option<SocketAddr>,
    /// Extra or overriding department colours
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        for (department, color) in &config.colors {
            if !is_hex_color(color) {
                return Err(ConfigError::InvalidColor {
                    department: department.clone(),
                    color: color.clone(),
                });
            }
        }
        Ok(config)
    }

    /// Load an explicit config file, or `ferias.toml` if it exists.
    ///
    /// A missing default file is not an error; a missing explicit one is.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text, &path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn palette(&self) -> DepartmentPalette {
        self.colors
            .iter()
            .fold(DepartmentPalette::new(), |palette, (dept, color)| {
                palette.with_color(dept.as_str(), color.as_str())
            })
    }
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Effective settings after merging flags over the config file
#[derive(Debug, Clone)]
pub struct Settings {
    pub data: PathBuf,
    pub sheet: Option<String>,
    pub title: String,
    pub palette: DepartmentPalette,
}

impl Settings {
    pub fn resolve(file: &FileConfig, data: Option<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            data: data
                .or_else(|| file.data.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            sheet: sheet.or_else(|| file.sheet.clone()),
            title: file.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            palette: file.palette(),
        }
    }

    /// Read the spreadsheet; done afresh on every interaction
    pub fn load(&self) -> Result<Roster, LoadError> {
        ferias_loader::load_sheet(&self.data, self.sheet.as_deref())
    }
}
