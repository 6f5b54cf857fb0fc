use crate::decorate::ParentMessageFallback;
use crate::error::Result;
use crate::model::{CollectionTreeOptions, FileType};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub session: SessionConfig,
    pub locale: LocaleConfig,
    pub coming_soon: ComingSoonConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TreeConfig {
    pub folder_icon: Option<String>,
    pub file_icon: String,
    pub custom_file_icon: HashMap<FileType, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SessionConfig {
    pub logged_in: bool,
    pub user_root_org_id: Option<String>,
    pub default_root_org_id: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LocaleConfig {
    pub default_language: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComingSoonConfig {
    pub source: ComingSoonSource,
    pub default_message: String,
    pub parent_fallback: ParentMessageFallback,
}

/// Where the organization-level coming-soon setting comes from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComingSoonSource {
    None,
    File { path: PathBuf },
    Http { base_url: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tree: TreeConfig {
                folder_icon: Some("fa fa-folder-o".to_string()),
                file_icon: "fa fa-file-o".to_string(),
                custom_file_icon: default_file_icons(),
            },
            session: SessionConfig {
                logged_in: false,
                user_root_org_id: None,
                default_root_org_id: None,
            },
            locale: LocaleConfig {
                default_language: "en".to_string(),
                languages: vec!["en".to_string(), "hi".to_string(), "ta".to_string()],
            },
            coming_soon: ComingSoonConfig {
                source: ComingSoonSource::None,
                default_message: "Content coming soon".to_string(),
                parent_fallback: ParentMessageFallback::Observed,
            },
        }
    }
}

fn default_file_icons() -> HashMap<FileType, String> {
    HashMap::from([
        (FileType::Video, "fa fa-file-video-o".to_string()),
        (FileType::Youtube, "fa fa-youtube-play".to_string()),
        (FileType::Pdf, "fa fa-file-pdf-o".to_string()),
        (FileType::Epub, "fa fa-book".to_string()),
        (FileType::Url, "fa fa-link".to_string()),
    ])
}

impl TreeConfig {
    pub fn to_options(&self) -> CollectionTreeOptions {
        CollectionTreeOptions {
            folder_icon: self.folder_icon.clone(),
            file_icon: self.file_icon.clone(),
            custom_file_icon: self.custom_file_icon.clone(),
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("coltree").join("config.toml"))
}

pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig> {
    // If no config path is specified and no configs exist, just use defaults
    let has_config = config_path.is_some()
        || user_config_path().map(|p| p.exists()).unwrap_or(false);

    if !has_config {
        return Ok(AppConfig::default());
    }

    let mut builder = Config::builder();

    // Start with defaults
    builder = builder.add_source(Config::try_from(&AppConfig::default())?);

    // Add system config if it exists
    if let Some(proj_dirs) = ProjectDirs::from("org", "coltree", "coltree") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            builder = builder.add_source(File::from(system_config));
        }
    }

    // Add user config if it exists
    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            builder = builder.add_source(File::from(user_config));
        }
    }

    // Add specified config file
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path));
    }

    // COLTREE__SESSION__LOGGED_IN=true style overrides
    builder = builder.add_source(Environment::with_prefix("COLTREE").separator("__"));

    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}

/// Writes `config` as TOML, defaulting to the user config path.
pub fn save_config(config: &AppConfig, path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let config_path = path
        .or_else(user_config_path)
        .ok_or_else(|| anyhow::anyhow!("No home directory to place the config in"))?;

    // Ensure directory exists
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&config_path, toml_string)?;

    Ok(config_path)
}
