use super::OrgDetailsService;
use crate::error::{CollectionTreeError, Result};
use crate::model::SystemSetting;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

pub const COMING_SOON_SETTING: &str = "contentComingSoonMsg";

/// Reads the coming-soon setting from a local JSON file.
///
/// The file holds either a system-setting object (`{"value": "<json>"}`) or
/// the bare array of per-org entries.
#[derive(Debug, Clone)]
pub struct FileOrgDetails {
    root_org_id: Option<String>,
    path: PathBuf,
}

impl FileOrgDetails {
    pub fn new(root_org_id: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            root_org_id,
            path: path.into(),
        }
    }
}

#[async_trait]
impl OrgDetailsService for FileOrgDetails {
    fn root_org_id(&self) -> Option<String> {
        self.root_org_id.clone()
    }

    async fn coming_soon_message(&self) -> Result<SystemSetting> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CollectionTreeError::io(&self.path, e))?;
        let context = self.path.display().to_string();
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| CollectionTreeError::json(&context, e))?;

        match value {
            Value::Array(_) => Ok(SystemSetting {
                id: None,
                field: Some(COMING_SOON_SETTING.to_string()),
                value: Some(value.to_string()),
            }),
            other => serde_json::from_value(other).map_err(|e| CollectionTreeError::json(context, e)),
        }
    }
}

/// Serves a fixed setting value; `None` means the platform has none configured.
#[derive(Debug, Clone, Default)]
pub struct StaticOrgDetails {
    root_org_id: Option<String>,
    value: Option<String>,
}

impl StaticOrgDetails {
    pub fn new(root_org_id: Option<String>, value: Option<String>) -> Self {
        Self { root_org_id, value }
    }
}

#[async_trait]
impl OrgDetailsService for StaticOrgDetails {
    fn root_org_id(&self) -> Option<String> {
        self.root_org_id.clone()
    }

    async fn coming_soon_message(&self) -> Result<SystemSetting> {
        Ok(SystemSetting {
            id: Some(COMING_SOON_SETTING.to_string()),
            field: Some(COMING_SOON_SETTING.to_string()),
            value: self.value.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SettingsEnvelope {
    result: Option<SettingsResult>,
}

#[derive(Debug, Deserialize)]
struct SettingsResult {
    response: Option<SystemSetting>,
}

/// Fetches the coming-soon setting from the platform's system settings API.
#[derive(Debug, Clone)]
pub struct HttpOrgDetails {
    client: reqwest::Client,
    base_url: String,
    root_org_id: Option<String>,
}

impl HttpOrgDetails {
    pub fn new(base_url: &str, root_org_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            root_org_id,
        }
    }

    fn setting_url(&self) -> String {
        format!(
            "{}/data/v1/system/settings/get/{}",
            self.base_url, COMING_SOON_SETTING
        )
    }
}

#[async_trait]
impl OrgDetailsService for HttpOrgDetails {
    fn root_org_id(&self) -> Option<String> {
        self.root_org_id.clone()
    }

    async fn coming_soon_message(&self) -> Result<SystemSetting> {
        let url = self.setting_url();
        tracing::debug!("Fetching coming soon setting from {}", url);

        let envelope: SettingsEnvelope = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        envelope
            .result
            .and_then(|r| r.response)
            .ok_or_else(|| CollectionTreeError::MissingSetting(COMING_SOON_SETTING.to_string()))
    }
}
